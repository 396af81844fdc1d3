#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be >= 0, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("investment term must be a whole number of years, got {value}")]
    NonIntegerTerm { value: f64 },

    #[error("investment term must be > 0")]
    ZeroTerm,

    #[error("investment term of {years} years exceeds the maximum of {max}")]
    TermTooLong { years: f64, max: u32 },

    #[error("projection overflows at month {period_index}; inputs are too large")]
    Overflow { period_index: u32 },
}
