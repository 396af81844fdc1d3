mod engine;
mod error;
mod types;

pub use engine::{MAX_TERM_YEARS, project, validate_input};
pub use error::InvalidInputError;
pub use types::{
    ChartPoint, CompoundingFrequency, ProjectionInput, ProjectionPoint, ProjectionSeries,
    ProjectionSummary,
};
