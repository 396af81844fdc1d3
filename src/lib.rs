pub mod core;
pub mod form;
