pub mod filters;
pub mod format;
pub mod geo;
pub mod models;
