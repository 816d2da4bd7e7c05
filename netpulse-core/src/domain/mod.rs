pub mod dataset;
pub mod error;
pub mod kpi;
pub mod project;
pub mod quality;

pub use dataset::{Dataset, Value};
pub use error::DomainError;
