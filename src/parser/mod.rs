pub mod batch;
pub mod stylesheet;

pub use stylesheet::{extract, Extraction, PrimitiveUsage};
