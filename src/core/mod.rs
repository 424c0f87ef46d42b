pub mod clock;
pub mod convert;
pub mod dst;
pub mod records;
pub mod search;
pub mod stats;

pub use crate::domain::catalog::Catalog;
pub use crate::domain::model::{
    ConversionEntry, ConversionInput, DerivedRecord, RecordBatch, ZoneId,
};
pub use crate::domain::ports::TimezoneMath;
pub use crate::utils::error::Result;
