pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::ChronoTzMath;
pub use config::CatalogFile;
pub use core::clock::LiveClock;
pub use core::search::{SearchSortCoordinator, SortKey};
pub use domain::catalog::Catalog;
pub use domain::model::{
    CatalogEntry, ConversionEntry, ConversionInput, CustomDateTime, DerivedRecord, DstTransitions,
    RecordBatch, TimeParts, ZoneId, ZoneMetadata,
};
pub use domain::ports::TimezoneMath;
pub use utils::error::{Result, TzError};

#[cfg(feature = "cli")]
pub use config::CliConfig;
