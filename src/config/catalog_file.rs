use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Catalog;
use crate::domain::model::CatalogEntry;
use crate::domain::ports::TimezoneMath;
use crate::utils::error::{Result, TzError};

/// TOML catalog override, so the demo can run against a custom zone set:
///
/// ```toml
/// [[timezone]]
/// zone = "Pacific/Auckland"
/// city = "Auckland"
/// flag = "🇳🇿"
/// region = "NZST/NZDT"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub timezone: Vec<CatalogFileEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFileEntry {
    pub zone: String,
    pub city: String,
    pub flag: Option<String>,
    pub region: String,
}

impl CatalogFile {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        tracing::debug!("loaded catalog file: {}", path.display());
        Self::parse(&text)
    }

    /// Validate every zone against the math adapter and produce the
    /// catalog. Each accepted zone is also registered with the adapter.
    pub fn into_catalog(self, math: &dyn TimezoneMath) -> Result<Catalog> {
        if self.timezone.is_empty() {
            return Err(TzError::Config {
                message: "catalog file contains no timezones".to_string(),
            });
        }
        let mut entries = Vec::with_capacity(self.timezone.len());
        for entry in self.timezone {
            if !math.validate_and_register(&entry.zone) {
                return Err(TzError::Config {
                    message: format!("catalog file names an invalid timezone: {}", entry.zone),
                });
            }
            entries.push(CatalogEntry::new(
                &entry.zone,
                &entry.city,
                entry.flag.as_deref().unwrap_or(""),
                &entry.region,
            ));
        }
        Ok(Catalog::from_entries(entries))
    }
}
