use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// IANA timezone identifier, e.g. "Europe/London". Validated by catalog
/// membership or by the math adapter's own registration call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(identifier: &str) -> Self {
        Self::new(identifier)
    }
}

/// Calendar/clock decomposition of an instant as seen in one specific
/// timezone. Not self-describing; always paired with the zone that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeParts {
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|d| d.and_hms_opt(self.hour, self.minute, self.second))
    }
}

impl std::fmt::Display for TimeParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Preferred short labels for a zone, when the tz database carries
/// alphabetic ones ("GMT"/"BST"); zones with purely numeric designators
/// ("+04") have none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredAbbreviations {
    pub standard: String,
    pub dst: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneMetadata {
    pub standard_offset_minutes: i32,
    /// Total UTC offset while daylight saving is active; absent for
    /// fixed-offset zones.
    pub dst_offset_minutes: Option<i32>,
    pub preferred_abbreviations: Option<PreferredAbbreviations>,
}

/// The two daylight-saving transition instants of one calendar year.
/// Zones without DST yield no pair at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DstTransitions {
    pub spring_forward: DateTime<Utc>,
    pub fall_back: DateTime<Utc>,
}

/// Static display metadata for one catalog zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub zone: ZoneId,
    pub city: String,
    pub flag: String,
    pub region: String,
}

impl CatalogEntry {
    pub fn new(zone: &str, city: &str, flag: &str, region: &str) -> Self {
        Self {
            zone: ZoneId::new(zone),
            city: city.to_string(),
            flag: flag.to_string(),
            region: region.to_string(),
        }
    }
}

/// Render-ready record for one zone at one instant. Built fresh per
/// (instant, zone) pair; a changed instant produces a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedRecord {
    pub zone: ZoneId,
    pub city: String,
    pub flag: String,
    pub region: String,
    pub local_time: NaiveDateTime,
    pub is_dst: bool,
    pub in_business_hours: bool,
    pub abbreviation: String,
}

/// One batch of derived records, all computed from the single instant the
/// batch carries. No two records in a batch ever observe different "now"
/// values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBatch {
    pub instant: DateTime<Utc>,
    pub records: Vec<DerivedRecord>,
}

/// User-entered conversion request. Empty text fields are a normal
/// transient state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionInput {
    pub date_text: String,
    pub time_text: String,
    pub source_zone: ZoneId,
}

/// One catalog zone's entry in a conversion result. The source zone's
/// entry carries the resolved source instant verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionEntry {
    pub zone: ZoneId,
    pub city: String,
    pub flag: String,
    pub region: String,
    pub instant: DateTime<Utc>,
    pub is_dst: bool,
}

/// Parsed custom date/time for a single zone, with its derived flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDateTime {
    pub instant: DateTime<Utc>,
    pub is_dst: bool,
    pub in_business_hours: bool,
}
