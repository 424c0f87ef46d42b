use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::catalog::Catalog;
use crate::domain::model::{DerivedRecord, RecordBatch, ZoneId, ZoneMetadata};
use crate::domain::ports::TimezoneMath;
use crate::utils::error::{Result, TzError};

/// Build one render-ready record per zone for a single instant, input
/// order preserved. Any zone missing from the catalog fails the whole
/// batch: silently shrinking the display set would surprise the caller.
pub fn build_records(
    math: &dyn TimezoneMath,
    catalog: &Catalog,
    instant: DateTime<Utc>,
    zones: &[ZoneId],
) -> Result<RecordBatch> {
    let mut records = Vec::with_capacity(zones.len());
    for zone in zones {
        let entry = catalog.lookup(zone).ok_or_else(|| TzError::UnknownTimezone {
            identifier: zone.to_string(),
        })?;
        let parts = math.to_local_parts(instant, zone)?;
        let local_time = parts.to_naive().ok_or_else(|| TzError::Processing {
            message: format!("adapter produced invalid local parts {parts} for {zone}"),
        })?;
        let is_dst = math.is_daylight_saving(instant, zone)?;
        records.push(DerivedRecord {
            zone: zone.clone(),
            city: entry.city.clone(),
            flag: entry.flag.clone(),
            region: entry.region.clone(),
            local_time,
            is_dst,
            in_business_hours: math.in_business_hours(instant, zone)?,
            abbreviation: derive_abbreviation(math, zone, is_dst),
        });
    }
    Ok(RecordBatch { instant, records })
}

/// Convenience for the common case: every catalog zone at once.
pub fn build_catalog_records(
    math: &dyn TimezoneMath,
    catalog: &Catalog,
    instant: DateTime<Utc>,
) -> Result<RecordBatch> {
    build_records(math, catalog, instant, &catalog.zones())
}

/// Short label for a zone's current offset state. Prefers the database
/// abbreviations (DST variant while active), synthesizes "GMT±HH[:MM]"
/// from the active offset otherwise, and falls back to the literal "UTC"
/// if the adapter cannot answer at all.
pub fn derive_abbreviation(math: &dyn TimezoneMath, zone: &ZoneId, is_dst: bool) -> String {
    match try_abbreviation(math, zone, is_dst) {
        Ok(abbreviation) => abbreviation,
        Err(error) => {
            tracing::debug!("abbreviation derivation failed for {zone}: {error}");
            "UTC".to_string()
        }
    }
}

fn try_abbreviation(math: &dyn TimezoneMath, zone: &ZoneId, is_dst: bool) -> Result<String> {
    let metadata = math.metadata(zone)?;
    if let Some(preferred) = metadata.preferred_abbreviations {
        return Ok(if is_dst {
            preferred.dst.unwrap_or(preferred.standard)
        } else {
            preferred.standard
        });
    }

    let offset_minutes = if is_dst {
        metadata
            .dst_offset_minutes
            .unwrap_or(metadata.standard_offset_minutes)
    } else {
        metadata.standard_offset_minutes
    };
    let sign = if offset_minutes >= 0 { '+' } else { '-' };
    let hours = offset_minutes.abs() / 60;
    let minutes = offset_minutes.abs() % 60;
    Ok(if minutes == 0 {
        format!("GMT{sign}{hours:02}")
    } else {
        format!("GMT{sign}{hours:02}:{minutes:02}")
    })
}

/// Single-zone deep dive for the API showcase: the derived record plus
/// the raw adapter metadata behind it.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneAnalysis {
    pub record: DerivedRecord,
    pub metadata: ZoneMetadata,
}

pub fn analyze_zone(
    math: &dyn TimezoneMath,
    catalog: &Catalog,
    instant: DateTime<Utc>,
    zone: &ZoneId,
) -> Result<ZoneAnalysis> {
    let batch = build_records(math, catalog, instant, std::slice::from_ref(zone))?;
    let record = batch
        .records
        .into_iter()
        .next()
        .ok_or_else(|| TzError::Processing {
            message: format!("no record produced for {zone}"),
        })?;
    Ok(ZoneAnalysis {
        record,
        metadata: math.metadata(zone)?,
    })
}
