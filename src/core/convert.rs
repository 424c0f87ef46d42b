use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};

use crate::domain::catalog::Catalog;
use crate::domain::model::{ConversionEntry, ConversionInput, CustomDateTime, TimeParts, ZoneId};
use crate::domain::ports::TimezoneMath;
use crate::utils::error::{Result, TzError};

/// Express one user-entered moment in every catalog zone.
///
/// Incomplete text fields are a normal transient state and yield an empty
/// result; malformed text, and a wall clock that lands in a
/// daylight-saving gap in the source or any target zone, are recovered
/// with a warning and an empty result. Other adapter failures propagate.
///
/// The source zone's entry is the resolved source instant verbatim. Every
/// other entry re-derives local parts from the source instant and
/// reinterprets them in the target zone, which reprojects the wall-clock
/// digits rather than the absolute instant. That matches the behavior the
/// demo has always shipped; see DESIGN.md before changing it.
pub fn convert(
    math: &dyn TimezoneMath,
    catalog: &Catalog,
    input: &ConversionInput,
) -> Result<Vec<ConversionEntry>> {
    if input.date_text.is_empty() || input.time_text.is_empty() {
        return Ok(Vec::new());
    }

    let parts = match parse_parts(&input.date_text, &input.time_text) {
        Ok(parts) => parts,
        Err(error) => {
            tracing::warn!("could not parse conversion input: {error}");
            return Ok(Vec::new());
        }
    };

    match convert_parts(math, catalog, &parts, &input.source_zone) {
        Ok(entries) => Ok(entries),
        Err(TzError::NonexistentLocalTime { identifier, parts }) => {
            tracing::warn!("local time {parts} does not exist in {identifier}, nothing to convert");
            Ok(Vec::new())
        }
        Err(error) => Err(error),
    }
}

fn convert_parts(
    math: &dyn TimezoneMath,
    catalog: &Catalog,
    parts: &TimeParts,
    source_zone: &ZoneId,
) -> Result<Vec<ConversionEntry>> {
    let source_instant = math.from_local_parts(parts, source_zone)?;
    catalog
        .list()
        .iter()
        .map(|entry| {
            let instant = if &entry.zone == source_zone {
                source_instant
            } else {
                reproject(math, source_instant, source_zone, &entry.zone)?
            };
            Ok(ConversionEntry {
                zone: entry.zone.clone(),
                city: entry.city.clone(),
                flag: entry.flag.clone(),
                region: entry.region.clone(),
                instant,
                is_dst: math.is_daylight_saving(source_instant, &entry.zone)?,
            })
        })
        .collect()
}

/// Parse a custom date/time for one zone and derive its flags. `None`
/// when the form is incomplete or unparseable; adapter failures propagate.
pub fn custom_date_time(
    math: &dyn TimezoneMath,
    date_text: &str,
    time_text: &str,
    zone: &ZoneId,
) -> Result<Option<CustomDateTime>> {
    if date_text.is_empty() || time_text.is_empty() {
        return Ok(None);
    }
    let parts = match parse_parts(date_text, time_text) {
        Ok(parts) => parts,
        Err(error) => {
            tracing::warn!("could not parse custom date/time: {error}");
            return Ok(None);
        }
    };
    let instant = math.from_local_parts(&parts, zone)?;
    Ok(Some(CustomDateTime {
        instant,
        is_dst: math.is_daylight_saving(instant, zone)?,
        in_business_hours: math.in_business_hours(instant, zone)?,
    }))
}

fn parse_parts(date_text: &str, time_text: &str) -> Result<TimeParts> {
    let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")?;
    let time = NaiveTime::parse_from_str(time_text, "%H:%M")?;
    Ok(TimeParts {
        year: date.year(),
        month: date.month(),
        day: date.day(),
        hour: time.hour(),
        minute: time.minute(),
        second: 0,
    })
}

fn reproject(
    math: &dyn TimezoneMath,
    instant: DateTime<Utc>,
    from: &ZoneId,
    to: &ZoneId,
) -> Result<DateTime<Utc>> {
    let parts = math.to_local_parts(instant, from)?;
    math.from_local_parts(&parts, to)
}
