use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::{OffsetComponents, OffsetName, Tz};

use crate::domain::model::{
    DstTransitions, PreferredAbbreviations, TimeParts, ZoneId, ZoneMetadata,
};
use crate::domain::ports::TimezoneMath;
use crate::utils::error::{Result, TzError};

/// Timezone math backed by the chrono-tz compiled IANA database. Zone
/// metadata and per-year DST transitions are cached internally; callers
/// can evict via `clear_cache`.
pub struct ChronoTzMath {
    metadata_cache: RwLock<HashMap<ZoneId, ZoneMetadata>>,
    transition_cache: RwLock<HashMap<(i32, ZoneId), Option<DstTransitions>>>,
    registered: RwLock<HashSet<ZoneId>>,
}

impl ChronoTzMath {
    pub fn new() -> Self {
        Self {
            metadata_cache: RwLock::new(HashMap::new()),
            transition_cache: RwLock::new(HashMap::new()),
            registered: RwLock::new(HashSet::new()),
        }
    }

    pub fn registered_zones(&self) -> Vec<ZoneId> {
        self.registered
            .read()
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn resolve(&self, zone: &ZoneId) -> Result<Tz> {
        zone.as_str().parse().map_err(|_| TzError::InvalidTimezone {
            identifier: zone.to_string(),
        })
    }

    fn compute_metadata(&self, zone: &ZoneId) -> Result<ZoneMetadata> {
        let tz = self.resolve(zone)?;
        let year = Utc::now().year();

        // Sample the first of every month: one year covers both halves of
        // any DST regime, northern or southern hemisphere.
        let mut standard: Option<(i32, Option<String>)> = None;
        let mut dst: Option<(i32, Option<String>)> = None;
        for month in 1..=12 {
            let Some(naive) =
                NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| d.and_hms_opt(12, 0, 0))
            else {
                continue;
            };
            let offset = tz.offset_from_utc_datetime(&naive);
            let abbreviation = offset
                .abbreviation()
                .filter(|a| a.chars().all(|c| c.is_ascii_alphabetic()))
                .map(str::to_string);
            if offset.dst_offset().is_zero() {
                if standard.is_none() {
                    standard = Some((offset.base_utc_offset().num_minutes() as i32, abbreviation));
                }
            } else if dst.is_none() {
                let total = offset.base_utc_offset() + offset.dst_offset();
                dst = Some((total.num_minutes() as i32, abbreviation));
            }
        }

        let (standard_offset_minutes, standard_abbr) = match standard {
            Some(found) => found,
            // Zone observes DST year round; fall back to its base offset.
            None => {
                let Some(naive) =
                    NaiveDate::from_ymd_opt(year, 1, 1).and_then(|d| d.and_hms_opt(12, 0, 0))
                else {
                    return Err(TzError::Processing {
                        message: format!("could not sample offsets for {zone}"),
                    });
                };
                let offset = tz.offset_from_utc_datetime(&naive);
                (offset.base_utc_offset().num_minutes() as i32, None)
            }
        };

        let preferred_abbreviations = standard_abbr.map(|std_abbr| PreferredAbbreviations {
            standard: std_abbr,
            dst: dst.as_ref().and_then(|(_, abbr)| abbr.clone()),
        });

        Ok(ZoneMetadata {
            standard_offset_minutes,
            dst_offset_minutes: dst.map(|(minutes, _)| minutes),
            preferred_abbreviations,
        })
    }

    fn compute_transitions(&self, year: i32, zone: &ZoneId) -> Result<Option<DstTransitions>> {
        let tz = self.resolve(zone)?;
        let Some(start) = NaiveDate::from_ymd_opt(year, 1, 1) else {
            return Err(TzError::Processing {
                message: format!("year {year} out of calendar range"),
            });
        };

        // Day-granularity scan for DST flag flips, then a binary search
        // down to the exact second of each flip.
        let mut spring_forward = None;
        let mut fall_back = None;
        let mut prev_instant = utc_midnight(start);
        let mut prev_flag = dst_active_at(&tz, prev_instant);
        let mut day = start;
        loop {
            let Some(next) = day.succ_opt() else { break };
            let instant = utc_midnight(next);
            let flag = dst_active_at(&tz, instant);
            if flag != prev_flag {
                let transition = refine_transition(&tz, prev_instant, instant);
                if flag {
                    spring_forward.get_or_insert(transition);
                } else {
                    fall_back.get_or_insert(transition);
                }
            }
            prev_instant = instant;
            prev_flag = flag;
            if next.year() != year {
                break;
            }
            day = next;
        }

        match (spring_forward, fall_back) {
            (Some(spring_forward), Some(fall_back)) => Ok(Some(DstTransitions {
                spring_forward,
                fall_back,
            })),
            _ => Ok(None),
        }
    }
}

impl Default for ChronoTzMath {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneMath for ChronoTzMath {
    fn to_local_parts(&self, instant: DateTime<Utc>, zone: &ZoneId) -> Result<TimeParts> {
        let tz = self.resolve(zone)?;
        let local = instant.with_timezone(&tz);
        Ok(TimeParts {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
        })
    }

    fn from_local_parts(&self, parts: &TimeParts, zone: &ZoneId) -> Result<DateTime<Utc>> {
        let tz = self.resolve(zone)?;
        let naive = parts.to_naive().ok_or_else(|| TzError::Processing {
            message: format!("invalid time parts {parts} for {zone}"),
        })?;
        match tz.from_local_datetime(&naive) {
            LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
            // Repeated hour at fall-back: take the earlier occurrence.
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
            LocalResult::None => Err(TzError::NonexistentLocalTime {
                identifier: zone.to_string(),
                parts: parts.to_string(),
            }),
        }
    }

    fn is_daylight_saving(&self, instant: DateTime<Utc>, zone: &ZoneId) -> Result<bool> {
        let tz = self.resolve(zone)?;
        Ok(dst_active_at(&tz, instant))
    }

    fn in_business_hours(&self, instant: DateTime<Utc>, zone: &ZoneId) -> Result<bool> {
        let tz = self.resolve(zone)?;
        let local = instant.with_timezone(&tz);
        let weekday = local.weekday().number_from_monday() <= 5;
        Ok(weekday && (9..17).contains(&local.hour()))
    }

    fn metadata(&self, zone: &ZoneId) -> Result<ZoneMetadata> {
        if let Ok(cache) = self.metadata_cache.read() {
            if let Some(hit) = cache.get(zone) {
                return Ok(hit.clone());
            }
        }
        let metadata = self.compute_metadata(zone)?;
        if let Ok(mut cache) = self.metadata_cache.write() {
            cache.insert(zone.clone(), metadata.clone());
        }
        Ok(metadata)
    }

    fn dst_transitions_for_year(
        &self,
        year: i32,
        zone: &ZoneId,
    ) -> Result<Option<DstTransitions>> {
        let key = (year, zone.clone());
        if let Ok(cache) = self.transition_cache.read() {
            if let Some(hit) = cache.get(&key) {
                return Ok(*hit);
            }
        }
        let transitions = self.compute_transitions(year, zone)?;
        if let Ok(mut cache) = self.transition_cache.write() {
            cache.insert(key, transitions);
        }
        Ok(transitions)
    }

    fn validate_and_register(&self, identifier: &str) -> bool {
        let zone = ZoneId::new(identifier);
        if self.resolve(&zone).is_err() {
            tracing::debug!("rejected timezone registration: {identifier}");
            return false;
        }
        if let Ok(mut registered) = self.registered.write() {
            registered.insert(zone);
        }
        true
    }

    fn clear_cache(&self, zone: Option<&ZoneId>) {
        match zone {
            Some(zone) => {
                if let Ok(mut cache) = self.metadata_cache.write() {
                    cache.remove(zone);
                }
                if let Ok(mut cache) = self.transition_cache.write() {
                    cache.retain(|(_, cached), _| cached != zone);
                }
            }
            None => {
                if let Ok(mut cache) = self.metadata_cache.write() {
                    cache.clear();
                }
                if let Ok(mut cache) = self.transition_cache.write() {
                    cache.clear();
                }
            }
        }
    }
}

fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn dst_active_at(tz: &Tz, instant: DateTime<Utc>) -> bool {
    !tz.offset_from_utc_datetime(&instant.naive_utc())
        .dst_offset()
        .is_zero()
}

/// Narrow [lo, hi) to the first instant with the flipped DST flag.
/// Endpoints stay second-aligned so the result lands on the transition
/// instant exactly.
fn refine_transition(tz: &Tz, mut lo: DateTime<Utc>, mut hi: DateTime<Utc>) -> DateTime<Utc> {
    let lo_flag = dst_active_at(tz, lo);
    while hi - lo > chrono::Duration::seconds(1) {
        let mid = lo + chrono::Duration::seconds((hi - lo).num_seconds() / 2);
        if dst_active_at(tz, mid) == lo_flag {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn london() -> ZoneId {
        ZoneId::new("Europe/London")
    }

    #[test]
    fn local_parts_round_trip_in_summer() {
        let math = ChronoTzMath::new();
        let instant = utc(2024, 7, 15, 12, 0);
        let parts = math.to_local_parts(instant, &london()).unwrap();
        assert_eq!((parts.hour, parts.minute), (13, 0));
        let back = math.from_local_parts(&parts, &london()).unwrap();
        assert_eq!(back, instant);
    }

    #[test]
    fn ambiguous_local_time_resolves_to_earliest() {
        let math = ChronoTzMath::new();
        // 2024-10-27 01:30 occurs twice in London; earliest is still BST.
        let parts = TimeParts {
            year: 2024,
            month: 10,
            day: 27,
            hour: 1,
            minute: 30,
            second: 0,
        };
        let instant = math.from_local_parts(&parts, &london()).unwrap();
        assert_eq!(instant, utc(2024, 10, 27, 0, 30));
    }

    #[test]
    fn nonexistent_local_time_is_an_error() {
        let math = ChronoTzMath::new();
        // 2024-03-31 01:30 is inside London's spring-forward gap.
        let parts = TimeParts {
            year: 2024,
            month: 3,
            day: 31,
            hour: 1,
            minute: 30,
            second: 0,
        };
        let err = math.from_local_parts(&parts, &london()).unwrap_err();
        assert!(matches!(err, TzError::NonexistentLocalTime { .. }));
    }

    #[test]
    fn dst_flag_tracks_the_season() {
        let math = ChronoTzMath::new();
        assert!(math.is_daylight_saving(utc(2024, 7, 15, 12, 0), &london()).unwrap());
        assert!(!math.is_daylight_saving(utc(2024, 1, 15, 12, 0), &london()).unwrap());
    }

    #[test]
    fn business_hours_require_weekday_and_working_hour() {
        let math = ChronoTzMath::new();
        // Monday 13:00 local London.
        assert!(math.in_business_hours(utc(2024, 7, 15, 12, 0), &london()).unwrap());
        // Sunday noon.
        assert!(!math.in_business_hours(utc(2024, 7, 14, 12, 0), &london()).unwrap());
        // Monday 08:30 local is before opening.
        assert!(!math.in_business_hours(utc(2024, 7, 15, 7, 30), &london()).unwrap());
        // Monday 17:00 local is after closing.
        assert!(!math.in_business_hours(utc(2024, 7, 15, 16, 0), &london()).unwrap());
    }

    #[test]
    fn london_metadata_carries_abbreviations_and_offsets() {
        let math = ChronoTzMath::new();
        let metadata = math.metadata(&london()).unwrap();
        assert_eq!(metadata.standard_offset_minutes, 0);
        assert_eq!(metadata.dst_offset_minutes, Some(60));
        let preferred = metadata.preferred_abbreviations.unwrap();
        assert_eq!(preferred.standard, "GMT");
        assert_eq!(preferred.dst.as_deref(), Some("BST"));
    }

    #[test]
    fn tokyo_metadata_has_no_dst_offset() {
        let math = ChronoTzMath::new();
        let metadata = math.metadata(&ZoneId::new("Asia/Tokyo")).unwrap();
        assert_eq!(metadata.standard_offset_minutes, 540);
        assert_eq!(metadata.dst_offset_minutes, None);
        let preferred = metadata.preferred_abbreviations.unwrap();
        assert_eq!(preferred.standard, "JST");
        assert_eq!(preferred.dst, None);
    }

    #[test]
    fn dubai_metadata_has_numeric_designator_only() {
        let math = ChronoTzMath::new();
        let metadata = math.metadata(&ZoneId::new("Asia/Dubai")).unwrap();
        assert_eq!(metadata.standard_offset_minutes, 240);
        assert_eq!(metadata.preferred_abbreviations, None);
    }

    #[test]
    fn london_2024_transitions_are_exact() {
        let math = ChronoTzMath::new();
        let transitions = math
            .dst_transitions_for_year(2024, &london())
            .unwrap()
            .unwrap();
        assert_eq!(transitions.spring_forward, utc(2024, 3, 31, 1, 0));
        assert_eq!(transitions.fall_back, utc(2024, 10, 27, 1, 0));
    }

    #[test]
    fn sydney_transitions_are_reversed_by_hemisphere() {
        let math = ChronoTzMath::new();
        let transitions = math
            .dst_transitions_for_year(2024, &ZoneId::new("Australia/Sydney"))
            .unwrap()
            .unwrap();
        // Southern hemisphere: the fall back lands in April, the spring
        // forward in October.
        assert_eq!(transitions.fall_back, utc(2024, 4, 6, 16, 0));
        assert_eq!(transitions.spring_forward, utc(2024, 10, 5, 16, 0));
        assert!(transitions.fall_back < transitions.spring_forward);
    }

    #[test]
    fn fixed_offset_zone_has_no_transitions_in_any_year() {
        let math = ChronoTzMath::new();
        let tokyo = ZoneId::new("Asia/Tokyo");
        for year in [1995, 2020, 2024, 2030] {
            assert_eq!(math.dst_transitions_for_year(year, &tokyo).unwrap(), None);
        }
    }

    #[test]
    fn register_accepts_known_and_rejects_bogus_identifiers() {
        let math = ChronoTzMath::new();
        assert!(math.validate_and_register("Pacific/Auckland"));
        assert!(!math.validate_and_register("Not/A_Zone"));
        assert_eq!(math.registered_zones(), vec![ZoneId::new("Pacific/Auckland")]);
    }

    #[test]
    fn clear_cache_keeps_results_correct() {
        let math = ChronoTzMath::new();
        let before = math.dst_transitions_for_year(2024, &london()).unwrap();
        math.clear_cache(Some(&london()));
        assert_eq!(math.dst_transitions_for_year(2024, &london()).unwrap(), before);
        math.metadata(&london()).unwrap();
        math.clear_cache(None);
        assert_eq!(math.metadata(&london()).unwrap().dst_offset_minutes, Some(60));
    }

    #[test]
    fn unknown_zone_is_an_invalid_timezone_error() {
        let math = ChronoTzMath::new();
        let err = math.metadata(&ZoneId::new("Nowhere/At_All")).unwrap_err();
        assert!(matches!(err, TzError::InvalidTimezone { .. }));
    }
}
