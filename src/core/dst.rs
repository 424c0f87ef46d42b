use std::collections::HashMap;

use serde::Serialize;

use crate::domain::catalog::Catalog;
use crate::domain::model::{DstTransitions, ZoneId};
use crate::domain::ports::TimezoneMath;
use crate::utils::error::Result;

/// Per-zone view the DST tab renders for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DstZoneView {
    pub zone: ZoneId,
    pub city: String,
    pub flag: String,
    pub region: String,
    pub transitions: Option<DstTransitions>,
}

/// Year-scoped DST transition explorer. Results are recomputed strictly
/// on (year, zone) change; any integer year is accepted, range validity
/// is the adapter's concern.
pub struct DstExplorer {
    year: i32,
    cache: HashMap<(i32, ZoneId), Option<DstTransitions>>,
}

impl DstExplorer {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            cache: HashMap::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    pub fn increment_year(&mut self) {
        self.year += 1;
    }

    pub fn decrement_year(&mut self) {
        self.year -= 1;
    }

    /// Transitions for one zone in the current year; a single adapter
    /// call per (year, zone), memoized thereafter.
    pub fn transitions(
        &mut self,
        math: &dyn TimezoneMath,
        zone: &ZoneId,
    ) -> Result<Option<DstTransitions>> {
        let key = (self.year, zone.clone());
        if let Some(hit) = self.cache.get(&key) {
            return Ok(*hit);
        }
        let transitions = math.dst_transitions_for_year(self.year, zone)?;
        self.cache.insert(key, transitions);
        Ok(transitions)
    }

    /// The full per-catalog-zone view for the current year.
    pub fn explore_all(
        &mut self,
        math: &dyn TimezoneMath,
        catalog: &Catalog,
    ) -> Result<Vec<DstZoneView>> {
        catalog
            .list()
            .iter()
            .map(|entry| {
                Ok(DstZoneView {
                    zone: entry.zone.clone(),
                    city: entry.city.clone(),
                    flag: entry.flag.clone(),
                    region: entry.region.clone(),
                    transitions: self.transitions(math, &entry.zone)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ChronoTzMath;
    use crate::domain::model::{TimeParts, ZoneMetadata};
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn fixed_offset_zone_yields_none_for_every_year() {
        let math = ChronoTzMath::new();
        let mut explorer = DstExplorer::new(2024);
        let tokyo = ZoneId::new("Asia/Tokyo");
        for year in [1970, 2000, 2024, 2030] {
            explorer.set_year(year);
            assert_eq!(explorer.transitions(&math, &tokyo).unwrap(), None);
        }
    }

    #[test]
    fn year_stepping_changes_results() {
        let math = ChronoTzMath::new();
        let mut explorer = DstExplorer::new(2024);
        let london = ZoneId::new("Europe/London");

        let for_2024 = explorer.transitions(&math, &london).unwrap().unwrap();
        explorer.increment_year();
        assert_eq!(explorer.year(), 2025);
        let for_2025 = explorer.transitions(&math, &london).unwrap().unwrap();
        assert_ne!(for_2024, for_2025);

        explorer.decrement_year();
        assert_eq!(explorer.transitions(&math, &london).unwrap(), Some(for_2024));
    }

    #[test]
    fn explore_all_covers_the_catalog_in_order() {
        let math = ChronoTzMath::new();
        let catalog = Catalog::builtin();
        let mut explorer = DstExplorer::new(2024);
        let views = explorer.explore_all(&math, &catalog).unwrap();
        assert_eq!(views.len(), catalog.len());
        assert_eq!(views[0].city, "New York");
        assert!(views[0].transitions.is_some());
        let tokyo = views.iter().find(|v| v.city == "Tokyo").unwrap();
        assert_eq!(tokyo.transitions, None);
    }

    /// Adapter stub that counts transition queries, to pin down the
    /// one-call-per-(year, zone) contract.
    struct CountingMath {
        calls: AtomicUsize,
    }

    impl CountingMath {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TimezoneMath for CountingMath {
        fn to_local_parts(&self, _: DateTime<Utc>, _: &ZoneId) -> Result<TimeParts> {
            unimplemented!("not exercised")
        }

        fn from_local_parts(&self, _: &TimeParts, _: &ZoneId) -> Result<DateTime<Utc>> {
            unimplemented!("not exercised")
        }

        fn is_daylight_saving(&self, _: DateTime<Utc>, _: &ZoneId) -> Result<bool> {
            unimplemented!("not exercised")
        }

        fn in_business_hours(&self, _: DateTime<Utc>, _: &ZoneId) -> Result<bool> {
            unimplemented!("not exercised")
        }

        fn metadata(&self, _: &ZoneId) -> Result<ZoneMetadata> {
            unimplemented!("not exercised")
        }

        fn dst_transitions_for_year(
            &self,
            year: i32,
            _: &ZoneId,
        ) -> Result<Option<DstTransitions>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(DstTransitions {
                spring_forward: Utc.with_ymd_and_hms(year, 3, 31, 1, 0, 0).unwrap(),
                fall_back: Utc.with_ymd_and_hms(year, 10, 27, 1, 0, 0).unwrap(),
            }))
        }

        fn validate_and_register(&self, _: &str) -> bool {
            true
        }

        fn clear_cache(&self, _: Option<&ZoneId>) {}
    }

    #[test]
    fn repeated_queries_hit_the_adapter_once() {
        let math = CountingMath::new();
        let mut explorer = DstExplorer::new(2024);
        let london = ZoneId::new("Europe/London");

        explorer.transitions(&math, &london).unwrap();
        explorer.transitions(&math, &london).unwrap();
        assert_eq!(math.calls.load(Ordering::SeqCst), 1);

        explorer.set_year(2025);
        explorer.transitions(&math, &london).unwrap();
        assert_eq!(math.calls.load(Ordering::SeqCst), 2);
    }
}
