use chrono::{DateTime, Utc};

use crate::domain::model::{DstTransitions, TimeParts, ZoneId, ZoneMetadata};
use crate::utils::error::Result;

/// Boundary to the timezone-math collaborator. Pure with respect to
/// (instant, zone) apart from an internally owned cache; callers must not
/// assume results are memoized and apply their own memoization where
/// recomputation cost matters.
pub trait TimezoneMath: Send + Sync {
    fn to_local_parts(&self, instant: DateTime<Utc>, zone: &ZoneId) -> Result<TimeParts>;

    fn from_local_parts(&self, parts: &TimeParts, zone: &ZoneId) -> Result<DateTime<Utc>>;

    fn is_daylight_saving(&self, instant: DateTime<Utc>, zone: &ZoneId) -> Result<bool>;

    fn in_business_hours(&self, instant: DateTime<Utc>, zone: &ZoneId) -> Result<bool>;

    fn metadata(&self, zone: &ZoneId) -> Result<ZoneMetadata>;

    fn dst_transitions_for_year(
        &self,
        year: i32,
        zone: &ZoneId,
    ) -> Result<Option<DstTransitions>>;

    /// Administrative: check the identifier resolves and remember it for
    /// later lookups. Side-effecting; subsequent lookups reflect the change.
    fn validate_and_register(&self, identifier: &str) -> bool;

    /// Administrative: drop cached derivations for one zone, or for all
    /// zones when none is given.
    fn clear_cache(&self, zone: Option<&ZoneId>);
}
