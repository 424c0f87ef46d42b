use serde::Serialize;

use crate::domain::model::DerivedRecord;

/// Aggregate business-hours and DST figures for one batch of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusinessHoursStats {
    pub business_hours_count: usize,
    pub dst_active_count: usize,
    pub total_locations: usize,
    pub business_hours_percentage: u32,
    pub dst_active_percentage: u32,
    pub has_business_hours: bool,
    pub has_dst_active: bool,
}

pub fn business_hours_stats(records: &[DerivedRecord]) -> BusinessHoursStats {
    let total_locations = records.len();
    let business_hours_count = records.iter().filter(|r| r.in_business_hours).count();
    let dst_active_count = records.iter().filter(|r| r.is_dst).count();

    BusinessHoursStats {
        business_hours_count,
        dst_active_count,
        total_locations,
        business_hours_percentage: percentage(business_hours_count, total_locations),
        dst_active_percentage: percentage(dst_active_count, total_locations),
        has_business_hours: business_hours_count > 0,
        has_dst_active: dst_active_count > 0,
    }
}

fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}
