use std::time::Duration;

use chrono::{TimeZone, Utc};
use tz_showcase::core::convert::convert;
use tz_showcase::core::dst::DstExplorer;
use tz_showcase::core::records::build_catalog_records;
use tz_showcase::core::stats::business_hours_stats;
use tz_showcase::{
    Catalog, ChronoTzMath, ConversionInput, LiveClock, SearchSortCoordinator, SortKey,
    TimezoneMath, ZoneId,
};

#[test]
fn full_pipeline_from_instant_to_filtered_view() {
    let math = ChronoTzMath::new();
    let catalog = Catalog::builtin();
    // Monday noon UTC in July: Europe is on summer time.
    let instant = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();

    let batch = build_catalog_records(&math, &catalog, instant).unwrap();
    assert_eq!(batch.records.len(), catalog.len());
    assert_eq!(batch.instant, instant);

    let london = batch
        .records
        .iter()
        .find(|r| r.zone == ZoneId::new("Europe/London"))
        .unwrap();
    assert!(london.is_dst);
    assert_eq!(london.abbreviation, "BST");
    assert!(london.in_business_hours);

    let tokyo = batch
        .records
        .iter()
        .find(|r| r.zone == ZoneId::new("Asia/Tokyo"))
        .unwrap();
    assert!(!tokyo.is_dst);
    assert_eq!(tokyo.abbreviation, "JST");
    // 21:00 local Tokyo is outside business hours.
    assert!(!tokyo.in_business_hours);

    let stats = business_hours_stats(&batch.records);
    assert_eq!(stats.total_locations, catalog.len());
    assert!(stats.has_dst_active);

    let mut explorer = DstExplorer::new(2024);
    let views = explorer.explore_all(&math, &catalog).unwrap();
    assert_eq!(
        views
            .iter()
            .find(|v| v.zone == ZoneId::new("Asia/Tokyo"))
            .unwrap()
            .transitions,
        None
    );
    assert!(views
        .iter()
        .find(|v| v.zone == ZoneId::new("Europe/London"))
        .unwrap()
        .transitions
        .is_some());
}

#[test]
fn conversion_batch_is_complete_and_source_exact() {
    let math = ChronoTzMath::new();
    let catalog = Catalog::builtin();
    let input = ConversionInput {
        date_text: "2024-01-15".to_string(),
        time_text: "09:00".to_string(),
        source_zone: ZoneId::new("America/New_York"),
    };

    let entries = convert(&math, &catalog, &input).unwrap();
    assert_eq!(entries.len(), catalog.len());

    // 09:00 EST resolves to 14:00 UTC.
    let source = entries
        .iter()
        .find(|e| e.zone == input.source_zone)
        .unwrap();
    assert_eq!(
        source.instant,
        Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap()
    );
    assert!(!source.is_dst);
}

#[tokio::test(start_paused = true)]
async fn clock_driven_batches_stay_internally_consistent() {
    let math = ChronoTzMath::new();
    let catalog = Catalog::builtin();
    let mut clock = LiveClock::start(Duration::from_millis(1000));
    let mut rx = clock.subscribe();
    let mut coordinator = SearchSortCoordinator::new();

    for _ in 0..3 {
        let instant = clock.current();
        let batch = build_catalog_records(&math, &catalog, instant).unwrap();
        // Every record in the batch derives from the one instant read
        // before the build.
        assert_eq!(batch.instant, instant);
        for record in &batch.records {
            assert_eq!(
                record.is_dst,
                math.is_daylight_saving(instant, &record.zone).unwrap()
            );
        }

        let view = coordinator.view(&batch, SortKey::City).to_vec();
        assert_eq!(view.len(), batch.records.len());
        rx.changed().await.unwrap();
    }

    clock.stop();
    let after_stop = tokio::time::timeout(Duration::from_secs(5), rx.changed()).await;
    assert!(after_stop.is_err() || after_stop.unwrap().is_err());
}

#[tokio::test(start_paused = true)]
async fn debounced_search_applies_only_the_final_query() {
    let math = ChronoTzMath::new();
    let catalog = Catalog::builtin();
    let instant = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
    let batch = build_catalog_records(&math, &catalog, instant).unwrap();

    let mut coordinator = SearchSortCoordinator::new();
    coordinator.set_query("lo");
    tokio::time::sleep(Duration::from_millis(100)).await;
    coordinator.set_query("lond");
    tokio::time::sleep(Duration::from_millis(100)).await;
    coordinator.set_query("london");
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(coordinator.settled_query(), "london");
    let view = coordinator.view(&batch, SortKey::City);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].city, "London");
}
