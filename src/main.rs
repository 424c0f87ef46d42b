use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tz_showcase::core::convert::{convert, custom_date_time};
use tz_showcase::core::dst::DstExplorer;
use tz_showcase::core::records::{analyze_zone, build_catalog_records};
use tz_showcase::core::search::DEFAULT_DEBOUNCE;
use tz_showcase::core::stats::business_hours_stats;
use tz_showcase::utils::format::{format_time, FormatOptions};
use tz_showcase::utils::logger;
use tz_showcase::{
    Catalog, CatalogFile, ChronoTzMath, CliConfig, ConversionInput, LiveClock,
    SearchSortCoordinator, TimezoneMath, ZoneId,
};
use tz_showcase::config::Command;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    if config.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    let math = ChronoTzMath::new();
    let catalog = match &config.catalog {
        Some(path) => CatalogFile::load(path)
            .and_then(|file| file.into_catalog(&math))
            .with_context(|| format!("loading catalog from {}", path.display()))?,
        None => Catalog::builtin(),
    };
    tracing::debug!("catalog holds {} zones", catalog.len());

    match config.command {
        Command::Clock {
            interval_ms,
            ticks,
            query,
            sort,
        } => {
            let mut clock = LiveClock::start(Duration::from_millis(interval_ms));
            let mut rx = clock.subscribe();
            let mut coordinator = SearchSortCoordinator::new();
            if let Some(query) = query {
                coordinator.set_query(&query);
                // Let the query survive its quiet window before rendering.
                tokio::time::sleep(DEFAULT_DEBOUNCE + Duration::from_millis(50)).await;
            }

            for tick in 0..ticks {
                let batch = build_catalog_records(&math, &catalog, clock.current())?;
                println!("tick {tick} at {}", batch.instant.format("%H:%M:%S UTC"));
                for record in coordinator.view(&batch, sort.into()) {
                    println!(
                        "  {} {:<12} {} {:<4} {}{}",
                        record.flag,
                        record.city,
                        format_time(&record.local_time, FormatOptions::default()),
                        record.abbreviation,
                        if record.is_dst { "DST " } else { "" },
                        if record.in_business_hours { "open" } else { "closed" },
                    );
                }
                if tick + 1 < ticks {
                    rx.changed().await?;
                }
            }
            clock.stop();
        }
        Command::Convert { date, time, from } => {
            let input = ConversionInput {
                date_text: date,
                time_text: time,
                source_zone: ZoneId::new(from),
            };
            let entries = convert(&math, &catalog, &input)?;
            if entries.is_empty() {
                println!("Nothing to convert: incomplete or unparseable input");
                return Ok(());
            }
            for entry in entries {
                let local = math.to_local_parts(entry.instant, &entry.zone)?;
                let marker = if entry.zone == input.source_zone {
                    " (source)"
                } else {
                    ""
                };
                println!(
                    "  {} {:<12} {local}{}{marker}",
                    entry.flag,
                    entry.city,
                    if entry.is_dst { " DST" } else { "" },
                );
            }
        }
        Command::Dst { year } => {
            let mut explorer = DstExplorer::new(year);
            for view in explorer.explore_all(&math, &catalog)? {
                match view.transitions {
                    Some(t) => println!(
                        "  {} {:<12} spring forward {}  fall back {}",
                        view.flag,
                        view.city,
                        t.spring_forward.format("%Y-%m-%d %H:%M UTC"),
                        t.fall_back.format("%Y-%m-%d %H:%M UTC"),
                    ),
                    None => println!("  {} {:<12} no daylight saving", view.flag, view.city),
                }
            }
        }
        Command::Business => {
            let batch = build_catalog_records(&math, &catalog, Utc::now())?;
            for record in &batch.records {
                println!(
                    "  {} {:<12} {}",
                    record.flag,
                    record.city,
                    if record.in_business_hours { "open" } else { "closed" },
                );
            }
            let stats = business_hours_stats(&batch.records);
            println!(
                "{}/{} locations in business hours ({}%), {} observing DST ({}%)",
                stats.business_hours_count,
                stats.total_locations,
                stats.business_hours_percentage,
                stats.dst_active_count,
                stats.dst_active_percentage,
            );
        }
        Command::Api { zone, date, time } => {
            let zone = ZoneId::new(zone);
            let instant = match (date.as_deref(), time.as_deref()) {
                (Some(date), Some(time)) => custom_date_time(&math, date, time, &zone)?
                    .map(|custom| custom.instant)
                    .unwrap_or_else(Utc::now),
                _ => Utc::now(),
            };
            let analysis = analyze_zone(&math, &catalog, instant, &zone)?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
    }

    Ok(())
}
