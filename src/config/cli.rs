use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::search::SortKey;

#[derive(Debug, Parser)]
#[command(name = "tz-showcase")]
#[command(about = "Timezone display pipeline demo: world clock, converter, DST explorer")]
pub struct CliConfig {
    /// TOML file overriding the built-in timezone catalog
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON instead of compact text")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Live world clock over every catalog zone
    Clock {
        #[arg(long, default_value = "1000")]
        interval_ms: u64,

        /// Stop after this many ticks
        #[arg(long, default_value = "5")]
        ticks: u32,

        /// Filter the zone list (debounced in interactive use)
        #[arg(long)]
        query: Option<String>,

        #[arg(long, value_enum, default_value = "city")]
        sort: SortKeyArg,
    },
    /// Convert a date/time entered in one zone into every catalog zone
    Convert {
        #[arg(long)]
        date: String,

        #[arg(long)]
        time: String,

        /// Source timezone the entered digits belong to
        #[arg(long)]
        from: String,
    },
    /// DST transition instants per catalog zone for one year
    Dst {
        #[arg(long)]
        year: i32,
    },
    /// Business-hours overview across the catalog
    Business,
    /// Single-zone analysis as JSON, exercising the full adapter surface
    Api {
        #[arg(long)]
        zone: String,

        /// Optional custom date (YYYY-MM-DD) instead of now
        #[arg(long)]
        date: Option<String>,

        /// Optional custom time (HH:MM) instead of now
        #[arg(long)]
        time: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortKeyArg {
    City,
    Time,
    Region,
}

impl From<SortKeyArg> for SortKey {
    fn from(arg: SortKeyArg) -> Self {
        match arg {
            SortKeyArg::City => SortKey::City,
            SortKeyArg::Time => SortKey::Time,
            SortKeyArg::Region => SortKey::Region,
        }
    }
}
