use clap::Parser;
use dwmlgen_core::{find_config_file, load_config, ConfigSource, DEFAULT_NUM_DAYS};
use slog::{o, Drain, Level, Logger};
use std::env;

use crate::elements::{Element, UnitSystem};
use crate::window::Profile;
use crate::Error;

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "DWML formatter - renders probed NDFD forecast values as DWML"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $DWMLGEN_CONFIG, ./dwmlgen.toml,
    /// $XDG_CONFIG_HOME/dwmlgen/dwmlgen.toml, /etc/dwmlgen/dwmlgen.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "DWMLGEN_LEVEL")]
    pub level: Option<String>,

    /// Prober input document (JSON); stdin when omitted
    #[arg(short, long, env = "DWMLGEN_INPUT")]
    pub input: Option<String>,

    /// Output path for the DWML document; stdout when omitted
    #[arg(short, long, env = "DWMLGEN_OUTPUT")]
    pub output: Option<String>,

    /// Output profile: time-series, glance, 12-hourly, 24-hourly
    #[arg(short, long, env = "DWMLGEN_PRODUCT")]
    pub product: Option<String>,

    /// Window start, epoch seconds UTC (0 or absent means unbounded)
    #[arg(long, env = "DWMLGEN_BEGIN")]
    pub begin: Option<i64>,

    /// Window end, epoch seconds UTC (0 or absent means unbounded)
    #[arg(long, env = "DWMLGEN_END")]
    pub end: Option<i64>,

    /// Forecast horizon in days for the summary profiles
    #[arg(short, long, env = "DWMLGEN_DAYS")]
    pub days: Option<u32>,

    /// Unit system: e (english) or m (metric)
    #[arg(short, long, env = "DWMLGEN_UNITS")]
    pub units: Option<String>,

    /// Include derived condition icons
    #[arg(long, action = clap::ArgAction::SetTrue)]
    #[serde(default)]
    pub icons: bool,

    /// Comma-separated NDFD element names to restrict the output to
    #[arg(long, env = "DWMLGEN_ELEMENTS")]
    pub elements: Option<String>,

    /// Comma-separated NDFD element names to drop from the output
    #[arg(long, env = "DWMLGEN_EXCLUDE")]
    pub exclude: Option<String>,

    /// Fixed creation timestamp, epoch seconds UTC; defaults to now.
    /// Useful for byte-identical reruns.
    #[arg(long, env = "DWMLGEN_CREATION_DATE")]
    pub creation_date: Option<i64>,
}

impl Cli {
    /// Get the effective configuration value with defaults
    pub fn product(&self) -> Result<Profile, Error> {
        let flag = self.product.as_deref().unwrap_or("time-series");
        Profile::from_flag(flag)
            .ok_or_else(|| Error::Input(format!("unknown product \"{flag}\"")))
    }

    pub fn units(&self) -> Result<UnitSystem, Error> {
        let flag = self.units.as_deref().unwrap_or("e");
        UnitSystem::from_flag(flag)
            .ok_or_else(|| Error::Input(format!("unknown unit system \"{flag}\"")))
    }

    pub fn days(&self) -> u32 {
        self.days.unwrap_or(DEFAULT_NUM_DAYS)
    }

    /// Zero encodes "absent" on the wire; normalize it away here.
    pub fn begin(&self) -> Option<i64> {
        self.begin.filter(|b| *b != 0)
    }

    pub fn end(&self) -> Option<i64> {
        self.end.filter(|e| *e != 0)
    }

    pub fn elements(&self) -> Result<Option<Vec<Element>>, Error> {
        self.elements.as_deref().map(parse_element_list).transpose()
    }

    pub fn exclude(&self) -> Result<Vec<Element>, Error> {
        self.exclude
            .as_deref()
            .map(parse_element_list)
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

fn parse_element_list(list: &str) -> Result<Vec<Element>, Error> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            Element::from_ndfd_name(&name.to_lowercase())
                .ok_or_else(|| Error::Input(format!("unknown NDFD element \"{name}\"")))
        })
        .collect()
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    let cli_args = Cli::parse();

    // Determine config file path
    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("DWMLGEN_CONFIG", "dwmlgen.toml")
    };

    // Load from config file
    let file_config: Cli = load_config(&source).unwrap_or_default();

    // CLI args override file config (env vars are handled by clap)
    Cli {
        config: cli_args.config,
        level: cli_args.level.or(file_config.level),
        input: cli_args.input.or(file_config.input),
        output: cli_args.output.or(file_config.output),
        product: cli_args.product.or(file_config.product),
        begin: cli_args.begin.or(file_config.begin),
        end: cli_args.end.or(file_config.end),
        days: cli_args.days.or(file_config.days),
        units: cli_args.units.or(file_config.units),
        icons: cli_args.icons || file_config.icons,
        elements: cli_args.elements.or(file_config.elements),
        exclude: cli_args.exclude.or(file_config.exclude),
        creation_date: cli_args.creation_date.or(file_config.creation_date),
    }
}

pub fn setup_logger(cli: &Cli) -> Logger {
    let log_level = if let Some(level) = cli.level.as_ref() {
        match level.to_lowercase().as_str() {
            "trace" => Level::Trace,
            "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" => Level::Warning,
            "error" => Level::Error,
            _ => Level::Info,
        }
    } else {
        let rust_log = env::var("RUST_LOG").unwrap_or_default();
        match rust_log.to_lowercase().as_str() {
            "trace" => Level::Trace,
            "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" => Level::Warning,
            "error" => Level::Error,
            _ => Level::Info,
        }
    };

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = drain.filter_level(log_level).fuse();
    slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}
