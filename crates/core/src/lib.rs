//! dwmlgen core library
//!
//! Shared utilities for the DWML formatter:
//! - Configuration loading (XDG-compliant)
//! - File system utilities
//! - Common constants

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::ensure_parent_exists;

/// Application name used for XDG paths
pub const APP_NAME: &str = "dwmlgen";

/// Default forecast horizon for the summary products
pub const DEFAULT_NUM_DAYS: u32 = 7;

/// Base URL prepended to every derived condition icon filename
pub const ICON_BASE_URL: &str = "http://www.nws.noaa.gov/weather/images/fcicons/";
