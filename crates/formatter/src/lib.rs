//! DWML formatter library.
//!
//! Consumes already-probed NDFD forecast values for one or more points and
//! renders a DWML document in one of four profiles: time-series, glance,
//! 12-hourly summary, 24-hourly summary.

pub mod dominant;
pub mod elements;
mod error;
pub mod input;
pub mod layout;
pub mod markup;
pub mod phrase;
pub mod product;
pub mod rows;
pub mod sky;
pub mod solar;
pub mod store;
pub mod summary;
pub mod tables;
pub mod timeutil;
pub mod utils;
pub mod weather;
pub mod window;

pub use elements::{Element, UnitSystem};
pub use error::Error;
pub use input::load;
pub use markup::render;
pub use product::{build_document, FormatRequest, PointContext};
pub use utils::{get_config_info, setup_logger, Cli};
pub use window::Profile;
