//! Host-side plan input for the Cadence interval timer
//!
//! Reads the workout catalog (JSON) and user settings (TOML) and turns
//! them into the plain data the core understands. Nothing here knows about
//! countdowns or rendering.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod settings;

pub use catalog::{parse_catalog, Catalog, Workout};
pub use error::{CatalogError, CatalogResult};
pub use loader::{CatalogLoader, CatalogSource};
pub use settings::Settings;
