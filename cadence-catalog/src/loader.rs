//! Catalog persistence
//!
//! Loads the workout catalog from its primary file.
//! Falls back to the cached copy if the primary is missing or unreadable.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::catalog::{parse_catalog, Catalog};
use crate::error::{CatalogError, CatalogResult};
use crate::settings::Settings;

/// Where a loaded catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Primary,
    Cache,
    /// Neither file was usable; the catalog is empty
    Empty,
}

/// Catalog persistence manager
pub struct CatalogLoader {
    primary: PathBuf,
    cache: Option<PathBuf>,
}

impl CatalogLoader {
    /// Create a loader for `primary`, with an optional cache copy
    pub fn new(primary: impl Into<PathBuf>, cache: Option<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            cache,
        }
    }

    /// Create a loader from user settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.catalog.clone(), settings.cache.clone())
    }

    pub fn primary(&self) -> &Path {
        &self.primary
    }

    /// Load the catalog
    ///
    /// Tries the primary file first and refreshes the cache on success.
    /// Falls back to the cache, then to an empty catalog. An empty catalog
    /// is a valid "no workouts" result, not an error.
    pub fn load(&self) -> (Catalog, CatalogSource) {
        info!(path = %self.primary.display(), "loading workout catalog");

        match self.load_primary() {
            Ok(catalog) => {
                log_catalog_summary(&catalog);
                return (catalog, CatalogSource::Primary);
            }
            Err(e) if e.is_not_found() => {
                debug!("no catalog file found, trying cache");
            }
            Err(e) => {
                warn!(error = %e, "failed to load catalog, trying cache");
            }
        }

        match self.load_cache() {
            Ok(Some(catalog)) => {
                info!("loaded workout catalog from cache");
                log_catalog_summary(&catalog);
                (catalog, CatalogSource::Cache)
            }
            Ok(None) => {
                warn!("no workouts available");
                (Catalog::default(), CatalogSource::Empty)
            }
            Err(e) => {
                warn!(error = %e, "cached catalog unusable");
                (Catalog::default(), CatalogSource::Empty)
            }
        }
    }

    /// Read and parse the primary file, refreshing the cache copy
    fn load_primary(&self) -> CatalogResult<Catalog> {
        let raw = read(&self.primary)?;
        debug!(bytes = raw.len(), "read catalog file");

        let catalog = parse_catalog(&raw)?;

        if let Err(e) = self.store_cache(&raw) {
            // A stale cache is not fatal
            warn!(error = %e, "failed to refresh catalog cache");
        }

        Ok(catalog)
    }

    fn load_cache(&self) -> CatalogResult<Option<Catalog>> {
        let Some(cache) = &self.cache else {
            return Ok(None);
        };

        match read(cache) {
            Ok(raw) => parse_catalog(&raw).map(Some),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn store_cache(&self, raw: &str) -> CatalogResult<()> {
        let Some(cache) = &self.cache else {
            return Ok(());
        };

        if let Some(parent) = cache.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
        }
        fs::write(cache, raw).map_err(|e| CatalogError::io(cache, e))?;
        debug!(path = %cache.display(), "refreshed catalog cache");
        Ok(())
    }
}

fn read(path: &Path) -> CatalogResult<String> {
    fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))
}

/// Log a summary of the loaded catalog
fn log_catalog_summary(catalog: &Catalog) {
    info!(workouts = catalog.len(), "workout catalog loaded");
    for workout in &catalog.workouts {
        debug!("  {} ({} entries)", workout.name, workout.exercises.len());
    }
}
