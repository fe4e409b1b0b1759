//! Shared library for the toolshelf catalogue.
//!
//! The crate exposes the catalogue data model (categories and the tools they
//! own), the validated index built from it, and the read-only query service
//! that listing, search, detail and landing views sit on. Public functions
//! here form the contract the `toolshelf` binary depends on: catalogue source
//! resolution and loading.

use anyhow::{Context, Result};
use log::debug;
use std::env;
use std::path::{Path, PathBuf};

pub mod catalog;
pub mod listing;
mod schema_loader;
pub mod service;

pub use catalog::{
    Availability, BUILTIN_CATALOGUE, BUILTIN_SCHEMA, CATALOGUE_SCHEMA_VERSION, CatalogueDocument,
    CatalogueIndex, Category, CategoryId, SchemaVersion, SearchQuery, Tool, ToolId,
};
pub use listing::{ALL_CATEGORIES, CategoryFilter, ListingRequest};
pub use service::{
    CatalogueService, CatalogueStats, DEFAULT_LANDING_CATEGORIES, DEFAULT_LANDING_TOOLS,
    ToolDetail,
};

/// Environment variable naming a catalogue file to use instead of the
/// built-in one.
pub const CATALOGUE_ENV: &str = "TOOLSHELF_CATALOGUE";

/// Pick the catalogue file to load, if any.
///
/// An explicit path wins, then a non-empty `TOOLSHELF_CATALOGUE`. `None`
/// means the built-in catalogue.
pub fn resolve_catalogue_path(cli_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_override {
        return Some(path.to_path_buf());
    }
    env::var(CATALOGUE_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Load and validate the catalogue from `path`, or the built-in one.
pub fn load_catalogue(path: Option<&Path>) -> Result<CatalogueIndex> {
    match path {
        Some(path) => {
            debug!("loading catalogue from {}", path.display());
            CatalogueIndex::load(path)
                .with_context(|| format!("unable to load catalogue {}", path.display()))
        }
        None => {
            debug!("loading built-in catalogue");
            CatalogueIndex::builtin().context("built-in catalogue is invalid")
        }
    }
}

/// Build a ready-to-query service for the resolved catalogue source.
pub fn open_service(cli_override: Option<&Path>) -> Result<CatalogueService> {
    let path = resolve_catalogue_path(cli_override);
    let index = load_catalogue(path.as_deref())?;
    Ok(CatalogueService::new(index))
}
