//! Tool catalogue wiring.
//!
//! This module wraps the JSON catalogue under `catalogue/tools.json` so
//! callers can load a validated snapshot and look tools up by stable
//! identifiers. Types here mirror the schema fields; `CatalogueIndex` owns
//! validation and lookup, `SearchQuery` owns the matching policy.

pub mod identity;
pub mod index;
pub mod model;
pub mod search;

pub use identity::{CategoryId, SchemaVersion, ToolId};
pub use index::{BUILTIN_CATALOGUE, BUILTIN_SCHEMA, CATALOGUE_SCHEMA_VERSION, CatalogueIndex};
pub use model::{Availability, CatalogueDocument, Category, Tool};
pub use search::SearchQuery;
