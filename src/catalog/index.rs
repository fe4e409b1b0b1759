//! Indexed, validated view of a catalogue document.
//!
//! The index enforces the expected schema version and the referential
//! invariants (unique tool ids, unique category ids, every tool naming its
//! owning category) once, at construction. Anything that gets past `load` or
//! `from_document` is safe to query without further checks.

use crate::catalog::identity::{CategoryId, SchemaVersion, ToolId};
use crate::catalog::model::{Category, CatalogueDocument, Tool};
use crate::schema_loader::{
    SchemaLoadOptions, SchemaLoadResult, compile_schema, is_identifier, load_json_schema,
    validate_instance,
};
use anyhow::{Context, Result, bail};
use log::debug;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// The catalogue shipped with the binary.
pub const BUILTIN_CATALOGUE: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/catalogue/tools.json"));

/// Schema for catalogue documents, used when no schema file sits next to a
/// catalogue on disk.
pub const BUILTIN_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schema/catalogue.schema.json"
));

pub const CATALOGUE_SCHEMA_VERSION: &str = "toolshelf_catalogue_v1";

const SCHEMA_RELATIVE_PATH: &str = "schema/catalogue.schema.json";

#[derive(Clone, Debug)]
/// Catalogue plus derived lookups keyed by tool and category id.
pub struct CatalogueIndex {
    schema_version: SchemaVersion,
    categories: Vec<Category>,
    // (category position, tool position) into `categories`.
    by_tool: BTreeMap<ToolId, (usize, usize)>,
    by_category: BTreeMap<CategoryId, usize>,
}

impl CatalogueIndex {
    /// Build the index from the catalogue compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOGUE, "built-in catalogue")
    }

    /// Load, schema-check and validate a catalogue file.
    ///
    /// The schema is taken from `schema/catalogue.schema.json` one level above
    /// the catalogue's directory when present, otherwise the built-in copy.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading catalogue {}", path.display()))?;
        let value: Value = serde_json::from_str(&data)
            .with_context(|| format!("parsing catalogue {}", path.display()))?;

        let schema = match sibling_schema_path(path) {
            Some(schema_path) => {
                debug!("validating {} against {}", path.display(), schema_path.display());
                load_json_schema(&schema_path, schema_options(&allowed_schema_versions()))
                    .with_context(|| format!("loading catalogue schema {}", schema_path.display()))?
            }
            None => builtin_schema()?,
        };
        let origin = path.display().to_string();
        Self::from_value(value, &schema, &origin)
    }

    /// Schema-check and validate a catalogue held in memory.
    pub fn from_json(data: &str, origin: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(data).with_context(|| format!("parsing catalogue {origin}"))?;
        Self::from_value(value, &builtin_schema()?, origin)
    }

    /// Validate the referential invariants of an already-parsed document.
    pub fn from_document(document: CatalogueDocument) -> Result<Self> {
        validate_schema_version(&document.schema_version)?;
        let (by_tool, by_category) = build_index(&document.categories)?;
        debug!(
            "indexed {} categories and {} tools",
            by_category.len(),
            by_tool.len()
        );
        Ok(Self {
            schema_version: document.schema_version,
            categories: document.categories,
            by_tool,
            by_category,
        })
    }

    fn from_value(value: Value, schema: &SchemaLoadResult, origin: &str) -> Result<Self> {
        validate_instance(schema, &value, origin)?;
        let document: CatalogueDocument = serde_json::from_value(value)
            .with_context(|| format!("decoding catalogue {origin}"))?;
        Self::from_document(document).with_context(|| format!("validating catalogue {origin}"))
    }

    /// The `schema_version` declared by the loaded document.
    pub fn schema_version(&self) -> &SchemaVersion {
        &self.schema_version
    }

    /// All categories in definition order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Every tool, category order first, then tool order.
    pub fn tools(&self) -> impl Iterator<Item = &Tool> {
        self.categories
            .iter()
            .flat_map(|category| category.tools.iter())
    }

    /// Resolve a tool by exact id.
    ///
    /// Returns `None` instead of erroring; callers decide how to present a
    /// missing tool.
    pub fn tool(&self, id: &str) -> Option<&Tool> {
        let (category, position) = self.by_tool.get(id)?;
        self.categories.get(*category)?.tools.get(*position)
    }

    /// Resolve a category by exact id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        let position = self.by_category.get(id)?;
        self.categories.get(*position)
    }

    /// Export the indexed catalogue back into document form.
    pub fn to_document(&self) -> CatalogueDocument {
        CatalogueDocument {
            schema_version: self.schema_version.clone(),
            categories: self.categories.clone(),
        }
    }
}

fn schema_options(allowed: &BTreeSet<String>) -> SchemaLoadOptions<'_> {
    SchemaLoadOptions {
        allowed_versions: Some(allowed),
        ..Default::default()
    }
}

fn builtin_schema() -> Result<SchemaLoadResult> {
    let value: Value =
        serde_json::from_str(BUILTIN_SCHEMA).context("parsing built-in catalogue schema")?;
    compile_schema(
        &value,
        "built-in catalogue schema",
        schema_options(&allowed_schema_versions()),
    )
}

fn sibling_schema_path(catalogue_path: &Path) -> Option<PathBuf> {
    let base = catalogue_path.parent()?.parent()?;
    let candidate = base.join(SCHEMA_RELATIVE_PATH);
    candidate.is_file().then_some(candidate)
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from([CATALOGUE_SCHEMA_VERSION.to_string()])
}

fn validate_schema_version(schema_version: &SchemaVersion) -> Result<()> {
    if schema_version.0.is_empty() {
        bail!("schema_version must not be empty");
    }

    if !is_identifier(schema_version.as_str()) {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version.as_str()) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }

    Ok(())
}

type Lookups = (BTreeMap<ToolId, (usize, usize)>, BTreeMap<CategoryId, usize>);

fn build_index(categories: &[Category]) -> Result<Lookups> {
    let mut by_category: BTreeMap<CategoryId, usize> = BTreeMap::new();
    let mut by_tool: BTreeMap<ToolId, (usize, usize)> = BTreeMap::new();

    for (category_pos, category) in categories.iter().enumerate() {
        if category.id.0.trim().is_empty() {
            bail!("encountered category with no id");
        }
        if by_category.contains_key(&category.id) {
            bail!("duplicate category id {}", category.id);
        }
        if category.name.trim().is_empty() {
            bail!("category {} has an empty name", category.id);
        }
        by_category.insert(category.id.clone(), category_pos);

        for (tool_pos, tool) in category.tools.iter().enumerate() {
            if tool.id.0.trim().is_empty() {
                bail!("encountered tool with no id in category {}", category.id);
            }
            if let Some((owner, _)) = by_tool.get(&tool.id) {
                let owner: &Category = &categories[*owner];
                bail!(
                    "duplicate tool id {} (in categories {} and {})",
                    tool.id,
                    owner.id,
                    category.id
                );
            }
            if tool.category != category.id {
                bail!(
                    "tool {} is listed under category {} but declares category {}",
                    tool.id,
                    category.id,
                    tool.category
                );
            }
            by_tool.insert(tool.id.clone(), (category_pos, tool_pos));
        }
    }

    Ok((by_tool, by_category))
}
