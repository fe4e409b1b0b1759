//! Shared JSON Schema loader with `schema_version` enforcement.
//!
//! Catalogue schemas are read either from disk or from the copy compiled into
//! the binary. Both paths go through `compile_schema`, which extracts the
//! `schema_version` const, checks it against the allowed set, and compiles a
//! JSONSchema validator from the payload.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use log::debug;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Result of loading and compiling a JSON Schema.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

/// Controls how schemas are checked before compilation.
pub(crate) struct SchemaLoadOptions<'a> {
    /// Where to find the schema_version const inside the schema payload.
    pub schema_version_pointer: &'a str,
    /// Allowed schema_version values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
}

impl Default for SchemaLoadOptions<'_> {
    fn default() -> Self {
        Self {
            schema_version_pointer: "/properties/schema_version/const",
            allowed_versions: None,
        }
    }
}

pub(crate) fn load_json_schema(
    path: &Path,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let file = File::open(path).with_context(|| format!("opening schema {}", path.display()))?;
    let schema: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing schema {}", path.display()))?;
    compile_schema(&schema, &path.display().to_string(), options)
}

/// Compile an already-parsed schema. `origin` is only used in error messages.
pub(crate) fn compile_schema(
    schema: &Value,
    origin: &str,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let schema_version = extract_schema_version(schema, options.schema_version_pointer)
        .ok_or_else(|| anyhow!("schema {origin} missing schema_version const"))?;

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    let compiled =
        JSONSchema::compile(schema).map_err(|err| anyhow!("compiling schema {origin}: {err}"))?;
    debug!("compiled schema {origin} ({schema_version})");

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

/// Validate `instance` and collect every violation into one error.
pub(crate) fn validate_instance(
    schema: &SchemaLoadResult,
    instance: &Value,
    origin: &str,
) -> Result<()> {
    if let Err(errors) = schema.compiled.validate(instance) {
        let details = errors
            .map(|err| format!("{}: {}", err.instance_path, err))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("catalogue {origin} failed schema validation:\n{details}");
    }
    Ok(())
}

pub(crate) fn is_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if is_identifier(version) {
        Some(version.to_string())
    } else {
        None
    }
}
