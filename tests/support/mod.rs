use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use toolshelf::{BUILTIN_SCHEMA, CatalogueIndex, CatalogueService};

pub fn builtin_service() -> CatalogueService {
    CatalogueService::new(CatalogueIndex::builtin().expect("built-in catalogue loads"))
}

pub fn toolshelf_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_toolshelf"))
}

pub fn toolshelf_cmd(args: &[&str]) -> Command {
    let mut cmd = Command::new(toolshelf_binary());
    cmd.args(args).env_remove("TOOLSHELF_CATALOGUE").env_remove("RUST_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn stdout_json(output: &Output) -> Result<Value> {
    serde_json::from_slice(&output.stdout).context("stdout is not a JSON document")
}

/// Lay out `<tmp>/catalogue/tools.json` plus `<tmp>/schema/catalogue.schema.json`
/// so the loader finds the sibling schema.
pub fn write_catalogue_tree(catalogue: &Value) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let catalogue_dir = dir.path().join("catalogue");
    let schema_dir = dir.path().join("schema");
    fs::create_dir_all(&catalogue_dir)?;
    fs::create_dir_all(&schema_dir)?;
    fs::write(schema_dir.join("catalogue.schema.json"), BUILTIN_SCHEMA)?;
    let path = catalogue_dir.join("tools.json");
    write_json(&path, catalogue)?;
    Ok((dir, path))
}

pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}
