//! flashgen - web flasher configuration generator
//!
//! Scans a projects root for per-project `project.json` metadata, validates
//! and aggregates it, and renders the `projects-config.js` module consumed by
//! the browser-based firmware flasher.

pub mod config;
pub mod discover;
pub mod project;
pub mod remote;
pub mod render;
pub mod report;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub use config::{CliOverrides, EnvSnapshot, GeneratorConfig};
pub use discover::discover_projects;
pub use project::ProjectDescriptor;
pub use remote::{resolve_repository, GitRemote, RemoteLookup};
pub use render::render_config;
pub use report::Reporter;

/// Failures that abort a generator run
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("no valid projects found under {0}")]
    NoProjects(PathBuf),

    #[error("failed to render configuration: {0}")]
    Render(#[from] serde_json::Error),
}

/// Run the full pipeline: resolve the repository, discover, render.
///
/// Per-project problems surface as reporter diagnostics; only an empty
/// discovery result is an error.
pub fn generate<W: Write>(
    config: &GeneratorConfig,
    lookup: &dyn RemoteLookup,
    reporter: &mut Reporter<W>,
) -> Result<String, GenerateError> {
    let repository =
        remote::resolve_repository(config.repository_override.as_deref(), lookup, reporter);

    reporter.info(&format!(
        "Generating flasher config for {} version {}",
        repository, config.version
    ));
    reporter.info(&format!("Scanning: {}", config.projects_dir.display()));

    let projects = discover::discover_projects(&config.projects_dir, reporter);
    if projects.is_empty() {
        return Err(GenerateError::NoProjects(config.projects_dir.clone()));
    }
    reporter.info(&format!("Found {} project(s)", projects.len()));

    Ok(render::render_config(&projects, &repository, &config.version)?)
}

/// Write the rendered module, creating parent directories as needed.
/// The file is fully overwritten, never merged.
pub fn write_output(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
