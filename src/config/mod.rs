//! Generator Configuration
//!
//! Collects every environment-derived knob into one explicit struct so the
//! discover and render operations never read the environment themselves.
//! Precedence per value: CLI flag, then environment variable, then built-in
//! default.

use std::env;
use std::path::{Path, PathBuf};

/// Version used when neither flag nor environment provides one
pub const DEFAULT_VERSION: &str = "latest";

/// Projects directory relative to the repository root
pub const DEFAULT_PROJECTS_DIR: &str = "sensors";

/// Output file relative to the repository root
pub const DEFAULT_OUTPUT_PATH: &str = "docs/flasher/js/projects-config.js";

/// Snapshot of the environment variables the generator honors
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    /// VERSION
    pub version: Option<String>,

    /// GITHUB_REPOSITORY
    pub repository: Option<String>,

    /// CI == "true"
    pub ci: bool,
}

impl EnvSnapshot {
    /// Capture from the process environment
    pub fn capture() -> Self {
        EnvSnapshot {
            version: env::var("VERSION").ok(),
            repository: env::var("GITHUB_REPOSITORY").ok(),
            ci: env::var("CI").map(|v| v == "true").unwrap_or(false),
        }
    }
}

/// Overrides supplied on the command line, highest precedence
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub projects_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub version: Option<String>,
    pub repository: Option<String>,
    pub ci: bool,
}

/// Fully resolved configuration for one generator run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Repository root the default paths are resolved against
    pub root: PathBuf,

    /// Directory scanned for project subdirectories
    pub projects_dir: PathBuf,

    /// File the rendered module is written to (unless CI mode)
    pub output_path: PathBuf,

    /// Release version interpolated into firmware URLs
    pub version: String,

    /// Explicit `owner/repo`, if any; otherwise resolution falls back to git
    pub repository_override: Option<String>,

    /// Suppresses the output file write; stdout is unaffected
    pub ci_mode: bool,
}

impl GeneratorConfig {
    /// Merge CLI overrides over an environment snapshot over the defaults
    pub fn resolve(cli: CliOverrides, env: EnvSnapshot) -> Self {
        let root = cli.root.unwrap_or_else(|| PathBuf::from("."));
        let projects_dir = resolve_path(&root, cli.projects_dir, DEFAULT_PROJECTS_DIR);
        let output_path = resolve_path(&root, cli.output, DEFAULT_OUTPUT_PATH);

        GeneratorConfig {
            projects_dir,
            output_path,
            version: cli
                .version
                .or(env.version)
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            repository_override: cli.repository.or(env.repository),
            ci_mode: cli.ci || env.ci,
            root,
        }
    }
}

fn resolve_path(root: &Path, explicit: Option<PathBuf>, default: &str) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path,
        Some(path) => root.join(path),
        None => root.join(default),
    }
}
