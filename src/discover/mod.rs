//! Project Discovery
//!
//! Scans the immediate children of the projects root for metadata files.
//! Per-project problems degrade to warnings or error lines; the run only
//! becomes fatal at the top level, when nothing at all was discovered.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::Value;
use walkdir::WalkDir;

use crate::project::{ProjectDescriptor, METADATA_FILE};
use crate::report::Reporter;

/// Collect descriptors from every immediate child directory of `root`.
///
/// Returns projects in filesystem iteration order. A missing root reports an
/// error and yields an empty list; callers decide whether that is fatal.
pub fn discover_projects<W: Write>(root: &Path, reporter: &mut Reporter<W>) -> Vec<ProjectDescriptor> {
    let mut projects = Vec::new();

    if !root.is_dir() {
        reporter.error(&format!("projects directory not found: {}", root.display()));
        return projects;
    }

    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                reporter.error(&format!("failed to read directory entry: {}", e));
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir_name = entry.file_name().to_string_lossy().into_owned();
        let metadata_path = entry.path().join(METADATA_FILE);

        if !metadata_path.is_file() {
            reporter.warning(&format!("skipping {} - no {} found", dir_name, METADATA_FILE));
            continue;
        }

        let contents = match fs::read_to_string(&metadata_path) {
            Ok(contents) => contents,
            Err(e) => {
                reporter.error(&format!("failed to read {}: {}", metadata_path.display(), e));
                continue;
            }
        };

        let raw: Value = match serde_json::from_str(&contents) {
            Ok(raw) => raw,
            Err(e) => {
                reporter.error(&format!("failed to parse {}: {}", metadata_path.display(), e));
                continue;
            }
        };

        let missing = ProjectDescriptor::missing_fields(&raw);
        if !missing.is_empty() {
            reporter.warning(&format!(
                "{}/{} missing fields: {}",
                dir_name,
                METADATA_FILE,
                missing.join(", ")
            ));
            continue;
        }

        let project = match ProjectDescriptor::from_value(raw) {
            Ok(project) => project,
            Err(e) => {
                reporter.error(&format!("failed to parse {}: {}", metadata_path.display(), e));
                continue;
            }
        };

        // Accepted either way; the declared id wins over the directory name.
        if project.id != dir_name {
            reporter.warning(&format!(
                "{}/{} id '{}' doesn't match directory name",
                dir_name, METADATA_FILE, project.id
            ));
        }

        if project.missing_nvs_partition() {
            reporter.warning(&format!(
                "{} declares configSections without an nvsPartition",
                project.id
            ));
        }

        reporter.info(&format!("Found project: {}", project.name));
        projects.push(project);
    }

    projects
}
