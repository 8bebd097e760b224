//! Configuration Module Rendering
//!
//! Turns discovered descriptors into the `projects-config.js` module the web
//! flasher loads. Rendering is pure and byte-deterministic: fixed key order,
//! serde_json escaping for every embedded value, and no timestamps.

use serde::Serialize;

use crate::project::ProjectDescriptor;

/// Indentation of the per-project keys inside an entry
const FIELD_INDENT: &str = "            ";

/// Deterministic firmware download URL for one project
pub fn firmware_url(repository: &str, version: &str, id: &str) -> String {
    format!("https://github.com/{repository}/releases/download/{version}/{id}.bin")
}

/// Render the full configuration module text.
///
/// Entries appear in the order given, keyed by project id. Optional keys
/// (`configSections`, `nvsPartition`, `documentation`) are emitted only when
/// present on the source descriptor, in that fixed order.
pub fn render_config(
    projects: &[ProjectDescriptor],
    repository: &str,
    version: &str,
) -> Result<String, serde_json::Error> {
    let mut entries = Vec::with_capacity(projects.len());
    for project in projects {
        entries.push(render_entry(project, repository, version)?);
    }

    Ok(format!(
        "// Auto-generated project configuration\n\
         // Generated from */{metadata} metadata\n\
         // DO NOT EDIT MANUALLY - your changes will be overwritten\n\
         //\n\
         // Repository: {repository}\n\
         // Version: {version}\n\
         \n\
         const PROJECTS = {{\n\
         {entries}\n\
         }};\n\
         \n\
         // Export for use in index.html\n\
         if (typeof module !== 'undefined' && module.exports) {{\n\
         \x20   module.exports = PROJECTS;\n\
         }}\n",
        metadata = crate::project::METADATA_FILE,
        repository = repository,
        version = version,
        entries = entries.join(",\n"),
    ))
}

fn render_entry(
    project: &ProjectDescriptor,
    repository: &str,
    version: &str,
) -> Result<String, serde_json::Error> {
    let url = firmware_url(repository, version, &project.id);

    // JSON-escaped key, so any valid id string yields a loadable module
    let mut entry = format!(
        "        {id}: {{\n\
         {pad}name: {name},\n\
         {pad}description: {description},\n\
         {pad}hardware: {hardware},\n\
         {pad}software: {software},\n\
         {pad}firmwareUrl: {url},\n\
         {pad}chip: {chip},\n\
         {pad}target: {target}",
        id = serde_json::to_string(&project.id)?,
        pad = FIELD_INDENT,
        name = serde_json::to_string(&project.name)?,
        description = serde_json::to_string(&project.description)?,
        hardware = serde_json::to_string(&project.hardware)?,
        software = serde_json::to_string(&project.software)?,
        url = serde_json::to_string(&url)?,
        chip = serde_json::to_string(&project.chip)?,
        target = serde_json::to_string(&project.target)?,
    );

    if let Some(ref sections) = project.config_sections {
        entry.push_str(&format!(
            ",\n{}configSections: {}",
            FIELD_INDENT,
            pretty_block(sections)?
        ));
    }
    if let Some(ref partition) = project.nvs_partition {
        entry.push_str(&format!(
            ",\n{}nvsPartition: {}",
            FIELD_INDENT,
            pretty_block(partition)?
        ));
    }
    if let Some(ref documentation) = project.documentation {
        entry.push_str(&format!(
            ",\n{}documentation: {}",
            FIELD_INDENT,
            serde_json::to_string(documentation)?
        ));
    }

    entry.push_str("\n        }");
    Ok(entry)
}

/// Pretty-print a nested value, aligning continuation lines with the entry keys
fn pretty_block<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let text = serde_json::to_string_pretty(value)?;
    let mut out = String::new();
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(FIELD_INDENT);
        }
        out.push_str(line);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{ConfigField, ConfigSection, NvsPartition, DEFAULT_CHIP, DEFAULT_TARGET};

    fn minimal_project(id: &str) -> ProjectDescriptor {
        ProjectDescriptor {
            name: "IMU A".to_string(),
            id: id.to_string(),
            description: "d".to_string(),
            hardware: vec!["H".to_string()],
            software: vec!["S".to_string()],
            chip: DEFAULT_CHIP.to_string(),
            target: DEFAULT_TARGET.to_string(),
            documentation: None,
            config_sections: None,
            nvs_partition: None,
        }
    }

    #[test]
    fn test_firmware_url_template() {
        assert_eq!(
            firmware_url("acme/sensors", "v1.0", "imu-a"),
            "https://github.com/acme/sensors/releases/download/v1.0/imu-a.bin"
        );
    }

    #[test]
    fn test_minimal_entry() {
        let projects = vec![minimal_project("imu-a")];
        let text = render_config(&projects, "acme/sensors", "v1.0").unwrap();

        assert!(text.contains("\"imu-a\": {"));
        assert!(text.contains(
            "firmwareUrl: \"https://github.com/acme/sensors/releases/download/v1.0/imu-a.bin\""
        ));
        assert!(text.contains("chip: \"esp32c3\""));
        assert!(text.contains("target: \"riscv32imc-esp-espidf\""));
        assert!(!text.contains("configSections"));
        assert!(!text.contains("nvsPartition"));
        assert!(!text.contains("documentation"));
    }

    #[test]
    fn test_header_and_export_guard() {
        let projects = vec![minimal_project("imu-a")];
        let text = render_config(&projects, "acme/sensors", "v1.0").unwrap();

        assert!(text.starts_with("// Auto-generated project configuration\n"));
        assert!(text.contains("// DO NOT EDIT MANUALLY - your changes will be overwritten"));
        assert!(text.contains("// Repository: acme/sensors"));
        assert!(text.contains("// Version: v1.0"));
        assert!(text.contains("const PROJECTS = {"));
        assert!(text.contains("if (typeof module !== 'undefined' && module.exports) {"));
        assert!(text.contains("    module.exports = PROJECTS;"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_deterministic_output() {
        let mut project = minimal_project("imu-a");
        project.documentation = Some("https://example.com/docs".to_string());
        project.config_sections = Some(vec![ConfigSection {
            id: "wifi".to_string(),
            title: "WiFi Settings".to_string(),
            description: "Network configuration".to_string(),
            fields: vec![ConfigField {
                id: "ssid".to_string(),
                label: "Network Name".to_string(),
                field_type: "text".to_string(),
                nvs_key: "wifi_ssid".to_string(),
                required: true,
                placeholder: Some("MyNetwork".to_string()),
                help: None,
            }],
        }]);
        project.nvs_partition = Some(NvsPartition {
            name: "nvs".to_string(),
            offset: "0x9000".to_string(),
            size: "0x6000".to_string(),
            namespace: "config".to_string(),
        });
        let projects = vec![project];

        let first = render_config(&projects, "acme/sensors", "v1.0").unwrap();
        let second = render_config(&projects, "acme/sensors", "v1.0").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_optional_keys_in_fixed_order() {
        let mut project = minimal_project("imu-a");
        project.documentation = Some("https://example.com/docs".to_string());
        project.config_sections = Some(vec![]);
        project.nvs_partition = Some(NvsPartition {
            name: "nvs".to_string(),
            offset: "0x9000".to_string(),
            size: "0x6000".to_string(),
            namespace: "config".to_string(),
        });

        let text = render_config(&[project], "acme/sensors", "v1.0").unwrap();

        let sections = text.find("configSections:").unwrap();
        let partition = text.find("nvsPartition:").unwrap();
        let documentation = text.find("documentation:").unwrap();
        assert!(sections < partition);
        assert!(partition < documentation);
    }

    #[test]
    fn test_values_are_json_escaped() {
        let mut project = minimal_project("imu-a");
        project.description = "says \"hi\"\nand more".to_string();

        let text = render_config(&[project], "acme/sensors", "v1.0").unwrap();
        assert!(text.contains(r#"description: "says \"hi\"\nand more""#));
    }

    #[test]
    fn test_nvs_key_passthrough() {
        let mut project = minimal_project("imu-a");
        project.config_sections = Some(vec![ConfigSection {
            id: "wifi".to_string(),
            title: "WiFi".to_string(),
            description: "Network".to_string(),
            fields: vec![ConfigField {
                id: "ssid".to_string(),
                label: "Network Name".to_string(),
                field_type: "text".to_string(),
                nvs_key: "wifi_ssid".to_string(),
                required: true,
                placeholder: None,
                help: None,
            }],
        }]);

        let text = render_config(&[project], "acme/sensors", "v1.0").unwrap();
        assert!(text.contains("\"nvsKey\": \"wifi_ssid\""));
        assert!(text.contains("\"type\": \"text\""));
        assert!(!text.contains("placeholder"));
    }

    #[test]
    fn test_multiple_entries_keep_input_order() {
        let mut second = minimal_project("env-b");
        second.name = "ENV B".to_string();
        let projects = vec![minimal_project("imu-a"), second];

        let text = render_config(&projects, "acme/sensors", "v1.0").unwrap();
        let first_at = text.find("\"imu-a\":").unwrap();
        let second_at = text.find("\"env-b\":").unwrap();
        assert!(first_at < second_at);
        assert!(text.contains("},\n        \"env-b\":"));
    }

    #[test]
    fn test_entry_key_is_json_escaped() {
        let projects = vec![minimal_project("imu'a"), minimal_project("imu\"b")];
        let text = render_config(&projects, "acme/sensors", "v1.0").unwrap();

        // A single quote needs no JSON escape inside a double-quoted key
        assert!(text.contains("        \"imu'a\": {"));
        assert!(text.contains("        \"imu\\\"b\": {"));
        assert!(text.contains("releases/download/v1.0/imu'a.bin"));
    }
}
