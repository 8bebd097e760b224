//! Project Metadata Model
//!
//! Parses and validates the `project.json` file found in each project
//! directory. Each file describes one firmware project that the web flasher
//! offers for installation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed name of the per-project metadata file
pub const METADATA_FILE: &str = "project.json";

/// Chip used when the metadata file does not name one
pub const DEFAULT_CHIP: &str = "esp32c3";

/// Build target used when the metadata file does not name one
pub const DEFAULT_TARGET: &str = "riscv32imc-esp-espidf";

/// Fields every metadata file must carry
pub const REQUIRED_FIELDS: &[&str] = &["name", "id", "description", "hardware", "software"];

/// A single firmware project described by its metadata file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Display name shown by the flasher UI
    pub name: String,

    /// Identifier; expected to match the containing directory name
    pub id: String,

    /// What this firmware does
    pub description: String,

    /// Hardware required to run this firmware
    pub hardware: Vec<String>,

    /// Software required to flash this firmware
    pub software: Vec<String>,

    /// Target chip (default: esp32c3)
    #[serde(default = "default_chip")]
    pub chip: String,

    /// Build target triple (default: riscv32imc-esp-espidf)
    #[serde(default = "default_target")]
    pub target: String,

    /// Optional documentation URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    /// Optional NVS configuration sections shown after flashing
    #[serde(rename = "configSections", skip_serializing_if = "Option::is_none")]
    pub config_sections: Option<Vec<ConfigSection>>,

    /// NVS partition layout; expected whenever configSections is present
    #[serde(rename = "nvsPartition", skip_serializing_if = "Option::is_none")]
    pub nvs_partition: Option<NvsPartition>,
}

fn default_chip() -> String {
    DEFAULT_CHIP.to_string()
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

/// One group of related configuration fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSection {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub fields: Vec<ConfigField>,
}

/// A single configuration input backed by an NVS key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigField {
    pub id: String,

    pub label: String,

    /// Input type, e.g. "text" or "password"
    #[serde(rename = "type")]
    pub field_type: String,

    /// NVS key the value is written to
    #[serde(rename = "nvsKey")]
    pub nvs_key: String,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// NVS partition description, passed through to the generated module uninterpreted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NvsPartition {
    pub name: String,
    pub offset: String,
    pub size: String,
    pub namespace: String,
}

impl ProjectDescriptor {
    /// Required keys absent from a raw metadata value
    pub fn missing_fields(raw: &Value) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| raw.get(field).is_none())
            .collect()
    }

    /// Deserialize a raw metadata value into a descriptor
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(raw)
    }

    /// configSections declared without an nvsPartition (documented convention)
    pub fn missing_nvs_partition(&self) -> bool {
        self.config_sections.is_some() && self.nvs_partition.is_none()
    }
}
