//! Skeleton descriptor handling.
//! A skeleton declares its copy/ignore patterns and its questions in
//! `.ahoy/skeleton.json` or `.ahoy/skeleton.yml`; both formats are parsed into
//! the same [`SkeletonConfig`].

use crate::constants::{CONFIG_FILES, RESERVED_FIELD_NAMES};
use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::Path;

/// Input kinds a skeleton field may declare. They mirror HTML input types and
/// are translated to terminal prompts by the question collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Checkbox,
    Color,
    Date,
    DatetimeLocal,
    Email,
    Month,
    Number,
    Password,
    Radio,
    Range,
    Select,
    MultiSelect,
    Tel,
    #[default]
    Text,
    Time,
    Url,
    Week,
    Auto,
}

impl FieldType {
    /// Name of the type as written in the descriptor.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Checkbox => "checkbox",
            FieldType::Color => "color",
            FieldType::Date => "date",
            FieldType::DatetimeLocal => "datetime-local",
            FieldType::Email => "email",
            FieldType::Month => "month",
            FieldType::Number => "number",
            FieldType::Password => "password",
            FieldType::Radio => "radio",
            FieldType::Range => "range",
            FieldType::Select => "select",
            FieldType::MultiSelect => "multi-select",
            FieldType::Tel => "tel",
            FieldType::Text => "text",
            FieldType::Time => "time",
            FieldType::Url => "url",
            FieldType::Week => "week",
            FieldType::Auto => "auto",
        }
    }
}

/// Terminal widgets that override the prompt derived from the field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    Toggle,
    List,
    Autocomplete,
    Slug,
}

/// A selectable option, either a bare value or a titled one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Plain(String),
    Titled { title: String, value: String },
}

impl Choice {
    pub fn title(&self) -> &str {
        match self {
            Choice::Plain(value) => value,
            Choice::Titled { title, .. } => title,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Choice::Plain(value) => value,
            Choice::Titled { value, .. } => value,
        }
    }
}

/// One question declared by a skeleton.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Field {
    /// Variable name the answer is bound to
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    /// Prompt text, defaults to the field name
    #[serde(default)]
    pub message: Option<String>,
    /// Initial answer; for selects the initially highlighted value
    #[serde(default)]
    pub initial: Option<serde_json::Value>,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub widget: Option<Widget>,
}

fn default_required() -> bool {
    true
}

impl Field {
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(&self.name)
    }
}

/// Parsed skeleton descriptor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkeletonConfig {
    /// Patterns of files copied byte for byte
    #[serde(deserialize_with = "null_as_default")]
    pub copy: Vec<String>,
    /// Patterns of files never visited
    #[serde(deserialize_with = "null_as_default")]
    pub ignore: Vec<String>,
    /// Questions asked after the built-in ones
    #[serde(deserialize_with = "null_as_default")]
    pub fields: Vec<Field>,
}

/// Reads an explicit `null` as the default value.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Descriptor serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Finds the first existing descriptor among `config_files` and returns its
/// content and format.
///
/// # Errors
/// * `Error::ConfigError` if none of the files exists
pub fn load_config<P: AsRef<Path>>(
    template_root: P,
    config_files: &[&str],
) -> Result<(String, ConfigFormat)> {
    for file in config_files {
        let config_path = template_root.as_ref().join(file);
        if config_path.is_file() {
            debug!("Loading configuration from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path)?;
            return Ok((content, ConfigFormat::from_path(&config_path)));
        }
    }

    Err(Error::ConfigError(format!(
        "skeleton config not found (tried: {})",
        config_files.join(", ")
    )))
}

/// Parses descriptor content and checks its field names.
///
/// # Errors
/// * `Error::ConfigError` if the content is malformed, a field reuses a
///   reserved name or two fields share a name
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<SkeletonConfig> {
    let config: SkeletonConfig = match format {
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| {
            Error::ConfigError(format!("error loading skeleton configuration file: {e}"))
        })?,
        ConfigFormat::Yaml => {
            // An empty YAML document declares nothing.
            if content.trim().is_empty() {
                SkeletonConfig::default()
            } else {
                serde_yaml::from_str(content).map_err(|e| {
                    Error::ConfigError(format!("error loading skeleton configuration file: {e}"))
                })?
            }
        }
    };

    let mut seen = HashSet::new();
    for field in &config.fields {
        if RESERVED_FIELD_NAMES.contains(&field.name.as_str()) {
            return Err(Error::ConfigError(format!(
                "field name '{}' is reserved",
                field.name
            )));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(Error::ConfigError(format!(
                "field name '{}' is declared twice",
                field.name
            )));
        }
    }

    Ok(config)
}

/// Loads and parses the descriptor of the skeleton at `template_root`.
pub fn get_config<P: AsRef<Path>>(template_root: P) -> Result<SkeletonConfig> {
    let (content, format) = load_config(template_root, &CONFIG_FILES)?;
    parse_config(&content, format)
}
