//! Select manifest types.

use crate::error::ManifestError;
use picklist_widgets::{presets, Select, SelectOption};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Built-in option tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetName {
    /// Five fruits, width 180
    Fruits,
    /// Twenty-six UTC offsets, width 280
    Timezones,
    /// Five colors with descriptions
    Colors,
}

impl PresetName {
    /// The preset's configured select.
    #[must_use]
    pub fn select(self) -> Select {
        match self {
            Self::Fruits => presets::fruit_select(),
            Self::Timezones => presets::timezone_select(),
            Self::Colors => presets::color_select(),
        }
    }
}

impl FromStr for PresetName {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fruits" | "fruit" => Ok(Self::Fruits),
            "timezones" | "timezone" => Ok(Self::Timezones),
            "colors" | "color" => Ok(Self::Colors),
            _ => Err(ManifestError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fruits => "fruits",
            Self::Timezones => "timezones",
            Self::Colors => "colors",
        };
        f.write_str(name)
    }
}

/// One option entry in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionConfig {
    /// Identifier reported on commit
    pub value: String,
    /// Display label (defaults to the value)
    #[serde(default)]
    pub label: Option<String>,
    /// Whether the option is disabled
    #[serde(default)]
    pub disabled: bool,
    /// Secondary text
    #[serde(default)]
    pub description: Option<String>,
}

impl From<&OptionConfig> for SelectOption {
    fn from(config: &OptionConfig) -> Self {
        let label = config.label.clone().unwrap_or_else(|| config.value.clone());
        let opt = Self::new(config.value.clone(), label).disabled(config.disabled);
        match &config.description {
            Some(text) => opt.description(text.clone()),
            None => opt,
        }
    }
}

/// Select manifest loaded from YAML or TOML.
///
/// Explicit `options` replace a preset's table; preset defaults apply
/// wherever the manifest is silent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectManifest {
    /// Element id
    #[serde(default)]
    pub id: Option<String>,
    /// Form field name
    #[serde(default)]
    pub name: Option<String>,
    /// Label above the trigger
    #[serde(default)]
    pub label: Option<String>,
    /// Trigger text when nothing is selected
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Built-in option table (fruits, timezones, colors)
    #[serde(default)]
    pub preset: Option<String>,
    /// Explicit options
    #[serde(default)]
    pub options: Option<Vec<OptionConfig>>,
    /// Initial value
    #[serde(default)]
    pub value: Option<String>,
    /// Whether the select ignores input
    #[serde(default)]
    pub disabled: bool,
    /// Whether a value is required
    #[serde(default)]
    pub required: bool,
    /// Validation message
    #[serde(default)]
    pub error: Option<String>,
    /// Popover viewport cap in pixels
    #[serde(default)]
    pub max_height: Option<f32>,
    /// Whether descriptions are shown
    #[serde(default)]
    pub show_description: Option<bool>,
    /// Minimum width in pixels
    #[serde(default)]
    pub width: Option<f32>,
}

fn check_positive(field: &str, value: Option<f32>) -> Result<(), ManifestError> {
    match value {
        Some(v) if v.is_nan() || v <= 0.0 => Err(ManifestError::invalid(
            field,
            format!("must be positive, got {v}"),
        )),
        _ => Ok(()),
    }
}

impl SelectManifest {
    /// Parse and validate a manifest from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_yaml_ng::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse and validate a manifest from TOML.
    pub fn from_toml(source: &str) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(source)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// The parsed preset, if any.
    pub fn preset_name(&self) -> Result<Option<PresetName>, ManifestError> {
        self.preset.as_deref().map(PresetName::from_str).transpose()
    }

    /// Check the manifest for unusable values.
    ///
    /// Duplicate option values are allowed but logged; lookups use the
    /// first match.
    pub fn validate(&self) -> Result<(), ManifestError> {
        check_positive("max_height", self.max_height)?;
        check_positive("width", self.width)?;

        let preset = self.preset_name()?;
        if preset.is_none() && self.options.is_none() {
            return Err(ManifestError::Validation(
                "either `options` or `preset` is required".to_string(),
            ));
        }

        if let Some(options) = &self.options {
            let mut seen = HashSet::new();
            for (i, opt) in options.iter().enumerate() {
                if opt.value.is_empty() {
                    return Err(ManifestError::invalid(
                        format!("options[{i}].value"),
                        "must not be empty",
                    ));
                }
                if !seen.insert(opt.value.as_str()) {
                    tracing::warn!(value = %opt.value, index = i, "duplicate option value in manifest");
                }
            }
        }

        Ok(())
    }

    /// Build the configured select.
    pub fn build(&self) -> Result<Select, ManifestError> {
        self.validate()?;

        let mut select = self
            .preset_name()?
            .map_or_else(Select::new, PresetName::select);

        if let Some(options) = &self.options {
            select.set_options(options.iter().map(SelectOption::from).collect());
        }
        if let Some(id) = &self.id {
            select = select.id(id.clone());
        }
        if let Some(name) = &self.name {
            select = select.name(name.clone());
        }
        if let Some(label) = &self.label {
            select = select.label(label.clone());
        }
        if let Some(placeholder) = &self.placeholder {
            select = select.placeholder(placeholder.clone());
        }
        if let Some(error) = &self.error {
            select = select.error(error.clone());
        }
        if let Some(height) = self.max_height {
            select = select.max_height(height);
        }
        if let Some(show) = self.show_description {
            select = select.show_description(show);
        }
        if let Some(width) = self.width {
            select = select.min_width(width);
        }

        tracing::debug!(
            id = select.element_id(),
            options = select.option_count(),
            "built select from manifest"
        );

        Ok(select
            .value(self.value.as_deref())
            .disabled(self.disabled)
            .required(self.required))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRUIT_YAML: &str = r"
id: fruit
name: fruit
label: Favourite fruit
preset: fruits
value: banana
required: true
";

    #[test]
    fn test_parse_yaml_manifest() {
        let manifest = SelectManifest::from_yaml(FRUIT_YAML).unwrap();
        assert_eq!(manifest.id.as_deref(), Some("fruit"));
        assert_eq!(manifest.preset_name().unwrap(), Some(PresetName::Fruits));
        assert!(manifest.required);
        assert!(!manifest.disabled);
    }

    #[test]
    fn test_build_from_preset() {
        let select = SelectManifest::from_yaml(FRUIT_YAML)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(select.option_count(), 5);
        assert_eq!(select.get_placeholder(), "Select a fruit");
        assert_eq!(select.get_min_width(), 180.0);
        assert_eq!(select.display_text(), "Banana");
        assert_eq!(select.get_label(), Some("Favourite fruit"));
        assert_eq!(select.form_field(), Some(("fruit", "banana")));
        assert!(select.is_required());
    }

    #[test]
    fn test_explicit_options_override_preset() {
        let yaml = r"
preset: colors
options:
  - value: teal
    label: Teal
    description: Between blue and green
  - value: gray
    disabled: true
";
        let select = SelectManifest::from_yaml(yaml).unwrap().build().unwrap();
        assert_eq!(select.option_count(), 2);
        assert_eq!(select.get_placeholder(), "Choose a color");
        assert!(select.shows_description());
        assert_eq!(select.get_options()[1].label, "gray");
        assert!(select.get_options()[1].disabled);
    }

    #[test]
    fn test_parse_toml_manifest() {
        let source = r#"
placeholder = "Pick one"
max_height = 120.0
width = 240.0

[[options]]
value = "a"
label = "Alpha"

[[options]]
value = "b"
label = "Beta"
"#;
        let select = SelectManifest::from_toml(source).unwrap().build().unwrap();
        assert_eq!(select.option_count(), 2);
        assert_eq!(select.get_placeholder(), "Pick one");
        assert_eq!(select.get_max_height(), 120.0);
        assert_eq!(select.get_min_width(), 240.0);
    }

    #[test]
    fn test_missing_options_and_preset() {
        let err = SelectManifest::from_yaml("label: Empty\n").unwrap_err();
        assert!(matches!(err, ManifestError::Validation(_)));
    }

    #[test]
    fn test_empty_options_list_is_allowed() {
        let select = SelectManifest::from_yaml("options: []\n")
            .unwrap()
            .build()
            .unwrap();
        assert!(select.is_empty());
    }

    #[test]
    fn test_unknown_preset() {
        let err = SelectManifest::from_yaml("preset: vegetables\n").unwrap_err();
        assert!(matches!(err, ManifestError::UnknownPreset(name) if name == "vegetables"));
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        let err = SelectManifest::from_yaml("preset: fruits\nmax_height: 0\n").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidValue { ref field, .. } if field == "max_height"));

        let err = SelectManifest::from_yaml("preset: fruits\nwidth: -5\n").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidValue { ref field, .. } if field == "width"));
    }

    #[test]
    fn test_empty_option_value_rejected() {
        let yaml = "options:\n  - value: a\n  - value: ''\n";
        let err = SelectManifest::from_yaml(yaml).unwrap_err();
        assert!(
            matches!(err, ManifestError::InvalidValue { ref field, .. } if field == "options[1].value")
        );
    }

    #[test]
    fn test_duplicate_values_are_allowed() {
        let yaml = "options:\n  - value: a\n  - value: a\n    label: Again\n";
        let select = SelectManifest::from_yaml(yaml).unwrap().build().unwrap();
        assert_eq!(select.option_count(), 2);
    }

    #[test]
    fn test_unknown_field_is_yaml_error() {
        let err = SelectManifest::from_yaml("preset: fruits\ncolour: red\n").unwrap_err();
        assert!(matches!(err, ManifestError::Yaml(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = SelectManifest::from_toml("placeholder = ").unwrap_err();
        assert!(matches!(err, ManifestError::Toml(_)));
    }

    #[test]
    fn test_unmatched_value_is_kept() {
        let select = SelectManifest::from_yaml("preset: fruits\nvalue: cherry\n")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(select.selected_value(), Some("cherry"));
        assert_eq!(select.display_text(), "Select a fruit");
    }

    #[test]
    fn test_yaml_roundtrip() {
        let manifest = SelectManifest::from_yaml(FRUIT_YAML).unwrap();
        let yaml = manifest.to_yaml().unwrap();
        let back = SelectManifest::from_yaml(&yaml).unwrap();
        assert_eq!(manifest, back);
    }

    #[test]
    fn test_preset_name_parse_and_display() {
        assert_eq!("Timezones".parse::<PresetName>().unwrap(), PresetName::Timezones);
        assert_eq!(PresetName::Colors.to_string(), "colors");
        assert!("".parse::<PresetName>().is_err());
    }
}
