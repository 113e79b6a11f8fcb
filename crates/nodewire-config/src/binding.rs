//! Parameter binding file format and compilation.

use nodewire_core::{
    ConversionStage, ConverterKind, ParameterCallback, ParameterRange, RangeStage,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::validation::{ValidationResult, validate_binding, validate_set};

/// Range section of a binding.
///
/// Every field is optional in TOML; missing fields take the identity range
/// values (`min = 0`, `max = 1`, `skew = 1`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RangeConfig {
    /// Value produced by normalized `0.0`.
    pub min: f64,
    /// Value produced by normalized `1.0`.
    pub max: f64,
    /// Shaping exponent.
    pub skew: f64,
    /// Apply the skew outward from the centre.
    pub symmetric_skew: bool,
}

impl Default for RangeConfig {
    fn default() -> Self {
        ParameterRange::IDENTITY.into()
    }
}

impl From<RangeConfig> for ParameterRange {
    fn from(config: RangeConfig) -> Self {
        ParameterRange::new(config.min, config.max)
            .with_skew(config.skew)
            .with_symmetric_skew(config.symmetric_skew)
    }
}

impl From<ParameterRange> for RangeConfig {
    fn from(range: ParameterRange) -> Self {
        Self {
            min: range.min,
            max: range.max,
            skew: range.skew,
            symmetric_skew: range.symmetric_skew,
        }
    }
}

/// Declarative description of how one control drives one node parameter.
///
/// # TOML Format
///
/// ```toml
/// [[parameters]]
/// name = "Size"
/// converter = "Identity"
/// inverted = true
/// range = { min = 0.5, max = 10.0, skew = 0.3 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterBinding {
    /// Parameter name, unique within a [`BindingSet`].
    pub name: String,

    /// Converter identifier (see [`ConverterKind::id`]). Defaults to `"Identity"`.
    #[serde(default = "default_converter")]
    pub converter: String,

    /// Invert the normalized value before range mapping.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inverted: bool,

    /// Target range.
    #[serde(default)]
    pub range: RangeConfig,
}

fn default_converter() -> String {
    ConverterKind::Identity.id().to_string()
}

impl ParameterBinding {
    /// Create an identity binding for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            converter: default_converter(),
            inverted: false,
            range: RangeConfig::default(),
        }
    }

    /// Set the converter.
    pub fn with_converter(mut self, kind: ConverterKind) -> Self {
        self.converter = kind.id().to_string();
        self
    }

    /// Set the converter by identifier, known or not.
    pub fn with_converter_id(mut self, id: impl Into<String>) -> Self {
        self.converter = id.into();
        self
    }

    /// Set the target range.
    pub fn with_range(mut self, range: ParameterRange) -> Self {
        self.range = range.into();
        self
    }

    /// Set the invert flag.
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Resolve the converter identifier, if known.
    pub fn converter_kind(&self) -> Option<ConverterKind> {
        ConverterKind::from_id(&self.converter)
    }

    /// The configured range as a core [`ParameterRange`].
    pub fn parameter_range(&self) -> ParameterRange {
        self.range.into()
    }

    /// Validate and compile into a conversion stage.
    ///
    /// Unknown converter identifiers log a warning and compile to plain range
    /// mapping.
    pub fn compile(&self) -> ValidationResult<ConversionStage> {
        validate_binding(self)?;
        let range = self.parameter_range();
        let stage = match self.converter_kind() {
            Some(kind) => ConversionStage::build(kind, range, self.inverted),
            None => {
                tracing::warn!(
                    "binding '{}': unknown converter '{}', using range mapping",
                    self.name,
                    self.converter
                );
                ConversionStage::Range(RangeStage::new(range, self.inverted))
            }
        };
        tracing::debug!("binding '{}': compiled {:?}", self.name, stage);
        Ok(stage)
    }

    /// Validate, compile and pair with a destination setter.
    pub fn bind<F: FnMut(f64)>(&self, setter: F) -> ValidationResult<ParameterCallback<F>> {
        Ok(ParameterCallback::new(self.compile()?, setter))
    }
}

/// A named collection of parameter bindings, usually one per node type.
///
/// # TOML Format
///
/// ```toml
/// name = "Reverb"
///
/// [[parameters]]
/// name = "Mix"
/// converter = "DryAmount"
///
/// [[parameters]]
/// name = "Size"
/// range = { min = 0.5, max = 10.0, skew = 0.3 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BindingSet {
    /// Name of the set.
    pub name: String,

    /// Bindings in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParameterBinding>,
}

impl BindingSet {
    /// Create an empty binding set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a binding.
    pub fn with_parameter(mut self, binding: ParameterBinding) -> Self {
        self.parameters.push(binding);
        self
    }

    /// Load a binding set from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let set: BindingSet = toml::from_str(&content)?;
        tracing::debug!(
            "bindings: loaded '{}' ({} parameters) from {}",
            set.name,
            set.len(),
            path.display()
        );
        Ok(set)
    }

    /// Load a binding set from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the binding set to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!("bindings: saved '{}' to {}", self.name, path.display());
        Ok(())
    }

    /// Convert the binding set to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns true if the set has no bindings.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Find a binding by parameter name (exact match).
    pub fn get(&self, name: &str) -> Option<&ParameterBinding> {
        self.parameters.iter().find(|b| b.name == name)
    }

    /// Iterate over bindings.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterBinding> {
        self.parameters.iter()
    }

    /// Validate every binding and check names are unique.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_set(self)
    }

    /// Compile the binding for `name`.
    pub fn compile(&self, name: &str) -> Result<ConversionStage, ConfigError> {
        let binding = self
            .get(name)
            .ok_or_else(|| ConfigError::UnknownParameter(name.to_string()))?;
        Ok(binding.compile()?)
    }

    /// Validate the whole set, then compile every binding in order.
    pub fn compile_all(&self) -> Result<Vec<(String, ConversionStage)>, ConfigError> {
        self.validate()?;
        self.iter()
            .map(|b| -> Result<_, ConfigError> { Ok((b.name.clone(), b.compile()?)) })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodewire_core::gain_to_decibels;

    #[test]
    fn test_binding_defaults() {
        let binding = ParameterBinding::new("Mix");
        assert_eq!(binding.converter, "Identity");
        assert!(!binding.inverted);
        assert!(binding.parameter_range().is_identity());
        assert_eq!(binding.converter_kind(), Some(ConverterKind::Identity));
    }

    #[test]
    fn test_minimal_toml() {
        let set = BindingSet::from_toml(
            r#"
            name = "Gain"

            [[parameters]]
            name = "Level"
            "#,
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        let level = set.get("Level").unwrap();
        assert_eq!(level.converter, "Identity");
        assert_eq!(level.range, RangeConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let set = BindingSet::from_toml(
            r#"
            name = "Reverb"

            [[parameters]]
            name = "Mix"
            converter = "DryAmount"

            [[parameters]]
            name = "Size"
            inverted = true
            range = { min = 0.5, max = 10.0, skew = 0.3 }

            [[parameters]]
            name = "Pan"
            [parameters.range]
            min = -1.0
            max = 1.0
            skew = 0.5
            symmetric_skew = true
            "#,
        )
        .unwrap();

        assert_eq!(set.name, "Reverb");
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.get("Mix").unwrap().converter_kind(),
            Some(ConverterKind::DryAmount)
        );

        let size = set.get("Size").unwrap();
        assert!(size.inverted);
        assert_eq!(size.range.min, 0.5);
        assert_eq!(size.range.max, 10.0);
        assert_eq!(size.range.skew, 0.3);
        assert!(!size.range.symmetric_skew);

        assert!(set.get("Pan").unwrap().range.symmetric_skew);
    }

    #[test]
    fn test_compile_identity_fast_path() {
        let stage = ParameterBinding::new("Mix").compile().unwrap();
        assert!(stage.is_passthrough());

        let inverted = ParameterBinding::new("Mix").with_inverted(true).compile().unwrap();
        assert_eq!(inverted, ConversionStage::Range(RangeStage::Inverted));
    }

    #[test]
    fn test_compile_unknown_converter_falls_back() {
        let binding = ParameterBinding::new("Time")
            .with_converter_id("Tempo2Ms")
            .with_range(ParameterRange::new(0.0, 1000.0));
        assert_eq!(binding.converter_kind(), None);
        let stage = binding.compile().unwrap();
        assert_eq!(stage.convert(0.5), 500.0);
    }

    #[test]
    fn test_compile_unknown_converter_keeps_inversion() {
        let range = ParameterRange::new(20.0, 20000.0).with_skew(0.3);
        let binding = ParameterBinding::new("Cutoff")
            .with_converter_id("Freq2Ms")
            .with_range(range)
            .with_inverted(true);
        let stage = binding.compile().unwrap();
        assert_eq!(stage, ConversionStage::Range(RangeStage::new(range, true)));
        assert_eq!(stage.convert(0.0), 20000.0);
    }

    #[test]
    fn test_compile_rejects_invalid_range() {
        let binding = ParameterBinding::new("Gain").with_range(ParameterRange::new(0.0, 0.0));
        assert!(binding.compile().is_err());
    }

    #[test]
    fn test_bind_forwards_converted_value() {
        let mut received = 0.0;
        {
            let mut cb = ParameterBinding::new("Mix")
                .with_converter(ConverterKind::DryAmount)
                .bind(|v| received = v)
                .unwrap();
            cb.call(0.25);
        }
        assert_eq!(received, gain_to_decibels(0.75));
    }

    #[test]
    fn test_set_compile_by_name() {
        let set = BindingSet::new("fx").with_parameter(
            ParameterBinding::new("Drive").with_range(ParameterRange::new(0.0, 40.0)),
        );
        assert_eq!(set.compile("Drive").unwrap().convert(0.5), 20.0);
        assert!(matches!(
            set.compile("Tone"),
            Err(ConfigError::UnknownParameter(ref n)) if n == "Tone"
        ));
    }

    #[test]
    fn test_compile_all_preserves_order() {
        let set = BindingSet::new("fx")
            .with_parameter(ParameterBinding::new("A"))
            .with_parameter(ParameterBinding::new("B").with_converter(ConverterKind::WetAmount));
        let compiled = set.compile_all().unwrap();
        let names: Vec<&str> = compiled.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(compiled[1].1, ConversionStage::WetAmount);
    }

    #[test]
    fn test_compile_all_rejects_duplicates() {
        let set = BindingSet::new("fx")
            .with_parameter(ParameterBinding::new("A"))
            .with_parameter(ParameterBinding::new("A"));
        assert!(matches!(set.compile_all(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let set = BindingSet::new("Delay")
            .with_parameter(
                ParameterBinding::new("Time")
                    .with_range(ParameterRange::new(1.0, 2000.0).with_skew(0.4))
                    .with_inverted(true),
            )
            .with_parameter(
                ParameterBinding::new("Level").with_converter(ConverterKind::Decibel2Gain),
            );
        let text = set.to_toml().unwrap();
        assert!(text.contains("Decibel2Gain"), "got: {text}");
        assert_eq!(BindingSet::from_toml(&text).unwrap(), set);
    }

    #[test]
    fn test_inverted_false_not_serialized() {
        let set = BindingSet::new("x").with_parameter(ParameterBinding::new("Mix"));
        let text = set.to_toml().unwrap();
        assert!(!text.contains("inverted"), "got: {text}");
    }
}
