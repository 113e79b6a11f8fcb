//! Integration tests for nodewire-config.
//!
//! These tests verify end-to-end functionality: binding files on disk,
//! compilation into core stages, and driving node state through the result.

use nodewire_config::{BindingSet, ConfigError, ParameterBinding, ValidationError};
use nodewire_core::{
    ConverterKind, ParameterCallback, ParameterRange, SampleStore, decibels_to_gain,
    gain_to_decibels,
};
use tempfile::TempDir;

const REVERB_BINDINGS: &str = r#"
name = "Reverb"

[[parameters]]
name = "Wet"
converter = "WetAmount"

[[parameters]]
name = "Dry"
converter = "DryAmount"

[[parameters]]
name = "Decay"
converter = "SubtractFromOne"
range = { min = 0.1, max = 10.0 }

[[parameters]]
name = "Output"
converter = "Decibel2Gain"
"#;

/// Node state the bindings write into.
#[derive(Default)]
struct ReverbState {
    wet_db: f64,
    dry_db: f64,
    decay_s: f64,
    output_gain: f64,
}

/// Test saving a binding set to disk and loading it back.
#[test]
fn test_save_and_load_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("reverb.toml");

    let set = BindingSet::from_toml(REVERB_BINDINGS).unwrap();
    set.save(&path).unwrap();
    assert!(path.exists());

    let loaded = BindingSet::load(&path).unwrap();
    assert_eq!(loaded, set);
    assert_eq!(loaded.len(), 4);
}

/// Test loading a missing file reports the path.
#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    let err = BindingSet::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

/// Test malformed TOML surfaces a parse error.
#[test]
fn test_load_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "name = \n[[parameters]\n").unwrap();

    assert!(matches!(
        BindingSet::load(&path),
        Err(ConfigError::TomlParse(_))
    ));
}

/// Test one wet control driving a full reverb parameter set.
#[test]
fn test_bindings_drive_node_state() {
    let set = BindingSet::from_toml(REVERB_BINDINGS).unwrap();
    let stages = set.compile_all().unwrap();
    let mut state = ReverbState::default();

    for (name, stage) in stages {
        match name.as_str() {
            "Wet" => ParameterCallback::new(stage, |v| state.wet_db = v).call(0.25),
            "Dry" => ParameterCallback::new(stage, |v| state.dry_db = v).call(0.25),
            "Decay" => ParameterCallback::new(stage, |v| state.decay_s = v).call(0.25),
            "Output" => ParameterCallback::new(stage, |v| state.output_gain = v).call(-20.0),
            other => panic!("unexpected binding {other}"),
        }
    }

    assert_eq!(state.wet_db, gain_to_decibels(0.25));
    assert_eq!(state.dry_db, gain_to_decibels(0.75));
    // clamp(1 - 0.25) = 0.75 on [0.1, 10.0]
    assert!((state.decay_s - (0.1 + 9.9 * 0.75)).abs() < 1e-9);
    assert!((state.output_gain - 0.1).abs() < 1e-12);
}

/// Test the compiled output gain applied to a block.
#[test]
fn test_output_binding_scales_block() {
    let set = BindingSet::from_toml(REVERB_BINDINGS).unwrap();
    let mut gain = 1.0f32;
    {
        let mut output = set.get("Output").unwrap().bind(|v| gain = v as f32).unwrap();
        output.call(-6.0206);
    }

    let mut store = SampleStore::new(2, 128);
    for ch in 0..2 {
        store.channel_mut(ch).fill(0.8);
    }
    store.view().apply_gain(gain);
    let peak = store.view().peak_magnitude();
    assert!((peak - 0.4).abs() < 1e-4, "Expected ~0.4, got {peak}");
}

/// Test invalid files load but refuse to compile.
#[test]
fn test_invalid_set_refuses_to_compile() {
    let set = BindingSet::from_toml(
        r#"
        name = "Broken"

        [[parameters]]
        name = "Cutoff"
        range = { min = 20000.0, max = 20.0 }

        [[parameters]]
        name = "Q"
        range = { skew = -2.0 }
        "#,
    )
    .unwrap();

    match set.compile_all() {
        Err(ConfigError::Validation(ValidationError::Multiple(errors))) => {
            assert_eq!(errors.len(), 2);
            assert!(matches!(errors[0], ValidationError::InvalidRange { .. }));
            assert!(matches!(errors[1], ValidationError::InvalidSkew { .. }));
        }
        other => panic!("expected multiple validation errors, got {other:?}"),
    }
}

/// Test every built-in converter id survives a file round trip.
#[test]
fn test_all_converters_roundtrip_through_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("all.toml");

    let set = ConverterKind::ALL
        .into_iter()
        .fold(BindingSet::new("All"), |set, kind| {
            set.with_parameter(
                ParameterBinding::new(kind.id())
                    .with_converter(kind)
                    .with_range(ParameterRange::new(-1.0, 1.0)),
            )
        });
    set.save(&path).unwrap();

    let loaded = BindingSet::load(&path).unwrap();
    for kind in ConverterKind::ALL {
        assert_eq!(loaded.get(kind.id()).unwrap().converter_kind(), Some(kind));
    }
    assert_eq!(loaded.compile_all().unwrap().len(), ConverterKind::ALL.len());
}

/// Wet and dry bindings of the same control sum to unity gain.
#[test]
fn test_wet_dry_bindings_sum_to_unity() {
    let set = BindingSet::from_toml(REVERB_BINDINGS).unwrap();
    let wet = set.compile("Wet").unwrap();
    let dry = set.compile("Dry").unwrap();
    for i in 1..10 {
        let x = f64::from(i) / 10.0;
        let total = decibels_to_gain(wet.convert(x)) + decibels_to_gain(dry.convert(x));
        assert!((total - 1.0).abs() < 1e-9, "x={x}: total {total}");
    }
}
