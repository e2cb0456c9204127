use crate::application::settings::{DEFAULT_MAX, DEFAULT_MIN, DEFAULT_STEP_SECONDS, SettingsLayer};
use crate::infrastructure::error::InfraError;
use std::fs;
use std::path::Path;

pub const SETTINGS_JSON: &str = "timeinput.json";
const SCHEMA_VERSION: u64 = 1;

fn default_settings() -> serde_json::Value {
    serde_json::json!({
        "schema": SCHEMA_VERSION,
        "step": DEFAULT_STEP_SECONDS,
        "min": DEFAULT_MIN,
        "max": DEFAULT_MAX
    })
}

pub fn ensure_default_settings(config_dir: &Path) -> Result<(), InfraError> {
    let path = config_dir.join(SETTINGS_JSON);
    if !path.exists() {
        let formatted = serde_json::to_string_pretty(&default_settings())?;
        fs::write(path, format!("{formatted}\n"))?;
    }
    Ok(())
}

fn read_settings(path: &Path) -> Result<serde_json::Value, InfraError> {
    let raw = fs::read_to_string(path)?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)?;
    let schema = parsed
        .get("schema")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| {
            InfraError::InvalidSettingsFile(format!("missing schema in {}", path.display()))
        })?;
    if schema != SCHEMA_VERSION {
        return Err(InfraError::InvalidSettingsFile(format!(
            "unsupported schema {} in {}",
            schema,
            path.display()
        )));
    }
    Ok(parsed)
}

/// The defaults layer stored in the workspace settings file.
pub fn load_default_layer(config_dir: &Path) -> Result<SettingsLayer, InfraError> {
    let settings = read_settings(&config_dir.join(SETTINGS_JSON))?;
    Ok(serde_json::from_value(settings)?)
}

pub fn save_default_layer(config_dir: &Path, layer: &SettingsLayer) -> Result<(), InfraError> {
    let mut settings = serde_json::to_value(layer)?;
    let object = settings.as_object_mut().ok_or_else(|| {
        InfraError::InvalidSettingsFile("settings layer must serialize to an object".to_string())
    })?;
    object.insert("schema".to_string(), serde_json::json!(SCHEMA_VERSION));

    let formatted = serde_json::to_string_pretty(&settings)?;
    fs::write(config_dir.join(SETTINGS_JSON), format!("{formatted}\n"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::settings::StepSetting;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_TEMP_DIR: AtomicUsize = AtomicUsize::new(0);

    struct TempConfigDir {
        path: PathBuf,
    }

    impl TempConfigDir {
        fn new() -> Self {
            let sequence = NEXT_TEMP_DIR.fetch_add(1, Ordering::Relaxed);
            let path = std::env::temp_dir().join(format!(
                "timeinput-config-tests-{}-{}",
                std::process::id(),
                sequence
            ));
            fs::create_dir_all(&path).expect("create temp config dir");
            Self { path }
        }
    }

    impl Drop for TempConfigDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    #[test]
    fn default_settings_are_written_once_and_loaded() {
        let dir = TempConfigDir::new();
        ensure_default_settings(&dir.path).expect("write defaults");
        assert_eq!(
            load_default_layer(&dir.path).expect("load defaults"),
            SettingsLayer::builtin_defaults()
        );

        let raw = fs::read_to_string(dir.path.join(SETTINGS_JSON)).expect("read file");
        assert!(raw.ends_with("}\n"));
    }

    #[test]
    fn existing_settings_are_not_overwritten() {
        let dir = TempConfigDir::new();
        fs::write(
            dir.path.join(SETTINGS_JSON),
            r#"{"schema": 1, "step": "1800", "min": "7:00"}"#,
        )
        .expect("seed settings");
        ensure_default_settings(&dir.path).expect("ensure defaults");

        let layer = load_default_layer(&dir.path).expect("load settings");
        assert_eq!(layer.step, Some(StepSetting::Text("1800".to_string())));
        assert_eq!(layer.min.as_deref(), Some("7:00"));
        assert_eq!(layer.max, None);
    }

    #[test]
    fn missing_or_unknown_schema_is_rejected() {
        let dir = TempConfigDir::new();
        fs::write(dir.path.join(SETTINGS_JSON), r#"{"step": 900}"#).expect("seed settings");
        assert!(matches!(
            load_default_layer(&dir.path),
            Err(InfraError::InvalidSettingsFile(message)) if message.contains("missing schema")
        ));

        fs::write(dir.path.join(SETTINGS_JSON), r#"{"schema": 2}"#).expect("seed settings");
        assert!(matches!(
            load_default_layer(&dir.path),
            Err(InfraError::InvalidSettingsFile(message)) if message.contains("unsupported schema 2")
        ));
    }

    #[test]
    fn saved_layer_roundtrips_through_the_file() {
        let dir = TempConfigDir::new();
        let layer = SettingsLayer {
            step: Some(StepSetting::Integer(300)),
            min: Some("6:00".to_string()),
            max: Some("22:00".to_string()),
        };
        save_default_layer(&dir.path, &layer).expect("save layer");
        assert_eq!(load_default_layer(&dir.path).expect("load layer"), layer);
    }
}
