use crate::domain::models::{ClockTime, ConfigError, RangeConfig, SettingField};
use serde::{Deserialize, Serialize};

pub const DEFAULT_STEP_SECONDS: i64 = 900;
pub const DEFAULT_MIN: &str = "0:00";
pub const DEFAULT_MAX: &str = "23:45";

/// A step as supplied by a caller: attributes arrive as text, overrides may
/// be JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepSetting {
    Integer(i64),
    Fractional(f64),
    Text(String),
}

impl StepSetting {
    /// Coerces to whole seconds. Text keeps its leading integer (`"900s"` is
    /// 900); fractions truncate toward zero.
    pub fn coerce(&self) -> Result<i64, ConfigError> {
        match self {
            Self::Integer(value) => Ok(*value),
            Self::Fractional(value) if value.is_finite() => Ok(value.trunc() as i64),
            Self::Fractional(value) => Err(ConfigError::StepNotNumeric {
                value: value.to_string(),
            }),
            Self::Text(text) => {
                parse_integer_prefix(text).ok_or_else(|| ConfigError::StepNotNumeric {
                    value: text.clone(),
                })
            }
        }
    }
}

impl From<i64> for StepSetting {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// One source of settings. Unset fields fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<StepSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

impl SettingsLayer {
    pub fn builtin_defaults() -> Self {
        Self {
            step: Some(StepSetting::Integer(DEFAULT_STEP_SECONDS)),
            min: Some(DEFAULT_MIN.to_string()),
            max: Some(DEFAULT_MAX.to_string()),
        }
    }

    /// Reads `step`, `min` and `max` from element attributes. Empty values
    /// count as absent.
    pub fn from_attributes<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut layer = Self::default();
        for (name, value) in attributes {
            if value.is_empty() {
                continue;
            }
            match name {
                "step" => layer.step = Some(StepSetting::Text(value.to_string())),
                "min" => layer.min = Some(value.to_string()),
                "max" => layer.max = Some(value.to_string()),
                _ => {}
            }
        }
        layer
    }

    /// Field-by-field merge where any value set on `self` wins.
    pub fn apply_over(&self, lower: &SettingsLayer) -> SettingsLayer {
        SettingsLayer {
            step: self.step.clone().or_else(|| lower.step.clone()),
            min: self.min.clone().or_else(|| lower.min.clone()),
            max: self.max.clone().or_else(|| lower.max.clone()),
        }
    }
}

/// Merges overrides over attributes over defaults and validates the result.
pub fn resolve(
    defaults: &SettingsLayer,
    attributes: &SettingsLayer,
    overrides: &SettingsLayer,
) -> Result<RangeConfig, ConfigError> {
    let merged = overrides.apply_over(&attributes.apply_over(defaults));

    let min = parse_time_setting(merged.min.as_deref(), SettingField::Min)?;
    let max = parse_time_setting(merged.max.as_deref(), SettingField::Max)?;
    let step = match &merged.step {
        Some(step) => step.coerce()?,
        None => {
            return Err(ConfigError::StepNotNumeric {
                value: String::new(),
            });
        }
    };
    RangeConfig::new(step, min, max)
}

fn parse_time_setting(value: Option<&str>, field: SettingField) -> Result<ClockTime, ConfigError> {
    let value = value.unwrap_or_default();
    ClockTime::parse(value).ok_or_else(|| ConfigError::InvalidTime {
        field,
        value: value.to_string(),
    })
}

fn parse_integer_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if end == 0 {
        return None;
    }
    // Only digits remain, so parsing can fail on overflow alone.
    let magnitude = unsigned[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn overrides(step: Option<StepSetting>, min: Option<&str>, max: Option<&str>) -> SettingsLayer {
        SettingsLayer {
            step,
            min: min.map(ToOwned::to_owned),
            max: max.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn builtin_defaults_resolve_to_quarter_hours() {
        let config = resolve(
            &SettingsLayer::builtin_defaults(),
            &SettingsLayer::default(),
            &SettingsLayer::default(),
        )
        .expect("defaults resolve");
        assert_eq!(config.step(), 900);
        assert_eq!(config.min().to_string(), "0:00");
        assert_eq!(config.max().to_string(), "23:45");
    }

    #[test]
    fn attributes_override_defaults_and_overrides_win() {
        let attributes =
            SettingsLayer::from_attributes([("step", "1800"), ("min", "8:00"), ("max", "")]);
        let caller = overrides(None, Some("9:00"), None);

        let config = resolve(&SettingsLayer::builtin_defaults(), &attributes, &caller)
            .expect("layers resolve");
        assert_eq!(config.step(), 1800);
        assert_eq!(config.min().to_string(), "9:00");
        assert_eq!(config.max().to_string(), "23:45");
    }

    #[test]
    fn from_attributes_ignores_unknown_and_empty_values() {
        let layer = SettingsLayer::from_attributes([
            ("type", "time"),
            ("step", ""),
            ("min", "7:30"),
        ]);
        assert_eq!(layer, overrides(None, Some("7:30"), None));
    }

    #[test]
    fn step_text_is_coerced_like_an_integer_prefix() {
        assert_eq!(StepSetting::Text("900".to_string()).coerce(), Ok(900));
        assert_eq!(StepSetting::Text(" 600sec".to_string()).coerce(), Ok(600));
        assert_eq!(StepSetting::Text("-60".to_string()).coerce(), Ok(-60));
        assert_eq!(StepSetting::Fractional(899.9).coerce(), Ok(899));
        assert_eq!(
            StepSetting::Text("quarter".to_string()).coerce(),
            Err(ConfigError::StepNotNumeric {
                value: "quarter".to_string()
            })
        );
    }

    #[test]
    fn step_setting_deserializes_numbers_and_text() {
        let layer: SettingsLayer =
            serde_json::from_str(r#"{"step": 300, "min": "6:00"}"#).expect("integer step");
        assert_eq!(layer.step, Some(StepSetting::Integer(300)));
        let layer: SettingsLayer =
            serde_json::from_str(r#"{"step": "300"}"#).expect("text step");
        assert_eq!(layer.step, Some(StepSetting::Text("300".to_string())));
        let layer: SettingsLayer =
            serde_json::from_str(r#"{"step": 300.5}"#).expect("fractional step");
        assert_eq!(layer.step, Some(StepSetting::Fractional(300.5)));
    }

    #[test]
    fn invalid_settings_name_the_offending_field() {
        let defaults = SettingsLayer::builtin_defaults();
        let none = SettingsLayer::default();

        let error = resolve(&defaults, &none, &overrides(None, Some("25:00"), None))
            .expect_err("bad min");
        assert_eq!(error.field(), SettingField::Min);
        assert!(error.to_string().starts_with("min has to be a valid time string"));

        let error = resolve(&defaults, &none, &overrides(None, None, Some("noon")))
            .expect_err("bad max");
        assert_eq!(error.field(), SettingField::Max);

        let error = resolve(&defaults, &none, &overrides(Some(0.into()), None, None))
            .expect_err("zero step");
        assert_eq!(error, ConfigError::StepOutOfRange { step: 0 });

        let error = resolve(&defaults, &none, &overrides(Some(43_201.into()), None, None))
            .expect_err("step above twelve hours");
        assert_eq!(error.field(), SettingField::Step);

        let error = resolve(
            &defaults,
            &none,
            &overrides(None, Some("18:00"), Some("9:00")),
        )
        .expect_err("min after max");
        assert!(matches!(error, ConfigError::MinAfterMax { .. }));
    }

    #[test]
    fn missing_fields_are_reported_when_no_layer_sets_them() {
        let none = SettingsLayer::default();
        let error = resolve(&none, &none, &none).expect_err("nothing set");
        assert_eq!(
            error,
            ConfigError::InvalidTime {
                field: SettingField::Min,
                value: String::new()
            }
        );
    }

    proptest! {
        #[test]
        fn present_override_always_wins(
            default_step in 1i64..=43_200i64,
            attribute_step in 1i64..=43_200i64,
            override_step in 1i64..=43_200i64,
            min_hour in 0u32..12,
            max_hour in 12u32..24
        ) {
            let defaults = SettingsLayer {
                step: Some(default_step.into()),
                ..SettingsLayer::builtin_defaults()
            };
            let attributes = SettingsLayer {
                step: Some(StepSetting::Text(attribute_step.to_string())),
                min: Some(format!("{min_hour}:00")),
                max: None,
            };
            let max = format!("{max_hour}:30");
            let caller = overrides(Some(override_step.into()), None, Some(max.as_str()));

            let config = resolve(&defaults, &attributes, &caller).expect("valid layers");

            prop_assert_eq!(i64::from(config.step()), override_step);
            prop_assert_eq!(config.min().hour(), min_hour);
            prop_assert_eq!(config.max().hour(), max_hour);
            prop_assert_eq!(config.max().minute(), 30);
        }
    }
}
