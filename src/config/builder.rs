use std::num::NonZeroU32;

use crate::error::ConfigError;
use crate::settings::Settings;

use super::model::{TrainingConfig, TrainingDraft};

const MIN_SPLIT: i64 = 50;
const MAX_SPLIT: i64 = 95;

/// Converts a [`TrainingDraft`] into a runnable [`TrainingConfig`].
///
/// Upper bounds for epochs and batch size come from `settings`.
///
/// # Errors
/// Returns the first field that fails to parse or falls out of range.
pub fn build(draft: &TrainingDraft, settings: &Settings) -> Result<TrainingConfig, ConfigError> {
    let nz = |value: &str, field: &'static str, max: u32| -> Result<NonZeroU32, ConfigError> {
        let n = integer(value, field, 1, i64::from(max))?;
        u32::try_from(n)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(ConfigError::OutOfRange {
                field,
                value: n,
                min: 1,
                max: i64::from(max),
            })
    };

    let epochs = nz(&draft.epochs, "epochs", settings.max_epochs)?;
    let batch_size = nz(&draft.batch_size, "batch size", settings.max_batch_size)?;
    let learning_rate = learning_rate(&draft.learning_rate)?;
    let train_split = integer(&draft.train_split, "train split", MIN_SPLIT, MAX_SPLIT)?;

    Ok(TrainingConfig {
        model: draft.model,
        epochs,
        batch_size,
        learning_rate,
        optimizer: draft.optimizer,
        // Range-checked above.
        train_split: train_split as u8,
    })
}

fn integer(value: &str, field: &'static str, min: i64, max: i64) -> Result<i64, ConfigError> {
    let n: i64 = value.trim().parse().map_err(|_| ConfigError::NotANumber {
        field,
        value: value.to_string(),
    })?;

    if !(min..=max).contains(&n) {
        return Err(ConfigError::OutOfRange {
            field,
            value: n,
            min,
            max,
        });
    }
    Ok(n)
}

fn learning_rate(value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(lr) if lr.is_finite() && lr > 0.0 => Ok(lr),
        _ => Err(ConfigError::InvalidLearningRate(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{ModelKind, OptimizerKind};

    fn draft() -> TrainingDraft {
        TrainingDraft::default()
    }

    #[test]
    fn defaults_are_valid() {
        let config = build(&draft(), &Settings::default()).unwrap();
        assert_eq!(config.model, ModelKind::Transformer);
        assert_eq!(config.optimizer, OptimizerKind::Adam);
        assert_eq!(config.epochs.get(), 100);
        assert_eq!(config.batch_size.get(), 32);
        assert_eq!(config.learning_rate, 0.001);
        assert_eq!(config.train_split, 80);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let mut d = draft();
        d.epochs = " 12 ".into();
        d.learning_rate = "1e-4".into();
        let config = build(&d, &Settings::default()).unwrap();
        assert_eq!(config.epochs.get(), 12);
        assert_eq!(config.learning_rate, 1e-4);
    }

    #[test]
    fn rejects_non_positive_epochs() {
        for bad in ["0", "-5"] {
            let mut d = draft();
            d.epochs = bad.into();
            let err = build(&d, &Settings::default()).unwrap_err();
            assert!(
                matches!(err, ConfigError::OutOfRange { field: "epochs", .. }),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn rejects_non_numeric_epochs() {
        let mut d = draft();
        d.epochs = "ten".into();
        let err = build(&d, &Settings::default()).unwrap_err();
        assert!(matches!(err, ConfigError::NotANumber { field: "epochs", .. }));
    }

    #[test]
    fn batch_size_bound_comes_from_settings() {
        let mut d = draft();
        d.batch_size = "512".into();
        assert!(build(&d, &Settings::default()).is_ok());

        d.batch_size = "513".into();
        let err = build(&d, &Settings::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "batch size",
                value: 513,
                max: 512,
                ..
            }
        ));

        let settings = Settings {
            max_batch_size: 1024,
            ..Settings::default()
        };
        assert!(build(&d, &settings).is_ok());
    }

    #[test]
    fn split_bounds_are_inclusive() {
        let mut d = draft();
        for (value, ok) in [("49", false), ("50", true), ("95", true), ("96", false)] {
            d.train_split = value.into();
            assert_eq!(build(&d, &Settings::default()).is_ok(), ok, "split {value}");
        }
    }

    #[test]
    fn rejects_bad_learning_rates() {
        let mut d = draft();
        for bad in ["", "abc", "0", "-0.1", "inf", "NaN"] {
            d.learning_rate = bad.into();
            let err = build(&d, &Settings::default()).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidLearningRate(_)), "{bad}");
        }
    }
}
