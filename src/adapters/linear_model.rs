//! Linear model artifact stored as JSON or TOML.
//!
//! ```text
//! prediction = intercept + Σ encoder[i](row[i])
//! ```
//!
//! Numeric encoders multiply the value by a coefficient. Categorical encoders
//! look the value up in a level table; strings match by content, any other
//! JSON value by its JSON text, so `"yes"`, `"1"` and `1` can all be mapped.

use crate::domain::model::{FeatureKind, FeatureRow, FEATURE_SCHEMA};
use crate::domain::ports::Predictor;
use crate::utils::error::PredictionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

type ModelResult<T> = std::result::Result<T, PredictionError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeatureEncoder {
    Numeric {
        name: String,
        coefficient: f64,
    },
    Categorical {
        name: String,
        levels: BTreeMap<String, f64>,
    },
}

impl FeatureEncoder {
    pub fn name(&self) -> &str {
        match self {
            Self::Numeric { name, .. } | Self::Categorical { name, .. } => name,
        }
    }

    pub fn kind(&self) -> FeatureKind {
        match self {
            Self::Numeric { .. } => FeatureKind::Numeric,
            Self::Categorical { .. } => FeatureKind::Categorical,
        }
    }

    fn contribution(&self, value: &Value) -> ModelResult<f64> {
        match self {
            Self::Numeric { name, coefficient } => value
                .as_f64()
                .map(|x| x * coefficient)
                .ok_or_else(|| PredictionError::NonNumeric {
                    feature: name.clone(),
                    value: value.to_string(),
                }),
            Self::Categorical { name, levels } => {
                let key = level_key(value);
                levels
                    .get(&key)
                    .copied()
                    .ok_or_else(|| PredictionError::UnknownLevel {
                        feature: name.clone(),
                        value: value.to_string(),
                    })
            }
        }
    }
}

fn level_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub name: String,
    pub version: String,
    pub intercept: f64,
    pub features: Vec<FeatureEncoder>,
}

impl LinearModel {
    /// Loads an artifact, picking the format from the file extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ModelResult<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| PredictionError::ModelLoad {
            path: source.clone(),
            reason: e.to_string(),
        })?;

        let parsed = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        };

        let model = parsed.map_err(|e| match e {
            PredictionError::ModelLoad { reason, .. } => PredictionError::ModelLoad {
                path: source.clone(),
                reason,
            },
            other => other,
        })?;

        tracing::debug!(
            "Loaded model '{}' version {} from {}",
            model.name,
            model.version,
            source
        );
        Ok(model)
    }

    pub fn from_json_str(content: &str) -> ModelResult<Self> {
        let model: Self = serde_json::from_str(content).map_err(|e| PredictionError::ModelLoad {
            path: "<json>".to_string(),
            reason: format!("JSON parsing error: {}", e),
        })?;
        model.check_schema()?;
        Ok(model)
    }

    pub fn from_toml_str(content: &str) -> ModelResult<Self> {
        let model: Self = toml::from_str(content).map_err(|e| PredictionError::ModelLoad {
            path: "<toml>".to_string(),
            reason: format!("TOML parsing error: {}", e),
        })?;
        model.check_schema()?;
        Ok(model)
    }

    /// Features must line up one-to-one with the canonical schema.
    pub fn check_schema(&self) -> ModelResult<()> {
        if self.features.len() != FEATURE_SCHEMA.len() {
            return Err(PredictionError::IncompatibleSchema {
                reason: format!(
                    "artifact declares {} features, expected {}",
                    self.features.len(),
                    FEATURE_SCHEMA.len()
                ),
            });
        }

        for (position, (encoder, (name, kind))) in
            self.features.iter().zip(FEATURE_SCHEMA.iter()).enumerate()
        {
            if encoder.name() != *name {
                return Err(PredictionError::IncompatibleSchema {
                    reason: format!(
                        "position {} is '{}', expected '{}'",
                        position,
                        encoder.name(),
                        name
                    ),
                });
            }
            if encoder.kind() != *kind {
                return Err(PredictionError::IncompatibleSchema {
                    reason: format!(
                        "feature '{}' is {:?}, expected {:?}",
                        name,
                        encoder.kind(),
                        kind
                    ),
                });
            }
        }

        if !self.intercept.is_finite() {
            return Err(PredictionError::IncompatibleSchema {
                reason: "intercept is not finite".to_string(),
            });
        }

        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, row: &FeatureRow) -> ModelResult<f64> {
        // Deserialized or hand-built models have not been through a loader.
        self.check_schema()?;

        if row.len() != self.features.len() {
            return Err(PredictionError::RowLength {
                expected: self.features.len(),
                found: row.len(),
            });
        }

        self.features
            .iter()
            .zip(row.values())
            .try_fold(self.intercept, |acc, (encoder, value)| {
                Ok(acc + encoder.contribution(value)?)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::prepare;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_INPUT: &str = r#"{"area":7500,"bedrooms":4,"bathrooms":2,"stories":3,
        "mainroad":"yes","guestroom":"no","basement":"yes","hotwaterheating":"no",
        "airconditioning":"yes","parking":2,"prefarea":"yes","furnishingstatus":"furnished"}"#;

    fn yes_no(yes: f64) -> BTreeMap<String, f64> {
        BTreeMap::from([("yes".to_string(), yes), ("no".to_string(), 0.0)])
    }

    fn model() -> LinearModel {
        let furnishing = BTreeMap::from([
            ("furnished".to_string(), 0.0),
            ("semi-furnished".to_string(), -100.0),
            ("unfurnished".to_string(), -400.0),
        ]);
        let numeric = |name: &str, coefficient: f64| FeatureEncoder::Numeric {
            name: name.to_string(),
            coefficient,
        };
        let categorical = |name: &str, levels: BTreeMap<String, f64>| FeatureEncoder::Categorical {
            name: name.to_string(),
            levels,
        };

        LinearModel {
            name: "test".to_string(),
            version: "1".to_string(),
            intercept: 1000.0,
            features: vec![
                numeric("area", 1.0),
                numeric("bedrooms", 10.0),
                numeric("bathrooms", 100.0),
                numeric("stories", 0.0),
                categorical("mainroad", yes_no(5.0)),
                categorical("guestroom", yes_no(5.0)),
                categorical("basement", yes_no(5.0)),
                categorical("hotwaterheating", yes_no(5.0)),
                categorical("airconditioning", yes_no(5.0)),
                numeric("parking", 50.0),
                categorical("prefarea", yes_no(5.0)),
                categorical("furnishingstatus", furnishing),
            ],
        }
    }

    #[test]
    fn test_predict_sums_contributions() {
        let row = prepare(SAMPLE_INPUT).unwrap();
        // 1000 + 7500 + 40 + 200 + 0 + (yes: 4 * 5) + 100 + 0
        assert_eq!(model().predict(&row).unwrap(), 8860.0);
    }

    #[test]
    fn test_predict_rejects_string_for_numeric_feature() {
        let row = prepare(&SAMPLE_INPUT.replace("7500", "\"7500\"")).unwrap();
        match model().predict(&row) {
            Err(PredictionError::NonNumeric { feature, .. }) => assert_eq!(feature, "area"),
            other => panic!("expected NonNumeric, got {:?}", other),
        }
    }

    #[test]
    fn test_predict_rejects_unknown_level() {
        let row = prepare(&SAMPLE_INPUT.replace("\"furnished\"", "\"palatial\"")).unwrap();
        match model().predict(&row) {
            Err(PredictionError::UnknownLevel { feature, value }) => {
                assert_eq!(feature, "furnishingstatus");
                assert_eq!(value, "\"palatial\"");
            }
            other => panic!("expected UnknownLevel, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_level_keys_use_json_text() {
        let mut model = model();
        if let FeatureEncoder::Categorical { levels, .. } = &mut model.features[4] {
            levels.insert("1".to_string(), 5.0);
        }
        let row = prepare(&SAMPLE_INPUT.replace("\"mainroad\":\"yes\"", "\"mainroad\":1")).unwrap();
        assert_eq!(model.predict(&row).unwrap(), 8860.0);
    }

    #[test]
    fn test_check_schema_rejects_reordered_features() {
        let mut model = model();
        model.features.swap(0, 1);
        assert!(matches!(
            model.check_schema(),
            Err(PredictionError::IncompatibleSchema { .. })
        ));
    }

    #[test]
    fn test_check_schema_rejects_wrong_kind() {
        let mut model = model();
        model.features[0] = FeatureEncoder::Categorical {
            name: "area".to_string(),
            levels: BTreeMap::new(),
        };
        assert!(matches!(
            model.check_schema(),
            Err(PredictionError::IncompatibleSchema { .. })
        ));
    }

    #[test]
    fn test_predict_rejects_reordered_model_built_without_loader() {
        let mut value = serde_json::to_value(model()).unwrap();
        value["features"].as_array_mut().unwrap().swap(0, 1);
        let reordered: LinearModel = serde_json::from_value(value).unwrap();

        let row = prepare(SAMPLE_INPUT).unwrap();
        assert!(matches!(
            reordered.predict(&row),
            Err(PredictionError::IncompatibleSchema { .. })
        ));
    }

    #[test]
    fn test_predict_rejects_struct_literal_with_missing_feature() {
        let mut model = model();
        model.features.pop();

        let row = prepare(SAMPLE_INPUT).unwrap();
        assert!(matches!(
            model.predict(&row),
            Err(PredictionError::IncompatibleSchema { .. })
        ));
    }

    #[test]
    fn test_json_artifact_round_trips_through_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(serde_json::to_string(&model()).unwrap().as_bytes())
            .unwrap();

        let loaded = LinearModel::from_file(file.path()).unwrap();
        assert_eq!(loaded, model());
    }

    #[test]
    fn test_toml_artifact_loads() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(toml::to_string(&model()).unwrap().as_bytes())
            .unwrap();

        let loaded = LinearModel::from_file(file.path()).unwrap();
        assert_eq!(loaded.features.len(), 12);
        assert_eq!(loaded.intercept, 1000.0);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        match LinearModel::from_file("/nonexistent/model.json") {
            Err(PredictionError::ModelLoad { path, .. }) => {
                assert_eq!(path, "/nonexistent/model.json")
            }
            other => panic!("expected ModelLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_artifact_reports_file_path() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(b"{ not a model").unwrap();

        match LinearModel::from_file(file.path()) {
            Err(PredictionError::ModelLoad { path, .. }) => {
                assert_eq!(path, file.path().display().to_string())
            }
            other => panic!("expected ModelLoad, got {:?}", other),
        }
    }
}
