use crate::utils::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Numeric,
    Categorical,
}

/// The model's positional input schema. Everything that needs the feature
/// order reads it from here.
pub const FEATURE_SCHEMA: [(&str, FeatureKind); 12] = [
    ("area", FeatureKind::Numeric),
    ("bedrooms", FeatureKind::Numeric),
    ("bathrooms", FeatureKind::Numeric),
    ("stories", FeatureKind::Numeric),
    ("mainroad", FeatureKind::Categorical),
    ("guestroom", FeatureKind::Categorical),
    ("basement", FeatureKind::Categorical),
    ("hotwaterheating", FeatureKind::Categorical),
    ("airconditioning", FeatureKind::Categorical),
    ("parking", FeatureKind::Numeric),
    ("prefarea", FeatureKind::Categorical),
    ("furnishingstatus", FeatureKind::Categorical),
];

pub const FEATURE_COUNT: usize = FEATURE_SCHEMA.len();

/// Canonical feature names, in model order.
pub fn feature_order() -> impl Iterator<Item = &'static str> {
    let schema: &'static [(&'static str, FeatureKind)] = &FEATURE_SCHEMA;
    schema.iter().map(|(name, _)| *name)
}

/// One raw input record, keyed by feature name. Key order is irrelevant.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub data: Map<String, Value>,
}

impl FeatureRecord {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Parses a command-line argument. Anything other than a JSON object is
    /// malformed input.
    pub fn parse(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| BridgeError::malformed(format!("invalid JSON: {}", e)))?;

        match value {
            Value::Object(data) => Ok(Self { data }),
            other => Err(BridgeError::malformed(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn get(&self, feature: &str) -> Option<&Value> {
        self.data.get(feature)
    }
}

/// Twelve values in canonical order, ready for a positional model.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    values: Vec<Value>,
}

impl FeatureRow {
    pub(crate) fn from_ordered(values: Vec<Value>) -> Self {
        debug_assert_eq!(values.len(), FEATURE_COUNT);
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pairs each value with its canonical feature name.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        feature_order().zip(self.values.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionOutput {
    pub prediction: f64,
}

impl PredictionOutput {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
