use thiserror::Error;

/// Failures raised at the model boundary. Callers treat these as opaque.
#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("Failed to load model artifact '{path}': {reason}")]
    ModelLoad { path: String, reason: String },

    #[error("Model artifact is incompatible with the feature schema: {reason}")]
    IncompatibleSchema { reason: String },

    #[error("Feature '{feature}' expects a number, got {value}")]
    NonNumeric { feature: String, value: String },

    #[error("Feature '{feature}' has no weight for level {value}")]
    UnknownLevel { feature: String, value: String },

    #[error("Row has {found} values, model expects {expected}")]
    RowLength { expected: usize, found: usize },

    #[error("Model produced a non-finite prediction: {value}")]
    NonFinite { value: f64 },
}

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictionError),

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Schema,
    Model,
    Configuration,
    Output,
}

impl BridgeError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedInput { .. } => ErrorCategory::Input,
            Self::MissingField { .. } => ErrorCategory::Schema,
            Self::Prediction(_) => ErrorCategory::Model,
            Self::InvalidConfigValue { .. } => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Output,
        }
    }

    /// Process exit code for this failure. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => 2,
            ErrorCategory::Schema => 3,
            ErrorCategory::Model | ErrorCategory::Output => 4,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MalformedInput { message } => {
                format!("Input must be a single JSON object: {}", message)
            }
            Self::MissingField { field } => {
                format!("The input record is missing the '{}' feature", field)
            }
            Self::Prediction(e) => format!("The model could not produce a prediction: {}", e),
            Self::InvalidConfigValue { field, reason, .. } => {
                format!("Option '{}' is invalid: {}", field, reason)
            }
            Self::Serialization(e) => format!("Could not encode the prediction: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MalformedInput { .. } => {
                "Pass the feature record as one quoted JSON object argument"
            }
            Self::MissingField { .. } => {
                "Include all twelve features: area, bedrooms, bathrooms, stories, mainroad, guestroom, basement, hotwaterheating, airconditioning, parking, prefarea, furnishingstatus"
            }
            Self::Prediction(PredictionError::ModelLoad { .. }) => {
                "Check that the model artifact exists and is readable, or pass --model"
            }
            Self::Prediction(PredictionError::IncompatibleSchema { .. }) => {
                "Re-export the model artifact against the current feature schema"
            }
            Self::Prediction(_) => "Check the feature values against the levels the model was trained on",
            Self::InvalidConfigValue { .. } => "Run with --help to see accepted options",
            Self::Serialization(_) => "Report this as a bug",
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
