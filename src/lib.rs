pub mod adapters;
#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::linear_model::{FeatureEncoder, LinearModel};
pub use crate::core::{engine::PredictionEngine, normalizer::normalize};
pub use domain::model::{
    feature_order, FeatureKind, FeatureRecord, FeatureRow, PredictionOutput, FEATURE_SCHEMA,
};
pub use domain::ports::Predictor;
pub use utils::error::{BridgeError, PredictionError, Result};
