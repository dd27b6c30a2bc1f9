use crate::core::normalizer::normalize;
use crate::domain::model::{FeatureRecord, FeatureRow, PredictionOutput};
use crate::domain::ports::Predictor;
use crate::utils::error::{PredictionError, Result};

/// Runs one prediction against an explicitly supplied model.
pub struct PredictionEngine<P: Predictor> {
    predictor: P,
}

impl<P: Predictor> PredictionEngine<P> {
    pub fn new(predictor: P) -> Self {
        Self { predictor }
    }

    /// Parse, normalize and predict in one go.
    pub fn run(&self, input: &str) -> Result<PredictionOutput> {
        let row = prepare(input)?;
        self.predict_row(&row)
    }

    pub fn predict_row(&self, row: &FeatureRow) -> Result<PredictionOutput> {
        let prediction = self.predictor.predict(row)?;

        if !prediction.is_finite() {
            return Err(PredictionError::NonFinite { value: prediction }.into());
        }

        tracing::debug!("Model returned prediction {}", prediction);
        Ok(PredictionOutput { prediction })
    }
}

/// Input half of the pipeline. Touches no model, so it can run before the
/// artifact is loaded.
pub fn prepare(input: &str) -> Result<FeatureRow> {
    let record = FeatureRecord::parse(input)?;
    tracing::debug!("Parsed input record with {} keys", record.data.len());
    normalize(&record)
}
