use crate::domain::model::FeatureRow;
use crate::utils::error::PredictionError;

/// The prediction capability of a loaded model artifact.
pub trait Predictor {
    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictionError>;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictionError> {
        (**self).predict(row)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictionError> {
        (**self).predict(row)
    }
}
