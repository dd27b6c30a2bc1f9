// Adapters layer: concrete model artifacts behind the `Predictor` port.

pub mod linear_model;
