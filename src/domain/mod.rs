// Domain layer: feature schema, records and the predictor port.

pub mod model;
pub mod ports;
