pub mod engine;
pub mod normalizer;
