use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_PATH: &str = "model.json";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "predict")]
#[command(version)]
#[command(about = "Predict a house price from one JSON feature record")]
pub struct CliConfig {
    /// Feature record as a JSON object, e.g. '{"area":7500,...}'
    pub input: String,

    #[arg(long, default_value = DEFAULT_MODEL_PATH, help = "Path to the model artifact (.json or .toml)")]
    pub model: String,

    #[arg(long, help = "Enable verbose output on stderr")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("model", &self.model)?;
        validate_file_extension("model", &self.model, &["json", "toml"])?;
        Ok(())
    }
}
