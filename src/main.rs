use clap::error::ErrorKind;
use clap::Parser;
use house_price_bridge::core::engine::prepare;
use house_price_bridge::utils::{logger, validation::Validate};
use house_price_bridge::{CliConfig, LinearModel, PredictionEngine, PredictionOutput, Result};

fn main() {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                // A missing or unparseable argument is malformed input.
                let _ = e.print();
                std::process::exit(2);
            }
        },
    };

    logger::init_cli_logger(config.verbose, config.json_logs);
    tracing::debug!("CLI config: {:?}", config);

    match run(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!(
                "❌ Prediction failed: {} (Category: {:?}, exit code {})",
                e,
                e.category(),
                e.exit_code()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}

/// Everything that can fail, in order. The output line is only rendered once
/// the prediction is complete, so stdout stays empty on any error.
fn run(config: &CliConfig) -> Result<String> {
    config.validate()?;

    // Input is checked before the artifact is read.
    let row = prepare(&config.input)?;

    let model = LinearModel::from_file(&config.model)?;
    let engine = PredictionEngine::new(model);
    let output: PredictionOutput = engine.predict_row(&row)?;

    output.to_json()
}
