use clap::Parser;
use seafood_reports::utils::error::{ErrorSeverity, ReportError};
use seafood_reports::utils::{logger, validation::Validate};
use seafood_reports::{CliConfig, LocalStorage, ReportEngine, ReportPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting seafood-reports CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = ReportPipeline::new(storage, config);
    let engine = ReportEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Report exported successfully");
            println!("✅ Report exported successfully!");
            println!("📁 Saved to: {}", output_path);
        }
        Err(e) => report_failure(&e),
    }

    Ok(())
}

fn report_failure(e: &ReportError) {
    tracing::error!(
        "❌ Report export failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2, // retryable
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}
