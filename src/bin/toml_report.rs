use clap::Parser;
use seafood_reports::core::ConfigProvider;
use seafood_reports::utils::error::ErrorSeverity;
use seafood_reports::utils::{logger, validation::Validate};
use seafood_reports::{LocalStorage, ReportEngine, ReportPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "Export back-office reports described by a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "report.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show what would be exported without calling the API
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let verbose = args.verbose || config.verbose();
    if config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be fetched or written");
        perform_dry_run(&config);
        return Ok(());
    }

    let branding = config.branding();
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ReportPipeline::new(storage, config).with_branding(branding);
    let engine = ReportEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Report exported successfully!");
            println!("📁 Saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Report export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  API: {}", config.api_base_url());
    println!("  Kind: {:?}", config.report_kind());
    println!("  Output: {}", config.output_path());
    println!("  Branding: {}", config.branding().company_name);
    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    let client = seafood_reports::ApiClient::new(config.api_base_url());

    println!("📡 Datasets:");
    for dataset in config.datasets() {
        println!("  {} <- {}", dataset.name, client.endpoint(&dataset.resource));
    }

    let kind = config.report_kind();
    if kind.uses_lookups() {
        println!();
        if config.use_lookups() {
            println!("🔄 Currency and shipment ids will be resolved to labels");
        } else {
            println!("🔄 Lookups disabled, ids are shown shortened");
        }
    }
    if !kind.is_single_dataset() {
        println!();
        println!("📊 Title: Executive Business Report");
    } else {
        println!();
        println!("📊 Title: {}", config.title());
        println!("   File: {}", config.file_name());
    }

    println!();
    println!("✅ Dry run complete.");
}
