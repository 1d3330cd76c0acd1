use anyhow::Context;
use clap::Parser;
use lead_dumpster::core::ConfigProvider;
use lead_dumpster::utils::{logger, validation::Validate};
use lead_dumpster::{EtlEngine, LeadPipeline, LocalStorage, ReportFormat, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "Lead frequency report driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "lead-dumpster.toml")]
    config: String,

    /// Override the input file from config
    #[arg(short, long)]
    input: Option<String>,

    /// Override the report format from config
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Override the top locations size from config
    #[arg(long)]
    top_n: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based lead report");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    // 套用命令列覆蓋設定
    if let Some(input) = args.input {
        config.input.path = Some(input);
    }
    if let Some(format) = args.format {
        config.report.format = format;
    }
    if let Some(top_n) = args.top_n {
        config.report.top_n = top_n;
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = LeadPipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(Some(report)) => {
            print!("{}", report);
            if !report.ends_with('\n') {
                println!();
            }
        }
        Ok(None) => {
            eprintln!("No lead file configured. Set [input] path or pass --input <PATH>.");
        }
        Err(e) => {
            tracing::error!(
                "❌ Lead report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("   Input: {}", config.input_path().unwrap_or("<none>"));
    tracing::info!("   Delimiter: {}", config.input.delimiter);
    tracing::info!("   Type inference: {}", config.input.dynamic_typing);
    tracing::info!("   Report format: {:?}", config.report_format());
    tracing::info!("   Top locations: {}", config.top_n());
}

fn perform_dry_run(config: &TomlConfig) {
    match config.input_path() {
        Some(path) if std::path::Path::new(path).is_file() => {
            tracing::info!("✅ Input file found: {}", path);
        }
        Some(path) => {
            tracing::warn!("⚠️ Input file not found: {}", path);
        }
        None => {
            tracing::info!("ℹ️ No input configured, a run would produce no report");
        }
    }
    tracing::info!("✅ Dry run completed");
}
