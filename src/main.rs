use clap::Parser;
use compose_split::utils::error::SplitError;
use compose_split::utils::logger;
use compose_split::{CliConfig, ComposeSplitPipeline, LocalStorage, SplitEngine};

fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            fail(&e);
        }
    };

    tracing::info!(
        "📁 {} -> {} ({} table entries)",
        settings.input_path.display(),
        settings.output_dir.display(),
        settings.table.len()
    );

    let storage = LocalStorage::new(settings.output_dir.clone());
    let pipeline = ComposeSplitPipeline::new(storage, settings);
    let engine = SplitEngine::new(pipeline);

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        match engine.plan() {
            Ok(files) => {
                for file in &files {
                    println!("Would create: {}", file.filename);
                }
            }
            Err(e) => fail(&e),
        }
        return;
    }

    match engine.run() {
        Ok(report) => {
            if !report.missing.is_empty() {
                tracing::debug!("Not in compose file: {}", report.missing.join(", "));
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Split failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            fail(&e);
        }
    }
}

fn fail(e: &SplitError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
