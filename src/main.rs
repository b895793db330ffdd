use clap::Parser;
use dash_etl::adapters::{replay, ConsoleRenderer, SnapshotExporter};
use dash_etl::domain::ports::ConfigProvider;
use dash_etl::utils::logger;
use dash_etl::{CliConfig, DashEngine, HttpDashSource, LocalStorage, SnapshotRenderer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.log_json);

    tracing::info!("starting dash-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.into_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("configuration error: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let convention = settings.dash.money_convention();
    let source = HttpDashSource::new(settings.dash.clone());
    let engine = DashEngine::new(source, convention);

    let mut renderer = SnapshotRenderer::new();
    if let Err(e) = engine.refresh(settings.range.clone(), &mut renderer).await {
        // Cancellation cannot happen in a single-shot run; anything else is fatal.
        tracing::error!("refresh failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
    let snapshot = renderer.into_snapshot();

    replay(&snapshot, &mut ConsoleRenderer::new());

    if let Some(output_path) = settings.export_path {
        let exporter = SnapshotExporter::new(LocalStorage::new(output_path.clone()));
        let archive = exporter.export(&snapshot).await?;
        tracing::info!(path = %output_path, archive = %archive, "snapshot exported");
        println!("Export saved to: {}/{}", output_path, archive);
    }

    Ok(())
}
