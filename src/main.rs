use anyhow::Result;
use clap::Parser;
use svdrec::services::pipeline::BatchRun;
use svdrec::{init_tracing, Config};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing with specified log level
    std::env::set_var("RUST_LOG", &args.log_level);
    init_tracing();

    let config = if std::path::Path::new(&args.config).exists() {
        Config::from_file(&args.config)?
    } else {
        info!("Config file not found, using default configuration");
        Config::default()
    };

    info!("Starting SVDRec batch run with config: {:?}", config);

    let summary = BatchRun::new(config).run()?;
    info!("Run finished: {}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
