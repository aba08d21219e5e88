use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use svdrec::config::RatingFormat;
use svdrec::{data, init_tracing};
use tracing::info;

/// Converts a text ratings table into the binary dump read by `train_format = "binary"`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "data/learn.ssv")]
    input: PathBuf,

    #[arg(short, long, default_value = "learn.bin")]
    output: PathBuf,

    #[arg(long, default_value_t = 100_000_000)]
    capacity: usize,

    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    std::env::set_var("RUST_LOG", &args.log_level);
    init_tracing();

    let store = data::load_ratings(&args.input, RatingFormat::Text, args.capacity)?;
    data::dump_ratings(&store, &args.output)?;

    info!("Wrote {} ratings to {}", store.count(), args.output.display());
    Ok(())
}
