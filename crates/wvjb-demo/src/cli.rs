use std::path::PathBuf;

use clap::Parser;

/// Opens a window with a web view and exercises the bridge in both
/// directions.
#[derive(Parser, Debug)]
#[command(name = "wvjb-demo", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log every message crossing the bridge.
    #[arg(long)]
    pub log_messages: bool,

    /// Load this URL instead of the built-in page.
    #[arg(long)]
    pub url: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
