mod app;
mod cli;
mod page;

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;
use wvjb_config::BridgeConfig;

fn load_config(args: &cli::Args) -> BridgeConfig {
    let loaded = match &args.config {
        Some(path) => {
            tracing::info!("Using config override: {}", path.display());
            wvjb_config::load_from_path(path)
        }
        None => wvjb_config::load_config(),
    };
    loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        BridgeConfig::default()
    })
}

fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("wvjb=info");
    let directive = log_directive
        .parse()
        .or_else(|_| "wvjb=info".parse());
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("wvjb-demo v{} starting...", env!("CARGO_PKG_VERSION"));

    if args.log_messages {
        wvjb_core::enable_logging();
    }
    let config = load_config(&args);

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = app::DemoApp::new(config, args.url);

    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
