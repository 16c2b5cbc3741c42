use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use allegro::library::{Catalog, LoftyReader};
use allegro::server::Server;
use allegro::session::SessionOptions;

mod logging;
mod settings;
mod shutdown;

/// Share a music directory with playlist-building clients over TCP.
#[derive(Parser, Debug)]
#[command(name = "allegro", version, about)]
struct Args {
    /// Music directory to scan (overrides `library.root`)
    dir: Option<PathBuf>,

    /// Address to listen on (overrides `server.listen`)
    #[arg(short, long, env = "ALLEGRO_LISTEN")]
    listen: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

pub async fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let (mut settings, fallback) = settings::load_settings();

    logging::init(&settings.log.filter);
    if let Some(reason) = fallback {
        warn!("{reason}");
    }

    if let Some(dir) = args.dir {
        settings.library.root = dir;
    }
    if let Some(listen) = args.listen {
        settings.server.listen = listen;
    }

    if args.print_config {
        print!("{}", settings.to_toml().context("cannot render settings")?);
        return Ok(());
    }

    // Scanning and tag parsing block; keep them off the async workers.
    let library = settings.library.clone();
    let catalog = tokio::task::spawn_blocking(move || Catalog::build(&library, &LoftyReader))
        .await
        .context("catalog scan panicked")?
        .with_context(|| format!("cannot scan {}", settings.library.root.display()))?;

    let server = Server::bind(
        settings.server.listen.as_str(),
        Arc::new(catalog),
        SessionOptions::from(&settings),
    )
    .await
    .with_context(|| format!("failed to bind {}", settings.server.listen))?;

    info!(
        addr = %server.local_addr()?,
        framing = ?settings.server.framing,
        "listening"
    );

    let accepted = server.serve_until(shutdown::signal()).await;
    info!(accepted, "server shutdown complete");
    Ok(())
}
