mod api_types;
mod app;
mod companies;
mod controller;
mod explain;
mod fetch;
mod format;
mod icons;
mod models;
mod render;
mod sparkline;
mod state;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use controller::Controller;
use fetch::{DataSource, DirSource, HttpSource};
use state::LoadState;

/// AI Weather - sentiment, shipping, market and competitive forecasts for AI companies
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL serving /data/forecast.json and /data/mood/<id>.json (overrides AI_WEATHER_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Local directory holding forecast.json and mood/<id>.json (overrides AI_WEATHER_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Request timeout in seconds for HTTP sources (default: none)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Load once and write every screen as a static HTML page
    Render {
        /// Output directory for generated pages (default: "out")
        #[arg(short, long, default_value = "out")]
        output_dir: String,
    },
    /// Read commands from stdin, re-rendering after each one
    Interactive {
        /// HTML file rewritten after every state change
        #[arg(long, default_value = "out/dashboard.html")]
        html: String,
    },
}

fn resolve_source(args: &Args) -> Result<Arc<dyn DataSource>> {
    // Flag > environment; a base URL wins over a data directory
    let base_url = args
        .base_url
        .clone()
        .or_else(|| std::env::var("AI_WEATHER_BASE_URL").ok())
        .filter(|s| !s.trim().is_empty());
    let data_dir = args
        .data_dir
        .clone()
        .or_else(|| std::env::var("AI_WEATHER_DATA_DIR").ok())
        .filter(|s| !s.trim().is_empty());

    if let Some(url) = base_url {
        debug!("Using HTTP source: {}", url);
        let timeout = args.timeout_secs.map(Duration::from_secs);
        let source: Arc<dyn DataSource> = Arc::new(HttpSource::new(&url, timeout)?);
        return Ok(source);
    }
    if let Some(dir) = data_dir {
        debug!("Using directory source: {}", dir);
        let source: Arc<dyn DataSource> = Arc::new(DirSource::new(dir));
        return Ok(source);
    }

    bail!(
        "No data source configured.\n\
         Use --base-url (or AI_WEATHER_BASE_URL) for a site serving /data/forecast.json,\n\
         or --data-dir (or AI_WEATHER_DATA_DIR) for a directory containing forecast.json and mood/."
    )
}

async fn render_once(source: Arc<dyn DataSource>, output_dir: &str) -> Result<()> {
    let start = std::time::Instant::now();
    let mut controller = Controller::new();
    controller.load_all(source.as_ref()).await;

    let out_dir = PathBuf::from(output_dir);
    tokio::fs::create_dir_all(&out_dir)
        .await
        .with_context(|| format!("Creating {}", out_dir.display()))?;

    let ds = match controller.load_state() {
        LoadState::Ready(ds) => ds,
        LoadState::Failed { message } => {
            // still leave an error page behind for whoever serves the directory
            tokio::fs::write(out_dir.join("index.html"), render::render_page(&controller)).await?;
            bail!("Forecast unavailable: {}", message);
        }
        LoadState::Loading => bail!("Load did not complete"),
    };

    let pages = render::render_site(ds);
    for (name, html) in &pages {
        tokio::fs::write(out_dir.join(name), html)
            .await
            .with_context(|| format!("Writing {}", name))?;
        debug!("Wrote {}", name);
    }
    println!("{}", render::render_text(&controller));

    info!(
        "Render completed - duration={:.2}s, pages={}, directory={}",
        start.elapsed().as_secs_f32(),
        pages.len(),
        out_dir.display()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Starting ai_weather");

    let source = resolve_source(&args)?;

    match args.command {
        Cmd::Render { ref output_dir } => render_once(source, output_dir).await,
        Cmd::Interactive { ref html } => app::run_interactive(source, PathBuf::from(html)).await,
    }
}
