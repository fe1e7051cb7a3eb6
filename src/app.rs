use anyhow::{anyhow, bail, Context, Result};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::controller::{Controller, LoadTicket};
use crate::fetch::{fetch_dataset, DataSource};
use crate::models::{Dataset, SignalKind};
use crate::render::{render_page, render_text};
use crate::state::{Action, Timeframe};

pub const HELP: &str = "\
Commands:
  refresh | retry         reload forecast and mood data
  select <company>        open a company's detail view
  back                    return to the overview
  signal <kind>           explain sentiment|shipping|market|competitive
  close                   close the signal panel
  timeframe <7d|14d|30d>  change the display timeframe
  show                    print the current screen again
  help                    this text
  quit                    exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Act(Action),
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or("").to_ascii_lowercase();
    let arg = parts.next();

    let cmd = match (verb.as_str(), arg) {
        ("refresh" | "retry" | "r", _) => Command::Act(Action::Refresh),
        ("select" | "open", Some(id)) => Command::Act(Action::Select(id.to_ascii_lowercase())),
        ("back" | "b", _) => Command::Act(Action::Back),
        ("signal" | "s", Some(kind)) => {
            let kind = SignalKind::parse(kind).ok_or_else(|| anyhow!("Unknown signal: {}", kind))?;
            Command::Act(Action::OpenPanel(kind))
        }
        ("close" | "c", _) => Command::Act(Action::ClosePanel),
        ("timeframe" | "tf", Some(tf)) => {
            let tf = Timeframe::parse(tf).ok_or_else(|| anyhow!("Unknown timeframe: {}", tf))?;
            Command::Act(Action::SetTimeframe(tf))
        }
        ("show" | "", _) => Command::Show,
        ("help" | "h" | "?", _) => Command::Help,
        ("quit" | "exit" | "q", _) => Command::Quit,
        (other, _) => bail!("Unknown or incomplete command: {}", other),
    };
    Ok(cmd)
}

enum AppEvent {
    Input(String),
    InputClosed,
    Loaded(LoadTicket, Result<Dataset>),
}

fn spawn_load(source: Arc<dyn DataSource>, ticket: LoadTicket, tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let result = fetch_dataset(source.as_ref()).await;
        // receiver gone means we're shutting down
        let _ = tx.send(AppEvent::Loaded(ticket, result));
    });
}

async fn publish(c: &Controller, html_path: &Path) -> Result<()> {
    println!("{}", render_text(c));
    tokio::fs::write(html_path, render_page(c))
        .await
        .with_context(|| format!("Writing {}", html_path.display()))?;
    debug!("Dashboard written - path={}", html_path.display());
    Ok(())
}

/// Owns the controller for the lifetime of the session and serialises every
/// state change through one event channel.
pub async fn run_interactive(source: Arc<dyn DataSource>, html_path: PathBuf) -> Result<()> {
    if let Some(parent) = html_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Creating {}", parent.display()))?;
    }
    info!("Interactive session started - source={}, html={}", source.describe(), html_path.display());

    let (tx, mut rx) = mpsc::unbounded_channel();

    // Plain thread: a pending stdin read must not hold up runtime shutdown.
    let input_tx = tx.clone();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if input_tx.send(AppEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(_) => break,
            }
        }
        let _ = input_tx.send(AppEvent::InputClosed);
    });

    let mut controller = Controller::new();
    let ticket = controller.begin_load();
    spawn_load(source.clone(), ticket, tx.clone());
    publish(&controller, &html_path).await?;

    while let Some(event) = rx.recv().await {
        match event {
            AppEvent::Loaded(ticket, result) => {
                if controller.finish_load(ticket, result) {
                    publish(&controller, &html_path).await?;
                }
            }
            AppEvent::Input(line) => match parse_command(&line) {
                Ok(Command::Act(action)) => {
                    if let Some(ticket) = controller.dispatch(action) {
                        spawn_load(source.clone(), ticket, tx.clone());
                    }
                    publish(&controller, &html_path).await?;
                }
                Ok(Command::Show) => publish(&controller, &html_path).await?,
                Ok(Command::Help) => println!("{}", HELP),
                Ok(Command::Quit) => break,
                Err(e) => {
                    warn!("Ignoring input - error={}", e);
                    println!("{}\nType `help` for commands.", e);
                }
            },
            AppEvent::InputClosed => break,
        }
    }

    info!("Interactive session ended");
    Ok(())
}
