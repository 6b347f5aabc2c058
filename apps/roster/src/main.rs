use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Arc,
    thread,
};

mod backend_bridge;
mod config;
mod controller;
mod render;

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::{bounded, Sender};
use roster_core::{HttpUserSource, Partitioner, StaticUserSource, UserSource};
use tracing::{info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiEvent, UserAction, HELP},
    orchestration::dispatch_backend_command,
    reducer::{Flow, RosterApp},
};

#[derive(Parser, Debug)]
#[command(about = "Users split by birth year, with inline birth date editing")]
struct Args {
    #[arg(long, default_value = "roster.toml")]
    config: PathBuf,
    #[arg(long)]
    source_url: Option<String>,
    #[arg(long)]
    split_year: Option<i32>,
    /// Load users from a saved directory page instead of the network.
    #[arg(long)]
    fixture: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = config::load_settings(&args.config);
    if let Some(url) = args.source_url {
        settings.source_url = url;
    }
    if let Some(year) = args.split_year {
        settings.split_year = year;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(io::stderr)
        .init();

    let source: Arc<dyn UserSource> = match &args.fixture {
        Some(path) => Arc::new(StaticUserSource::new(config::load_fixture(path)?)),
        None => {
            let url = config::validate_source_url(&settings.source_url)?;
            Arc::new(HttpUserSource::new(url.as_str()))
        }
    };
    info!(split_year = settings.split_year, "starting roster");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    let worker = backend_bridge::runtime::launch(cmd_rx, ui_tx.clone(), source);
    spawn_input_reader(ui_tx);

    let mut app = RosterApp::new(Partitioner::new(settings.split_year));
    dispatch_backend_command(&cmd_tx, BackendCommand::LoadUsers, &mut app.status);
    println!("{HELP}");

    while let Ok(event) = ui_rx.recv() {
        if app.handle_event(event, &cmd_tx) == Flow::Quit {
            break;
        }
        print!("{}", render::render(&app.roster, &app.load, &app.status));
        io::stdout().flush()?;
    }

    if backend_bridge::runtime::shutdown(worker, cmd_tx, ui_rx).is_err() {
        warn!("backend worker panicked");
    }
    Ok(())
}

fn spawn_input_reader(ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            let event = match line.parse::<UserAction>() {
                Ok(action) => UiEvent::Action(action),
                Err(reason) => UiEvent::InvalidInput(reason),
            };
            if ui_tx.send(event).is_err() {
                return;
            }
        }
        let _ = ui_tx.send(UiEvent::InputClosed);
    });
}
