mod domain;
mod clients;
mod controller;
mod events;
mod state;
mod staging;
mod view;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod cart_actor;
mod inventory_actor;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{error, info, warn, Instrument};

use crate::app_system::{load_settings, setup_tracing, ShopSystem};
use crate::events::UiEvent;
use crate::view::ConsoleView;

const HELP: &str = "commands: + <id> | - <id> | add <id> | delete <id> | checkout | quit";

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let settings = load_settings();
    info!(?settings, "Starting shop session");

    let system = ShopSystem::new(&settings, Arc::new(ConsoleView));

    let span = tracing::info_span!("initial_load");
    if let Err(e) = system.start().instrument(span).await {
        // The session stays usable; whatever did load is shown.
        error!(error = %e, "Initial load incomplete");
    }

    println!("{HELP}");

    // Each intent runs as its own task, so a slow store call never blocks input.
    let dispatcher = system.dispatcher();
    let mut in_flight = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if line == "help" {
            println!("{HELP}");
            continue;
        }
        match line.parse::<UiEvent>() {
            Ok(event) => {
                let dispatcher = dispatcher.clone();
                in_flight.spawn(async move { dispatcher.dispatch(event).await });
            }
            Err(e) => warn!(error = %e, "Ignoring input"),
        }
        while in_flight.try_join_next().is_some() {}
    }

    info!(pending = in_flight.len(), "Waiting for in-flight actions");
    while in_flight.join_next().await.is_some() {}
    drop(dispatcher);

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
