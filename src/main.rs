mod actuator;
mod command;
mod config;
mod connection;
mod controller;
mod patrol;
mod perception;
mod state;

use actuator::SimBackend;
use config::ControllerConfig;
use controller::Controller;
use perception::PerceptionHub;
use state::ModeCell;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{interval, Duration};

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = ControllerConfig {
        bind_addr: std::env::var("WARDBOT_ADDR")
            .unwrap_or_else(|_| wardbot_shared::wire::DEFAULT_BIND_ADDR.into()),
        ..Default::default()
    };

    info!("Wardbot controller starting");
    info!("  command port: {}", config.bind_addr);

    // The simulated backend stands in for the servo controller
    let backend = Arc::new(SimBackend::new());
    let controller = match Controller::start(config, backend).await {
        Ok(controller) => controller,
        Err(e) => {
            error!("Failed to start controller: {}", e);
            return;
        }
    };

    spawn_status_monitor(controller.mode.clone(), controller.perception.clone());

    let supervisor = controller.supervisor.clone();
    let executor = controller.executor.clone();

    tokio::select! {
        result = controller.serve() => {
            if let Err(e) = result {
                error!("Command listener failed: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            supervisor.cancel().await;
            if let Err(e) = executor.abort_all().await {
                warn!("Abort on shutdown failed: {}", e);
            }
        }
    }

    info!("Wardbot controller stopped");
}

/// Log every mode transition and tick the intruder alert decay
fn spawn_status_monitor(mode: ModeCell, perception: PerceptionHub) {
    let mut events = mode.subscribe();
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(1));
        let mut alert_was_active = false;

        loop {
            tokio::select! {
                event = events.recv() => {
                    match event {
                        Ok(change) => info!("Mode: {} -> {}", change.from, change.to),
                        Err(RecvError::Lagged(missed)) => {
                            warn!("Status monitor lagged, {} mode changes missed", missed);
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
                _ = ticker.tick() => {
                    perception.tick_decay();
                    let active = perception.snapshot().alert_active();
                    if active && !alert_was_active {
                        warn!("INTRUDER ALERT active");
                    } else if !active && alert_was_active {
                        info!("Intruder alert cleared");
                    }
                    alert_was_active = active;
                }
            }
        }
    });
}
