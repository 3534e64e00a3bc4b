use std::env;
use std::sync::Arc;

use chrono::Local;
use incident_client::IncidentClient;
use secret_store::{FileSecretStore, SecretStore};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use war_room::{DashboardView, RefreshOrchestrator, WarRoomConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = WarRoomConfig::from_env()?;
    let client = IncidentClient::from_env()?;
    let secrets = FileSecretStore::new(&config.secret_dir);
    info!(
        "Starting War Room (feed: {}, secrets: {:?})",
        client.config().incidents_url(),
        secrets.path()
    );

    // Seed the store before the loop starts so the initial load uses it.
    if let Ok(key) = env::var("INCIDENT_IO_API_KEY") {
        let key = key.trim();
        if !key.is_empty() {
            secrets.set(key)?;
            info!("Stored credential from INCIDENT_IO_API_KEY");
        }
    }

    let orchestrator = Arc::new(RefreshOrchestrator::new(client, secrets, config));
    if let Some(preview) = orchestrator.credential_preview() {
        info!("Using credential {}", preview);
    } else {
        info!("No credential configured, dashboard will show mock data");
    }

    let mut updates = orchestrator.subscribe();
    let reporter = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            let view = DashboardView::build(&state, &Local::now());
            if view.is_loading {
                debug!("Refreshing dashboard");
                continue;
            }

            info!(
                "Dashboard updated at {}: {} incidents, {} active, {} critical, {} resolved today ({})",
                view.last_updated.as_deref().unwrap_or("-"),
                view.summary.total,
                view.summary.active,
                view.summary.critical,
                view.summary.resolved_today,
                view.banner.map(|banner| banner.label()).unwrap_or("pending")
            );
            let breakdown: Vec<String> = view
                .status_breakdown
                .rows()
                .iter()
                .map(|(label, count)| format!("{} {}", label, count))
                .collect();
            info!("  Status: {}", breakdown.join(", "));
            for card in &view.cards {
                info!(
                    "  [{}] {} {} ({}, lead: {})",
                    card.short_id,
                    card.status_label,
                    card.title,
                    card.severity_label.as_deref().unwrap_or("no severity"),
                    card.lead.as_deref().unwrap_or("unassigned")
                );
            }
            match serde_json::to_string(&view) {
                Ok(json) => debug!("Dashboard view: {}", json),
                Err(e) => debug!("Failed to serialize dashboard view: {}", e),
            }
        }
    });

    orchestrator
        .run_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    reporter.abort();
    info!("War Room stopped");
    Ok(())
}
