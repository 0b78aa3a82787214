use crate::app_config::AppConfig;
use crate::group_loader::load_groups_from;
use crate::maps::GoogleMapsClient;
use crate::planner::plan_meetup;
use std::sync::Arc;
use tracing::{error, info};

mod app_config;
mod domain;
mod extensions;
mod geo_point_deserializer;
mod group_loader;
mod maps;
mod meetup;
mod planner;
mod store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Plans go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = Arc::new(AppConfig::load()?);
    info!("✅  Loaded configuration");

    let client = maps::client::new_client(&config)?;
    let maps = GoogleMapsClient::new(client, config.clone());
    info!("✅  Initialized maps client");

    let groups = load_groups_from(config.groups().directory(), "json").await?;
    info!("✅  Loaded {} group(s)", groups.len());

    let mut failed = 0;
    for group in &groups {
        match plan_meetup(group, &maps, &config).await {
            Ok(plan) => println!("{}", serde_json::to_string_pretty(&plan)?),
            Err(e) => {
                failed += 1;
                error!(group_id = group.id, "❌ Could not plan '{}': {}", group.name, e);
            }
        }
    }

    info!("🔥 Planned {} of {} group(s)", groups.len() - failed, groups.len());

    Ok(())
}
