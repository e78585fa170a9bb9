//! Run every restaurant query once against the configured dataset URL.
//!
//! Usage: `cargo run --example query_demo -- [cuisine] [neighborhood]`
//! (both default to "all").

use anyhow::Context;
use std::sync::Arc;
use tracing::{error, info};

use restaurants_rs::{
    init_observability, repositories::HttpRestaurantSource, shutdown_observability, Config,
    Metrics, RestaurantService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_environment().context("Failed to load configuration")?;

    init_observability(&config.observability).context("Failed to initialize observability")?;
    info!("Dataset URL: {}", config.data_source.data_url);

    let metrics = Arc::new(Metrics::new()?);
    let source = HttpRestaurantSource::from_config(&config.data_source)?;
    let service = RestaurantService::new_with_metrics(Arc::new(source), metrics.clone());

    let mut args = std::env::args().skip(1);
    let cuisine = args.next().unwrap_or_else(|| "all".to_string());
    let neighborhood = args.next().unwrap_or_else(|| "all".to_string());

    let outcome = run_queries(&service, &cuisine, &neighborhood).await;
    if let Err(ref e) = outcome {
        error!("Query failed: {:#}", e);
    }

    println!("\n# Metrics\n{}", metrics.encode()?);

    shutdown_observability().await;
    outcome
}

async fn run_queries(
    service: &RestaurantService,
    cuisine: &str,
    neighborhood: &str,
) -> anyhow::Result<()> {
    let neighborhoods = service.list_neighborhoods().await?;
    println!("Neighborhoods: {}", neighborhoods.join(", "));

    let cuisines = service.list_cuisines().await?;
    println!("Cuisines: {}", cuisines.join(", "));

    let matches = service
        .fetch_by_cuisine_and_neighborhood(cuisine, neighborhood)
        .await?;
    println!(
        "\n{} restaurant(s) for cuisine={} neighborhood={}",
        matches.len(),
        cuisine,
        neighborhood
    );
    for restaurant in &matches {
        println!(
            "  #{:<3} {:<30} {:<10} {:<10} {} [{}]",
            restaurant.id,
            restaurant.name,
            restaurant.cuisine_type,
            restaurant.neighborhood,
            restaurant.page_url(),
            restaurant
                .image_url()
                .unwrap_or_else(|| "no image".to_string()),
        );
    }

    if let Some(first) = matches.first() {
        let detail = service.fetch_by_id(first.id).await?;
        println!("\nDetail for #{}:", detail.id);
        println!("{}", serde_json::to_string_pretty(&detail)?);
    }

    Ok(())
}
