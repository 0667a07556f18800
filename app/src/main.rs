//! Avicola Admin - dashboard state bootstrap
//!
//! Loads configuration, seeds the in-memory store and logs the figures the
//! dashboard opens with.

use avicola_admin_app::services::finance::OrderFilter;
use avicola_admin_app::{AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.log.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    init_tracing(&config);

    tracing::info!("Starting Avicola Admin");
    tracing::info!("Environment: {}", config.environment);

    let state = AppState::bootstrap(config)?;

    for card in state.catalog().shrinkage_previews(None)? {
        let points: Vec<String> = card
            .points
            .iter()
            .map(|p| format!("{} birds: {:.2} kg", p.quantity, p.shrinkage_kg))
            .collect();
        tracing::info!(
            bird_type = %card.bird_type,
            presentation = %card.presentation,
            per_bird_kg = %card.per_bird_kg,
            variable = card.variable,
            "Shrinkage {}",
            points.join(", ")
        );
    }

    for row in state.batches().inventory_summary()? {
        tracing::info!(
            bird_type = %row.bird_type,
            batches = row.batches,
            crates = row.crates,
            birds = row.birds,
            males = row.males,
            females = row.females,
            "Inventory"
        );
    }

    let income = state.finance().summary(&OrderFilter::default())?;
    tracing::info!(
        orders = income.orders,
        total = %income.total_amount,
        digital = %income.digital_amount,
        physical = %income.physical_amount,
        currency = %income.currency,
        "Income"
    );

    let active_codes = state.collections().active_qr_codes()?;
    tracing::info!(
        collectors = state.collections().list_collectors()?.len(),
        active_qr_codes = active_codes.len(),
        "Collections"
    );

    Ok(())
}
