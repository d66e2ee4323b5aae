use std::sync::Arc;

use crate::config::Config;
use receivables_core::aging::SchemeRegistry;
use receivables_core::receivables::{
    AccountingReportClient, ReceivableService, ReceivableServiceTrait,
};
use receivables_core::utils::time_utils::SystemClock;
use receivables_storage_sqlite::{db, ReceivableRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub receivable_service: Arc<dyn ReceivableServiceTrait + Send + Sync>,
    /// Present when an accounting API URL is configured.
    pub accounting_client: Option<Arc<AccountingReportClient>>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("AR_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let schemes = match &config.bucket_schemes_file {
        Some(path) => SchemeRegistry::from_file(path)?,
        None => SchemeRegistry::default(),
    };

    let repository = Arc::new(ReceivableRepository::new(pool.clone(), writer));
    let receivable_service = Arc::new(ReceivableService::new(
        repository,
        Arc::new(schemes),
        Arc::new(SystemClock),
        config.timezone,
    ));

    let accounting_client = config.accounting_api_url.as_ref().map(|url| {
        tracing::info!("Accounting report import enabled against {}", url);
        Arc::new(AccountingReportClient::new(url.clone()))
    });

    Ok(Arc::new(AppState {
        receivable_service,
        accounting_client,
        db_path,
    }))
}
