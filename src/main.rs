//! Space Booking HTTP server.
//!
//! Loads configuration from `SPACE_BOOKING__*` environment variables (and
//! `.env` when present), wires the adapters and serves the booking API.
//!
//! Without `SPACE_BOOKING__DATABASE__URL` the service runs on in-memory
//! adapters; everything is lost on restart.

use std::sync::Arc;

use tokio::signal;
use tokio::sync::watch;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use space_booking::adapters::clock::SystemClock;
use space_booking::adapters::http::{api_router, BookingAppState, CatalogAppState};
use space_booking::adapters::memory::{InMemoryCatalog, InMemoryReservationStore};
use space_booking::adapters::postgres::{PostgresCatalog, PostgresReservationStore, MIGRATOR};
use space_booking::adapters::spacex::{SpaceXClient, SpaceXConfig};
use space_booking::application::{CatalogRefresher, ImportCatalogHandler};
use space_booking::config::{AppConfig, DatabaseConfig};
use space_booking::ports::{
    BookingReader, DestinationCatalog, FeedSlotWriter, LaunchpadCatalog, LaunchpadCatalogWriter,
    ReservationStore,
};

/// Port implementations selected at startup.
struct Adapters {
    store: Arc<dyn ReservationStore>,
    reader: Arc<dyn BookingReader>,
    feed_slots: Arc<dyn FeedSlotWriter>,
    launchpads: Arc<dyn LaunchpadCatalog>,
    launchpad_writer: Arc<dyn LaunchpadCatalogWriter>,
    destinations: Arc<dyn DestinationCatalog>,
}

impl Adapters {
    async fn postgres(config: &DatabaseConfig) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Connecting to database...");
        let pool = config.pool_options().connect(&config.url).await?;

        if config.run_migrations {
            info!("Running migrations...");
            MIGRATOR.run(&pool).await?;
        }

        let store = Arc::new(PostgresReservationStore::new(pool.clone()));
        let catalog = Arc::new(PostgresCatalog::new(pool));

        Ok(Self {
            store: store.clone(),
            reader: store.clone(),
            feed_slots: store,
            launchpads: catalog.clone(),
            launchpad_writer: catalog.clone(),
            destinations: catalog,
        })
    }

    fn in_memory() -> Self {
        let store = Arc::new(InMemoryReservationStore::new());
        let catalog = Arc::new(InMemoryCatalog::with_default_destinations(Vec::new()));

        Self {
            store: store.clone(),
            reader: store.clone(),
            feed_slots: store,
            launchpads: catalog.clone(),
            launchpad_writer: catalog.clone(),
            destinations: catalog,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);
    info!(
        environment = ?config.server.environment,
        "Starting Space Booking server"
    );

    let adapters = match &config.database {
        Some(database) => Adapters::postgres(database).await?,
        None => {
            warn!("No database configured, using in-memory adapters");
            Adapters::in_memory()
        }
    };

    // Catalog import
    let feed = SpaceXClient::new(
        SpaceXConfig::new()
            .with_base_url(config.catalog.feed_base_url.clone())
            .with_timeout(config.catalog.timeout()),
    )?;
    let importer = Arc::new(ImportCatalogHandler::new(
        Arc::new(feed),
        adapters.launchpad_writer.clone(),
        adapters.feed_slots.clone(),
    ));

    if config.catalog.import_on_startup {
        if let Err(err) = importer.handle().await {
            warn!(error = %err, "Startup catalog import failed, serving the stored catalog");
        }
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresher_handle = config.catalog.refresh_interval().map(|interval| {
        let refresher = CatalogRefresher::new(importer.clone(), interval);
        tokio::spawn(async move { refresher.run(shutdown_rx).await })
    });

    // HTTP
    let booking_state = BookingAppState {
        store: adapters.store.clone(),
        reader: adapters.reader.clone(),
        launchpads: adapters.launchpads.clone(),
        destinations: adapters.destinations.clone(),
        clock: Arc::new(SystemClock),
        max_attempts: config.admission.max_attempts,
    };
    let catalog_state = CatalogAppState {
        launchpads: adapters.launchpads.clone(),
        destinations: adapters.destinations.clone(),
    };

    let app = api_router(booking_state, catalog_state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = refresher_handle {
        if let Err(err) = handle.await {
            warn!(error = %err, "Catalog refresher did not stop cleanly");
        }
    }

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down gracefully"),
        () = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
