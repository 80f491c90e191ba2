use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use campus_events_server::config::Config;
use campus_events_server::routes::create_routes;
use campus_events_server::state::AppState;
use campus_events_server::store::EventStore;

const DEFAULT_LOG_FILTER: &str = "campus_events_server=debug,tower_http=info";

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env();
    let store = if config.seed_fixtures {
        tracing::info!("Seeding in-memory store with fixture clubs, users and events");
        EventStore::seeded()
    } else {
        EventStore::default()
    };
    if let Some(today) = config.today_override {
        tracing::info!(%today, "Calendar pinned by CAMPUS_EVENTS_TODAY");
    }

    let addr = config.addr();
    let app = create_routes(AppState::new(config, store));

    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
