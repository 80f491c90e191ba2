use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{approvals, auth, clubs, dashboard, events, health_check, list_locations};
use crate::state::AppState;

/// Header carrying the signed-in user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/locations", get(list_locations))
        .route("/users/login", post(auth::login))
        .route("/users/register", post(auth::register))
        .route("/clubs", get(clubs::list_clubs))
        .route("/clubs/:id/join", post(clubs::join_club))
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/conflicts", post(events::check_conflicts))
        .route("/events/:id", get(events::get_event).put(events::update_event))
        .route("/events/:id/approval", post(approvals::decide))
        .route("/events/:id/rsvp", post(events::rsvp))
        .route("/dashboard/club-admin", get(dashboard::club_admin))
        .route("/dashboard/college-admin", get(dashboard::college_admin))
}

pub fn create_routes(state: AppState) -> Router {
    let cors = create_cors_layer(&state.config.allowed_origins);
    let production = state.config.production;

    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    create_security_headers_layer(router, production)
}
