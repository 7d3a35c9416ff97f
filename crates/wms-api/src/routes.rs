//! Router assembly

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::handlers::{cron, health, sections, utilization, warehouses};
use crate::middleware::require_cron_secret;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/warehouses",
            get(warehouses::list_warehouses).post(warehouses::create_warehouse),
        )
        .route("/warehouses/{letter}", delete(warehouses::delete_warehouse))
        .route("/warehouses/{letter}/restore", post(warehouses::restore_warehouse))
        .route(
            "/warehouses/{letter}/sections",
            get(sections::list_sections).post(sections::add_sections),
        )
        .route("/warehouses/{letter}/sections/{number}", delete(sections::delete_section))
        .route(
            "/warehouses/{letter}/sections/{number}/toggle",
            post(sections::toggle_section),
        )
        .route("/warehouses/{letter}/rows/last", delete(sections::delete_last_row))
        .route("/utilization", get(utilization::get_utilization))
        .route("/utilization/history", get(utilization::get_history));

    // Scheduled job (bearer secret)
    let cron_routes = Router::new()
        .route("/daily-utilization", post(cron::daily_utilization))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_cron_secret));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .nest("/api/cron", cron_routes)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
}
