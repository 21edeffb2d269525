mod handlers;
mod middleware;

use axum::{
    http::HeaderValue,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::PlannerConfig;
use crate::SharedPlanner;

pub use handlers::DeleteResult;

/// Router with no authentication and permissive CORS.
pub fn create_router(planner: SharedPlanner) -> Router {
    create_router_with_config(planner, &PlannerConfig::default())
}

pub fn create_router_with_config(planner: SharedPlanner, config: &PlannerConfig) -> Router {
    let mut api = Router::new()
        // Board
        .route("/board", get(handlers::get_board))
        .route("/board/text", get(handlers::get_board_text))
        .route("/board/reset", post(handlers::reset_board))
        // Months
        .route("/months", get(handlers::list_months))
        .route("/months/{index}", put(handlers::rename_month))
        // Activities
        .route("/activities", get(handlers::list_activities))
        .route("/activities", post(handlers::create_activity))
        .route("/activities/{id}", delete(handlers::delete_activity))
        // Arrows
        .route("/arrows", get(handlers::list_arrows))
        .route("/arrows", post(handlers::create_arrow))
        .route("/arrows/layout", get(handlers::arrow_layout))
        .route("/arrows/{id}", delete(handlers::delete_arrow));

    if let Some(key) = &config.api_key {
        api = api.layer(axum::middleware::from_fn_with_state(
            key.clone(),
            middleware::require_api_key,
        ));
    }

    let api = api.route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(planner)
}

fn cors_layer(config: &PlannerConfig) -> CorsLayer {
    match &config.cors_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    }
}
