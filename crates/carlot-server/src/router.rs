use std::path::Path;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use carlot_service::CarService;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handler;

pub const LISTING_PATH: &str = "/cars";
pub const CREATE_PATH: &str = "/cars";
pub const DELETE_PATH: &str = "/cars/delete";

/// Room for the non-file form fields and multipart framing on top of the
/// largest accepted image.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CarService>,
}

/// Build the axum router with all Carlot endpoints.
///
/// When `static_dir` is set, requests matching no route are served from it.
pub fn build_router(service: Arc<CarService>, static_dir: Option<&Path>) -> Router {
    let max_file_size = service.gate().config().max_file_size;
    let body_limit = usize::try_from(max_file_size)
        .unwrap_or(usize::MAX)
        .saturating_add(BODY_LIMIT_SLACK);

    let mut router = Router::new()
        .route("/", get(handler::index_handler))
        .route(
            LISTING_PATH,
            get(handler::list_cars_handler).post(handler::create_car_handler),
        )
        .route(DELETE_PATH, post(handler::delete_cars_handler))
        .route("/v1/cars", get(handler::list_cars_json_handler))
        .route("/v1/health", get(handler::health_handler));

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}
