use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Request, State};
use axum::response::{Html, Json, Redirect};
use carlot_types::Car;
use serde::Serialize;

use crate::error::{ServerError, ServerResult};
use crate::form;
use crate::router::{AppState, LISTING_PATH};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn index_handler() -> Redirect {
    Redirect::to(LISTING_PATH)
}

/// Rendered listing page.
pub async fn list_cars_handler(State(state): State<AppState>) -> ServerResult<Html<String>> {
    let cars = state.service.list_cars().await?;
    Ok(Html(crate::view::render_listing(&cars)))
}

/// The same listing as JSON.
pub async fn list_cars_json_handler(State(state): State<AppState>) -> ServerResult<Json<Vec<Car>>> {
    Ok(Json(state.service.list_cars().await?))
}

/// Create a car from a multipart form, then redirect to the listing.
pub async fn create_car_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Redirect> {
    let multipart = multipart.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let upload = form::read_car_upload(multipart).await?;
    state.service.create_car(upload.form, upload.attachment).await?;
    Ok(Redirect::to(LISTING_PATH))
}

/// Delete every car named in the form, then redirect to the listing.
pub async fn delete_cars_handler(
    State(state): State<AppState>,
    request: Request,
) -> ServerResult<Redirect> {
    let ids = form::read_delete_ids(request).await?;
    state.service.delete_cars(ids).await?;
    Ok(Redirect::to(LISTING_PATH))
}
