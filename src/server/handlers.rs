use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use poi_route_core::{Coordinate, Error, optimize_route};
use rand::{SeedableRng, rngs::StdRng};

use super::{
    AppState,
    error::ApiError,
    payload::{CitiesResponse, MessageResponse, PointPayload, RouteResponse},
};

const ERR_MISSING_FIELDS: &str = "name, lat and lon are required";
const ERR_MISSING_COORDINATES: &str = "lat and lon are required";

type ApiResult<T> = Result<Json<T>, ApiError>;

pub(super) async fn generate_route(State(state): State<Arc<AppState>>) -> ApiResult<RouteResponse> {
    // One snapshot per request; registry writes during the search only make the result stale.
    let view = state.registry.merged_view();
    let options = state.optimizer;
    let seed = state.seed;

    let (view, route) = tokio::task::spawn_blocking(move || {
        let names = view.names();
        let route = match seed {
            Some(seed) => optimize_route(&names, &view, &options, &mut StdRng::seed_from_u64(seed)),
            None => optimize_route(&names, &view, &options, &mut StdRng::from_os_rng()),
        }?;
        Ok::<_, Error>((view, route))
    })
    .await
    .map_err(|e| Error::other(format!("optimizer task failed: {e}")))??;

    Ok(Json(RouteResponse::new(route, &view)))
}

pub(super) async fn seed_cities(State(state): State<Arc<AppState>>) -> Json<CitiesResponse> {
    Json(CitiesResponse {
        cities: state.registry.list_seed_names(),
    })
}

pub(super) async fn created_cities(State(state): State<Arc<AppState>>) -> Json<CitiesResponse> {
    Json(CitiesResponse {
        cities: state.registry.list_user_names(),
    })
}

pub(super) async fn city_data(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Coordinate> {
    Ok(Json(state.registry.get(&name)?))
}

pub(super) async fn add_city(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PointPayload>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(payload) = payload?;
    let (Some(name), Some(lat), Some(lon)) = (payload.name, payload.lat, payload.lon) else {
        return Err(Error::invalid_input(ERR_MISSING_FIELDS).into());
    };

    let cities = state.registry.add(&name, lat, lon)?;
    log::info!("server: added name={name} user_points={}", cities.len());
    Ok(Json(MessageResponse {
        message: format!("Point '{name}' added."),
        cities: Some(cities),
    }))
}

pub(super) async fn edit_city(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PointPayload>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(payload) = payload?;
    let name = payload.name.unwrap_or_default();
    let (Some(lat), Some(lon)) = (payload.lat, payload.lon) else {
        // Membership is reported before coordinate problems.
        let err = if state.registry.contains_user(&name) {
            Error::invalid_input(ERR_MISSING_COORDINATES)
        } else {
            Error::not_found(name)
        };
        return Err(err.into());
    };

    state.registry.edit(&name, lat, lon)?;
    log::info!("server: edited name={name}");
    Ok(Json(MessageResponse {
        message: format!("Point '{name}' updated."),
        cities: None,
    }))
}

pub(super) async fn delete_city(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PointPayload>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(payload) = payload?;
    let name = payload.name.unwrap_or_default();

    let cities = state.registry.delete(&name)?;
    log::info!("server: deleted name={name} user_points={}", cities.len());
    Ok(Json(MessageResponse {
        message: format!("Point '{name}' deleted."),
        cities: Some(cities),
    }))
}
