use std::collections::BTreeMap;

use poi_route_core::{Degrees, MergedView, OptimizedRoute};
use serde::{Deserialize, Serialize};

/// Body of add/edit/delete requests. Every field is optional on the wire so
/// that a missing one becomes a domain error instead of a decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct PointPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: Option<Degrees>,
    #[serde(default)]
    pub lon: Option<Degrees>,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    #[serde(rename = "ruta")]
    pub route: Vec<String>,
    #[serde(rename = "distancia")]
    pub distance_km: f64,
    /// Sorted by name, `[lat, lon]` per point.
    #[serde(rename = "coordenadas")]
    pub coordinates: BTreeMap<String, [f64; 2]>,
}

impl RouteResponse {
    pub fn new(route: OptimizedRoute, view: &MergedView) -> Self {
        Self {
            distance_km: route.rounded_cost_km(),
            route: route.names,
            coordinates: view
                .iter()
                .map(|p| (p.name.clone(), p.coordinate.as_pair()))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cities: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
