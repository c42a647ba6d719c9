use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, instrument, warn};

use crate::config::MapsConfig;
use crate::domain::models::trip::{RouteDistance, RouteOverview};
use crate::domain::ports::MapsService;
use crate::error::AppError;

const ROUTE_COLOR: &str = "0xD4AF37";

pub struct GoogleMapsService {
    client: Client,
    api_base: String,
    api_key: String,
}

#[derive(Deserialize)]
struct TextValue {
    #[serde(default)]
    text: String,
    #[serde(default)]
    value: f64,
}

#[derive(Deserialize)]
struct MatrixElement {
    #[serde(default)]
    status: String,
    distance: Option<TextValue>,
    duration: Option<TextValue>,
}

#[derive(Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Deserialize)]
struct DistanceMatrixResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    origin_addresses: Vec<String>,
    #[serde(default)]
    destination_addresses: Vec<String>,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Deserialize)]
struct Polyline {
    points: String,
}

#[derive(Deserialize)]
struct DirectionsRoute {
    overview_polyline: Option<Polyline>,
    #[serde(default)]
    bounds: Value,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

impl GoogleMapsService {
    pub fn new(client: Client, config: &MapsConfig, api_key: String) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str, params: &[(&str, &str)]) -> Result<T, AppError> {
        let res = self
            .client
            .get(format!("{}{}", self.api_base, path))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Maps service connection error: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Maps service failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::InternalWithMsg(msg));
        }

        res.json().await.map_err(|e| {
            let msg = format!("Maps service returned an unexpected body: {}", e);
            error!("{}", msg);
            AppError::InternalWithMsg(msg)
        })
    }
}

#[async_trait]
impl MapsService for GoogleMapsService {
    #[instrument(skip(self))]
    async fn distance(&self, origin: &str, destination: &str) -> Result<RouteDistance, AppError> {
        let body: DistanceMatrixResponse = self
            .get_json(
                "/distancematrix/json",
                &[("origins", origin), ("destinations", destination), ("mode", "driving"), ("units", "imperial")],
            )
            .await?;

        if body.status != "OK" {
            warn!("Distance matrix lookup failed with status {}", body.status);
            return Err(AppError::Rejected {
                message: "Failed to calculate distance".into(),
                details: Some(body.status),
            });
        }

        let element = body
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .filter(|el| el.status == "OK")
            .ok_or_else(|| AppError::NotFound("Route not found".into()))?;

        let (Some(distance), Some(duration)) = (element.distance, element.duration) else {
            return Err(AppError::NotFound("Route not found".into()));
        };

        Ok(RouteDistance {
            distance_meters: distance.value,
            duration_seconds: duration.value,
            distance_text: distance.text,
            duration_text: duration.text,
            origin_formatted: body.origin_addresses.into_iter().next(),
            destination_formatted: body.destination_addresses.into_iter().next(),
        })
    }

    #[instrument(skip(self))]
    async fn directions(&self, origin: &str, destination: &str) -> Result<RouteOverview, AppError> {
        let body: DirectionsResponse = self
            .get_json("/directions/json", &[("origin", origin), ("destination", destination)])
            .await?;

        if body.status != "OK" {
            warn!("Directions lookup returned status {}", body.status);
            return Err(AppError::NotFound("Could not find route".into()));
        }

        body.routes
            .into_iter()
            .next()
            .and_then(|route| {
                route.overview_polyline.map(|p| RouteOverview { encoded_polyline: p.points, bounds: route.bounds })
            })
            .ok_or_else(|| AppError::NotFound("Could not find route".into()))
    }

    fn static_map_url(&self, size: &str, origin: &str, destination: &str, encoded_polyline: &str) -> String {
        let origin_marker = format!("color:green|label:A|{}", origin);
        let destination_marker = format!("color:red|label:B|{}", destination);
        let path = format!("color:{}|weight:4|enc:{}", ROUTE_COLOR, encoded_polyline);
        let params = [
            ("size", size),
            ("markers", origin_marker.as_str()),
            ("markers", destination_marker.as_str()),
            ("path", path.as_str()),
            ("key", self.api_key.as_str()),
        ];

        let base = format!("{}/staticmap", self.api_base);
        match Url::parse_with_params(&base, &params) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!("Static map base URL {} is not valid: {}", base, e);
                base
            }
        }
    }
}
