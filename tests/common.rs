use ride_booking_backend::{
    api::router::create_router,
    config::Config,
    domain::models::{
        flight::FlightRecord,
        provider::{CreatedBooking, NormalizedBookingRequest, ProviderBookingRecord},
        trip::{RouteDistance, RouteOverview},
    },
    domain::ports::{FlightStatusService, MapsService, SchedulingProvider},
    error::AppError,
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// What a mock port answers with.
#[allow(dead_code)]
#[derive(Clone)]
pub enum Canned<T> {
    Ok(T),
    Rejected(&'static str, Option<&'static str>),
    NotFound(&'static str),
    Unreachable,
}

impl<T: Clone> Canned<T> {
    fn produce(&self) -> Result<T, AppError> {
        match self {
            Canned::Ok(value) => Ok(value.clone()),
            Canned::Rejected(message, details) => Err(AppError::Rejected {
                message: message.to_string(),
                details: details.map(str::to_string),
            }),
            Canned::NotFound(message) => Err(AppError::NotFound(message.to_string())),
            Canned::Unreachable => Err(AppError::InternalWithMsg("connection refused".into())),
        }
    }
}

pub struct MockSchedulingProvider {
    pub slots: Mutex<Canned<Vec<String>>>,
    pub create: Mutex<Canned<CreatedBooking>>,
    pub bookings: Mutex<Canned<Vec<ProviderBookingRecord>>>,
    pub slot_calls: Mutex<Vec<(u64, NaiveDate, NaiveDate)>>,
    pub created: Mutex<Vec<NormalizedBookingRequest>>,
    pub listed_emails: Mutex<Vec<String>>,
}

impl Default for MockSchedulingProvider {
    fn default() -> Self {
        Self {
            slots: Mutex::new(Canned::Ok(Vec::new())),
            create: Mutex::new(Canned::Ok(CreatedBooking {
                id: Some(Value::from(9001)),
                uid: Some("bk_9001".into()),
                status: Some("accepted".into()),
                start: Some("2025-06-01T19:30:00.000Z".into()),
                end: Some("2025-06-01T20:30:00.000Z".into()),
                title: Some("Airport Transfer between GoldRidr and Jane Doe".into()),
            })),
            bookings: Mutex::new(Canned::Ok(Vec::new())),
            slot_calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            listed_emails: Mutex::new(Vec::new()),
        }
    }
}

#[allow(dead_code)]
impl MockSchedulingProvider {
    pub fn outbound_calls(&self) -> usize {
        self.slot_calls.lock().unwrap().len()
            + self.created.lock().unwrap().len()
            + self.listed_emails.lock().unwrap().len()
    }

    pub fn last_created(&self) -> NormalizedBookingRequest {
        self.created.lock().unwrap().last().cloned().expect("no booking was created")
    }
}

#[async_trait]
impl SchedulingProvider for MockSchedulingProvider {
    async fn list_slots(&self, event_type_id: u64, start: NaiveDate, end: NaiveDate) -> Result<Vec<String>, AppError> {
        self.slot_calls.lock().unwrap().push((event_type_id, start, end));
        self.slots.lock().unwrap().produce()
    }

    async fn create_booking(&self, request: &NormalizedBookingRequest) -> Result<CreatedBooking, AppError> {
        self.created.lock().unwrap().push(request.clone());
        self.create.lock().unwrap().produce()
    }

    async fn list_bookings_by_email(&self, email: &str) -> Result<Vec<ProviderBookingRecord>, AppError> {
        self.listed_emails.lock().unwrap().push(email.to_string());
        self.bookings.lock().unwrap().produce()
    }
}

pub struct MockMapsService {
    pub distance: Mutex<Canned<RouteDistance>>,
    pub directions: Mutex<Canned<RouteOverview>>,
    pub lookups: Mutex<Vec<(String, String)>>,
}

impl Default for MockMapsService {
    fn default() -> Self {
        Self {
            distance: Mutex::new(Canned::Ok(RouteDistance {
                distance_meters: 34_440.0,
                duration_seconds: 1_630.0,
                distance_text: "21.4 mi".into(),
                duration_text: "27 mins".into(),
                origin_formatted: Some("2400 Aviation Dr, DFW Airport, TX 75261, USA".into()),
                destination_formatted: Some("1321 Commerce St, Dallas, TX 75202, USA".into()),
            })),
            directions: Mutex::new(Canned::Ok(RouteOverview {
                encoded_polyline: "a~l~Fjk~uOwHJy@P".into(),
                bounds: serde_json::json!({
                    "northeast": { "lat": 32.9, "lng": -96.7 },
                    "southwest": { "lat": 32.7, "lng": -97.0 }
                }),
            })),
            lookups: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MapsService for MockMapsService {
    async fn distance(&self, origin: &str, destination: &str) -> Result<RouteDistance, AppError> {
        self.lookups.lock().unwrap().push((origin.to_string(), destination.to_string()));
        self.distance.lock().unwrap().produce()
    }

    async fn directions(&self, origin: &str, destination: &str) -> Result<RouteOverview, AppError> {
        self.lookups.lock().unwrap().push((origin.to_string(), destination.to_string()));
        self.directions.lock().unwrap().produce()
    }

    fn static_map_url(&self, size: &str, origin: &str, destination: &str, encoded_polyline: &str) -> String {
        format!("https://maps.test/staticmap?size={}&from={}&to={}&enc={}", size, origin, destination, encoded_polyline)
    }
}

#[derive(Default)]
pub struct MockFlightService {
    pub flights: Mutex<Vec<FlightRecord>>,
    pub refusal: Mutex<Option<&'static str>>,
    pub lookups: Mutex<Vec<String>>,
}

#[async_trait]
impl FlightStatusService for MockFlightService {
    async fn lookup(&self, flight_iata: &str) -> Result<Vec<FlightRecord>, AppError> {
        self.lookups.lock().unwrap().push(flight_iata.to_string());
        if let Some(info) = *self.refusal.lock().unwrap() {
            return Err(AppError::rejected(info));
        }
        Ok(self.flights.lock().unwrap().clone())
    }
}

pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = [
        ("FLEET_TIMEZONE", "America/Chicago"),
        ("BOOKING_EVENT_TYPE_SLUG", "airport-transfer"),
        ("BOOKING_USERNAME", "goldridr"),
        ("PRICE_BY_MILE_AIRPORT", "4.00"),
        ("PRICE_BY_MILE_CITY", "3.25"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in overrides {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("test configuration is valid")
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub scheduling: Arc<MockSchedulingProvider>,
    pub maps: Arc<MockMapsService>,
    pub flights: Arc<MockFlightService>,
}

#[allow(dead_code)]
impl TestApp {
    /// Every outbound port is wired to a recording mock.
    pub fn new() -> Self {
        Self::build(true)
    }

    /// As deployed without any API keys.
    pub fn unconfigured() -> Self {
        Self::build(false)
    }

    fn build(configured: bool) -> Self {
        let scheduling = Arc::new(MockSchedulingProvider::default());
        let maps = Arc::new(MockMapsService::default());
        let flights = Arc::new(MockFlightService::default());

        let state = Arc::new(AppState {
            config: test_config(&[]),
            scheduling: configured.then(|| scheduling.clone() as Arc<dyn SchedulingProvider>),
            maps: configured.then(|| maps.clone() as Arc<dyn MapsService>),
            flights: configured.then(|| flights.clone() as Arc<dyn FlightStatusService>),
        });

        Self {
            router: create_router(state.clone()),
            state,
            scheduling,
            maps,
            flights,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

/// One request as seen by [`StubServer`].
#[allow(dead_code)]
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

/// Local HTTP server on an ephemeral port that answers every request with one canned
/// status and body, and records what it received. Lets the real adapters run end to end.
#[allow(dead_code)]
pub struct StubServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl StubServer {
    pub async fn json(status: StatusCode, reply: Value) -> Self {
        Self::raw(status, reply.to_string()).await
    }

    pub async fn raw(status: StatusCode, reply: String) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();

        let app = Router::new().fallback(
            move |method: axum::http::Method,
                  uri: axum::http::Uri,
                  axum::extract::Query(query): axum::extract::Query<HashMap<String, String>>,
                  headers: axum::http::HeaderMap,
                  body: axum::body::Bytes| {
                let recorded = recorded.clone();
                let reply = reply.clone();
                async move {
                    recorded.lock().unwrap().push(RecordedRequest {
                        method: method.to_string(),
                        path: uri.path().to_string(),
                        query,
                        headers,
                        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
                    });
                    (status, [(header::CONTENT_TYPE, "application/json")], reply)
                }
            },
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url: format!("http://{}", addr), requests }
    }

    pub fn only_request(&self) -> RecordedRequest {
        let requests = self.requests.lock().unwrap();
        assert_eq!(requests.len(), 1, "expected exactly one upstream request");
        requests[0].clone()
    }
}
