use crate::config::PricingConfig;
use crate::domain::models::trip::{RouteDistance, TripQuote};

const METERS_PER_MILE: f64 = 1609.344;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Prices a driving route at the per-mile rate for `trip_type`.
///
/// Miles are rounded to one decimal before pricing; the total is rounded to cents.
pub fn quote_trip(route: &RouteDistance, trip_type: &str, pricing: &PricingConfig) -> TripQuote {
    let price_per_mile = pricing.rate_for(trip_type);
    let total_miles = round_to(route.distance_meters / METERS_PER_MILE, 1);

    TripQuote {
        total_miles,
        duration_minutes: (route.duration_seconds / 60.0).round() as i64,
        duration_text: route.duration_text.clone(),
        distance_text: route.distance_text.clone(),
        price_per_mile,
        total_price: round_to(total_miles * price_per_mile, 2),
        origin_formatted: route.origin_formatted.clone(),
        destination_formatted: route.destination_formatted.clone(),
        booking_type: trip_type.to_string(),
    }
}
