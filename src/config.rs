use std::env;

use chrono_tz::Tz;
use thiserror::Error;

use crate::domain::models::booking::TripType;

const DEFAULT_PRICE_PER_MILE: f64 = 3.50;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    NotANumber { key: &'static str, value: String },
    #[error("FLEET_TIMEZONE is not a known IANA timezone: {0}")]
    UnknownTimezone(String),
}

/// Scheduling provider (Cal.com v2) connection settings.
#[derive(Clone)]
pub struct SchedulingConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub api_version: String,
    pub default_event_type_slug: Option<String>,
    pub default_username: Option<String>,
}

#[derive(Clone)]
pub struct MapsConfig {
    pub api_key: Option<String>,
    pub api_base: String,
}

#[derive(Clone)]
pub struct FlightsConfig {
    pub api_key: Option<String>,
    pub api_base: String,
}

/// Values every booking is stamped with regardless of what the rider sent.
#[derive(Clone, Debug)]
pub struct FleetConfig {
    pub timezone: Tz,
    pub language: String,
    pub booking_source: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PricingConfig {
    pub airport_per_mile: f64,
    pub city_per_mile: f64,
    pub hourly_per_mile: f64,
}

impl PricingConfig {
    /// Rate for a trip type name as sent by the quote form. Unknown names get the base rate.
    pub fn rate_for(&self, trip_type: &str) -> f64 {
        match trip_type.parse::<TripType>() {
            Ok(TripType::Airport) => self.airport_per_mile,
            Ok(TripType::City) => self.city_per_mile,
            Ok(TripType::Hourly) => self.hourly_per_mile,
            Err(_) => DEFAULT_PRICE_PER_MILE,
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            airport_per_mile: DEFAULT_PRICE_PER_MILE,
            city_per_mile: DEFAULT_PRICE_PER_MILE,
            hourly_per_mile: DEFAULT_PRICE_PER_MILE,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub allowed_origin: Option<String>,
    pub upstream_timeout_secs: u64,
    pub scheduling: SchedulingConfig,
    pub maps: MapsConfig,
    pub flights: FlightsConfig,
    pub fleet: FleetConfig,
    pub pricing: PricingConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timezone = match get("FLEET_TIMEZONE") {
            Some(name) => name.parse::<Tz>().map_err(|_| ConfigError::UnknownTimezone(name))?,
            None => chrono_tz::America::Chicago,
        };

        Ok(Self {
            port: parse_or(get("PORT"), "PORT", 3000)?,
            allowed_origin: get("ALLOWED_ORIGIN"),
            upstream_timeout_secs: parse_or(get("UPSTREAM_TIMEOUT_SECS"), "UPSTREAM_TIMEOUT_SECS", 15)?,
            scheduling: SchedulingConfig {
                api_key: get("CAL_API_KEY"),
                api_base: get("CAL_API_BASE").unwrap_or_else(|| "https://api.cal.com/v2".to_string()),
                api_version: get("CAL_API_VERSION").unwrap_or_else(|| "2024-08-13".to_string()),
                default_event_type_slug: get("BOOKING_EVENT_TYPE_SLUG"),
                default_username: get("BOOKING_USERNAME"),
            },
            maps: MapsConfig {
                api_key: get("GOOGLE_MAPS_API_KEY"),
                api_base: get("GOOGLE_MAPS_API_BASE")
                    .unwrap_or_else(|| "https://maps.googleapis.com/maps/api".to_string()),
            },
            flights: FlightsConfig {
                api_key: get("AVIATIONSTACK_API_KEY"),
                api_base: get("AVIATIONSTACK_API_BASE")
                    .unwrap_or_else(|| "http://api.aviationstack.com/v1".to_string()),
            },
            fleet: FleetConfig {
                timezone,
                language: get("FLEET_LANGUAGE").unwrap_or_else(|| "en".to_string()),
                booking_source: get("BOOKING_SOURCE").unwrap_or_else(|| "goldridr_website".to_string()),
            },
            pricing: PricingConfig {
                airport_per_mile: parse_or(get("PRICE_BY_MILE_AIRPORT"), "PRICE_BY_MILE_AIRPORT", DEFAULT_PRICE_PER_MILE)?,
                city_per_mile: parse_or(get("PRICE_BY_MILE_CITY"), "PRICE_BY_MILE_CITY", DEFAULT_PRICE_PER_MILE)?,
                hourly_per_mile: parse_or(get("PRICE_BY_MILE_HOURLY"), "PRICE_BY_MILE_HOURLY", DEFAULT_PRICE_PER_MILE)?,
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.parse().map_err(|_| ConfigError::NotANumber { key, value }),
        None => Ok(default),
    }
}
