//! Digitransit routing client
//!
//! Itinerary planning against the Digitransit routing engine's GraphQL API
//! using the `plan` query.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use domain::{Coordinate, Itinerary};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use crate::config::DigitransitConfig;
use crate::error::TransitError;
use crate::models::GraphQlResponse;
use crate::pelias::SUBSCRIPTION_KEY_HEADER;

/// Trait for itinerary planning clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Plan up to `count` itineraries between two coordinates
    ///
    /// `departure` of `None` lets the engine plan from now.
    async fn plan(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        departure: Option<DateTime<Utc>>,
        count: u8,
    ) -> Result<Vec<Itinerary>, TransitError>;

    /// Check if the routing engine is reachable
    async fn is_healthy(&self) -> bool;
}

/// Digitransit GraphQL routing client
#[derive(Debug)]
pub struct DigitransitRoutingClient {
    client: Client,
    config: DigitransitConfig,
    timezone: Tz,
}

impl DigitransitRoutingClient {
    /// Create a new routing client
    ///
    /// `timezone` is the zone the engine expects departure dates and times in.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &DigitransitConfig, timezone: Tz) -> Result<Self, TransitError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            timezone,
        })
    }

    /// Build the GraphQL request body
    ///
    /// Date and time arguments are left out entirely when no departure is given.
    fn build_request(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        departure: Option<DateTime<Utc>>,
        count: u8,
    ) -> Value {
        let wall_clock = departure.map(|d| decompose_departure(d, self.timezone));

        let mut variables = json!({
            "from": {"lat": origin.lat(), "lon": origin.lon()},
            "to": {"lat": destination.lat(), "lon": destination.lon()},
            "numItineraries": count,
        });
        if let (Some((date, time)), Some(vars)) = (&wall_clock, variables.as_object_mut()) {
            vars.insert("date".to_string(), Value::String(date.clone()));
            vars.insert("time".to_string(), Value::String(time.clone()));
        }

        json!({
            "query": plan_query(wall_clock.is_some()),
            "variables": variables,
        })
    }

    fn parse_plan_response(body: &str) -> Result<Vec<Itinerary>, TransitError> {
        let raw: GraphQlResponse =
            serde_json::from_str(body).map_err(|e| TransitError::ParseError(e.to_string()))?;
        raw.into_itineraries()
    }

    fn post(&self, body: &Value) -> reqwest::RequestBuilder {
        let mut request = self.client.post(&self.config.routing_url).json(body);
        if let Some(key) = &self.config.subscription_key {
            request = request.header(SUBSCRIPTION_KEY_HEADER, key);
        }
        request
    }
}

#[async_trait]
impl RoutingClient for DigitransitRoutingClient {
    #[instrument(skip(self), fields(from = %origin, to = %destination))]
    async fn plan(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        departure: Option<DateTime<Utc>>,
        count: u8,
    ) -> Result<Vec<Itinerary>, TransitError> {
        let body = self.build_request(origin, destination, departure, count);

        debug!(url = %self.config.routing_url, "Planning itineraries");

        let response = self
            .post(&body)
            .send()
            .await
            .map_err(|e| TransitError::from_reqwest(&e, self.config.timeout_secs))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransitError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(TransitError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransitError::ParseError(e.to_string()))?;

        let itineraries = Self::parse_plan_response(&body)?;

        if itineraries.is_empty() {
            warn!("No itineraries found");
        }

        debug!(count = itineraries.len(), "Itineraries found");
        Ok(itineraries)
    }

    async fn is_healthy(&self) -> bool {
        let body = json!({"query": "{ feeds { feedId } }"});
        self.post(&body)
            .send()
            .await
            .is_ok_and(|r| r.status().is_success())
    }
}

/// Split a departure instant into the engine's local date and time strings
fn decompose_departure(departure: DateTime<Utc>, timezone: Tz) -> (String, String) {
    let local = departure.with_timezone(&timezone);
    (
        local.format("%Y-%m-%d").to_string(),
        local.format("%H:%M:%S").to_string(),
    )
}

fn plan_query(with_departure: bool) -> String {
    let (declarations, arguments) = if with_departure {
        (", $date: String!, $time: String!", ", date: $date, time: $time")
    } else {
        ("", "")
    };

    format!(
        "query Plan($from: InputCoordinates!, $to: InputCoordinates!, $numItineraries: Int!{declarations}) {{
  plan(from: $from, to: $to, numItineraries: $numItineraries{arguments}) {{
    itineraries {{
      duration
      walkDistance
      legs {{
        mode
        startTime
        endTime
        duration
        distance
        from {{ name lat lon }}
        to {{ name lat lon }}
        route {{ shortName longName }}
        intermediatePlaces {{ name lat lon }}
      }}
    }}
  }}
}}"
    )
}
