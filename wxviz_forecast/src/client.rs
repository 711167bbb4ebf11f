// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two-step weather.gov forecast lookup.
//!
//! A coordinate resolves to a forecast office grid through `/points/{lat},{lon}`. That response
//! names the grid's hourly forecast URL, which is fetched next. The forecast body is returned
//! untouched.

use bytes::Bytes;
use reqwest::Url;
use serde::Deserialize;

use crate::error::ForecastError;
use crate::location::Coordinates;
use crate::transport::{Response, Transport};

/// Public weather.gov API root.
pub const DEFAULT_BASE_URL: &str = "https://api.weather.gov";

#[derive(Debug, Deserialize)]
struct Points {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsProperties {
    forecast_hourly: String,
}

/// Fetches hourly forecasts through a [`Transport`].
#[derive(Debug)]
pub struct ForecastClient<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> ForecastClient<T> {
    /// Creates a client against [`DEFAULT_BASE_URL`].
    pub fn new(transport: T) -> Self {
        Self::with_base_url(transport, DEFAULT_BASE_URL)
    }

    /// Creates a client against another API root.
    pub fn with_base_url(transport: T, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            transport,
            base_url,
        }
    }

    /// The API root in use.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The points URL for `at`.
    pub fn points_url(&self, at: Coordinates) -> String {
        format!("{}/points/{at}", self.base_url)
    }

    /// Resolves `at` to its hourly forecast URL.
    pub async fn forecast_url(&self, at: Coordinates) -> Result<String, ForecastError> {
        let url = self.points_url(at);
        let response = self.get_ok(&url).await?;
        let points: Points = serde_json::from_slice(&response.body)
            .map_err(|source| ForecastError::Decode { url, source })?;
        let forecast_url = points.properties.forecast_hourly;
        Url::parse(&forecast_url).map_err(|e| ForecastError::InvalidUrl {
            url: forecast_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(forecast_url)
    }

    /// Fetches the hourly forecast for `at` and returns its body unchanged.
    pub async fn hourly_forecast(&self, at: Coordinates) -> Result<Bytes, ForecastError> {
        let forecast_url = self.forecast_url(at).await?;
        log::info!("fetching hourly forecast for {at} from {forecast_url}");
        let response = self.get_ok(&forecast_url).await?;
        Ok(response.body)
    }

    async fn get_ok(&self, url: &str) -> Result<Response, ForecastError> {
        let response = self.transport.get(url).await?;
        if !response.is_success() {
            return Err(ForecastError::HttpStatus {
                url: url.to_owned(),
                status: response.status,
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::location::Location;

    /// Serves canned responses and records every requested URL.
    #[derive(Debug, Default)]
    struct FakeTransport {
        routes: HashMap<String, Response>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        fn route(mut self, url: &str, status: u16, body: &'static str) -> Self {
            self.routes.insert(
                url.to_owned(),
                Response {
                    status,
                    body: Bytes::from_static(body.as_bytes()),
                },
            );
            self
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn get(&self, url: &str) -> Result<Response, ForecastError> {
            self.requested.lock().unwrap().push(url.to_owned());
            Ok(self.routes.get(url).cloned().unwrap_or(Response {
                status: 404,
                body: Bytes::new(),
            }))
        }
    }

    const POINTS_URL: &str = "https://api.weather.gov/points/40.71303,-74.0064";
    const HOURLY_URL: &str = "https://api.weather.gov/gridpoints/OKX/33,35/forecast/hourly";
    const POINTS_BODY: &str = r#"{"properties":{"forecastHourly":"https://api.weather.gov/gridpoints/OKX/33,35/forecast/hourly","forecast":"ignored"}}"#;
    // Odd spacing survives because the body is forwarded, not re-serialized.
    const HOURLY_BODY: &str = "{ \"properties\" : {\"periods\":[]} }\n";

    #[tokio::test]
    async fn second_request_goes_to_forecast_hourly_and_body_is_forwarded() {
        let transport = FakeTransport::default()
            .route(POINTS_URL, 200, POINTS_BODY)
            .route(HOURLY_URL, 200, HOURLY_BODY);
        let client = ForecastClient::new(transport);
        let body = client
            .hourly_forecast(Location::NewYork.coordinates())
            .await
            .unwrap();
        assert_eq!(body, HOURLY_BODY.as_bytes());
        let requested = client.transport.requested.lock().unwrap().clone();
        assert_eq!(requested, [POINTS_URL, HOURLY_URL]);
    }

    #[tokio::test]
    async fn points_failure_stops_before_the_forecast() {
        let transport = FakeTransport::default().route(POINTS_URL, 500, "oops");
        let client = ForecastClient::new(transport);
        let err = client
            .hourly_forecast(Location::NewYork.coordinates())
            .await
            .unwrap_err();
        assert!(
            matches!(err, ForecastError::HttpStatus { status: 500, ref url } if url == POINTS_URL),
            "{err:?}"
        );
        assert_eq!(client.transport.requested.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn forecast_failure_is_an_error() {
        let transport = FakeTransport::default()
            .route(POINTS_URL, 200, POINTS_BODY)
            .route(HOURLY_URL, 503, "busy");
        let client = ForecastClient::new(transport);
        let err = client
            .hourly_forecast(Location::NewYork.coordinates())
            .await
            .unwrap_err();
        assert!(
            matches!(err, ForecastError::HttpStatus { status: 503, ref url } if url == HOURLY_URL),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn malformed_points_is_a_decode_error() {
        let transport = FakeTransport::default().route(POINTS_URL, 200, r#"{"properties":{}}"#);
        let client = ForecastClient::new(transport);
        let err = client
            .hourly_forecast(Location::NewYork.coordinates())
            .await
            .unwrap_err();
        assert!(matches!(err, ForecastError::Decode { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn relative_forecast_url_is_rejected() {
        let transport = FakeTransport::default().route(
            POINTS_URL,
            200,
            r#"{"properties":{"forecastHourly":"/gridpoints/OKX/33,35/forecast/hourly"}}"#,
        );
        let client = ForecastClient::new(transport);
        let err = client
            .hourly_forecast(Location::NewYork.coordinates())
            .await
            .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidUrl { .. }), "{err:?}");
    }

    #[test]
    fn base_url_trailing_slashes_are_trimmed() {
        let client =
            ForecastClient::with_base_url(FakeTransport::default(), "http://localhost:8080//");
        assert_eq!(
            client.points_url(Location::LeesSummit.coordinates()),
            "http://localhost:8080/points/38.91099,-94.38277"
        );
    }
}
