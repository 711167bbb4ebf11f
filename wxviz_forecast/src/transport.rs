// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HTTP transport seam.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::error::ForecastError;

/// Media type the weather.gov API serves by default.
pub const GEO_JSON: &str = "application/geo+json";

/// A received response: status and raw body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Bytes,
}

impl Response {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests.
///
/// Implementations report any status as a [`Response`]; only failures to send the request or
/// read the body are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `url`.
    async fn get(&self, url: &str) -> Result<Response, ForecastError>;
}

/// A [`Transport`] backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a client that sends `user_agent` and asks for GeoJSON.
    ///
    /// weather.gov rejects requests without a `User-Agent`.
    pub fn new(user_agent: &str) -> Result<Self, ForecastError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));
        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| ForecastError::Request {
                url: String::new(),
                source: Box::new(e),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Response, ForecastError> {
        let request_error = |e: reqwest::Error| ForecastError::Request {
            url: url.to_owned(),
            source: Box::new(e),
        };
        let response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(request_error)?;
        log::debug!("GET {url} -> {status} ({} bytes)", body.len());
        Ok(Response { status, body })
    }
}
