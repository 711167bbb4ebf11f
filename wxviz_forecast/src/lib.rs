// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hourly forecasts from the [weather.gov API](https://www.weather.gov/documentation/services-web-api).
//!
//! [`ForecastClient::hourly_forecast`] resolves a coordinate to its forecast grid and returns the
//! hourly forecast document exactly as the API served it. [`observations::from_forecast`]
//! decodes that document into `wxviz_charts` observations.
//!
//! HTTP goes through the [`Transport`] trait; [`HttpTransport`] is the `reqwest`-backed
//! implementation.
//!
//! ```no_run
//! # async fn run() -> Result<(), wxviz_forecast::ForecastError> {
//! use wxviz_forecast::{ForecastClient, HttpTransport, Location};
//!
//! let client = ForecastClient::new(HttpTransport::new("wxviz (ops@example.com)")?);
//! let body = client.hourly_forecast(Location::StLouis.coordinates()).await?;
//! let observations = wxviz_forecast::observations::from_forecast(&body)?;
//! # let _ = observations;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod location;
pub mod observations;
mod transport;

pub use client::{DEFAULT_BASE_URL, ForecastClient};
pub use error::{BoxError, ForecastError};
pub use location::{Coordinates, Location};
pub use transport::{GEO_JSON, HttpTransport, Response, Transport};
