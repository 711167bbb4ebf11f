// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! wxviz-forecast CLI - print the weather.gov hourly forecast for a location

use std::io::Write;
use std::process;

use clap::Parser;
use serde_json::{Map, Value};
use wxviz_forecast::{
    Coordinates, DEFAULT_BASE_URL, ForecastClient, ForecastError, HttpTransport, Location,
    Transport, observations,
};

const DEFAULT_USER_AGENT: &str = concat!("wxviz-forecast/", env!("CARGO_PKG_VERSION"));

/// Fetch the hourly forecast for a location and write it to stdout as JSON
#[derive(Parser, Debug)]
#[command(name = "wxviz-forecast")]
#[command(version, about, long_about = None)]
struct Args {
    /// Preset location
    #[arg(
        long,
        value_name = "NAME",
        default_value = "new-york",
        conflicts_with_all = ["lat", "lon"]
    )]
    location: Location,

    /// Latitude in decimal degrees (requires --lon)
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude in decimal degrees (requires --lat)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// API root
    #[arg(long, env = "WXVIZ_BASE_URL", default_value = DEFAULT_BASE_URL, value_name = "URL")]
    base_url: String,

    /// User-Agent header; weather.gov asks for contact details here
    #[arg(long, env = "WXVIZ_USER_AGENT", default_value = DEFAULT_USER_AGENT, value_name = "UA")]
    user_agent: String,

    /// Print decoded observations instead of the raw forecast document
    #[arg(long)]
    observations: bool,
}

impl Args {
    fn coordinates(&self) -> Coordinates {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Coordinates::new(lat, lon),
            _ => self.location.coordinates(),
        }
    }
}

fn observations_json(body: &[u8]) -> Result<Vec<u8>, ForecastError> {
    let rows: Vec<Value> = observations::from_forecast(body)?
        .iter()
        .map(|o| {
            let mut row = Map::new();
            row.insert("time".into(), Value::String(o.time().to_rfc3339()));
            for (field, value) in o.fields() {
                row.insert(field.into(), Value::from(value));
            }
            Value::Object(row)
        })
        .collect();
    serde_json::to_vec_pretty(&rows).map_err(ForecastError::Encode)
}

async fn run<T: Transport>(
    args: &Args,
    client: &ForecastClient<T>,
) -> Result<Vec<u8>, ForecastError> {
    let body = client.hourly_forecast(args.coordinates()).await?;
    if args.observations {
        observations_json(&body)
    } else {
        Ok(body.to_vec())
    }
}

async fn fetch(args: &Args) -> Result<Vec<u8>, ForecastError> {
    let transport = HttpTransport::new(&args.user_agent)?;
    let client = ForecastClient::with_base_url(transport, args.base_url.as_str());
    run(args, &client).await
}

/// Writes the document to `out` only when the fetch succeeded. Returns the exit status.
fn report(result: Result<Vec<u8>, ForecastError>, out: &mut impl Write) -> i32 {
    let output = match result {
        Ok(output) => output,
        Err(e) => {
            log::error!("{e}");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                log::error!("  caused by: {cause}");
                source = cause.source();
            }
            return 1;
        }
    };
    if let Err(e) = out.write_all(&output).and_then(|()| out.flush()) {
        log::error!("failed to write the forecast: {e}");
        return 1;
    }
    0
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    pretty_env_logger::formatted_timed_builder()
        .filter_module("wxviz_forecast", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    log::debug!("{args:?}");

    let result = fetch(&args).await;
    let code = report(result, &mut std::io::stdout().lock());
    if code != 0 {
        process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use bytes::Bytes;
    use wxviz_forecast::Response;

    use super::*;

    const BASE: &str = "http://forecast.test";
    const POINTS_URL: &str = "http://forecast.test/points/40.71303,-74.0064";
    const HOURLY_URL: &str = "http://forecast.test/gridpoints/OKX/33,35/forecast/hourly";

    /// Answers the points lookup, then the forecast with `forecast_status`.
    #[derive(Debug)]
    struct Scripted {
        forecast_status: u16,
        forecast_body: &'static str,
    }

    impl Scripted {
        fn new(forecast_status: u16, forecast_body: &'static str) -> Self {
            Self {
                forecast_status,
                forecast_body,
            }
        }
    }

    #[async_trait]
    impl Transport for Scripted {
        async fn get(&self, url: &str) -> Result<Response, ForecastError> {
            let (status, body) = if url == POINTS_URL {
                (200, format!(r#"{{"properties":{{"forecastHourly":"{HOURLY_URL}"}}}}"#))
            } else {
                (self.forecast_status, String::from(self.forecast_body))
            };
            Ok(Response {
                status,
                body: Bytes::from(body),
            })
        }
    }

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["wxviz-forecast", "--base-url", BASE];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[tokio::test]
    async fn http_error_writes_nothing_and_fails() {
        let args = args(&[]);
        let client = ForecastClient::with_base_url(Scripted::new(502, "bad gateway"), BASE);
        let result = run(&args, &client).await;
        assert!(
            matches!(result, Err(ForecastError::HttpStatus { status: 502, .. })),
            "{result:?}"
        );

        let mut out = Vec::new();
        assert_eq!(report(result, &mut out), 1);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn success_writes_the_forecast_verbatim() {
        let body = r#"{"properties":{"periods":[]}}"#;
        let args = args(&[]);
        let client = ForecastClient::with_base_url(Scripted::new(200, body), BASE);
        let mut out = Vec::new();
        assert_eq!(report(run(&args, &client).await, &mut out), 0);
        assert_eq!(out, body.as_bytes());
    }

    #[tokio::test]
    async fn observations_flag_prints_decoded_rows() {
        let body = r#"{"properties":{"periods":[
            {"startTime":"2024-03-05T13:00:00-05:00","temperature":41,"temperatureUnit":"F"}
        ]}}"#;
        let args = args(&["--observations"]);
        let client = ForecastClient::with_base_url(Scripted::new(200, body), BASE);
        let mut out = Vec::new();
        assert_eq!(report(run(&args, &client).await, &mut out), 0);
        let rows: Vec<serde_json::Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["time"], "2024-03-05T13:00:00-05:00");
        assert_eq!(rows[0]["temperature"], 41.0);
    }
}
