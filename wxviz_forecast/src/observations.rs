// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoding an hourly forecast document into chart observations.

use chrono::DateTime;
use serde::Deserialize;
use wxviz_charts::{LabelDict, Observation};

use crate::error::ForecastError;

/// Field holding the air temperature.
pub const TEMPERATURE: &str = "temperature";
/// Field holding the dew point, in the temperature's unit.
pub const DEWPOINT: &str = "dewpoint";
/// Field holding relative humidity in percent.
pub const HUMIDITY: &str = "humidity";
/// Field holding the probability of precipitation in percent.
pub const PRECIPITATION_PROBABILITY: &str = "precipitation_probability";
/// Field holding the wind speed in mph.
pub const WIND_SPEED: &str = "wind_speed";

#[derive(Debug, Deserialize)]
struct Forecast {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    #[serde(default)]
    periods: Vec<Period>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Period {
    start_time: String,
    temperature: Option<f64>,
    #[serde(default)]
    temperature_unit: Option<String>,
    #[serde(default)]
    dewpoint: Option<Quantity>,
    #[serde(default)]
    relative_humidity: Option<Quantity>,
    #[serde(default)]
    probability_of_precipitation: Option<Quantity>,
    #[serde(default)]
    wind_speed: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Quantity {
    value: Option<f64>,
}

fn quantity(q: Option<&Quantity>) -> Option<f64> {
    q.and_then(|q| q.value)
}

/// Parses the leading number of a speed such as `"10 mph"`.
///
/// Ranges like `"5 to 10 mph"` keep their lower bound.
fn parse_speed(s: &str) -> Option<f64> {
    s.split_whitespace().next()?.parse().ok()
}

fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Decodes `properties.periods[]` of an hourly forecast into observations.
///
/// Each observation keeps the period's UTC offset. Absent or null quantities are left out of
/// the observation rather than treated as zero.
pub fn from_forecast(body: &[u8]) -> Result<Vec<Observation>, ForecastError> {
    let forecast: Forecast =
        serde_json::from_slice(body).map_err(|source| ForecastError::Decode {
            url: String::from("<forecast>"),
            source,
        })?;

    let mut out = Vec::with_capacity(forecast.properties.periods.len());
    for period in forecast.properties.periods {
        let time = DateTime::parse_from_rfc3339(&period.start_time).map_err(|source| {
            ForecastError::InvalidTimestamp {
                value: period.start_time.clone(),
                source,
            }
        })?;
        let fahrenheit = period
            .temperature_unit
            .as_deref()
            .is_none_or(|u| u.eq_ignore_ascii_case("F"));

        let mut o = Observation::new(time);
        if let Some(t) = period.temperature {
            o.set_value(TEMPERATURE, t);
        }
        if let Some(d) = quantity(period.dewpoint.as_ref()) {
            o.set_value(DEWPOINT, if fahrenheit { celsius_to_fahrenheit(d) } else { d });
        }
        if let Some(h) = quantity(period.relative_humidity.as_ref()) {
            o.set_value(HUMIDITY, h);
        }
        if let Some(p) = quantity(period.probability_of_precipitation.as_ref()) {
            o.set_value(PRECIPITATION_PROBABILITY, p);
        }
        if let Some(w) = period.wind_speed.as_deref().and_then(parse_speed) {
            o.set_value(WIND_SPEED, w);
        }
        out.push(o);
    }
    log::debug!("decoded {} forecast periods", out.len());
    Ok(out)
}

/// Display labels for the decoded fields.
pub fn default_labels() -> LabelDict {
    [
        (TEMPERATURE, "Temperature (°F)"),
        (DEWPOINT, "Dew point (°F)"),
        (HUMIDITY, "Relative humidity (%)"),
        (PRECIPITATION_PROBABILITY, "Chance of precipitation (%)"),
        (WIND_SPEED, "Wind speed (mph)"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
      "type": "Feature",
      "properties": {
        "units": "us",
        "periods": [
          {
            "number": 1,
            "startTime": "2024-03-04T19:00:00-06:00",
            "endTime": "2024-03-04T20:00:00-06:00",
            "temperature": 41,
            "temperatureUnit": "F",
            "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": 20 },
            "dewpoint": { "unitCode": "wmoUnit:degC", "value": 5 },
            "relativeHumidity": { "unitCode": "wmoUnit:percent", "value": 86 },
            "windSpeed": "10 mph",
            "shortForecast": "Cloudy"
          },
          {
            "startTime": "2024-03-04T20:00:00-06:00",
            "temperature": 40,
            "temperatureUnit": "F",
            "probabilityOfPrecipitation": { "value": null },
            "dewpoint": { "value": -10 },
            "windSpeed": "5 to 10 mph"
          }
        ]
      }
    }"#;

    #[test]
    fn periods_become_observations() {
        let obs = from_forecast(DOC.as_bytes()).unwrap();
        assert_eq!(obs.len(), 2);

        let first = &obs[0];
        assert_eq!(first.timestamp(), 1_709_600_400);
        assert_eq!(first.time().offset().local_minus_utc(), -6 * 3600);
        assert_eq!(first.value(TEMPERATURE), Some(41.0));
        assert_eq!(first.value(DEWPOINT), Some(41.0));
        assert_eq!(first.value(HUMIDITY), Some(86.0));
        assert_eq!(first.value(PRECIPITATION_PROBABILITY), Some(20.0));
        assert_eq!(first.value(WIND_SPEED), Some(10.0));

        let second = &obs[1];
        assert_eq!(second.timestamp() - first.timestamp(), 3600);
        assert_eq!(second.value(DEWPOINT), Some(14.0));
        assert_eq!(second.value(PRECIPITATION_PROBABILITY), None);
        assert_eq!(second.value(HUMIDITY), None);
        assert_eq!(second.value(WIND_SPEED), Some(5.0));
    }

    #[test]
    fn celsius_forecasts_keep_the_dewpoint() {
        let doc = r#"{"properties":{"periods":[{"startTime":"2024-03-04T19:00:00Z",
            "temperature":5,"temperatureUnit":"C","dewpoint":{"value":2.5}}]}}"#;
        let obs = from_forecast(doc.as_bytes()).unwrap();
        assert_eq!(obs[0].value(DEWPOINT), Some(2.5));
    }

    #[test]
    fn bad_start_time_is_reported() {
        let doc = r#"{"properties":{"periods":[{"startTime":"yesterday","temperature":5}]}}"#;
        let err = from_forecast(doc.as_bytes()).unwrap_err();
        assert!(
            matches!(err, ForecastError::InvalidTimestamp { ref value, .. } if value == "yesterday"),
            "{err:?}"
        );
    }

    #[test]
    fn non_json_is_a_decode_error() {
        let err = from_forecast(b"<html>").unwrap_err();
        assert!(matches!(err, ForecastError::Decode { .. }), "{err:?}");
    }

    #[test]
    fn every_field_has_a_label() {
        let labels = default_labels();
        for field in [
            TEMPERATURE,
            DEWPOINT,
            HUMIDITY,
            PRECIPITATION_PROBABILITY,
            WIND_SPEED,
        ] {
            assert!(labels.contains_key(field), "missing label for {field}");
        }
    }
}
