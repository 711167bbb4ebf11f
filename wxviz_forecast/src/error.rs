// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Boxed error produced by a [`crate::Transport`] implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while fetching or decoding a forecast.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The request could not be sent or its body could not be read.
    #[error("request to {url} failed")]
    Request {
        /// The requested URL.
        url: String,
        /// The transport failure.
        #[source]
        source: BoxError,
    },

    /// The server answered with a non-success status.
    #[error("request to {url} failed with HTTP status {status}")]
    HttpStatus {
        /// The requested URL.
        url: String,
        /// The response status code.
        status: u16,
    },

    /// A response body was not the expected JSON document.
    #[error("failed to decode the response from {url}")]
    Decode {
        /// Where the document came from.
        url: String,
        /// The JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Decoded observations could not be written back out as JSON.
    #[error("failed to encode observations")]
    Encode(#[source] serde_json::Error),

    /// The points response named a forecast URL that does not parse.
    #[error("invalid forecast URL `{url}`: {reason}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A forecast period carried a start time that is not RFC 3339.
    #[error("invalid period start time `{value}`")]
    InvalidTimestamp {
        /// The offending value.
        value: String,
        /// The parse failure.
        #[source]
        source: chrono::ParseError,
    },
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn encode_is_distinct_from_decode() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ForecastError::Encode(json);
        assert_eq!(err.to_string(), "failed to encode observations");
        assert!(err.source().is_some());
        assert!(!matches!(err, ForecastError::Decode { .. }));
    }
}
