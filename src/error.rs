// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Hombot library.
//!
//! This module provides the error hierarchy for failures across the library:
//! value validation, HTTP transport, and status-blob parsing. The high-level
//! [`Hombot`](crate::Hombot) operations never surface these errors directly;
//! they log and report a success flag. The lower layers propagate them with
//! `?` as usual.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during HTTP communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a status snapshot.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to value validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// An invalid fan speed string was provided.
    #[error("invalid fan speed: {0}")]
    InvalidFanSpeed(String),
}

/// Errors related to HTTP transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The device returned an empty status body.
    #[error("empty response from device")]
    EmptyResponse,
}

/// Errors related to parsing the device status blob.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required key is missing from the status blob.
    #[error("missing key in status: {0}")]
    MissingKey(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {key}: {message}")]
    InvalidValue {
        /// The key whose value failed to parse.
        key: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::InvalidFanSpeed("warp".to_string());
        assert_eq!(err.to_string(), "invalid fan speed: warp");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::InvalidFanSpeed("max".to_string());
        let err: Error = value_err.into();
        assert!(matches!(err, Error::Value(ValueError::InvalidFanSpeed(_))));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingKey("JSON_BATTPERC".to_string());
        assert_eq!(err.to_string(), "missing key in status: JSON_BATTPERC");
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::Timeout(10_000);
        assert_eq!(err.to_string(), "request timed out after 10000 ms");
    }
}
