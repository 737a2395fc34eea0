// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport implementations for communicating with Hombot devices.
//!
//! The vacuum exposes two plain-HTTP endpoints: `/json.cgi` for commands and
//! `/status.txt` for the state snapshot. [`HttpClient`] talks to both; the
//! [`Transport`] trait is the seam for injecting an alternative transport.

mod http;

pub use http::{HttpClient, HttpConfig};

use crate::command::Command;
use crate::error::ProtocolError;

/// Trait for transports that can reach a Hombot device.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends a command to the device's control endpoint.
    ///
    /// The device returns no meaningful payload for commands; success means
    /// the request completed without a transport-level error. The HTTP
    /// status code is deliberately not inspected.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on timeout or connection failure.
    async fn send_command(&self, command: Command) -> Result<(), ProtocolError>;

    /// Sends a raw command string to the device's control endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on timeout or connection failure.
    async fn send_raw(&self, command: &str) -> Result<(), ProtocolError>;

    /// Fetches the raw status blob from the device.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on timeout, connection failure, or an empty
    /// response body.
    async fn fetch_status(&self) -> Result<String, ProtocolError>;
}
