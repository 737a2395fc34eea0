// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport implementation for Hombot devices.

use std::time::Duration;

use reqwest::Client;

use crate::command::Command;
use crate::error::ProtocolError;
use crate::protocol::Transport;

// ============================================================================
// HttpConfig - Connection parameters for a Hombot device
// ============================================================================

/// Configuration for an HTTP Hombot connection.
///
/// The Hombot firmware serves plain HTTP only; there is no TLS and no
/// authentication. Each request is independent.
///
/// # Examples
///
/// ```
/// use hombot_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.42", 6260)
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "http://192.168.1.42:6260");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new configuration for the specified host and port.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Creates an [`HttpClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let base_url = self.base_url();
        let timeout = self.timeout;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url,
            timeout,
            client,
        })
    }
}

// ============================================================================
// HttpClient - reqwest-backed Transport implementation
// ============================================================================

/// HTTP client for communicating with a Hombot device.
///
/// Commands go to `/json.cgi?<command>`, status snapshots come from
/// `/status.txt`. Both calls are bounded by the configured timeout.
///
/// # Examples
///
/// ```no_run
/// use hombot_lib::protocol::{HttpConfig, Transport};
/// use hombot_lib::command::Command;
///
/// # async fn example() -> Result<(), hombot_lib::error::ProtocolError> {
/// let client = HttpConfig::new("192.168.1.42", 6260).into_client()?;
/// client.send_command(Command::CleanStart).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl HttpClient {
    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the URL for a command query string.
    fn command_url(&self, command: &str) -> String {
        format!("{}/json.cgi?{}", self.base_url, encode_command(command))
    }

    /// Builds the URL of the status endpoint.
    fn status_url(&self) -> String {
        format!("{}/status.txt", self.base_url)
    }

    /// Classifies a reqwest failure into the library's error kinds.
    fn classify(&self, err: reqwest::Error) -> ProtocolError {
        if err.is_timeout() {
            let ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            ProtocolError::Timeout(ms)
        } else {
            ProtocolError::Http(err)
        }
    }
}

/// Percent-encodes a command for the `/json.cgi` query string.
///
/// The firmware requires literal colons in the query, so the standard
/// encoding is applied first and `:` is restored afterwards.
fn encode_command(command: &str) -> String {
    urlencoding::encode(command).replace("%3A", ":")
}

impl Transport for HttpClient {
    async fn send_command(&self, command: Command) -> Result<(), ProtocolError> {
        self.send_raw(&command.query_string()).await
    }

    async fn send_raw(&self, command: &str) -> Result<(), ProtocolError> {
        let url = self.command_url(command);

        tracing::debug!(url = %url, "sending command");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        // The device answers commands with an empty or meaningless body and
        // unreliable status codes. Read and discard the body; completing the
        // exchange is the only delivery signal available.
        response.bytes().await.map_err(|e| self.classify(e))?;

        Ok(())
    }

    async fn fetch_status(&self) -> Result<String, ProtocolError> {
        let url = self.status_url();

        tracing::debug!(url = %url, "fetching status");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let body = response.text().await.map_err(|e| self.classify(e))?;

        if body.is_empty() {
            return Err(ProtocolError::EmptyResponse);
        }

        tracing::debug!(body = %body, "received status");

        Ok(body)
    }
}
