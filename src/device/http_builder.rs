// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP device builder.

use std::time::Duration;

use crate::device::Hombot;
use crate::error::Error;
use crate::protocol::{HttpClient, HttpConfig};

/// Builder for an HTTP-connected [`Hombot`].
///
/// Created via [`Hombot::http`] or [`Hombot::http_config`]. Building performs
/// no network access; the device stays all-unknown until the first refresh.
///
/// # Examples
///
/// ```no_run
/// use hombot_lib::Hombot;
/// use std::time::Duration;
///
/// # fn example() -> hombot_lib::Result<()> {
/// let vacuum = Hombot::http("192.168.1.42", 6260)
///     .with_timeout(Duration::from_secs(5))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HombotBuilder {
    config: HttpConfig,
}

impl HombotBuilder {
    /// Creates a new builder with the specified HTTP configuration.
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Builds the device.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build(self) -> Result<Hombot<HttpClient>, Error> {
        let client = self.config.into_client().map_err(Error::Protocol)?;
        Ok(Hombot::with_transport(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_builds_without_network() {
        let vacuum = Hombot::http("192.168.1.42", 6260).build().unwrap();
        assert!(vacuum.state().status().is_none());
    }

    #[test]
    fn builder_with_timeout() {
        let builder = Hombot::http("192.168.1.42", 6260).with_timeout(Duration::from_secs(2));
        assert_eq!(builder.config.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn builder_from_config() {
        let config = HttpConfig::new("hombot.local", 6260);
        let vacuum = Hombot::http_config(config).build().unwrap();
        assert!(!vacuum.state().is_on());
    }
}
