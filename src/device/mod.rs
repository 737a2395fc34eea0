// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level device abstraction for Hombot vacuums.
//!
//! [`Hombot`] couples a [`Transport`] with the normalized [`DeviceState`] and
//! exposes the operations a scheduler or UI layer drives: a periodic
//! [`refresh`](Hombot::refresh) and the command operations (turn on/off,
//! pause, return to base, fan speed, raw commands).
//!
//! Every public operation is a single best-effort attempt that logs its own
//! failure and reports success as a `bool`; no error escapes to the caller
//! and no operation retries internally. A scheduled refresh and a
//! user-triggered command may interleave freely; the last writer to the
//! on/off or fan-speed projection wins, and the next successful poll restores
//! the authoritative view. The staleness window is bounded by the polling
//! interval.

mod http_builder;

pub use http_builder::HombotBuilder;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::command::Command;
use crate::error::ProtocolError;
use crate::protocol::{HttpConfig, Transport};
use crate::response::StatusSnapshot;
use crate::state::DeviceState;
use crate::types::FanSpeed;

/// A single Hombot vacuum reachable over an injected transport.
///
/// One `Hombot` owns the state of one physical device for the adapter's
/// lifetime. The owning layer (scheduler/UI) holds the instances, typically
/// in a map keyed by device name, and calls [`refresh`](Hombot::refresh) on a
/// fixed interval before reading [`state`](Hombot::state).
///
/// # Examples
///
/// ```no_run
/// use hombot_lib::Hombot;
///
/// #[tokio::main]
/// async fn main() {
///     let vacuum = Hombot::http("192.168.1.42", 6260).build().unwrap();
///
///     if vacuum.refresh().await {
///         println!("battery: {:?}", vacuum.state().battery_level());
///     }
///
///     vacuum.turn_on().await;
/// }
/// ```
#[derive(Debug)]
pub struct Hombot<T: Transport> {
    transport: T,
    state: Arc<RwLock<DeviceState>>,
}

impl<T: Transport> Hombot<T> {
    /// Creates a device around an existing transport.
    ///
    /// The state starts all-unknown until the first successful refresh.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            state: Arc::new(RwLock::new(DeviceState::new())),
        }
    }

    /// Returns a snapshot of the current device state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.state.read().clone()
    }

    /// Fetches the status blob and reconciles the device state.
    ///
    /// On success the whole state is replaced in one commit and `true` is
    /// returned. On any failure (timeout, transport error, empty body,
    /// missing required key, non-numeric battery) the failure is logged,
    /// `false` is returned, and the previously committed state stays
    /// untouched. Stale-but-valid beats partially applied.
    pub async fn refresh(&self) -> bool {
        let body = match self.transport.fetch_status().await {
            Ok(body) => body,
            Err(ProtocolError::Timeout(ms)) => {
                tracing::error!(timeout_ms = ms, "Hombot timed out");
                return false;
            }
            Err(err) => {
                tracing::error!(error = %err, "error getting Hombot status");
                return false;
            }
        };

        let snapshot = StatusSnapshot::parse(&body);
        match DeviceState::from_snapshot(&snapshot) {
            Ok(new_state) => {
                tracing::debug!(status = ?new_state.status(), "got new state from the vacuum");
                *self.state.write() = new_state;
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "malformed Hombot status");
                false
            }
        }
    }

    /// Starts a cleaning cycle.
    ///
    /// On delivery, optimistically marks the vacuum as on.
    pub async fn turn_on(&self) -> bool {
        let delivered = self.send(Command::CleanStart).await;
        if delivered {
            self.state.write().set_is_on(true);
        }
        delivered
    }

    /// Turns the vacuum off by sending it back to the dock.
    pub async fn turn_off(&self) -> bool {
        self.return_to_base().await
    }

    /// Stops the vacuum by pausing the current cycle.
    pub async fn stop(&self) -> bool {
        self.pause().await
    }

    /// Pauses the cleaning cycle.
    ///
    /// On delivery, optimistically marks the vacuum as off.
    pub async fn pause(&self) -> bool {
        let delivered = self.send(Command::Pause).await;
        if delivered {
            self.state.write().set_is_on(false);
        }
        delivered
    }

    /// Pauses the cleaning task or resumes it, depending on the current
    /// on/off projection.
    pub async fn start_pause(&self) -> bool {
        let is_on = self.state.read().is_on();
        if is_on {
            self.pause().await
        } else {
            self.turn_on().await
        }
    }

    /// Sends the vacuum back to the charging dock.
    ///
    /// On delivery, optimistically marks the vacuum as off.
    pub async fn return_to_base(&self) -> bool {
        let delivered = self.send(Command::Homing).await;
        if delivered {
            self.state.write().set_is_on(false);
        }
        delivered
    }

    /// Sets the fan speed, matched case-insensitively against
    /// `Normal`/`Turbo`.
    ///
    /// The device only has a toggle, so a command goes out only when the
    /// target differs from the current known speed. The local speed is set
    /// to the target even if the toggle is not delivered; the next
    /// successful poll resynchronizes it. An unknown speed name performs no
    /// network call and leaves the state unchanged.
    pub async fn set_fan_speed(&self, target: &str) -> bool {
        let Ok(speed) = target.parse::<FanSpeed>() else {
            tracing::error!(fan_speed = target, "no such fan speed available");
            return false;
        };

        let current = self.state.read().fan_speed();
        if current.is_some_and(|c| c != speed) {
            // Toggle result deliberately not checked; see above.
            self.send(Command::ToggleTurbo).await;
        }

        self.state.write().set_fan_speed(speed);
        true
    }

    /// Sends a raw command string to the control endpoint.
    ///
    /// Reports the real transport outcome, so callers can observe delivery
    /// failures for commands outside the fixed vocabulary.
    pub async fn send_raw_command(&self, command: &str) -> bool {
        match self.transport.send_raw(command).await {
            Ok(()) => true,
            Err(ProtocolError::Timeout(ms)) => {
                tracing::error!(command, timeout_ms = ms, "Hombot timed out");
                false
            }
            Err(err) => {
                tracing::error!(command, error = %err, "error sending raw command");
                false
            }
        }
    }

    /// Dispatches one command, logging any failure.
    async fn send(&self, command: Command) -> bool {
        match self.transport.send_command(command).await {
            Ok(()) => true,
            Err(ProtocolError::Timeout(ms)) => {
                tracing::error!(command = %command, timeout_ms = ms, "Hombot timed out");
                false
            }
            Err(err) => {
                tracing::error!(command = %command, error = %err, "error sending command");
                false
            }
        }
    }
}

impl Hombot<crate::protocol::HttpClient> {
    /// Creates a builder for an HTTP-connected Hombot.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hombot_lib::Hombot;
    /// use std::time::Duration;
    ///
    /// let vacuum = Hombot::http("192.168.1.42", 6260)
    ///     .with_timeout(Duration::from_secs(5))
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn http(host: impl Into<String>, port: u16) -> HombotBuilder {
        HombotBuilder::new(HttpConfig::new(host, port))
    }

    /// Creates a builder from an existing [`HttpConfig`].
    #[must_use]
    pub fn http_config(config: HttpConfig) -> HombotBuilder {
        HombotBuilder::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use parking_lot::Mutex;

    /// Transport double recording every dispatched command.
    struct FakeTransport {
        status: Mutex<Option<String>>,
        fail_commands: bool,
        sent: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        fn new() -> Self {
            Self {
                status: Mutex::new(None),
                fail_commands: false,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn with_status(body: &str) -> Self {
            let transport = Self::new();
            *transport.status.lock() = Some(body.to_string());
            transport
        }

        fn failing_commands() -> Self {
            Self {
                fail_commands: true,
                ..Self::new()
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().clone()
        }
    }

    impl Transport for &FakeTransport {
        async fn send_command(&self, command: Command) -> Result<(), ProtocolError> {
            self.send_raw(&command.query_string()).await
        }

        async fn send_raw(&self, command: &str) -> Result<(), ProtocolError> {
            self.sent.lock().push(command.to_string());
            if self.fail_commands {
                Err(ProtocolError::Timeout(10_000))
            } else {
                Ok(())
            }
        }

        async fn fetch_status(&self) -> Result<String, ProtocolError> {
            self.status.lock().clone().ok_or(ProtocolError::EmptyResponse)
        }
    }

    const PAUSED: &str = "JSON_ROBOT_STATE=\"PAUSE\"\nJSON_BATTPERC=\"87\"\nJSON_TURBO=\"false\"";
    const WORKING: &str = "JSON_ROBOT_STATE=\"WORKING\"\nJSON_BATTPERC=\"64\"\nJSON_TURBO=\"true\"";

    #[tokio::test]
    async fn refresh_commits_full_state() {
        let transport = FakeTransport::with_status(PAUSED);
        let vacuum = Hombot::with_transport(&transport);

        assert!(vacuum.refresh().await);

        let state = vacuum.state();
        assert_eq!(state.status(), Some("PAUSE"));
        assert!(!state.is_on());
        assert_eq!(state.battery_level(), Some(87));
        assert_eq!(state.fan_speed(), Some(FanSpeed::Normal));
    }

    #[tokio::test]
    async fn refresh_failure_keeps_previous_state() {
        let transport = FakeTransport::with_status(PAUSED);
        let vacuum = Hombot::with_transport(&transport);
        assert!(vacuum.refresh().await);
        let before = vacuum.state();

        *transport.status.lock() = Some("JSON_BATTPERC=\"12\"".to_string());
        assert!(!vacuum.refresh().await);
        assert_eq!(vacuum.state(), before);

        *transport.status.lock() = None;
        assert!(!vacuum.refresh().await);
        assert_eq!(vacuum.state(), before);
    }

    #[tokio::test]
    async fn turn_on_is_optimistic() {
        let transport = FakeTransport::new();
        let vacuum = Hombot::with_transport(&transport);

        assert!(vacuum.turn_on().await);
        assert!(vacuum.state().is_on());
        assert_eq!(transport.sent(), vec![r#"{"COMMAND":"CLEAN_START"}"#]);
    }

    #[tokio::test]
    async fn failed_turn_on_leaves_state_off() {
        let transport = FakeTransport::failing_commands();
        let vacuum = Hombot::with_transport(&transport);

        assert!(!vacuum.turn_on().await);
        assert!(!vacuum.state().is_on());
    }

    #[tokio::test]
    async fn pause_clears_on_projection() {
        let transport = FakeTransport::with_status(WORKING);
        let vacuum = Hombot::with_transport(&transport);
        assert!(vacuum.refresh().await);
        assert!(vacuum.state().is_on());

        assert!(vacuum.pause().await);
        assert!(!vacuum.state().is_on());
        assert_eq!(transport.sent(), vec![r#"{"COMMAND":"PAUSE"}"#]);
    }

    #[tokio::test]
    async fn turn_off_delegates_to_homing() {
        let transport = FakeTransport::new();
        let vacuum = Hombot::with_transport(&transport);

        assert!(vacuum.turn_off().await);
        assert!(!vacuum.state().is_on());
        assert_eq!(transport.sent(), vec![r#"{"COMMAND":"HOMING"}"#]);
    }

    #[tokio::test]
    async fn stop_delegates_to_pause() {
        let transport = FakeTransport::new();
        let vacuum = Hombot::with_transport(&transport);

        assert!(vacuum.stop().await);
        assert_eq!(transport.sent(), vec![r#"{"COMMAND":"PAUSE"}"#]);
    }

    #[tokio::test]
    async fn start_pause_toggles_by_projection() {
        let transport = FakeTransport::new();
        let vacuum = Hombot::with_transport(&transport);

        // Off: starts cleaning.
        assert!(vacuum.start_pause().await);
        assert!(vacuum.state().is_on());

        // On: pauses.
        assert!(vacuum.start_pause().await);
        assert!(!vacuum.state().is_on());

        assert_eq!(
            transport.sent(),
            vec![r#"{"COMMAND":"CLEAN_START"}"#, r#"{"COMMAND":"PAUSE"}"#]
        );
    }

    #[tokio::test]
    async fn set_fan_speed_sends_one_toggle() {
        let transport = FakeTransport::with_status(PAUSED);
        let vacuum = Hombot::with_transport(&transport);
        assert!(vacuum.refresh().await);
        assert_eq!(vacuum.state().fan_speed(), Some(FanSpeed::Normal));

        assert!(vacuum.set_fan_speed("turbo").await);
        assert_eq!(vacuum.state().fan_speed(), Some(FanSpeed::Turbo));
        assert_eq!(transport.sent(), vec!["turbo"]);
    }

    #[tokio::test]
    async fn set_fan_speed_same_speed_skips_toggle() {
        let transport = FakeTransport::with_status(PAUSED);
        let vacuum = Hombot::with_transport(&transport);
        assert!(vacuum.refresh().await);

        assert!(vacuum.set_fan_speed("Normal").await);
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn set_fan_speed_unknown_speed_skips_toggle() {
        // With no poll yet the current speed is unknown, so there is no
        // Normal<->Turbo transition to drive.
        let transport = FakeTransport::new();
        let vacuum = Hombot::with_transport(&transport);

        assert!(vacuum.set_fan_speed("turbo").await);
        assert_eq!(vacuum.state().fan_speed(), Some(FanSpeed::Turbo));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn set_fan_speed_applies_despite_toggle_failure() {
        let transport = FakeTransport::failing_commands();
        let vacuum = Hombot::with_transport(&transport);
        vacuum.state.write().set_fan_speed(FanSpeed::Normal);

        assert!(vacuum.set_fan_speed("Turbo").await);
        assert_eq!(vacuum.state().fan_speed(), Some(FanSpeed::Turbo));
        assert_eq!(transport.sent(), vec!["turbo"]);
    }

    #[tokio::test]
    async fn set_fan_speed_invalid_is_inert() {
        let transport = FakeTransport::new();
        let vacuum = Hombot::with_transport(&transport);
        vacuum.state.write().set_fan_speed(FanSpeed::Normal);

        assert!(!vacuum.set_fan_speed("eco").await);
        assert_eq!(vacuum.state().fan_speed(), Some(FanSpeed::Normal));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn send_raw_command_reports_outcome() {
        let transport = FakeTransport::new();
        let vacuum = Hombot::with_transport(&transport);
        assert!(vacuum.send_raw_command(r#"{"COMMAND":"HOMING"}"#).await);
        assert_eq!(transport.sent(), vec![r#"{"COMMAND":"HOMING"}"#]);

        let failing = FakeTransport::failing_commands();
        let vacuum = Hombot::with_transport(&failing);
        assert!(!vacuum.send_raw_command("turbo").await);
    }
}
