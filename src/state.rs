// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.

use std::collections::HashMap;

use crate::error::ParseError;
use crate::response::{KEY_LAST_CLEAN, KEY_MODE, KEY_REPEAT, StatusSnapshot};
use crate::types::FanSpeed;

/// Status tokens during which the vacuum counts as running.
pub const CLEANING_STATES: [&str; 2] = ["WORKING", "BACKMOVING_INIT"];

/// Normalized state of a Hombot vacuum.
///
/// Most fields are optional because nothing is known about the device until
/// the first successful poll. The state is either the outcome of the last
/// successful refresh (possibly overlaid by an optimistic on/off or fan-speed
/// flip after a delivered command) or the initial all-unknown value; failed
/// refreshes never partially overwrite it.
///
/// # Examples
///
/// ```
/// use hombot_lib::state::DeviceState;
///
/// let state = DeviceState::new();
/// assert!(state.status().is_none());
/// assert!(!state.is_on());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceState {
    /// Raw status token as reported by the device.
    status: Option<String>,
    /// Whether the vacuum is currently running.
    is_on: bool,
    /// Battery charge percentage (0-100).
    battery_level: Option<u8>,
    /// Current fan speed.
    fan_speed: Option<FanSpeed>,
    /// Passthrough attributes (mode, repeat, last clean timestamp).
    attributes: HashMap<String, String>,
}

impl DeviceState {
    /// Creates a new all-unknown device state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives a complete state from a status snapshot.
    ///
    /// The robot state token and battery percentage are required; the turbo
    /// flag and the passthrough attributes are optional. Deriving into a
    /// fresh value keeps the caller's committed state untouched when any
    /// required key is missing or malformed.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if `JSON_ROBOT_STATE` or `JSON_BATTPERC` is
    /// absent, or if the battery value is not an integer.
    pub fn from_snapshot(snapshot: &StatusSnapshot) -> Result<Self, ParseError> {
        let status = snapshot.robot_state()?.to_string();
        let battery_level = snapshot.battery_percent()?;
        let is_on = CLEANING_STATES.contains(&status.as_str());
        let fan_speed = FanSpeed::from_turbo_flag(snapshot.turbo());

        let attributes = [KEY_MODE, KEY_REPEAT, KEY_LAST_CLEAN]
            .into_iter()
            .filter_map(|key| {
                snapshot
                    .get(key)
                    .map(|value| (key.to_string(), value.to_string()))
            })
            .collect();

        Ok(Self {
            status: Some(status),
            is_on,
            battery_level: Some(battery_level),
            fan_speed: Some(fan_speed),
            attributes,
        })
    }

    /// Returns the raw status token.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Returns whether the vacuum is running.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Sets the on/off projection.
    ///
    /// Used for optimistic updates after a delivered command; the next
    /// successful refresh overwrites it from the authoritative status token.
    pub fn set_is_on(&mut self, is_on: bool) {
        self.is_on = is_on;
    }

    /// Returns the battery charge percentage.
    #[must_use]
    pub fn battery_level(&self) -> Option<u8> {
        self.battery_level
    }

    /// Returns the current fan speed.
    #[must_use]
    pub fn fan_speed(&self) -> Option<FanSpeed> {
        self.fan_speed
    }

    /// Sets the fan speed.
    pub fn set_fan_speed(&mut self, speed: FanSpeed) {
        self.fan_speed = Some(speed);
    }

    /// Returns the passthrough attributes (mode, repeat, last clean).
    #[must_use]
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(body: &str) -> StatusSnapshot {
        StatusSnapshot::parse(body)
    }

    #[test]
    fn new_state_is_unknown() {
        let state = DeviceState::new();
        assert!(state.status().is_none());
        assert!(!state.is_on());
        assert!(state.battery_level().is_none());
        assert!(state.fan_speed().is_none());
        assert!(state.attributes().is_empty());
    }

    #[test]
    fn from_snapshot_working_is_on() {
        let state = DeviceState::from_snapshot(&snapshot(
            "JSON_ROBOT_STATE=\"WORKING\"\nJSON_BATTPERC=\"42\"",
        ))
        .unwrap();

        assert_eq!(state.status(), Some("WORKING"));
        assert!(state.is_on());
        assert_eq!(state.battery_level(), Some(42));
    }

    #[test]
    fn from_snapshot_backmoving_init_is_on() {
        let state = DeviceState::from_snapshot(&snapshot(
            "JSON_ROBOT_STATE=\"BACKMOVING_INIT\"\nJSON_BATTPERC=\"42\"",
        ))
        .unwrap();
        assert!(state.is_on());
    }

    #[test]
    fn from_snapshot_pause_is_off() {
        let state = DeviceState::from_snapshot(&snapshot(
            "JSON_ROBOT_STATE=\"PAUSE\"\nJSON_BATTPERC=\"42\"",
        ))
        .unwrap();
        assert!(!state.is_on());
    }

    #[test]
    fn from_snapshot_turbo_flag() {
        let on = snapshot("JSON_ROBOT_STATE=\"PAUSE\"\nJSON_BATTPERC=\"42\"\nJSON_TURBO=\"true\"");
        let state = DeviceState::from_snapshot(&on).unwrap();
        assert_eq!(state.fan_speed(), Some(FanSpeed::Turbo));

        let off = snapshot("JSON_ROBOT_STATE=\"PAUSE\"\nJSON_BATTPERC=\"42\"");
        let state = DeviceState::from_snapshot(&off).unwrap();
        assert_eq!(state.fan_speed(), Some(FanSpeed::Normal));
    }

    #[test]
    fn from_snapshot_copies_optional_attributes() {
        let state = DeviceState::from_snapshot(&snapshot(concat!(
            "JSON_ROBOT_STATE=\"PAUSE\"\n",
            "JSON_BATTPERC=\"87\"\n",
            "JSON_MODE=\"AUTO\"\n",
            "JSON_REPEAT=\"0\"\n",
            "CLREC_LAST_CLEAN=\"2024-01-01\"",
        )))
        .unwrap();

        let attrs = state.attributes();
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.get("JSON_MODE").map(String::as_str), Some("AUTO"));
        assert_eq!(attrs.get("JSON_REPEAT").map(String::as_str), Some("0"));
        assert_eq!(
            attrs.get("CLREC_LAST_CLEAN").map(String::as_str),
            Some("2024-01-01")
        );
    }

    #[test]
    fn from_snapshot_omits_missing_optional_attributes() {
        let state = DeviceState::from_snapshot(&snapshot(
            "JSON_ROBOT_STATE=\"PAUSE\"\nJSON_BATTPERC=\"87\"",
        ))
        .unwrap();
        assert!(state.attributes().is_empty());
    }

    #[test]
    fn from_snapshot_missing_required_key_fails() {
        assert!(DeviceState::from_snapshot(&snapshot("JSON_BATTPERC=\"87\"")).is_err());
        assert!(DeviceState::from_snapshot(&snapshot("JSON_ROBOT_STATE=\"PAUSE\"")).is_err());
    }

    #[test]
    fn from_snapshot_bad_battery_fails() {
        let result = DeviceState::from_snapshot(&snapshot(
            "JSON_ROBOT_STATE=\"PAUSE\"\nJSON_BATTPERC=\"low\"",
        ));
        assert!(matches!(result, Err(ParseError::InvalidValue { .. })));
    }

    #[test]
    fn optimistic_overrides() {
        let mut state = DeviceState::new();
        state.set_is_on(true);
        assert!(state.is_on());

        state.set_fan_speed(FanSpeed::Turbo);
        assert_eq!(state.fan_speed(), Some(FanSpeed::Turbo));
    }
}
