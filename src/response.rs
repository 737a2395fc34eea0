// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsing of the Hombot status snapshot.
//!
//! The device's `/status.txt` endpoint returns a newline-delimited sequence
//! of `KEY="VALUE"` (or `KEY=VALUE`) pairs. [`StatusSnapshot`] splits the
//! blob into a flat key/value map and exposes typed accessors for the keys
//! the library cares about. Unrecognized keys are retained in the map but
//! otherwise unused.

use std::collections::HashMap;

use crate::error::ParseError;

/// Status key holding the robot state token (e.g. `WORKING`, `PAUSE`).
pub const KEY_ROBOT_STATE: &str = "JSON_ROBOT_STATE";
/// Status key holding the battery percentage.
pub const KEY_BATTERY: &str = "JSON_BATTPERC";
/// Status key holding the turbo flag (`"true"` / `"false"`).
pub const KEY_TURBO: &str = "JSON_TURBO";
/// Status key holding the cleaning mode.
pub const KEY_MODE: &str = "JSON_MODE";
/// Status key holding the repeat setting.
pub const KEY_REPEAT: &str = "JSON_REPEAT";
/// Status key holding the timestamp of the last cleaning run.
pub const KEY_LAST_CLEAN: &str = "CLREC_LAST_CLEAN";

/// A parsed `/status.txt` snapshot.
///
/// Splitting the blob itself never fails; every line contributes a key.
/// Failures only surface when a required key is looked up and turns out to
/// be absent or malformed.
///
/// # Examples
///
/// ```
/// use hombot_lib::response::StatusSnapshot;
///
/// let snapshot = StatusSnapshot::parse("JSON_ROBOT_STATE=\"PAUSE\"\nJSON_BATTPERC=\"87\"");
/// assert_eq!(snapshot.robot_state().unwrap(), "PAUSE");
/// assert_eq!(snapshot.battery_percent().unwrap(), 87);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    attrs: HashMap<String, String>,
}

impl StatusSnapshot {
    /// Parses a raw status blob into a snapshot.
    ///
    /// Each line is partitioned on the first `=`: everything before is the
    /// key, everything after is the value. Lines without an `=` yield an
    /// empty value. One layer of surrounding double quotes is stripped from
    /// the value if present.
    #[must_use]
    pub fn parse(body: &str) -> Self {
        let attrs = body
            .lines()
            .map(|line| {
                let (key, value) = line.split_once('=').unwrap_or((line, ""));
                (key.to_string(), unquote(value).to_string())
            })
            .collect();
        Self { attrs }
    }

    /// Returns the value for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Returns the value for a key that the device contract requires.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingKey`] if the key is absent.
    pub fn require(&self, key: &str) -> Result<&str, ParseError> {
        self.get(key)
            .ok_or_else(|| ParseError::MissingKey(key.to_string()))
    }

    /// Returns the raw robot state token.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingKey`] if `JSON_ROBOT_STATE` is absent.
    pub fn robot_state(&self) -> Result<&str, ParseError> {
        self.require(KEY_ROBOT_STATE)
    }

    /// Returns the battery charge percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingKey`] if `JSON_BATTPERC` is absent, or
    /// [`ParseError::InvalidValue`] if the value is not an integer.
    pub fn battery_percent(&self) -> Result<u8, ParseError> {
        let raw = self.require(KEY_BATTERY)?;
        raw.parse().map_err(|_| ParseError::InvalidValue {
            key: KEY_BATTERY.to_string(),
            message: format!("not an integer: {raw:?}"),
        })
    }

    /// Returns whether the turbo flag is set.
    ///
    /// Anything other than the literal string `true` counts as off,
    /// including an absent key.
    #[must_use]
    pub fn turbo(&self) -> bool {
        self.get(KEY_TURBO) == Some("true")
    }

    /// Returns the number of keys in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Returns whether the snapshot contains no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

/// Strips one layer of surrounding double quotes, if both are present.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
