// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hombot command definitions.
//!
//! The device understands a small fixed vocabulary of commands, delivered as
//! the query string of a GET request to `/json.cgi`. Most commands are
//! JSON-shaped (`{"COMMAND":"CLEAN_START"}`); the turbo toggle is the bare
//! token `turbo`.
//!
//! | Command | Effect |
//! |---------|--------|
//! | [`Command::CleanStart`] | Start (or resume) a cleaning cycle |
//! | [`Command::Pause`] | Pause the current cycle |
//! | [`Command::Homing`] | Return to the charging dock |
//! | [`Command::ToggleTurbo`] | Flip between normal and turbo suction |
//!
//! The device never returns a meaningful response body for commands; delivery
//! is confirmed purely by the HTTP exchange completing.

use std::fmt;

/// A command understood by the Hombot control endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Start (or resume) cleaning.
    CleanStart,
    /// Pause the cleaning cycle.
    Pause,
    /// Return to the charging dock.
    Homing,
    /// Toggle between normal and turbo fan speed.
    ToggleTurbo,
}

impl Command {
    /// Returns the `COMMAND` keyword for JSON-shaped commands.
    ///
    /// Returns `None` for [`Command::ToggleTurbo`], which the firmware
    /// accepts only as a bare token.
    #[must_use]
    pub const fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::CleanStart => Some("CLEAN_START"),
            Self::Pause => Some("PAUSE"),
            Self::Homing => Some("HOMING"),
            Self::ToggleTurbo => None,
        }
    }

    /// Returns the raw query string sent to `/json.cgi`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hombot_lib::command::Command;
    ///
    /// assert_eq!(Command::CleanStart.query_string(), r#"{"COMMAND":"CLEAN_START"}"#);
    /// assert_eq!(Command::ToggleTurbo.query_string(), "turbo");
    /// ```
    #[must_use]
    pub fn query_string(&self) -> String {
        match self.keyword() {
            Some(keyword) => serde_json::json!({ "COMMAND": keyword }).to_string(),
            None => "turbo".to_string(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query_string())
    }
}
