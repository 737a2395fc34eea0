// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Hombot devices.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Fan speed setting of the vacuum.
///
/// The Hombot firmware only distinguishes between normal and turbo suction.
/// The two modes are flipped with a single toggle command; there is no
/// absolute "set speed" command.
///
/// # Examples
///
/// ```
/// use hombot_lib::types::FanSpeed;
///
/// let speed: FanSpeed = "turbo".parse().unwrap();
/// assert_eq!(speed, FanSpeed::Turbo);
/// assert_eq!(speed.as_str(), "Turbo");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FanSpeed {
    /// Normal suction.
    Normal,
    /// Turbo suction.
    Turbo,
}

impl FanSpeed {
    /// All fan speeds supported by the device.
    pub const ALL: [Self; 2] = [Self::Normal, Self::Turbo];

    /// Returns the display string used by the device UI.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Turbo => "Turbo",
        }
    }

    /// Derives the fan speed from the `JSON_TURBO` status flag.
    #[must_use]
    pub const fn from_turbo_flag(turbo: bool) -> Self {
        if turbo { Self::Turbo } else { Self::Normal }
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FanSpeed {
    type Err = ValueError;

    /// Parses a fan speed name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("normal") {
            Ok(Self::Normal)
        } else if s.eq_ignore_ascii_case("turbo") {
            Ok(Self::Turbo)
        } else {
            Err(ValueError::InvalidFanSpeed(s.to_string()))
        }
    }
}
