// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hombot Lib - A Rust library to control LG Hombot robot vacuums.
//!
//! The Hombot's Wi-Fi module serves two plain-HTTP endpoints: a control
//! endpoint (`/json.cgi`) that accepts a small fixed command vocabulary, and
//! a status endpoint (`/status.txt`) that returns a `KEY=VALUE` snapshot.
//! This library wraps both behind a normalized async API: poll the device,
//! read a consistent state model, and drive it with commands.
//!
//! # Supported Features
//!
//! - **Cleaning control**: start, pause, resume, return to dock
//! - **Fan speed**: normal/turbo, driven through the device's toggle
//! - **State polling**: status code, on/off, battery level, fan speed, and
//!   passthrough attributes (mode, repeat, last cleaning run)
//! - **Raw commands**: pass-through for payloads outside the fixed set
//!
//! # Failure Model
//!
//! Every operation is a single best-effort attempt reporting success as a
//! `bool`. A failed poll or command is logged and leaves the last known
//! state untouched; the state is only ever replaced wholesale by a fully
//! successful refresh. Callers re-poll on their own cadence.
//!
//! # Quick Start
//!
//! ```no_run
//! use hombot_lib::Hombot;
//!
//! #[tokio::main]
//! async fn main() {
//!     let vacuum = Hombot::http("192.168.1.42", 6260).build().unwrap();
//!
//!     // Poll once, then read the normalized state.
//!     if vacuum.refresh().await {
//!         let state = vacuum.state();
//!         println!("status:  {:?}", state.status());
//!         println!("battery: {:?}", state.battery_level());
//!     }
//!
//!     // Start cleaning; the on/off projection updates optimistically.
//!     if vacuum.turn_on().await {
//!         assert!(vacuum.state().is_on());
//!     }
//! }
//! ```

pub mod command;
mod device;
pub mod error;
pub mod protocol;
pub mod response;
pub mod state;
pub mod types;

pub use command::Command;
pub use device::{Hombot, HombotBuilder};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use protocol::{HttpClient, HttpConfig, Transport};
pub use response::StatusSnapshot;
pub use state::DeviceState;
pub use types::FanSpeed;
