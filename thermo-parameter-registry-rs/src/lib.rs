//! Parameter registry and menu session for a DHT/PID temperature controller.
//!
//! The crate is split into:
//!
//! - [`parameter_registry`]: bounded, stepped access to the tunable
//!   control cells (setpoint and PID gains).
//! - [`session`]: menu state and transition rules driven by an encoder
//!   and a push button, plus the display snapshot.
//! - [`serial`]: the `Name:value` line protocol shared with the PC
//!   monitor.
//! - [`state`]: the process-wide [`ProcessState`](state::ProcessState).
//! - [`config`]: runtime configuration with defaults.
//!
//! # Crate Features
//!
//! - **`defmt`**: [`defmt::Format`] on public types and structured logging.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod parameter_registry;
pub mod serial;
pub mod session;
pub mod state;
