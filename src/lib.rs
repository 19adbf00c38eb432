//! SFR Box administration library.
//!
//! This library drives an SFR Box home router through its web management
//! interface: it establishes an authenticated session via the box's
//! challenge-response HMAC handshake, then issues administrative actions
//! (LED toggle, reboot, connected-device listing, status info) as plain
//! blocking HTTP calls.
//!
//! # Modules
//!
//! - [`auth`] - Login hash computation (double-hash-then-HMAC construction)
//! - [`client`] - Session handling and the administrative operations
//! - [`config`] - Base URL and shared key configuration (TOML file)
//! - [`error`] - Custom error types for the library
//! - [`page`] - Extraction of values from the box's server-rendered HTML
//!
//! # Example Usage
//!
//! ```no_run
//! use sfrbox::BoxClient;
//!
//! let client = BoxClient::new("http://192.168.1.1/", "wifi-key");
//!
//! // Logs in on first use, then lists connected devices
//! let devices = client.connected_devices().expect("Listing failed");
//! for device in &devices {
//!     println!("{}", device.summary());
//! }
//! ```

/// Authentication module computing the challenge-keyed login hash.
/// The one genuinely algorithmic piece of the box's protocol.
pub mod auth;

/// Client module wrapping the blocking HTTP agent and its cookie-backed
/// session, plus the four administrative operations.
pub mod client;

/// Configuration module for the box's base URL and shared key.
/// Handles reading/writing the TOML config file.
pub mod config;

/// Error module defining custom error types for the library.
/// Uses `thiserror` for ergonomic error handling.
pub mod error;

/// Page module extracting challenge tokens, device rows, and status
/// entries from the box's fixed HTML markup.
pub mod page;

// Re-export commonly used items for convenient access
pub use client::{display_devices, display_infos, BoxClient, LedState};
pub use error::SfrboxError;
pub use page::{ConnectedDevice, InfoEntry};
