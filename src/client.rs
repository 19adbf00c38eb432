//! Box client: session handling and the administrative operations.
//!
//! All privileged calls go through [`BoxClient`], which wraps a blocking
//! [`ureq::Agent`] whose cookie store doubles as the session. The box issues
//! a `sid` cookie on a successful login; every operation checks for that
//! cookie first and runs the challenge-response handshake synchronously when
//! it is absent.
//!
//! # Example
//!
//! ```no_run
//! use sfrbox::client::{BoxClient, LedState};
//!
//! let client = BoxClient::new("http://192.168.1.1/", "wifi-key");
//! client.set_leds(LedState::Off).expect("LED toggle failed");
//! ```

use anyhow::Result;

use crate::auth;
use crate::error::SfrboxError;
use crate::page::{self, ConnectedDevice, InfoEntry};

/// Name of the session cookie the box sets after a successful login.
const SESSION_COOKIE: &str = "sid";

/// Desired state of the box's front-panel LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedState {
    On,
    Off,
}

impl LedState {
    /// Wire value for the `leds_state` form field.
    pub fn as_str(self) -> &'static str {
        match self {
            LedState::On => "on",
            LedState::Off => "off",
        }
    }
}

impl std::fmt::Display for LedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client for the box's web management interface.
///
/// Holds the base URL, the shared secret key, and the HTTP agent whose
/// cookie jar carries the session. One instance covers one process run; the
/// session is never persisted or explicitly torn down (the box expires it
/// server-side).
pub struct BoxClient {
    agent: ureq::Agent,
    base_url: String,
    key: String,
}

impl BoxClient {
    /// Creates a client for the box at `base_url` using `key` as the shared
    /// secret for login. No network I/O happens until an operation runs.
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> Self {
        BoxClient {
            agent: ureq::AgentBuilder::new().build(),
            base_url: base_url.into(),
            key: key.into(),
        }
    }

    /// Full URL for an endpoint path (`""` for the status page).
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Whether the cookie jar already holds a session identifier.
    pub fn has_session(&self) -> bool {
        self.agent
            .cookie_store()
            .iter_any()
            .any(|cookie| cookie.name() == SESSION_COOKIE)
    }

    /// Runs the login handshake unless a session is already established.
    ///
    /// Every privileged operation calls this first, so a single invocation
    /// logs in at most once.
    pub fn ensure_session(&self) -> Result<()> {
        if self.has_session() {
            return Ok(());
        }
        if self.key.is_empty() {
            return Err(SfrboxError::KeyMissing.into());
        }
        self.login()
    }

    /// Performs the challenge-response login handshake.
    ///
    /// Two round trips: fetch a one-time challenge, then submit the
    /// credential token computed by [`auth::compute_login_hash`]. On success
    /// the box sets the `sid` cookie in the agent's jar.
    ///
    /// # Known limitation
    /// Success means nothing more than HTTP 200 on the submission: the box
    /// is not asked to confirm the session, so a 200 with rejected
    /// credentials (or a missing `sid` cookie) goes undetected here and
    /// surfaces only when a later call fails.
    pub fn login(&self) -> Result<()> {
        let url = self.endpoint("login");

        let response = self
            .agent
            .post(&url)
            .set("X-Requested-With", "XMLHttpRequest")
            .send_form(&[("callback", "getChallenge"), ("action", "challenge")])
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => SfrboxError::ChallengeUnavailable(code),
                other => transport_failure(&url, &other),
            })?;

        let body = read_body(&url, response)?;
        let challenge =
            page::extract_challenge(&body).ok_or(SfrboxError::ChallengeMissing)?;

        let hash = auth::compute_login_hash(&challenge, &self.key);

        self.agent
            .post(&url)
            .send_form(&[
                ("method", "passwd"),
                ("page_ref", ""),
                ("zsid", &challenge),
                ("hash", &hash),
            ])
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => SfrboxError::LoginRejected(code),
                other => transport_failure(&url, &other),
            })?;

        Ok(())
    }

    /// Turns the box's front-panel LEDs on or off.
    pub fn set_leds(&self, state: LedState) -> Result<()> {
        self.ensure_session()?;

        let url = self.endpoint("state");
        self.agent
            .post(&url)
            .send_form(&[("leds_state", state.as_str())])
            .map_err(|err| transport_failure(&url, &err))?;

        Ok(())
    }

    /// Asks the box to reboot. The box drops the network while restarting,
    /// so nothing useful can follow this call in the same invocation.
    pub fn reboot(&self) -> Result<()> {
        self.ensure_session()?;

        let url = self.endpoint("reboot");
        self.agent
            .post(&url)
            .call()
            .map_err(|err| transport_failure(&url, &err))?;

        Ok(())
    }

    /// Fetches the network page and returns one entry per connected device.
    pub fn connected_devices(&self) -> Result<Vec<ConnectedDevice>> {
        let body = self.fetch_page("network")?;
        Ok(page::parse_connected_devices(&body))
    }

    /// Fetches the status page and returns its label/value entries
    /// (firmware info, WAN state, uptime).
    pub fn infos(&self) -> Result<Vec<InfoEntry>> {
        let body = self.fetch_page("")?;
        Ok(page::parse_info_entries(&body))
    }

    /// GET on a read endpoint, gated by the session precondition.
    fn fetch_page(&self, path: &str) -> Result<String> {
        self.ensure_session()?;

        let url = self.endpoint(path);
        let response = self.agent.get(&url).call().map_err(|err| match err {
            ureq::Error::Status(code, _) => SfrboxError::PageUnavailable {
                endpoint: url.clone(),
                status: code,
            },
            other => transport_failure(&url, &other),
        })?;

        read_body(&url, response)
    }
}

fn transport_failure(endpoint: &str, err: &ureq::Error) -> SfrboxError {
    SfrboxError::TransportFailure {
        endpoint: endpoint.to_string(),
        reason: err.to_string(),
    }
}

fn read_body(endpoint: &str, response: ureq::Response) -> Result<String> {
    response.into_string().map_err(|err| {
        SfrboxError::TransportFailure {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        }
        .into()
    })
}

/// Prints one line per connected device in the web UI's column order.
pub fn display_devices(devices: &[ConnectedDevice]) {
    if devices.is_empty() {
        println!("No connected devices.");
        return;
    }

    for device in devices {
        println!("{}", device.summary());
    }
}

/// Prints the status page entries as `label: value` lines.
pub fn display_infos(entries: &[InfoEntry]) {
    for entry in entries {
        println!("{}: {}", entry.label, entry.value);
    }
}
