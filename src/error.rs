use thiserror::Error;

#[derive(Error, Debug)]
pub enum SfrboxError {
    #[error("Request to '{endpoint}' failed: {reason}")]
    TransportFailure { endpoint: String, reason: String },

    #[error("Could not retrieve login challenge (HTTP {0})")]
    ChallengeUnavailable(u16),

    #[error("Login response carried no challenge element")]
    ChallengeMissing,

    #[error("Login rejected by the router (HTTP {0})")]
    LoginRejected(u16),

    #[error("Could not load page '{endpoint}' (HTTP {status})")]
    PageUnavailable { endpoint: String, status: u16 },

    #[error("No shared key configured (set it in the config file or pass --key)")]
    KeyMissing,
}
