use serde::Deserialize;
use sigbeam_core::error::{Result, SigbeamError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub signaling: SignalingSection,

    #[serde(default)]
    pub call: CallSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SigbeamError::BadConfig(
                "unsupported config version".into(),
            ));
        }

        self.signaling.validate()?;
        self.call.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignalingSection {
    /// Signaling server endpoint handed to the transport implementation.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Login endpoint handed to the access-token provider.
    #[serde(default = "default_login_url")]
    pub login_url: String,

    /// Depth of the outbound envelope queue.
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl Default for SignalingSection {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            login_url: default_login_url(),
            outbound_queue: default_outbound_queue(),
        }
    }
}

impl SignalingSection {
    pub fn validate(&self) -> Result<()> {
        if self.server_url.is_empty() {
            return Err(SigbeamError::BadConfig(
                "signaling.server_url must not be empty".into(),
            ));
        }
        if self.login_url.is_empty() {
            return Err(SigbeamError::BadConfig(
                "signaling.login_url must not be empty".into(),
            ));
        }
        if !(64..=4096).contains(&self.outbound_queue) {
            return Err(SigbeamError::BadConfig(
                "signaling.outbound_queue must be between 64 and 4096".into(),
            ));
        }
        Ok(())
    }
}

fn default_server_url() -> String {
    "ws://127.0.0.1:8088/ws".into()
}
fn default_login_url() -> String {
    "http://127.0.0.1:8081/api/v1/login".into()
}
fn default_outbound_queue() -> usize {
    1024
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallSection {
    /// Restrict accepted ICE candidates to relay type only.
    #[serde(default)]
    pub turn_only: bool,

    /// STUN/TURN endpoints handed to the peer-session implementation.
    #[serde(default = "default_ice_servers")]
    pub ice_servers: Vec<String>,
}

impl Default for CallSection {
    fn default() -> Self {
        Self {
            turn_only: false,
            ice_servers: default_ice_servers(),
        }
    }
}

impl CallSection {
    pub fn validate(&self) -> Result<()> {
        if self.ice_servers.is_empty() {
            return Err(SigbeamError::BadConfig(
                "call.ice_servers must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_ice_servers() -> Vec<String> {
    vec!["stun:stun.services.mozilla.com".into()]
}
