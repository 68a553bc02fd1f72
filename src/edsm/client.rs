use serde::Deserialize;
use url::Url;

use super::EDSM_BASE;
use crate::error::LookupError;

const TIMEOUT_SECS: u64 = 10;

/// Bodies EDSM knows for one system. An unknown system has no bodies.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SystemBodies {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bodies: Vec<Body>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "subType", default)]
    pub sub_type: String,
    #[serde(rename = "terraformingState")]
    pub terraforming_state: Option<String>,
}

impl SystemBodies {
    /// Decode a response body. EDSM answers `[]` for systems it has never
    /// seen; that, `null`, and anything unparseable all mean "no bodies".
    pub fn from_body(text: &str) -> Self {
        match serde_json::from_str::<Option<SystemBodies>>(text) {
            Ok(Some(bodies)) => bodies,
            Ok(None) => Self::default(),
            Err(e) => {
                log::debug!("Treating EDSM response as empty: {}", e);
                Self::default()
            }
        }
    }
}

/// Blocking EDSM client. One instance is shared by every lookup thread.
#[derive(Clone)]
pub struct EdsmClient {
    http: reqwest::blocking::Client,
    base: String,
}

impl EdsmClient {
    pub fn new() -> Result<Self, LookupError> {
        Self::with_base(EDSM_BASE)
    }

    pub fn with_base(base: &str) -> Result<Self, LookupError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("HabZone/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(LookupError::Client)?;
        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// `.../api-system-v1/bodies?systemName=<name>`
    pub fn bodies_url(&self, system_name: &str) -> Result<Url, LookupError> {
        let base = format!("{}/api-system-v1/bodies", self.base);
        Ok(Url::parse_with_params(&base, &[("systemName", system_name)])?)
    }

    pub fn bodies(&self, system_name: &str) -> Result<SystemBodies, LookupError> {
        let url = self.bodies_url(system_name)?;
        log::debug!("EDSM lookup: {}", url);

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(LookupError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let text = response.text().map_err(LookupError::Body)?;
        Ok(SystemBodies::from_body(&text))
    }
}
