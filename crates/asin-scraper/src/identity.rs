//! Stateless identity rotation: a user agent and an upstream proxy port drawn
//! uniformly at random from fixed pools on every fetch attempt.

use asin_core::{AppConfig, ProxySettings, DEFAULT_USER_AGENTS};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::ScraperError;

/// One concrete proxy endpoint (a single port on the gateway).
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for ProxyEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyEndpoint")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl ProxyEndpoint {
    /// `host:port`, the form Chromium's `--proxy-server` flag expects.
    #[must_use]
    pub fn server(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds a `reqwest` proxy for all schemes, with basic auth when a
    /// username is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidProxy`] if the endpoint is not a valid proxy URL.
    pub fn to_reqwest(&self) -> Result<reqwest::Proxy, ScraperError> {
        let endpoint = format!("http://{}", self.server());
        let mut proxy =
            reqwest::Proxy::all(&endpoint).map_err(|e| ScraperError::InvalidProxy {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;
        if let Some(username) = &self.username {
            proxy = proxy.basic_auth(username, self.password.as_deref().unwrap_or(""));
        }
        Ok(proxy)
    }
}

/// The fingerprint used for a single fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_agent: String,
    pub proxy: Option<ProxyEndpoint>,
}

/// Read-only pools shared by every request.
#[derive(Debug, Clone)]
pub struct IdentityPool {
    user_agents: Vec<String>,
    proxy: Option<ProxySettings>,
}

impl IdentityPool {
    #[must_use]
    pub fn new(user_agents: Vec<String>, proxy: Option<ProxySettings>) -> Self {
        Self { user_agents, proxy }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.user_agents.clone(), config.proxy.clone())
    }

    /// Draws a user agent and a proxy port independently of each other and
    /// of any previous draw.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Identity {
        let user_agent = self
            .user_agents
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| DEFAULT_USER_AGENTS[0].to_owned());

        let proxy = self.proxy.as_ref().and_then(|settings| {
            settings.ports.choose(rng).map(|&port| ProxyEndpoint {
                host: settings.host.clone(),
                port,
                username: settings.username.clone(),
                password: settings.password.clone(),
            })
        });

        Identity { user_agent, proxy }
    }

    /// Draws from the thread-local generator.
    #[must_use]
    pub fn draw_random(&self) -> Identity {
        self.draw(&mut rand::rng())
    }
}

impl Default for IdentityPool {
    fn default() -> Self {
        Self::new(
            DEFAULT_USER_AGENTS.iter().map(|s| (*s).to_owned()).collect(),
            None,
        )
    }
}
