//! Application settings loaded via OrthoConfig.
//!
//! Values come from `FOODSHARE_*` environment variables, matching CLI flags,
//! or a config file, in OrthoConfig's usual precedence.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::mail::SmtpConfig;
use crate::outbound::persistence::{DEFAULT_MAX_CONNECTIONS, PoolConfig};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAIL_RELAY: &str = "smtp.gmail.com";

/// Shortest token secret accepted in release builds.
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Errors raised when settings are missing or unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{name} must be set")]
    Missing { name: &'static str },
    #[error("invalid bind host `{host}`")]
    InvalidHost { host: String },
    #[error("token secret must be at least {min} bytes, got {actual}")]
    TokenSecretTooShort { min: usize, actual: usize },
}

/// How verification mail leaves the process.
#[derive(Debug, Clone)]
pub enum MailDelivery {
    Smtp(SmtpConfig),
    /// Write messages to the log instead of sending them.
    LogOnly,
}

/// Process configuration.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FOODSHARE")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// HS256 signing secret for access tokens.
    pub token_secret: Option<String>,
    /// SMTP account; also used as the sender address.
    pub mail_username: Option<String>,
    pub mail_password: Option<String>,
    pub mail_relay: Option<String>,
    /// Log verification mail instead of sending it.
    #[ortho_config(default = false)]
    pub mail_log_only: bool,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("token_secret", &self.token_secret.as_ref().map(|_| "<redacted>"))
            .field("mail_username", &self.mail_username)
            .field("mail_password", &self.mail_password.as_ref().map(|_| "<redacted>"))
            .field("mail_relay", &self.mail_relay)
            .field("mail_log_only", &self.mail_log_only)
            .field("db_max_connections", &self.db_max_connections)
            .finish()
    }
}

fn required<'a>(value: Option<&'a String>, name: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(String::as_str)
        .filter(|raw| !raw.trim().is_empty())
        .ok_or(SettingsError::Missing { name })
}

/// Check a token secret, enforcing the minimum length when `strict`.
pub fn check_token_secret(secret: &str, strict: bool) -> Result<&[u8], SettingsError> {
    let bytes = secret.as_bytes();
    if strict && bytes.len() < MIN_TOKEN_SECRET_LEN {
        return Err(SettingsError::TokenSecretTooShort {
            min: MIN_TOKEN_SECRET_LEN,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

impl AppSettings {
    /// Socket address built from `host` and `port`, with defaults.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|_| SettingsError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Connection pool settings.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let url = required(self.database_url.as_ref(), "FOODSHARE_DATABASE_URL")?;
        Ok(PoolConfig::new(url)
            .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)))
    }

    /// Token signing secret. Release builds reject secrets shorter than
    /// [`MIN_TOKEN_SECRET_LEN`].
    pub fn token_secret(&self) -> Result<&[u8], SettingsError> {
        let secret = required(self.token_secret.as_ref(), "FOODSHARE_TOKEN_SECRET")?;
        check_token_secret(secret, !cfg!(debug_assertions))
    }

    /// Verification mail delivery mode.
    pub fn mail_delivery(&self) -> Result<MailDelivery, SettingsError> {
        if self.mail_log_only {
            return Ok(MailDelivery::LogOnly);
        }
        let username = required(self.mail_username.as_ref(), "FOODSHARE_MAIL_USERNAME")?;
        let password = required(self.mail_password.as_ref(), "FOODSHARE_MAIL_PASSWORD")?;
        let relay = self.mail_relay.as_deref().unwrap_or(DEFAULT_MAIL_RELAY);
        Ok(MailDelivery::Smtp(SmtpConfig::new(relay, username, password)))
    }
}
