//! Server Configuration
//!
//! Everything the binary reads from the environment, resolved once at
//! startup. Lookups go through a closure so the parsing can be tested
//! without touching the process environment.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use catalog::CatalogConfig;
use platform::deadline::STORE_TIMEOUT;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";

/// Resolved server configuration
#[derive(Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub store_timeout: Duration,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
}

impl ServerConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build from an arbitrary key lookup. With `development` set, a missing
    /// `JWT_SECRET` is replaced by a random one and the refresh cookie drops
    /// its `Secure` flag.
    pub fn from_lookup<F>(lookup: F, development: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let listen_addr = var("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("LISTEN_ADDR is not a socket address")?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let store_timeout = match var("STORE_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(parse_number(&raw, "STORE_TIMEOUT_MS")?),
            None => STORE_TIMEOUT,
        };

        let mut auth = if development {
            AuthConfig::development()
        } else {
            AuthConfig::default()
        };

        match var("JWT_SECRET") {
            Some(secret) => auth.jwt_secret = secret.into_bytes(),
            None if development => {
                tracing::warn!("JWT_SECRET not set, using a random development secret");
            }
            None => bail!("JWT_SECRET must be set in production"),
        }

        if let Some(issuer) = var("JWT_ISSUER") {
            auth.issuer = issuer;
        }
        if let Some(audience) = var("JWT_AUDIENCE") {
            auth.audience = audience;
        }
        if let Some(raw) = var("ACCESS_TOKEN_TTL_SECS") {
            auth.access_token_ttl =
                Duration::from_secs(parse_number(&raw, "ACCESS_TOKEN_TTL_SECS")?);
        }
        if let Some(raw) = var("REFRESH_TOKEN_TTL_SECS") {
            auth.refresh_token_ttl =
                Duration::from_secs(parse_number(&raw, "REFRESH_TOKEN_TTL_SECS")?);
        }
        if let Some(name) = var("COOKIE_NAME") {
            auth.refresh_cookie.name = name;
        }
        if let Some(path) = var("COOKIE_PATH") {
            auth.refresh_cookie.path = path;
        }
        if let Some(domain) = var("COOKIE_DOMAIN") {
            auth.refresh_cookie.domain = Some(domain);
        }
        auth.password_pepper = var("PASSWORD_PEPPER").map(String::into_bytes);

        auth.validate().context("invalid auth configuration")?;

        let catalog = match var("TMDB_API_KEY") {
            Some(key) => CatalogConfig::with_tmdb_key(key),
            None => CatalogConfig::default(),
        };

        Ok(Self {
            database_url,
            listen_addr,
            frontend_origins,
            store_timeout,
            auth,
            catalog,
        })
    }
}

fn parse_number<T>(raw: &str, key: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} must be a non-negative integer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)], development: bool) -> anyhow::Result<ServerConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned(), development)
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/movies")], true).unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.frontend_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.store_timeout, Duration::from_secs(3));
        assert_eq!(config.auth.issuer, "example.com");
        assert_eq!(config.auth.refresh_cookie.name, "refresh_token");
        assert!(!config.auth.refresh_cookie.secure);
        assert!(!config.auth.jwt_secret.is_empty());
        assert!(!config.catalog.poster_lookup_enabled());
    }

    #[test]
    fn test_overrides() {
        let config = load(
            &[
                ("DATABASE_URL", "postgres://db/movies"),
                ("LISTEN_ADDR", "127.0.0.1:9000"),
                ("JWT_SECRET", "verysecret"),
                ("JWT_ISSUER", "movies.test"),
                ("ACCESS_TOKEN_TTL_SECS", "60"),
                ("REFRESH_TOKEN_TTL_SECS", "120"),
                ("COOKIE_DOMAIN", "movies.test"),
                ("TMDB_API_KEY", "key"),
                ("FRONTEND_ORIGINS", "https://a.test, https://b.test,"),
                ("STORE_TIMEOUT_MS", "250"),
            ],
            false,
        )
        .unwrap();

        assert_eq!(config.auth.jwt_secret, b"verysecret");
        assert_eq!(config.auth.issuer, "movies.test");
        assert_eq!(config.auth.access_token_ttl, Duration::from_secs(60));
        assert_eq!(config.auth.refresh_cookie.domain.as_deref(), Some("movies.test"));
        assert!(config.auth.refresh_cookie.secure);
        assert_eq!(config.store_timeout, Duration::from_millis(250));
        assert_eq!(config.frontend_origins, vec!["https://a.test", "https://b.test"]);
        assert!(config.catalog.poster_lookup_enabled());
    }

    #[test]
    fn test_production_requires_secret() {
        assert!(load(&[("DATABASE_URL", "postgres://db/movies")], false).is_err());
    }

    #[test]
    fn test_rejects_bad_values() {
        let base = [("DATABASE_URL", "postgres://db/movies")];
        assert!(load(&[], true).is_err());
        assert!(load(&[base[0], ("LISTEN_ADDR", "nowhere")], true).is_err());
        assert!(load(&[base[0], ("STORE_TIMEOUT_MS", "-1")], true).is_err());
        assert!(
            load(
                &[
                    base[0],
                    ("ACCESS_TOKEN_TTL_SECS", "900"),
                    ("REFRESH_TOKEN_TTL_SECS", "900"),
                ],
                true,
            )
            .is_err()
        );
    }
}
