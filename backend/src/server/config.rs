//! Server settings loaded via OrthoConfig.
//!
//! Values come from `SKILLSWAP_*` environment variables, a config file or
//! command-line flags, in the precedence order OrthoConfig applies.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

fn default_seed_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("example-data")
        .join("marketplace.json")
}

/// Configuration values for the HTTP server and start-up seeding.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SKILLSWAP")]
pub struct ServerSettings {
    /// Interface to bind; defaults to `0.0.0.0`.
    pub host: Option<String>,
    /// Port to bind; defaults to `8080`.
    pub port: Option<u16>,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Permit a random session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_key: bool,
    /// Load the bundled demo marketplace at start-up.
    #[ortho_config(default = false)]
    pub seed_example_data: bool,
    /// Override for the example data fixture.
    pub seed_path: Option<PathBuf>,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Socket address built from [`Self::host`] and [`Self::port`].
    ///
    /// # Errors
    /// Returns [`std::io::ErrorKind::InvalidInput`] when the host is not an
    /// IP address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let host = self.host();
        let ip = host.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind host {host:?}: {err}"),
            )
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }

    pub fn seed_path(&self) -> PathBuf {
        self.seed_path.clone().unwrap_or_else(default_seed_path)
    }

    /// Derive the session key from the configured key file.
    ///
    /// When the file is missing or unreadable a random key is used in debug
    /// builds or when `allow_ephemeral_key` is set; sessions then do not
    /// survive a restart.
    ///
    /// # Errors
    /// Returns the read error in release builds without the ephemeral opt-in.
    pub fn session_key(&self) -> std::io::Result<Key> {
        let read = match &self.session_key_file {
            Some(path) => std::fs::read(path).map_err(|err| (path.display().to_string(), err)),
            None => Err((
                "<unset>".to_owned(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "no session key file configured"),
            )),
        };
        match read {
            Ok(bytes) => Ok(Key::derive_from(&bytes)),
            Err((path, err)) => {
                if cfg!(debug_assertions) || self.allow_ephemeral_key {
                    warn!(path, error = %err, "using temporary session key (dev only)");
                    Ok(Key::generate())
                } else {
                    Err(std::io::Error::other(format!(
                        "failed to read session key at {path}: {err}"
                    )))
                }
            }
        }
    }
}
