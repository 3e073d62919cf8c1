// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server configuration, loaded from `VITRINE_SERVER_*` environment
//! variables with built-in defaults.

use vitrine_server_locale::LocaleConfig;

pub const HOST_ENV_VAR: &str = "VITRINE_SERVER_HOST";
pub const PORT_ENV_VAR: &str = "VITRINE_SERVER_PORT";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid value for {var}: {value}")]
	InvalidValue { var: &'static str, value: String },
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
	pub host: String,
	pub port: u16,
}

impl Default for HttpConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_string(),
			port: 3000,
		}
	}
}

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub locale: LocaleConfig,
}

impl ServerConfig {
	/// Load configuration from environment variables.
	///
	/// Unset variables keep their defaults; a present but unparseable port
	/// is an error rather than a silent fallback.
	pub fn from_env() -> Result<Self, ConfigError> {
		let mut http = HttpConfig::default();

		if let Ok(host) = std::env::var(HOST_ENV_VAR) {
			if !host.is_empty() {
				http.host = host;
			}
		}

		if let Ok(port) = std::env::var(PORT_ENV_VAR) {
			http.port = port.parse().map_err(|_| ConfigError::InvalidValue {
				var: PORT_ENV_VAR,
				value: port,
			})?;
		}

		Ok(Self {
			http,
			locale: LocaleConfig::from_env(),
		})
	}

	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}
