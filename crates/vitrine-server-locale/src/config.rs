// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the locale middleware.

use std::time::Duration;

/// Default name of the cookie persisting the resolved locale.
pub const LOCALE_COOKIE_NAME: &str = "vitrine_locale";

/// Default name of the checkout/cart identifier cookie.
pub const CHECKOUT_COOKIE_NAME: &str = "vitrine_checkout_id";

/// Default header carrying the edge-resolved visitor country.
pub const COUNTRY_HEADER: &str = "x-edge-ip-country";

/// Header marking a client-side prefetch request.
pub const PREFETCH_HEADER: &str = "x-prefetch";

/// Header marking a middleware preflight probe.
pub const PREFLIGHT_HEADER: &str = "x-preflight";

/// Environment variable overriding the locale cookie max-age, in seconds.
pub const COOKIE_MAX_AGE_ENV_VAR: &str = "VITRINE_SERVER_LOCALE_COOKIE_MAX_AGE";

/// Environment variable overriding the country header name.
pub const COUNTRY_HEADER_ENV_VAR: &str = "VITRINE_SERVER_LOCALE_COUNTRY_HEADER";

const DEFAULT_COOKIE_MAX_AGE: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Configuration for the locale middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
	/// Name of the cookie persisting the resolved locale.
	pub locale_cookie_name: String,
	/// Name of the checkout cookie deleted on locale change.
	pub checkout_cookie_name: String,
	/// Max-age applied to the locale cookie.
	pub cookie_max_age: Duration,
	/// Header consulted for the visitor country when no geolocation
	/// extension is present.
	pub country_header: String,
}

impl Default for LocaleConfig {
	fn default() -> Self {
		Self {
			locale_cookie_name: LOCALE_COOKIE_NAME.to_string(),
			checkout_cookie_name: CHECKOUT_COOKIE_NAME.to_string(),
			cookie_max_age: DEFAULT_COOKIE_MAX_AGE,
			country_header: COUNTRY_HEADER.to_string(),
		}
	}
}

impl LocaleConfig {
	/// Create a new LocaleConfig with default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create LocaleConfig from environment variables.
	///
	/// Reads `VITRINE_SERVER_LOCALE_COOKIE_MAX_AGE` (seconds) and
	/// `VITRINE_SERVER_LOCALE_COUNTRY_HEADER`. Unset or unparseable values
	/// keep the defaults.
	pub fn from_env() -> Self {
		let mut config = Self::default();

		if let Some(max_age) = std::env::var(COOKIE_MAX_AGE_ENV_VAR)
			.ok()
			.and_then(|v| v.parse::<u64>().ok())
		{
			config.cookie_max_age = Duration::from_secs(max_age);
		}

		if let Ok(header) = std::env::var(COUNTRY_HEADER_ENV_VAR) {
			if !header.is_empty() {
				config.country_header = header.to_ascii_lowercase();
			}
		}

		config
	}

	/// Set the locale cookie name.
	pub fn with_locale_cookie_name(mut self, name: impl Into<String>) -> Self {
		self.locale_cookie_name = name.into();
		self
	}

	/// Set the checkout cookie name.
	pub fn with_checkout_cookie_name(mut self, name: impl Into<String>) -> Self {
		self.checkout_cookie_name = name.into();
		self
	}

	/// Set the locale cookie max-age.
	pub fn with_cookie_max_age(mut self, max_age: Duration) -> Self {
		self.cookie_max_age = max_age;
		self
	}

	/// Set the country header name.
	pub fn with_country_header(mut self, header: impl Into<String>) -> Self {
		self.country_header = header.into().to_ascii_lowercase();
		self
	}
}
