// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Signal extraction: from a live HTTP request to [`RequestSignals`].
//!
//! All leniency lives here. Malformed headers and unparseable cookie values
//! degrade to absent signals; the resolver itself only ever sees well-typed
//! input.

use http::{header, HeaderMap, Method, Request};
use vitrine_locale_core::{Locale, RequestSignals};

use crate::config::{LocaleConfig, PREFETCH_HEADER, PREFLIGHT_HEADER};

/// Edge-resolved geolocation for the requesting client.
///
/// The hosting platform (or a trusted ingress layer) inserts this as a
/// request extension after resolving the client IP. It replaces ad hoc
/// request augmentation: the field is either present and typed, or absent.
/// The extension takes precedence over the country header; the two sources
/// are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeGeo {
	/// ISO 3166-1 country code.
	pub country: Option<String>,
	pub city: Option<String>,
	pub region: Option<String>,
}

impl EdgeGeo {
	/// Geolocation carrying only a country code.
	pub fn from_country(country: impl Into<String>) -> Self {
		Self {
			country: Some(country.into()),
			..Default::default()
		}
	}
}

/// Extract a cookie value from the Cookie header by name.
pub fn extract_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
	headers
		.get(header::COOKIE)?
		.to_str()
		.ok()?
		.split(';')
		.find_map(|cookie| {
			let cookie = cookie.trim();
			let (name, value) = cookie.split_once('=')?;

			if name == cookie_name {
				Some(value.to_string())
			} else {
				None
			}
		})
}

fn header_value<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
	headers
		.get(name)
		.and_then(|v| v.to_str().ok())
		.map(str::trim)
		.filter(|v| !v.is_empty())
}

fn is_bot_request(headers: &HeaderMap) -> bool {
	header_value(headers, "user-agent")
		.is_some_and(|ua| ua.to_ascii_lowercase().contains("bot"))
}

fn is_prefetch_request(headers: &HeaderMap) -> bool {
	header_value(headers, PREFETCH_HEADER) == Some("1")
}

fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
	method == Method::OPTIONS || header_value(headers, PREFLIGHT_HEADER) == Some("1")
}

/// Build the resolver's input from a live request.
///
/// The locale cookie is parsed strictly; a value that is not a supported
/// locale tag is treated as if the cookie were absent.
pub fn extract_signals<B>(request: &Request<B>, config: &LocaleConfig) -> RequestSignals {
	let headers = request.headers();
	let method = request.method();

	let cookie_locale = extract_cookie(headers, &config.locale_cookie_name).and_then(|value| {
		match value.parse::<Locale>() {
			Ok(locale) => Some(locale),
			Err(_) => {
				tracing::debug!(cookie = %value, "ignoring unparseable locale cookie");
				None
			}
		}
	});

	let geo_country = request
		.extensions()
		.get::<EdgeGeo>()
		.and_then(|geo| geo.country.as_deref())
		.map(str::trim)
		.filter(|country| !country.is_empty())
		.map(str::to_string);

	RequestSignals {
		pathname: request.uri().path().to_string(),
		method: method.clone(),
		cookie_locale,
		cookie_checkout_id: extract_cookie(headers, &config.checkout_cookie_name),
		geo_country,
		header_country: header_value(headers, &config.country_header).map(str::to_string),
		accept_language: header_value(headers, "accept-language").map(str::to_string),
		is_prefetch: is_prefetch_request(headers),
		is_bot: is_bot_request(headers),
		is_options_preflight: is_preflight_request(method, headers),
	}
}
