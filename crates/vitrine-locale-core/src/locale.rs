// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Supported storefront locales and their URL prefixes.
//!
//! Every locale is a language+region pair driving both content and
//! market/currency selection. The default locale is served at the root path
//! with no URL prefix; every other locale owns exactly one path prefix.

use serde::{Deserialize, Serialize};

/// A storefront locale.
///
/// The set is closed: region rollouts add a variant here together with its
/// prefix and market entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
	/// English (United States) - the default locale, served at `/`.
	#[serde(rename = "en-US")]
	EnUs,
	/// English (United Kingdom), served under `/gb`.
	#[serde(rename = "en-GB")]
	EnGb,
	/// English (Canada), served under `/ca`.
	#[serde(rename = "en-CA")]
	EnCa,
}

/// The locale served at the root path with no URL prefix.
pub const DEFAULT_LOCALE: Locale = Locale::EnUs;

/// All supported locales, default first.
///
/// Order matters: language-only negotiation (`Accept-Language: en`) picks the
/// first entry whose primary language matches, so the default locale must
/// lead.
pub const SUPPORTED_LOCALES: [Locale; 3] = [Locale::EnUs, Locale::EnGb, Locale::EnCa];

impl Locale {
	/// The BCP 47 tag for this locale.
	pub const fn as_str(self) -> &'static str {
		match self {
			Locale::EnUs => "en-US",
			Locale::EnGb => "en-GB",
			Locale::EnCa => "en-CA",
		}
	}

	/// The primary language subtag ("en").
	pub const fn language(self) -> &'static str {
		match self {
			Locale::EnUs | Locale::EnGb | Locale::EnCa => "en",
		}
	}

	/// The ISO 3166-1 country code of the locale's region.
	pub const fn country_code(self) -> &'static str {
		match self {
			Locale::EnUs => "US",
			Locale::EnGb => "GB",
			Locale::EnCa => "CA",
		}
	}

	/// The URL path prefix for this locale, or `None` for the default locale.
	pub const fn prefix(self) -> Option<&'static str> {
		match self {
			Locale::EnUs => None,
			Locale::EnGb => Some("/gb"),
			Locale::EnCa => Some("/ca"),
		}
	}

	/// Whether this is the default locale.
	pub fn is_default(self) -> bool {
		self == DEFAULT_LOCALE
	}

	/// Map a country code to its locale.
	///
	/// Case-insensitive. Countries without a dedicated market map to the
	/// default locale; callers that need "no signal" semantics must not call
	/// this with an absent country.
	pub fn from_country(country: &str) -> Locale {
		match country.to_ascii_uppercase().as_str() {
			"CA" => Locale::EnCa,
			"GB" => Locale::EnGb,
			"US" => Locale::EnUs,
			_ => DEFAULT_LOCALE,
		}
	}

	/// Derive the locale from a request path, if the path is locale-prefixed.
	///
	/// A prefix matches only as a complete leading segment: `/gb` and
	/// `/gb/products/x` match, `/gbfoo` does not. The default locale has no
	/// prefix and never matches.
	pub fn from_path(pathname: &str) -> Option<Locale> {
		SUPPORTED_LOCALES.iter().copied().find(|locale| {
			locale.prefix().is_some_and(|prefix| {
				pathname == prefix || pathname.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
			})
		})
	}
}

impl std::fmt::Display for Locale {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when parsing an unknown locale tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct ParseLocaleError(pub String);

impl std::str::FromStr for Locale {
	type Err = ParseLocaleError;

	/// Parse a BCP 47 tag, case-insensitively.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		SUPPORTED_LOCALES
			.iter()
			.copied()
			.find(|locale| locale.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| ParseLocaleError(s.to_string()))
	}
}
