// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The locale resolution decision function.
//!
//! [`resolve`] is pure: it maps immutable per-request [`RequestSignals`] to a
//! [`Decision`] with no I/O and no logging, so every precedence rule is unit
//! testable in isolation. Side effects (redirects, cookies, diagnostics) are
//! applied by the HTTP adapter in `vitrine-server-locale`.
//!
//! # Precedence
//!
//! 1. Prefetch, bot, and preflight requests bypass locale handling entirely.
//! 2. A locale-prefixed path pins the resolved locale.
//! 3. On the root path, a stored cookie locale (falling back to fresh signal
//!    detection) drives a 307 redirect to the locale's prefix - unless the
//!    target is the default locale, which lives at the root.
//! 4. Otherwise the locale comes from geolocation, then the forwarded country
//!    header, then browser language negotiation, then the default.
//!
//! The cookie wins over fresh detection only for the root redirect target;
//! the locale cookie written on the continue path always holds the freshly
//! resolved locale. That asymmetry is intentional: the redirect honours an
//! explicit earlier choice, while the cookie write tracks where the visitor
//! actually is.

use http::Method;

use crate::locale::{Locale, DEFAULT_LOCALE};
use crate::negotiate::negotiate;

/// Immutable locale-relevant view of one HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSignals {
	/// The requested path, e.g. `/gb/products/x`.
	pub pathname: String,
	pub method: Method,
	/// Locale previously persisted in the locale cookie, if valid.
	pub cookie_locale: Option<Locale>,
	/// Opaque checkout/cart identifier cookie, if present.
	pub cookie_checkout_id: Option<String>,
	/// Country code from platform edge geolocation.
	pub geo_country: Option<String>,
	/// Country code from the forwarded-country proxy header.
	pub header_country: Option<String>,
	/// Raw `Accept-Language` header value.
	pub accept_language: Option<String>,
	pub is_prefetch: bool,
	pub is_bot: bool,
	pub is_options_preflight: bool,
}

impl RequestSignals {
	/// Create signals for a GET request with no cookies, headers, or
	/// geolocation.
	pub fn new(pathname: impl Into<String>) -> Self {
		Self {
			pathname: pathname.into(),
			method: Method::GET,
			cookie_locale: None,
			cookie_checkout_id: None,
			geo_country: None,
			header_country: None,
			accept_language: None,
			is_prefetch: false,
			is_bot: false,
			is_options_preflight: false,
		}
	}

	pub fn with_method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn with_cookie_locale(mut self, locale: Locale) -> Self {
		self.cookie_locale = Some(locale);
		self
	}

	pub fn with_checkout_id(mut self, checkout_id: impl Into<String>) -> Self {
		self.cookie_checkout_id = Some(checkout_id.into());
		self
	}

	pub fn with_geo_country(mut self, country: impl Into<String>) -> Self {
		self.geo_country = Some(country.into());
		self
	}

	pub fn with_header_country(mut self, country: impl Into<String>) -> Self {
		self.header_country = Some(country.into());
		self
	}

	pub fn with_accept_language(mut self, header: impl Into<String>) -> Self {
		self.accept_language = Some(header.into());
		self
	}

	pub fn with_prefetch(mut self, is_prefetch: bool) -> Self {
		self.is_prefetch = is_prefetch;
		self
	}

	pub fn with_bot(mut self, is_bot: bool) -> Self {
		self.is_bot = is_bot;
		self
	}

	pub fn with_options_preflight(mut self, is_preflight: bool) -> Self {
		self.is_options_preflight = is_preflight;
		self
	}
}

/// How the resolved locale was determined.
///
/// Carried in the decision so the adapter can log the detection path - in
/// particular [`LocaleSource::NegotiationFallback`], which is the only
/// warning-level outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
	/// Derived from the URL path prefix.
	PathPrefix,
	/// Mapped from the platform geolocation country.
	Geolocation,
	/// Mapped from the forwarded-country proxy header.
	CountryHeader,
	/// Negotiated from the `Accept-Language` header.
	BrowserLanguage,
	/// No usable signal was present.
	Default,
	/// Negotiation ran but matched no supported locale.
	NegotiationFallback,
}

/// Outcome of locale resolution for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
	/// Locale handling does not apply; pass the request through untouched.
	Skip,
	/// Redirect the root path to a locale-prefixed path.
	///
	/// Only ever produced for `pathname == "/"` with a non-default target
	/// locale; `location` is the locale's prefix path.
	Redirect { location: String, locale: Locale },
	/// Serve the request under `locale` and persist it in the locale cookie.
	Continue {
		locale: Locale,
		source: LocaleSource,
		/// The stored cookie locale differs from `locale`; the checkout
		/// cookie must be deleted because carts are market-scoped.
		clear_checkout: bool,
	},
}

impl Decision {
	/// The locale this decision serves, if any.
	pub fn locale(&self) -> Option<Locale> {
		match self {
			Decision::Skip => None,
			Decision::Redirect { locale, .. } | Decision::Continue { locale, .. } => Some(*locale),
		}
	}

	pub fn is_skip(&self) -> bool {
		matches!(self, Decision::Skip)
	}
}

/// Detect a locale from request signals, geolocation first.
///
/// Geolocation takes precedence over the forwarded-country header; the two
/// are never merged. A present-but-unknown country still resolves (to the
/// default locale) - only a fully absent country falls through to browser
/// negotiation.
fn detect(signals: &RequestSignals) -> (Locale, LocaleSource) {
	if let Some(country) = signals.geo_country.as_deref() {
		return (Locale::from_country(country), LocaleSource::Geolocation);
	}

	if let Some(country) = signals.header_country.as_deref() {
		return (Locale::from_country(country), LocaleSource::CountryHeader);
	}

	match signals.accept_language.as_deref() {
		Some(header) => match negotiate(header) {
			Some(locale) => (locale, LocaleSource::BrowserLanguage),
			None => (DEFAULT_LOCALE, LocaleSource::NegotiationFallback),
		},
		None => (DEFAULT_LOCALE, LocaleSource::Default),
	}
}

/// Resolve the locale decision for one request.
///
/// Deterministic and idempotent: identical signals always produce an
/// identical decision. Never fails - every branch lands on a valid
/// [`Decision`].
pub fn resolve(signals: &RequestSignals) -> Decision {
	if signals.is_prefetch || signals.is_bot || signals.is_options_preflight {
		return Decision::Skip;
	}

	let prefix_locale = Locale::from_path(&signals.pathname);
	let (detected, detected_source) = detect(signals);

	if signals.pathname == "/" {
		// The stored cookie wins over fresh detection for the redirect
		// target only.
		let target = signals.cookie_locale.unwrap_or(detected);

		if let Some(prefix) = target.prefix() {
			return Decision::Redirect {
				location: prefix.to_string(),
				locale: target,
			};
		}
	}

	let (locale, source) = match prefix_locale {
		Some(locale) => (locale, LocaleSource::PathPrefix),
		None => (detected, detected_source),
	};

	let clear_checkout = signals
		.cookie_locale
		.is_some_and(|cookie_locale| cookie_locale != locale);

	Decision::Continue {
		locale,
		source,
		clear_checkout,
	}
}
