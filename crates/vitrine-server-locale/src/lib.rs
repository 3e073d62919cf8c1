// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale resolution middleware for the Vitrine storefront server.
//!
//! This crate is the HTTP adapter around `vitrine-locale-core`: it extracts
//! locale signals from live requests, applies the resolver's decision
//! (redirect, cookie mutation, or pass-through), and forwards to the inner
//! service. Side effects and diagnostics are confined here; the decision
//! logic itself is pure and lives in the core crate.

mod config;
mod extract;
mod middleware;

pub use config::{
	LocaleConfig, CHECKOUT_COOKIE_NAME, COOKIE_MAX_AGE_ENV_VAR, COUNTRY_HEADER,
	COUNTRY_HEADER_ENV_VAR, LOCALE_COOKIE_NAME, PREFETCH_HEADER, PREFLIGHT_HEADER,
};
pub use extract::{extract_cookie, extract_signals, EdgeGeo};
pub use middleware::{LocaleFuture, LocaleLayer, LocaleService, ResolvedLocale};
