// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Router wiring for the storefront server.
//!
//! Every storefront path goes through the locale middleware; the routes
//! themselves only report the resolved locale and its market. Page rendering
//! is owned by the frontend and is not part of this server.

use axum::{routing::get, Extension, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use vitrine_locale_core::{Locale, Market, DEFAULT_LOCALE};
use vitrine_server_locale::{LocaleLayer, ResolvedLocale};

use crate::config::ServerConfig;

/// Locale context served to storefront clients.
#[derive(Debug, Serialize)]
struct StorefrontContext {
	locale: Locale,
	market: &'static Market,
}

async fn healthz() -> &'static str {
	"ok"
}

/// Report the locale context for any storefront path.
///
/// Requests the middleware skipped (bots, prefetches, preflights) carry no
/// resolved locale and are served with the default.
async fn storefront(locale: Option<Extension<ResolvedLocale>>) -> Json<StorefrontContext> {
	let locale = locale.map_or(DEFAULT_LOCALE, |Extension(ResolvedLocale(locale))| locale);

	Json(StorefrontContext {
		locale,
		market: locale.market(),
	})
}

/// Build the storefront router with locale handling applied.
pub fn create_router(config: &ServerConfig) -> Router {
	let storefront_routes = Router::new()
		.route("/", get(storefront))
		.route("/{*path}", get(storefront))
		.layer(LocaleLayer::new(config.locale.clone()));

	Router::new()
		.route("/healthz", get(healthz))
		.merge(storefront_routes)
		.layer(TraceLayer::new_for_http())
}
