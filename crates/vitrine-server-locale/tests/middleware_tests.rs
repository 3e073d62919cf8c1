// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for the locale middleware.
//!
//! Tests cover:
//! - Locale cookie persistence on plain and prefixed paths
//! - Checkout cookie invalidation on locale change
//! - 307 root-path redirects from geolocation and cookies
//! - Bypass for bots, prefetches, and preflight requests
//! - Signal precedence (geo extension over country header)

use axum::{
	body::Body,
	http::{header::{COOKIE, LOCATION, SET_COOKIE}, Method, Request, StatusCode},
	response::Response,
	Extension, Router,
};
use tower::ServiceExt;
use vitrine_server_locale::{EdgeGeo, LocaleConfig, LocaleLayer, ResolvedLocale};

/// Fallback handler reporting the resolved locale, or "none" when the
/// middleware skipped the request.
async fn show_locale(locale: Option<Extension<ResolvedLocale>>) -> String {
	match locale {
		Some(Extension(ResolvedLocale(locale))) => locale.to_string(),
		None => "none".to_string(),
	}
}

fn test_app(config: LocaleConfig) -> Router {
	Router::new()
		.fallback(show_locale)
		.layer(LocaleLayer::new(config))
}

fn set_cookies(response: &Response) -> Vec<String> {
	response
		.headers()
		.get_all(SET_COOKIE)
		.iter()
		.map(|v| v.to_str().unwrap().to_string())
		.collect()
}

async fn body_string(response: Response) -> String {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	String::from_utf8(bytes.to_vec()).unwrap()
}

// ============================================================================
// Locale cookie persistence
// ============================================================================

#[tokio::test]
async fn plain_request_gets_default_locale_cookie() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/products/test-product")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	let cookies = set_cookies(&response);
	assert!(cookies.iter().any(|c| c.starts_with("vitrine_locale=en-US;")));
	assert_eq!(body_string(response).await, "en-US");
}

#[tokio::test]
async fn prefixed_path_gets_prefix_locale_cookie() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/gb/products/test-product")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert!(set_cookies(&response)
		.iter()
		.any(|c| c.starts_with("vitrine_locale=en-GB;")));
	assert_eq!(body_string(response).await, "en-GB");
}

#[tokio::test]
async fn prefix_overrides_stale_cookie_locale() {
	// A visitor with an en-GB cookie landing on an unprefixed path is
	// re-resolved to the default locale.
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/products/test-product")
				.header(COOKIE, "vitrine_locale=en-GB")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert!(set_cookies(&response)
		.iter()
		.any(|c| c.starts_with("vitrine_locale=en-US;")));
}

#[tokio::test]
async fn locale_cookie_carries_max_age_and_path() {
	let config = LocaleConfig::new().with_cookie_max_age(std::time::Duration::from_secs(3600));
	let response = test_app(config)
		.oneshot(
			Request::builder()
				.uri("/products/x")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	let cookies = set_cookies(&response);
	assert!(cookies
		.iter()
		.any(|c| c == "vitrine_locale=en-US; Max-Age=3600; Path=/; SameSite=Lax"));
}

// ============================================================================
// Checkout cookie invalidation
// ============================================================================

#[tokio::test]
async fn locale_change_deletes_checkout_cookie() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/gb/products/test-product")
				.header(COOKIE, "vitrine_locale=en-US; vitrine_checkout_id=321")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	let cookies = set_cookies(&response);
	assert!(cookies.iter().any(|c| c.starts_with("vitrine_locale=en-GB;")));
	assert!(cookies
		.iter()
		.any(|c| c.starts_with("vitrine_checkout_id=;")));
}

#[tokio::test]
async fn stable_locale_keeps_checkout_cookie() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/gb/products/test-product")
				.header(COOKIE, "vitrine_locale=en-GB; vitrine_checkout_id=321")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	let cookies = set_cookies(&response);
	assert!(cookies.iter().any(|c| c.starts_with("vitrine_locale=en-GB;")));
	assert!(!cookies
		.iter()
		.any(|c| c.starts_with("vitrine_checkout_id=")));
}

// ============================================================================
// Root-path redirects
// ============================================================================

#[tokio::test]
async fn root_redirects_canadian_visitors_via_geolocation() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/")
				.extension(EdgeGeo::from_country("CA"))
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
	assert_eq!(response.headers().get(LOCATION).unwrap(), "/ca");
	assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn root_redirects_by_cookie_over_fresh_detection() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/")
				.header(COOKIE, "vitrine_locale=en-GB")
				.extension(EdgeGeo::from_country("US"))
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
	assert_eq!(response.headers().get(LOCATION).unwrap(), "/gb");
}

#[tokio::test]
async fn root_does_not_redirect_default_locale_visitors() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/")
				.extension(EdgeGeo::from_country("US"))
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert!(response.headers().get(LOCATION).is_none());
	assert!(set_cookies(&response)
		.iter()
		.any(|c| c.starts_with("vitrine_locale=en-US;")));
}

#[tokio::test]
async fn prefixed_paths_never_redirect() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/gb/products/test-product")
				.extension(EdgeGeo::from_country("CA"))
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert!(response.headers().get(LOCATION).is_none());
	assert!(set_cookies(&response)
		.iter()
		.any(|c| c.starts_with("vitrine_locale=en-GB;")));
}

// ============================================================================
// Bypass
// ============================================================================

#[tokio::test]
async fn bot_requests_pass_through_untouched() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/")
				.header("user-agent", "Googlebot/2.1")
				.extension(EdgeGeo::from_country("CA"))
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert!(set_cookies(&response).is_empty());
	assert_eq!(body_string(response).await, "none");
}

#[tokio::test]
async fn prefetch_requests_pass_through_untouched() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/products/x")
				.header("x-prefetch", "1")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn options_requests_pass_through_untouched() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/")
				.method(Method::OPTIONS)
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert!(set_cookies(&response).is_empty());
}

// ============================================================================
// Detection precedence
// ============================================================================

#[tokio::test]
async fn geo_extension_wins_over_country_header() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/products/x")
				.header("x-edge-ip-country", "GB")
				.extension(EdgeGeo::from_country("CA"))
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert!(set_cookies(&response)
		.iter()
		.any(|c| c.starts_with("vitrine_locale=en-CA;")));
}

#[tokio::test]
async fn country_header_is_case_insensitive() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/products/x")
				.header("x-edge-ip-country", "ca")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert!(set_cookies(&response)
		.iter()
		.any(|c| c.starts_with("vitrine_locale=en-CA;")));
}

#[tokio::test]
async fn browser_language_used_without_country_signals() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/products/x")
				.header("accept-language", "en-GB,en;q=0.9")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert!(set_cookies(&response)
		.iter()
		.any(|c| c.starts_with("vitrine_locale=en-GB;")));
}

#[tokio::test]
async fn unsupported_browser_language_falls_back_to_default() {
	let response = test_app(LocaleConfig::default())
		.oneshot(
			Request::builder()
				.uri("/products/x")
				.header("accept-language", "fr-FR,fr;q=0.9")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert!(set_cookies(&response)
		.iter()
		.any(|c| c.starts_with("vitrine_locale=en-US;")));
}

// ============================================================================
// Custom configuration
// ============================================================================

#[tokio::test]
async fn custom_cookie_names_are_honoured() {
	let config = LocaleConfig::new()
		.with_locale_cookie_name("shop_locale")
		.with_checkout_cookie_name("shop_cart");

	let response = test_app(config)
		.oneshot(
			Request::builder()
				.uri("/gb/products/x")
				.header(COOKIE, "shop_locale=en-US; shop_cart=321")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	let cookies = set_cookies(&response);
	assert!(cookies.iter().any(|c| c.starts_with("shop_locale=en-GB;")));
	assert!(cookies.iter().any(|c| c.starts_with("shop_cart=;")));
}

#[tokio::test]
async fn custom_country_header_is_consulted() {
	let config = LocaleConfig::new().with_country_header("cf-ipcountry");

	let response = test_app(config)
		.oneshot(
			Request::builder()
				.uri("/")
				.header("cf-ipcountry", "GB")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
	assert_eq!(response.headers().get(LOCATION).unwrap(), "/gb");
}
