// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tower middleware applying locale resolution to live requests.
//!
//! The service extracts [`RequestSignals`] from the request, asks the pure
//! resolver for a [`Decision`], and applies it:
//!
//! - `Skip` - the inner service is called with the request untouched.
//! - `Redirect` - a 307 response is returned; the inner service never runs.
//! - `Continue` - the resolved locale is inserted as a request extension,
//!   the inner service (the path-routing step) runs exactly once, and the
//!   locale cookie (plus a conditional checkout cookie deletion) is appended
//!   to its response.
//!
//! All diagnostics are emitted here; the resolver stays silent.
//!
//! # Example
//!
//! ```ignore
//! use vitrine_server_locale::{LocaleConfig, LocaleLayer};
//!
//! let app = Router::new()
//!     .route("/", get(storefront))
//!     .layer(LocaleLayer::new(LocaleConfig::from_env()));
//! ```

use axum::{
	body::Body,
	http::{header::{LOCATION, SET_COOKIE}, HeaderValue, Request, StatusCode},
	response::Response,
};
use pin_project_lite::pin_project;
use std::{
	future::Future,
	pin::Pin,
	task::{Context, Poll},
};
use tower::{Layer, Service};
use vitrine_locale_core::{resolve, Decision, Locale, LocaleSource};

use crate::config::LocaleConfig;
use crate::extract::extract_signals;

/// The locale serving the current request, inserted as a request extension
/// for downstream handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLocale(pub Locale);

/// Layer applying locale resolution to every request.
#[derive(Debug, Clone, Default)]
pub struct LocaleLayer {
	config: LocaleConfig,
}

impl LocaleLayer {
	pub fn new(config: LocaleConfig) -> Self {
		Self { config }
	}
}

impl<S> Layer<S> for LocaleLayer {
	type Service = LocaleService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		LocaleService {
			inner,
			config: self.config.clone(),
		}
	}
}

/// Service wrapper for [`LocaleLayer`].
#[derive(Debug, Clone)]
pub struct LocaleService<S> {
	inner: S,
	config: LocaleConfig,
}

impl<S> Service<Request<Body>> for LocaleService<S>
where
	S: Service<Request<Body>, Response = Response>,
{
	type Response = Response;
	type Error = S::Error;
	type Future = LocaleFuture<S::Future>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, mut req: Request<Body>) -> Self::Future {
		let signals = extract_signals(&req, &self.config);

		match resolve(&signals) {
			Decision::Skip => {
				tracing::debug!(
					method = %signals.method,
					path = %signals.pathname,
					is_prefetch = signals.is_prefetch,
					is_bot = signals.is_bot,
					is_options_preflight = signals.is_options_preflight,
					"skipping locale handling"
				);

				LocaleFuture::Passthrough {
					fut: self.inner.call(req),
				}
			}
			Decision::Redirect { location, locale } => {
				tracing::debug!(
					%location,
					locale = %locale,
					"redirecting root path to locale prefix"
				);

				LocaleFuture::Redirect {
					resp: Some(redirect_response(locale)),
				}
			}
			Decision::Continue {
				locale,
				source,
				clear_checkout,
			} => {
				if source == LocaleSource::NegotiationFallback {
					tracing::warn!(
						locale = %locale,
						accept_language = signals.accept_language.as_deref().unwrap_or(""),
						"negotiated language is not supported, falling back to default locale"
					);
				} else {
					tracing::debug!(locale = %locale, source = ?source, "resolved request locale");
				}

				if clear_checkout {
					tracing::debug!(
						locale = %locale,
						"locale changed since last request, clearing checkout cookie"
					);
				}

				req.extensions_mut().insert(ResolvedLocale(locale));

				LocaleFuture::Continue {
					fut: self.inner.call(req),
					writes: Some(CookieWrites::new(&self.config, locale, clear_checkout)),
				}
			}
		}
	}
}

fn redirect_response(locale: Locale) -> Response {
	let location = locale.prefix().unwrap_or("/");

	let mut resp = Response::new(Body::empty());
	*resp.status_mut() = StatusCode::TEMPORARY_REDIRECT;
	resp.headers_mut()
		.insert(LOCATION, HeaderValue::from_static(location));
	resp
}

/// Pending Set-Cookie mutations for a continue decision.
pub struct CookieWrites {
	set_locale: String,
	clear_checkout: Option<String>,
}

impl CookieWrites {
	fn new(config: &LocaleConfig, locale: Locale, clear_checkout: bool) -> Self {
		Self {
			set_locale: format!(
				"{}={}; Max-Age={}; Path=/; SameSite=Lax",
				config.locale_cookie_name,
				locale.as_str(),
				config.cookie_max_age.as_secs()
			),
			clear_checkout: clear_checkout.then(|| {
				format!("{}=; Max-Age=0; Path=/", config.checkout_cookie_name)
			}),
		}
	}

	fn apply(self, response: &mut Response) {
		append_set_cookie(response, &self.set_locale);
		if let Some(deletion) = self.clear_checkout {
			append_set_cookie(response, &deletion);
		}
	}
}

fn append_set_cookie(response: &mut Response, cookie: &str) {
	match HeaderValue::from_str(cookie) {
		Ok(value) => {
			response.headers_mut().append(SET_COOKIE, value);
		}
		Err(_) => tracing::warn!(%cookie, "dropping unencodable Set-Cookie header"),
	}
}

pin_project! {
	/// Future for [`LocaleService`].
	#[project = LocaleFutureProj]
	pub enum LocaleFuture<F> {
		Passthrough { #[pin] fut: F },
		Redirect { resp: Option<Response> },
		Continue { #[pin] fut: F, writes: Option<CookieWrites> },
	}
}

impl<F, E> Future for LocaleFuture<F>
where
	F: Future<Output = Result<Response, E>>,
{
	type Output = Result<Response, E>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		match self.project() {
			LocaleFutureProj::Passthrough { fut } => fut.poll(cx),
			LocaleFutureProj::Redirect { resp } => {
				Poll::Ready(Ok(resp.take().expect("polled after completion")))
			}
			LocaleFutureProj::Continue { fut, writes } => match fut.poll(cx) {
				Poll::Ready(Ok(mut response)) => {
					writes
						.take()
						.expect("polled after completion")
						.apply(&mut response);
					Poll::Ready(Ok(response))
				}
				other => other,
			},
		}
	}
}
