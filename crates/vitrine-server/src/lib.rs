// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP server for the Vitrine storefront.
//!
//! Wires the locale middleware from `vitrine-server-locale` into an axum
//! router and exposes the storefront's locale/market context. Rendering,
//! commerce data, and translation catalogs live elsewhere.

pub mod config;
pub mod routes;

pub use config::{ConfigError, HttpConfig, ServerConfig};
pub use routes::create_router;
