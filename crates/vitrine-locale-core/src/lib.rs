// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale resolution core for the Vitrine storefront.
//!
//! This crate decides, per incoming request, which regional locale the
//! storefront should serve and whether the visitor should be redirected to a
//! locale-prefixed path. It is deliberately pure - no I/O, no logging, no
//! async - so the decision logic can be tested exhaustively; the HTTP
//! adapter lives in `vitrine-server-locale`.
//!
//! # Example
//!
//! ```
//! use vitrine_locale_core::{resolve, Decision, Locale, RequestSignals};
//!
//! let signals = RequestSignals::new("/").with_geo_country("CA");
//!
//! match resolve(&signals) {
//!     Decision::Redirect { location, .. } => assert_eq!(location, "/ca"),
//!     decision => panic!("expected redirect, got {decision:?}"),
//! }
//! ```

mod locale;
mod market;
mod negotiate;
mod resolve;

pub use locale::{Locale, ParseLocaleError, DEFAULT_LOCALE, SUPPORTED_LOCALES};
pub use market::{Market, MARKETS};
pub use negotiate::negotiate;
pub use resolve::{resolve, Decision, LocaleSource, RequestSignals};
