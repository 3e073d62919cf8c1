// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Browser language negotiation over the `Accept-Language` header.
//!
//! Matching is two-phase over the quality-ranked tag list: exact tag match
//! first, then primary-language match. `Accept-Language: en-GB,en;q=0.9`
//! negotiates to `en-GB`; a bare `en` negotiates to the default locale
//! because the supported set is ordered default-first.

use crate::locale::{Locale, SUPPORTED_LOCALES};

/// Parse an `Accept-Language` header into language tags ranked by quality.
///
/// Malformed quality values are treated as `q=1.0`. Empty tags and the `*`
/// wildcard are dropped: a wildcard carries no preference we can act on.
fn ranked_languages(header: &str) -> Vec<String> {
	let mut tags: Vec<(String, f32)> = Vec::new();

	for part in header.split(',') {
		let part = part.trim();
		let (tag, q) = match part.split_once(';') {
			Some((tag, params)) => {
				let q = params
					.trim()
					.strip_prefix("q=")
					.and_then(|v| v.parse::<f32>().ok())
					.unwrap_or(1.0);
				(tag.trim(), q)
			}
			None => (part, 1.0),
		};

		if tag.is_empty() || tag == "*" {
			continue;
		}

		tags.push((tag.to_string(), q));
	}

	// Stable sort keeps header order for equal quality values.
	tags.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

	tags.into_iter().map(|(tag, _)| tag).collect()
}

/// Negotiate the best supported locale for an `Accept-Language` header.
///
/// Returns `None` when no ranked language matches the supported set, in
/// which case the caller falls back to the default locale.
pub fn negotiate(header: &str) -> Option<Locale> {
	let ranked = ranked_languages(header);

	for tag in &ranked {
		if let Some(locale) = SUPPORTED_LOCALES
			.iter()
			.copied()
			.find(|locale| locale.as_str().eq_ignore_ascii_case(tag))
		{
			return Some(locale);
		}
	}

	for tag in &ranked {
		let primary = tag.split('-').next().unwrap_or(tag);
		if let Some(locale) = SUPPORTED_LOCALES
			.iter()
			.copied()
			.find(|locale| locale.language().eq_ignore_ascii_case(primary))
		{
			return Some(locale);
		}
	}

	None
}
