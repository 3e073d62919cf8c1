// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Static market configuration for each storefront region.
//!
//! A market ties a locale to its commerce backend channel and currency. Carts
//! are market-scoped, which is why a locale change invalidates the checkout
//! cookie.

use serde::Serialize;

use crate::locale::Locale;

/// A storefront market: one sales region with its channel and currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Market {
	/// Short market identifier, also used as the URL prefix segment.
	pub id: &'static str,
	/// Human-readable market name.
	pub name: &'static str,
	/// Commerce backend sales channel slug.
	pub channel: &'static str,
	/// ISO 4217 currency code.
	pub currency: &'static str,
	pub continent: &'static str,
	/// ISO 3166-1 country code.
	pub country_code: &'static str,
}

const MARKET_US: Market = Market {
	id: "us",
	name: "United States of America",
	channel: "us",
	currency: "USD",
	continent: "North America",
	country_code: "US",
};

const MARKET_GB: Market = Market {
	id: "gb",
	name: "United Kingdom",
	channel: "uk",
	currency: "GBP",
	continent: "Europe",
	country_code: "GB",
};

const MARKET_CA: Market = Market {
	id: "ca",
	name: "Canada",
	channel: "ca",
	currency: "CAD",
	continent: "North America",
	country_code: "CA",
};

/// All configured markets, in the same order as the supported locales.
pub static MARKETS: [Market; 3] = [MARKET_US, MARKET_GB, MARKET_CA];

impl Locale {
	/// The market this locale sells into.
	pub const fn market(self) -> &'static Market {
		match self {
			Locale::EnUs => &MARKET_US,
			Locale::EnGb => &MARKET_GB,
			Locale::EnCa => &MARKET_CA,
		}
	}
}

impl Market {
	/// Look up a market by its commerce channel slug.
	pub fn for_channel(channel: &str) -> Option<&'static Market> {
		MARKETS.iter().find(|market| market.channel == channel)
	}

	/// The locale serving this market.
	pub fn locale(&self) -> Locale {
		match self.id {
			"gb" => Locale::EnGb,
			"ca" => Locale::EnCa,
			_ => Locale::EnUs,
		}
	}
}
