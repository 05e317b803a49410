// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! A validated ISO-4217 `Currency` code, plus the whitelist and tracked set.

use std::{collections::HashSet, fmt, str::FromStr, sync::LazyLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// The ISO-4217 alphabetic codes this proxy will accept at the boundary.
///
/// This whitelist is intentionally broad (the full ISO-4217 roster) so that
/// client-supplied currencies pass input validation even when they fall
/// outside [`TRACKED_CURRENCIES`]; an untracked-but-whitelisted code simply
/// resolves to [`crate::ServiceError::PairNotFound`] downstream.
pub const CURRENCY_WHITELIST: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD", "CAD",
    "CDF", "CHF", "CLP", "CNY", "COP", "CRC", "CUP", "CVE", "CZK", "DJF", "DKK", "DOP", "DZD",
    "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP", "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ",
    "GYD", "HKD", "HNL", "HRK", "HTG", "HUF", "IDR", "ILS", "INR", "IQD", "IRR", "ISK", "JMD",
    "JOD", "JPY", "KES", "KGS", "KHR", "KMF", "KPW", "KRW", "KWD", "KYD", "KZT", "LAK", "LBP",
    "LKR", "LRD", "LSL", "LYD", "MAD", "MDL", "MGA", "MKD", "MMK", "MNT", "MOP", "MRU", "MUR",
    "MVR", "MWK", "MXN", "MYR", "MZN", "NAD", "NGN", "NIO", "NOK", "NPR", "NZD", "OMR", "PAB",
    "PEN", "PGK", "PHP", "PKR", "PLN", "PYG", "QAR", "RON", "RSD", "RUB", "RWF", "SAR", "SBD",
    "SCR", "SDG", "SEK", "SGD", "SHP", "SLE", "SOS", "SRD", "SSP", "STN", "SYP", "SZL", "THB",
    "TJS", "TMT", "TND", "TOP", "TRY", "TTD", "TWD", "TZS", "UAH", "UGX", "USD", "UYU", "UZS",
    "VES", "VND", "VUV", "WST", "XAF", "XCD", "XOF", "XPF", "YER", "ZAR", "ZMW", "ZWL",
];

/// The currencies the upstream client actually requests rates for.
///
/// `9 * 8 = 72` ordered pairs; every code here must also appear in
/// [`CURRENCY_WHITELIST`] (checked by `test_tracked_subset_of_whitelist`).
pub const TRACKED_CURRENCIES: &[&str] = &[
    "USD", "EUR", "GBP", "JPY", "AUD", "CAD", "CHF", "NZD", "SGD",
];

/// The tracked currency used as the pivot for cross-rate composition.
pub const BASE_CURRENCY: &str = "USD";

static WHITELIST_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CURRENCY_WHITELIST.iter().copied().collect());

/// Error returned when a currency code fails validation.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CurrencyError {
    /// The code was not 3 ASCII alphabetic characters.
    #[error("invalid currency code '{0}': must be 3 ASCII letters")]
    MalformedCode(String),
    /// The code is not in the ISO-4217 whitelist.
    #[error("unknown currency code '{0}'")]
    NotWhitelisted(String),
}

/// A 3-character ISO-4217 alphabetic currency code, validated against
/// [`CURRENCY_WHITELIST`] at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency([u8; 3]);

impl Currency {
    /// Returns the currency as an upper-case string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Safety: constructed only from validated ASCII-uppercase input.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }

    /// Returns whether this currency is in the tracked subset.
    #[must_use]
    pub fn is_tracked(&self) -> bool {
        TRACKED_CURRENCIES.contains(&self.as_str())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        if upper.len() != 3 || !upper.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(CurrencyError::MalformedCode(s.to_string()));
        }
        if !WHITELIST_SET.contains(upper.as_str()) {
            return Err(CurrencyError::NotWhitelisted(upper));
        }
        let bytes = upper.as_bytes();
        Ok(Self([bytes[0], bytes[1], bytes[2]]))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Currency::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// Returns the tracked currency set as validated [`Currency`] values.
///
/// # Panics
///
/// Panics if [`TRACKED_CURRENCIES`] contains a code outside
/// [`CURRENCY_WHITELIST`] — a programming error, not a runtime condition.
#[must_use]
pub fn tracked_currencies() -> Vec<Currency> {
    TRACKED_CURRENCIES
        .iter()
        .map(|c| Currency::from_str(c).expect("tracked currency must be whitelisted"))
        .collect()
}
