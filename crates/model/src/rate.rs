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

//! An immutable `Rate`: a pair, a decimal price, and the instant it was
//! observed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pair::Pair;

/// A single exchange rate observation.
///
/// Immutable by construction: updating a rate means producing a new
/// [`Rate`], never mutating one in place. Decimal semantics are used
/// throughout (never binary floating-point) so round-trip precision
/// through the store is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub pair: Pair,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Rate {
    #[must_use]
    pub fn new(pair: Pair, price: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self {
            pair,
            price,
            timestamp,
        }
    }

    /// Synthesizes the implicit identity rate for a same-currency pair:
    /// price `1.0` at the current instant.
    #[must_use]
    pub fn identity(pair: Pair) -> Self {
        Self {
            pair,
            price: Decimal::ONE,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::currency::Currency;

    #[rstest]
    fn test_identity_rate_has_price_one() {
        let usd = Currency::from_str("USD").unwrap();
        let rate = Rate::identity(Pair::new(usd, usd));
        assert_eq!(rate.price, Decimal::ONE);
    }

    #[rstest]
    fn test_serde_roundtrip_preserves_precision() {
        let usd = Currency::from_str("USD").unwrap();
        let eur = Currency::from_str("EUR").unwrap();
        let rate = Rate::new(
            Pair::new(usd, eur),
            dec!(0.123456789012345678),
            DateTime::parse_from_rfc3339("2026-02-10T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        );
        let json = serde_json::to_string(&rate).unwrap();
        let back: Rate = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price, rate.price);
        assert_eq!(back.timestamp, rate.timestamp);
    }
}
