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

//! An ordered currency pair: `(from, to)`, directional by construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// An ordered pair of currencies: `(A, B) != (B, A)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub from: Currency,
    pub to: Currency,
}

impl Pair {
    #[must_use]
    pub fn new(from: Currency, to: Currency) -> Self {
        Self { from, to }
    }

    /// Returns whether this is a same-currency pair (`from == to`).
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_pair_is_directional() {
        let usd = Currency::from_str("USD").unwrap();
        let eur = Currency::from_str("EUR").unwrap();
        let a = Pair::new(usd, eur);
        let b = Pair::new(eur, usd);
        assert_ne!(a, b);
    }

    #[rstest]
    fn test_identity_pair() {
        let usd = Currency::from_str("USD").unwrap();
        assert!(Pair::new(usd, usd).is_identity());
    }

    #[rstest]
    fn test_display() {
        let usd = Currency::from_str("USD").unwrap();
        let eur = Currency::from_str("EUR").unwrap();
        assert_eq!(Pair::new(usd, eur).to_string(), "USD/EUR");
    }
}
