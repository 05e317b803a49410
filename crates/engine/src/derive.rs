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

//! Computes a [`Rate`] for any ordered [`Pair`] from a snapshot, composing
//! through the USD pivot when no direct row exists.

use oneframe_model::{Pair, Rate, BASE_CURRENCY};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("snapshot not yet initialized")]
    ServiceUnavailable,
    #[error("pair not derivable from the current snapshot")]
    PairNotFound,
}

/// Resolves `pair` against `snapshot`.
///
/// Same-currency pairs always resolve to the identity rate, even with no
/// snapshot at all. Otherwise a direct row is preferred; failing that, the
/// pair is composed as `price(USD, to) / price(USD, from)` using the two
/// USD-pivot rows, when both are present.
pub fn get_rate(snapshot: Option<&[Rate]>, pair: Pair) -> Result<Rate, ServiceError> {
    if pair.is_identity() {
        return Ok(Rate::identity(pair));
    }

    let rates = snapshot.ok_or(ServiceError::ServiceUnavailable)?;

    if let Some(direct) = rates.iter().find(|r| r.pair == pair) {
        return Ok(*direct);
    }

    let base: oneframe_model::Currency = BASE_CURRENCY
        .parse()
        .expect("BASE_CURRENCY is a valid whitelisted code");
    let usd_to_from = rates.iter().find(|r| r.pair == Pair::new(base, pair.from));
    let usd_to_to = rates.iter().find(|r| r.pair == Pair::new(base, pair.to));

    match (usd_to_from, usd_to_to) {
        (Some(from_rate), Some(to_rate)) if !from_rate.price.is_zero() => {
            let price = to_rate.price / from_rate.price;
            let timestamp = from_rate.timestamp.max(to_rate.timestamp);
            Ok(Rate::new(pair, price, timestamp))
        }
        _ => Err(ServiceError::PairNotFound),
    }
}
