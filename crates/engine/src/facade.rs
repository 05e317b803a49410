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

//! The thin contract the HTTP layer drives: a snapshot read plus a
//! derivation, with every failure mode collapsed into one lookup-failed
//! signal.

use std::sync::Arc;

use oneframe_model::{Pair, Rate};
use thiserror::Error;

use crate::derive::{get_rate, ServiceError};
use crate::snapshot::SnapshotCache;

#[derive(Debug, Error)]
pub enum FacadeError {
    #[error("lookup failed")]
    LookupFailed,
}

impl From<ServiceError> for FacadeError {
    fn from(_: ServiceError) -> Self {
        FacadeError::LookupFailed
    }
}

/// Connects the HTTP layer to the [`SnapshotCache`] and the derivation
/// engine, presenting a single error type regardless of whether the
/// snapshot is cold or the pair is simply undervivable.
pub struct RateServiceFacade {
    cache: Arc<SnapshotCache>,
}

impl RateServiceFacade {
    #[must_use]
    pub fn new(cache: Arc<SnapshotCache>) -> Self {
        Self { cache }
    }

    /// Resolves `pair` against the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::LookupFailed`] when the snapshot is cold or
    /// the pair cannot be derived; the client cannot distinguish the two.
    pub fn get_rate(&self, pair: Pair) -> Result<Rate, FacadeError> {
        let snapshot = self.cache.get_rates();
        let rate = get_rate(snapshot.as_deref().map(Vec::as_slice), pair)?;
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_cold_cache_is_lookup_failed() {
        let facade = RateServiceFacade::new(Arc::new(SnapshotCache::new()));
        let usd: oneframe_model::Currency = "USD".parse().unwrap();
        let eur: oneframe_model::Currency = "EUR".parse().unwrap();
        let err = facade.get_rate(Pair::new(usd, eur)).unwrap_err();
        assert!(matches!(err, FacadeError::LookupFailed));
    }

    #[rstest]
    fn test_identity_resolves_without_snapshot() {
        let facade = RateServiceFacade::new(Arc::new(SnapshotCache::new()));
        let usd: oneframe_model::Currency = "USD".parse().unwrap();
        let rate = facade.get_rate(Pair::new(usd, usd)).unwrap();
        assert_eq!(rate.price, rust_decimal::Decimal::ONE);
    }
}
