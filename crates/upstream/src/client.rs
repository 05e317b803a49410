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

//! Batch upstream fetch of the tracked rate table, with retry backoff.

use std::time::Duration;

use oneframe_core::time::parse_timestamp_or_now;
use oneframe_model::{tracked_currencies, Pair, Rate, TRACKED_CURRENCIES};
use oneframe_network::{ExponentialBackoff, HttpClient};
use serde::Deserialize;
use thiserror::Error;

const TOKEN_HEADER: &str = "token";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("lookup failed: {0}")]
    LookupFailed(String),
}

/// Connection details for the upstream quote service.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

#[derive(Debug, Deserialize)]
struct UpstreamRecord {
    from: String,
    to: String,
    #[allow(dead_code)]
    bid: rust_decimal::Decimal,
    #[allow(dead_code)]
    ask: rust_decimal::Decimal,
    price: rust_decimal::Decimal,
    time_stamp: String,
}

/// Fetches the full tracked rate table from the upstream quote service.
pub struct UpstreamClient {
    http: HttpClient,
    config: UpstreamConfig,
}

impl UpstreamClient {
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        let http = HttpClient::new(config.timeout);
        Self { http, config }
    }

    /// Fetches one record per tracked ordered pair (9×8 = 72), validates and
    /// filters the response, and maps surviving records to [`Rate`]s.
    ///
    /// Any transport error, non-2xx status, or decode failure is retried up
    /// to `config.max_retries` additional times with doubling backoff
    /// starting at 100ms. After exhaustion returns
    /// [`UpstreamError::LookupFailed`].
    pub async fn fetch_all(&self) -> Result<Vec<Rate>, UpstreamError> {
        let pairs = tracked_pair_query();
        let query: Vec<(&str, &str)> = pairs.iter().map(|p| ("pair", p.as_str())).collect();
        let headers = [(TOKEN_HEADER, self.config.token.as_str())];

        let mut backoff = ExponentialBackoff::new(
            Duration::from_millis(100),
            Duration::from_secs(60),
            2.0,
            0,
            false,
        )
        .expect("static backoff parameters are always valid");

        let mut last_error = String::new();
        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = backoff.current_delay();
                tracing::warn!(attempt, "Retrying upstream fetch after {delay:?}");
                tokio::time::sleep(backoff.next_duration()).await;
            }

            match self.try_fetch_all(&query, &headers).await {
                Ok(rates) => return Ok(rates),
                Err(e) => {
                    tracing::warn!("Upstream fetch attempt {attempt} failed: {e}");
                    last_error = e;
                }
            }
        }

        Err(UpstreamError::LookupFailed(last_error))
    }

    async fn try_fetch_all(
        &self,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Vec<Rate>, String> {
        let body = self
            .http
            .get(&self.config.base_url, query, headers)
            .await
            .map_err(|e| e.to_string())?;

        let records: Vec<UpstreamRecord> =
            serde_json::from_str(&body).map_err(|e| format!("decode failure: {e}"))?;

        Ok(records
            .into_iter()
            .filter_map(|record| {
                let from = record.from.parse().ok()?;
                let to = record.to.parse().ok()?;
                let timestamp = parse_timestamp_or_now(&record.time_stamp);
                Some(Rate::new(Pair::new(from, to), record.price, timestamp))
            })
            .collect())
    }
}

/// Builds the `pair=<FromTo>` query parameters for the 72 tracked ordered
/// pairs, excluding same-currency pairs.
fn tracked_pair_query() -> Vec<String> {
    let currencies = tracked_currencies();
    let mut values =
        Vec::with_capacity(TRACKED_CURRENCIES.len() * (TRACKED_CURRENCIES.len() - 1));
    for from in &currencies {
        for to in &currencies {
            if from == to {
                continue;
            }
            values.push(format!("{from}{to}"));
        }
    }
    values
}
