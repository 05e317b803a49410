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

//! Orchestrates one fetch→store→publish cycle. Stateless between
//! invocations; idempotent and re-entrant.

use oneframe_infrastructure::RateStore;
use oneframe_upstream::UpstreamClient;

/// Runs a single refresh cycle.
///
/// On upstream failure the store is left untouched — staleness is preferred
/// over emptiness. On success the store is set, then (only after the set
/// returns) the update notification is published. Any unexpected error
/// during that second step is caught and reported; the store may be
/// half-updated, which is acceptable since readers eventually poll or
/// reconnect-subscribe.
pub async fn refresh(upstream: &UpstreamClient, store: &dyn RateStore) -> Result<usize, String> {
    let rates = upstream
        .fetch_all()
        .await
        .map_err(|e| e.to_string())?;

    let count = rates.len();
    store
        .set_rates(&rates)
        .await
        .map_err(|e| format!("Unexpected error: {e}"))?;
    store
        .publish_rates_updated()
        .await
        .map_err(|e| format!("Unexpected error: {e}"))?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use oneframe_infrastructure::StoreError;
    use oneframe_model::Rate;
    use oneframe_upstream::UpstreamConfig;
    use rstest::rstest;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Default)]
    struct RecordingStore {
        set_calls: Mutex<Vec<Vec<Rate>>>,
        publish_calls: Mutex<u32>,
    }

    #[async_trait]
    impl RateStore for RecordingStore {
        async fn get_rates(&self) -> Option<Vec<Rate>> {
            None
        }
        async fn set_rates(&self, rates: &[Rate]) -> Result<(), StoreError> {
            self.set_calls.lock().unwrap().push(rates.to_vec());
            Ok(())
        }
        async fn publish_rates_updated(&self) -> Result<(), StoreError> {
            *self.publish_calls.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_successful_refresh_sets_then_publishes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"from":"USD","to":"EUR","bid":0.84,"ask":0.86,"price":0.85,"time_stamp":"2026-02-10T00:00:00Z"},
            ])))
            .mount(&server)
            .await;

        let upstream = UpstreamClient::new(UpstreamConfig {
            base_url: server.uri(),
            token: "secret".to_string(),
            timeout: std::time::Duration::from_secs(5),
            max_retries: 0,
        });
        let store = RecordingStore::default();

        let count = refresh(&upstream, &store).await.unwrap();

        assert_eq!(count, 1);
        assert_eq!(store.set_calls.lock().unwrap().len(), 1);
        assert_eq!(*store.publish_calls.lock().unwrap(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_upstream_failure_leaves_store_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let upstream = UpstreamClient::new(UpstreamConfig {
            base_url: server.uri(),
            token: "secret".to_string(),
            timeout: std::time::Duration::from_secs(5),
            max_retries: 0,
        });
        let store = RecordingStore::default();

        let result = refresh(&upstream, &store).await;

        assert!(result.is_err());
        assert!(store.set_calls.lock().unwrap().is_empty());
        assert_eq!(*store.publish_calls.lock().unwrap(), 0);
    }
}
