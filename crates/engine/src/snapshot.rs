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

//! The in-process mirror of the shared store's rate table, kept current by a
//! background sync job.

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwapOption;
use futures::StreamExt;
use oneframe_infrastructure::{RateStore, SyncSource};
use oneframe_model::Rate;

/// Delay between resubscribe attempts after a failed
/// [`SyncSource::subscribe_rates_updated`] call.
const RESUBSCRIBE_DELAY: Duration = Duration::from_secs(1);

/// Holds the current rate table, or `None` before the first successful sync.
///
/// The snapshot is replaced wholesale by a single atomic pointer swap — readers
/// of [`SnapshotCache::get_rates`] never block on, and never observe, a sync
/// in progress.
#[derive(Default)]
pub struct SnapshotCache {
    inner: ArcSwapOption<Vec<Rate>>,
}

impl SnapshotCache {
    /// Creates an empty cache (no successful sync yet).
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: ArcSwapOption::from(None),
        }
    }

    /// Returns the current snapshot, or `None` before the first sync.
    #[must_use]
    pub fn get_rates(&self) -> Option<Arc<Vec<Rate>>> {
        self.inner.load_full()
    }

    /// Atomically replaces the snapshot. Used only by the sync job.
    pub fn update_rates(&self, rates: Vec<Rate>) {
        self.inner.store(Some(Arc::new(rates)));
    }
}

/// Runs one initial sync immediately, then one sync per notification from the
/// store's subscription, for as long as the job runs. At most one sync runs
/// at a time — the trigger stream is consumed serially. A failed or
/// unparsable read from the store is logged and leaves the existing snapshot
/// untouched.
///
/// The subscription stream ends whenever its underlying connection drops.
/// Rather than exiting, this loop resubscribes and runs a catch-up sync,
/// so a transient connection blip delays syncing but never halts it.
pub async fn run_sync_job(cache: Arc<SnapshotCache>, store: Arc<dyn SyncSource>) {
    sync_once(&cache, store.as_ref()).await;
    loop {
        let mut trigger = match store.subscribe_rates_updated().await {
            Ok(trigger) => trigger,
            Err(e) => {
                tracing::warn!("Failed to subscribe to rate updates: {e}; retrying in {RESUBSCRIBE_DELAY:?}");
                tokio::time::sleep(RESUBSCRIBE_DELAY).await;
                continue;
            }
        };
        tracing::debug!("Subscribed to rate update notifications");

        while trigger.next().await.is_some() {
            sync_once(&cache, store.as_ref()).await;
        }

        tracing::warn!("Rate update subscription ended; resubscribing and running catch-up sync");
        sync_once(&cache, store.as_ref()).await;
    }
}

async fn sync_once(cache: &SnapshotCache, store: &dyn RateStore) {
    let started = Instant::now();
    match store.get_rates().await {
        Some(rates) => {
            let count = rates.len();
            cache.update_rates(rates);
            tracing::info!(count, elapsed = ?started.elapsed(), "Snapshot synced");
        }
        None => {
            tracing::warn!("Store read returned no rates; keeping existing snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::pin::Pin;

    use async_trait::async_trait;
    use futures::Stream;
    use oneframe_infrastructure::{NotificationSubscriber, StoreError};
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use tokio::sync::Mutex as AsyncMutex;
    use tokio_stream::wrappers::UnboundedReceiverStream;

    use super::*;

    /// A store whose subscription streams are handed out from a queue, so
    /// tests can make a given subscription end (simulating a dropped
    /// connection) and observe that the job resubscribes.
    struct StubStore {
        rates: std::sync::Mutex<Option<Vec<Rate>>>,
        subscriptions: AsyncMutex<Vec<tokio::sync::mpsc::UnboundedReceiver<()>>>,
    }

    #[async_trait]
    impl RateStore for StubStore {
        async fn get_rates(&self) -> Option<Vec<Rate>> {
            self.rates.lock().unwrap().clone()
        }
        async fn set_rates(&self, _rates: &[Rate]) -> Result<(), StoreError> {
            unimplemented!()
        }
        async fn publish_rates_updated(&self) -> Result<(), StoreError> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl NotificationSubscriber for StubStore {
        async fn subscribe_rates_updated(
            &self,
        ) -> Result<Pin<Box<dyn Stream<Item = ()> + Send>>, StoreError> {
            let rx = self
                .subscriptions
                .lock()
                .await
                .pop()
                .expect("test provisioned fewer subscriptions than were requested");
            Ok(Box::pin(UnboundedReceiverStream::new(rx)))
        }
    }

    fn sample_rate() -> Rate {
        use oneframe_model::Pair;
        let usd = "USD".parse().unwrap();
        let eur = "EUR".parse().unwrap();
        Rate::new(Pair::new(usd, eur), dec!(0.85), chrono::Utc::now())
    }

    #[rstest]
    fn test_empty_cache_returns_none() {
        let cache = SnapshotCache::new();
        assert!(cache.get_rates().is_none());
    }

    #[tokio::test]
    async fn test_initial_sync_populates_cache() {
        let (_tx, rx) = tokio::sync::mpsc::unbounded_channel::<()>();
        let store: Arc<dyn SyncSource> = Arc::new(StubStore {
            rates: std::sync::Mutex::new(Some(vec![sample_rate()])),
            subscriptions: AsyncMutex::new(vec![rx]),
        });
        let cache = Arc::new(SnapshotCache::new());

        let handle = tokio::spawn(run_sync_job(cache.clone(), store));
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        handle.abort();

        assert_eq!(cache.get_rates().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_none_read_keeps_existing_snapshot() {
        let store = StubStore {
            rates: std::sync::Mutex::new(None),
            subscriptions: AsyncMutex::new(vec![]),
        };
        let cache = Arc::new(SnapshotCache::new());
        cache.update_rates(vec![sample_rate()]);

        sync_once(&cache, &store).await;

        assert_eq!(cache.get_rates().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dropped_subscription_resubscribes_and_catches_up() {
        // The first subscription ends immediately (sender dropped); the
        // second stays open. The job must notice the first ending, run a
        // catch-up sync, and move on to the second subscription rather than
        // exiting.
        let (tx2, rx2) = tokio::sync::mpsc::unbounded_channel::<()>();
        let (tx1, rx1) = tokio::sync::mpsc::unbounded_channel::<()>();
        drop(tx1);

        let store: Arc<dyn SyncSource> = Arc::new(StubStore {
            rates: std::sync::Mutex::new(Some(vec![sample_rate()])),
            // Popped in LIFO order: rx1 first, then rx2.
            subscriptions: AsyncMutex::new(vec![rx2, rx1]),
        });
        let cache = Arc::new(SnapshotCache::new());

        let handle = tokio::spawn(run_sync_job(cache.clone(), store));
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        assert_eq!(cache.get_rates().unwrap().len(), 1);
        // The job is now parked reading from the second subscription; send
        // through it to confirm it resubscribed rather than exiting.
        tx2.send(()).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        handle.abort();

        assert_eq!(cache.get_rates().unwrap().len(), 1);
    }
}
