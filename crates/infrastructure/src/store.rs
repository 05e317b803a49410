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

//! Redis-backed shared store: a canonical rate blob under a fixed key, and
//! fire-and-forget notifications on a fixed channel.

use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use oneframe_model::Rate;
use redis::AsyncCommands;
use thiserror::Error;
use tokio_stream::wrappers::UnboundedReceiverStream;

const RATES_KEY: &str = "rates";
const RATES_UPDATED_CHANNEL: &str = "rates_updated";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis connection error: {0}")]
    Connection(#[from] redis::RedisError),
}

/// Read/write access to the canonical rate blob plus publish of update
/// notifications. Backed by a [`redis::aio::ConnectionManager`] shared by
/// `GET` and `SET`; publishing uses a second, dedicated connection so that
/// command traffic never contends with the one used for subscriptions.
#[async_trait]
pub trait RateStore: Send + Sync {
    /// Reads the rate table at the fixed key. Returns `None` if the key is
    /// absent, or if the stored value fails to parse — a parse failure is
    /// cold state to the caller, never an error.
    async fn get_rates(&self) -> Option<Vec<Rate>>;

    /// Serializes `rates` as a single JSON array and overwrites the fixed
    /// key. No TTL.
    async fn set_rates(&self, rates: &[Rate]) -> Result<(), StoreError>;

    /// Publishes one opaque notification to the fixed channel. Does not
    /// wait for, or require, a live subscriber.
    async fn publish_rates_updated(&self) -> Result<(), StoreError>;
}

/// Yields notifications from a dedicated subscriber connection.
#[async_trait]
pub trait NotificationSubscriber: Send + Sync {
    /// Opens a fresh subscription to the fixed channel on its own
    /// connection, distinct from the `GET`/`SET` connection, and returns an
    /// indefinite, single-use stream of unit notifications. The stream ends
    /// whenever the underlying connection drops; callers that need durable
    /// notification over the store's lifetime must call this again to
    /// resubscribe.
    async fn subscribe_rates_updated(
        &self,
    ) -> Result<Pin<Box<dyn Stream<Item = ()> + Send>>, StoreError>;
}

/// A store that can both be synced from and resubscribed to. Implemented for
/// anything that is both a [`RateStore`] and a [`NotificationSubscriber`],
/// which is what the long-running sync job needs to recover from a dropped
/// subscription without a second handle to the store.
pub trait SyncSource: RateStore + NotificationSubscriber {}

impl<T: RateStore + NotificationSubscriber> SyncSource for T {}

/// The Redis-backed implementation of [`RateStore`] and
/// [`NotificationSubscriber`].
pub struct RedisStore {
    client: redis::Client,
    command_conn: redis::aio::ConnectionManager,
    publish_conn: redis::aio::ConnectionManager,
}

impl RedisStore {
    /// Connects two independent `ConnectionManager`s against `uri`: one for
    /// `GET`/`SET` command traffic, one for `PUBLISH`. A `SUBSCRIBE`
    /// connection is opened fresh per call to
    /// [`subscribe_rates_updated`](NotificationSubscriber::subscribe_rates_updated),
    /// since the subscription is restartable but the stream is single-use.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be constructed or either
    /// connection manager fails to connect.
    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(uri)?;
        let command_conn = client.get_connection_manager().await?;
        let publish_conn = client.get_connection_manager().await?;
        tracing::info!("Connected shared store (command + publish connections)");
        Ok(Self {
            client,
            command_conn,
            publish_conn,
        })
    }
}

#[async_trait]
impl RateStore for RedisStore {
    async fn get_rates(&self) -> Option<Vec<Rate>> {
        let mut conn = self.command_conn.clone();
        let raw: Option<String> = match conn.get(RATES_KEY).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed reading '{RATES_KEY}': {e}");
                return None;
            }
        };
        let raw = raw?;
        match serde_json::from_str::<Vec<Rate>>(&raw) {
            Ok(rates) => Some(rates),
            Err(e) => {
                tracing::warn!("Failed parsing '{RATES_KEY}' value: {e}");
                None
            }
        }
    }

    async fn set_rates(&self, rates: &[Rate]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(rates)
            .expect("Rate serialization is infallible for well-formed values");
        let mut conn = self.command_conn.clone();
        conn.set::<_, _, ()>(RATES_KEY, raw).await?;
        Ok(())
    }

    async fn publish_rates_updated(&self) -> Result<(), StoreError> {
        let mut conn = self.publish_conn.clone();
        conn.publish::<_, _, ()>(RATES_UPDATED_CHANNEL, 1).await?;
        Ok(())
    }
}

#[async_trait]
impl NotificationSubscriber for RedisStore {
    async fn subscribe_rates_updated(
        &self,
    ) -> Result<Pin<Box<dyn Stream<Item = ()> + Send>>, StoreError> {
        let mut pubsub = self.client.get_async_pubsub().await?;
        pubsub.subscribe(RATES_UPDATED_CHANNEL).await?;
        tracing::debug!("Subscribed to '{RATES_UPDATED_CHANNEL}' on a dedicated connection");

        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut messages = pubsub.into_on_message();
            while messages.next().await.is_some() {
                if tx.send(()).is_err() {
                    break;
                }
            }
        });

        Ok(Box::pin(UnboundedReceiverStream::new(rx)))
    }
}
