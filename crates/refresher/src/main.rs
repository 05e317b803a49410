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

mod config;

use clap::Parser;
use config::RefresherConfig;
use oneframe_engine::refresh;
use oneframe_infrastructure::RedisStore;
use oneframe_upstream::{UpstreamClient, UpstreamConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RefresherConfig::parse();

    let upstream = UpstreamClient::new(UpstreamConfig {
        base_url: config.one_frame_base_url.clone(),
        token: config.one_frame_token.clone(),
        timeout: config.one_frame_timeout(),
        max_retries: config.one_frame_max_retries,
    });

    let store = match RedisStore::connect(&config.valkey_uri).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Unexpected error: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };

    match refresh(&upstream, &store).await {
        Ok(count) => {
            tracing::info!(count, "Refresh cycle succeeded");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Refresh cycle failed: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}
