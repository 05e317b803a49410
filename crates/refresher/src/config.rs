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

use std::time::Duration;

use clap::Parser;

/// Configuration for the one-shot Refresher role.
#[derive(Debug, Parser, Clone)]
#[clap(version, about, author)]
pub struct RefresherConfig {
    /// Shared-store connection URI. Maps to `valkey.uri`.
    #[arg(long, env = "VALKEY_URI", default_value = "redis://127.0.0.1:6379")]
    pub valkey_uri: String,
    /// Upstream base URL. Maps to `oneFrame.baseUrl`.
    #[arg(long, env = "ONE_FRAME_BASE_URL")]
    pub one_frame_base_url: String,
    /// Upstream auth token. Maps to `oneFrame.token`.
    #[arg(long, env = "ONE_FRAME_TOKEN")]
    pub one_frame_token: String,
    /// Upstream request timeout in milliseconds. Maps to `oneFrame.timeout`.
    #[arg(long, env = "ONE_FRAME_TIMEOUT_MS", default_value_t = 5_000)]
    pub one_frame_timeout_ms: u64,
    /// Additional retries on upstream failure. Maps to `oneFrame.maxRetries`.
    #[arg(long, env = "ONE_FRAME_MAX_RETRIES", default_value_t = 3)]
    pub one_frame_max_retries: u32,
}

impl RefresherConfig {
    #[must_use]
    pub fn one_frame_timeout(&self) -> Duration {
        Duration::from_millis(self.one_frame_timeout_ms)
    }
}
