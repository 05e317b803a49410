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

use clap::Parser;

/// Configuration for the long-running HTTP API role.
#[derive(Debug, Parser, Clone)]
#[clap(version, about, author)]
pub struct ApiConfig {
    /// Address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: String,
    /// Server-wide request timeout in milliseconds. Maps to `http.timeout`.
    #[arg(long, env = "HTTP_TIMEOUT_MS", default_value_t = 5_000)]
    pub http_timeout_ms: u64,
    /// Shared-store connection URI. Maps to `valkey.uri`.
    #[arg(long, env = "VALKEY_URI", default_value = "redis://127.0.0.1:6379")]
    pub valkey_uri: String,
}
