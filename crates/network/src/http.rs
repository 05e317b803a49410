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

//! Minimal `reqwest`-based HTTP client wrapper: default headers and a
//! request timeout, shared by adapter-specific clients.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced from the underlying transport.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("non-2xx status {status}: {body}")]
    Status { status: u16, body: String },
}

/// A thin wrapper over [`reqwest::Client`] that fixes a base URL, default
/// headers, and a per-request timeout.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Builds a new client with the given request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest` client cannot be constructed,
    /// which only happens for a malformed TLS configuration.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build reqwest client");
        Self { client }
    }

    /// Performs a GET request against `url` with the given query pairs and
    /// headers, returning the raw response body on a 2xx status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on a transport failure or a non-2xx response.
    pub async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<String, HttpError> {
        let mut builder = self.client.get(url).query(query);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_client_construction_does_not_panic() {
        let _client = HttpClient::new(Duration::from_secs(5));
    }
}
