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

//! The HTTP surface: one route, backed entirely by the in-process snapshot.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use oneframe_engine::{FacadeError, RateServiceFacade};
use oneframe_model::Pair;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct AppState {
    pub facade: Arc<RateServiceFacade>,
}

#[derive(Debug, Deserialize)]
pub struct RatesQuery {
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug, Serialize)]
struct RateResponse {
    from: String,
    to: String,
    price: rust_decimal::Decimal,
    timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Builds the router: `GET /rates?from=&to=` resolved against `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/rates", get(get_rates))
        .with_state(state)
}

async fn get_rates(
    State(state): State<AppState>,
    Query(query): Query<RatesQuery>,
) -> impl IntoResponse {
    let Some((from, to)) = query.from.zip(query.to) else {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    };
    let (Ok(from), Ok(to)) = (from.parse(), to.parse()) else {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    };

    match state.facade.get_rate(Pair::new(from, to)) {
        Ok(rate) => Json(RateResponse {
            from: rate.pair.from.to_string(),
            to: rate.pair.to.to_string(),
            price: rate.price,
            timestamp: rate.timestamp,
        })
        .into_response(),
        Err(FacadeError::LookupFailed) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "lookup failed".to_string(),
            }),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use oneframe_engine::SnapshotCache;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    use super::*;

    fn state_with(rates: Option<Vec<oneframe_model::Rate>>) -> AppState {
        let cache = Arc::new(SnapshotCache::new());
        if let Some(rates) = rates {
            cache.update_rates(rates);
        }
        AppState {
            facade: Arc::new(RateServiceFacade::new(cache)),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_happy_path_direct_lookup() {
        let usd: oneframe_model::Currency = "USD".parse().unwrap();
        let eur: oneframe_model::Currency = "EUR".parse().unwrap();
        let rate = oneframe_model::Rate::new(Pair::new(usd, eur), dec!(0.85), chrono::Utc::now());
        let app = build_router(state_with(Some(vec![rate])));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/rates?from=USD&to=EUR")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[tokio::test]
    async fn test_invalid_currency_is_404() {
        let app = build_router(state_with(None));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/rates?from=XYZ&to=EUR")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn test_missing_query_param_is_404() {
        let app = build_router(state_with(None));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/rates?from=USD")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn test_cold_cache_is_500() {
        let app = build_router(state_with(None));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/rates?from=USD&to=EUR")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[rstest]
    #[tokio::test]
    async fn test_same_currency_is_200_even_cold() {
        let app = build_router(state_with(None));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/rates?from=USD&to=USD")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
