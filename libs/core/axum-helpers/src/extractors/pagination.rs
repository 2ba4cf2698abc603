//! `?skip=&limit=` query parameters.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 1000;

/// Offset pagination for list endpoints. Defaults to `skip=0&limit=100`.
///
/// The extractor clamps `limit` to [`MAX_LIMIT`] and rejects a `skip` that
/// does not fit a SQL `BIGINT`, so both store backends see the same window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Number of records to skip
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of records to return
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// `OFFSET` bind value.
    pub fn offset(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// `LIMIT` bind value.
    pub fn limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }

    /// Apply this window to an already filtered and ordered sequence.
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(usize::try_from(self.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit).unwrap_or(usize::MAX))
            .collect()
    }

    fn checked(self) -> Result<Self, AppError> {
        if i64::try_from(self.skip).is_err() {
            return Err(AppError::BadRequest(format!(
                "skip must not exceed {}",
                i64::MAX
            )));
        }
        Ok(Self {
            skip: self.skip,
            limit: self.limit.min(MAX_LIMIT),
        })
    }
}

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(page) = Query::<Pagination>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        page.checked().map_err(IntoResponse::into_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    async fn extract(uri: &str) -> Result<Pagination, Response> {
        let (mut parts, _) = Request::get(uri).body(()).unwrap().into_parts();
        Pagination::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extract_defaults_and_overrides() {
        assert_eq!(extract("/scores").await.unwrap(), Pagination::default());
        assert_eq!(
            extract("/scores?skip=5&limit=20").await.unwrap(),
            Pagination::new(5, 20)
        );
    }

    #[tokio::test]
    async fn test_extract_clamps_huge_limit() {
        let page = extract("/scores?limit=18446744073709551615").await.unwrap();
        assert_eq!(page.limit, MAX_LIMIT);
        assert_eq!(page.limit(), 1000);
    }

    #[tokio::test]
    async fn test_extract_rejects_skip_beyond_bigint() {
        let response = extract("/scores?skip=18446744073709551615").await.unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let page = extract("/scores?skip=9223372036854775807").await.unwrap();
        assert_eq!(page.offset(), i64::MAX);
    }

    #[tokio::test]
    async fn test_extract_rejects_negative_limit() {
        let response = extract("/scores?limit=-1").await.unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_defaults() {
        let page: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(page, Pagination::default());
        assert_eq!(page.limit, 100);
    }

    #[test]
    fn test_apply_window() {
        let page = Pagination::new(2, 3);
        assert_eq!(page.apply(0..10), vec![2, 3, 4]);
        assert!(Pagination::new(20, 5).apply(0..10).is_empty());
    }
}
