//! Success envelopes: `{code, status, message, data}` for single payloads
//! and the same plus `meta` for paginated lists.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub code: u16,
    pub status: &'static str,
    pub message: String,
    pub data: T,
}

impl<T> Success<T> {
    pub fn new(code: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            code: code.as_u16(),
            status: "success",
            message: message.into(),
            data,
        }
    }
}

/// Pagination metadata; `total_pages = ceil(total_results / limit)`.
#[derive(Debug, Serialize)]
pub struct Meta {
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub total_results: u64,
}

impl Meta {
    #[must_use]
    pub fn new(page: u64, limit: u64, total_results: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total_results.div_ceil(limit)
        };
        Self {
            page,
            limit,
            total_pages,
            total_results,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub code: u16,
    pub status: &'static str,
    pub message: String,
    pub meta: Meta,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(code: StatusCode, message: impl Into<String>, meta: Meta, data: Vec<T>) -> Self {
        Self {
            code: code.as_u16(),
            status: "success",
            message: message.into(),
            meta,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Meta::new(1, 10, 0).total_pages, 0);
        assert_eq!(Meta::new(1, 10, 10).total_pages, 1);
        assert_eq!(Meta::new(1, 10, 11).total_pages, 2);
        assert_eq!(Meta::new(1, 3, 7).total_pages, 3);
    }

    #[test]
    fn zero_limit_does_not_divide() {
        assert_eq!(Meta::new(1, 0, 42).total_pages, 0);
    }
}
