//! Response envelope shared by every endpoint

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::book::{Book, BookShort};

/// Outcome reported in the `status` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// 2xx
    Success,
    /// 4xx, caused by the client
    Fail,
    /// 5xx, caused by the server
    Error,
}

/// `{status, message?, data}` wrapper for successful responses carrying data
#[derive(Debug, Serialize, ToSchema)]
#[aliases(
    BookIdResponse = ApiResponse<BookIdData>,
    BookListResponse = ApiResponse<BookListData>,
    BookResponse = ApiResponse<BookData>
)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data,
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }
}

/// `{status, message}` body, used for data-less successes and for failures
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// `success`, `fail` (client error) or `error` (server error)
    pub status: ResponseStatus,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: &str) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.to_string(),
        }
    }
}

/// Data returned after creating a book
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookIdData {
    pub book_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookListData {
    pub books: Vec<BookShort>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookData {
    pub book: Book,
}
