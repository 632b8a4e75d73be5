//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{BookPayload, BookQuery},
    services::books::messages,
    AppState,
};

use super::{
    response::{ApiResponse, BookData, BookIdData, BookListData, MessageResponse},
    JsonBody, QueryParams,
};

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = super::response::BookIdResponse),
        (status = 400, description = "Missing name or readPage greater than pageCount", body = MessageResponse),
        (status = 500, description = "Book could not be stored", body = MessageResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(data): JsonBody<BookPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookIdData>>)> {
    let book_id = state.services.books.create(data).await?;

    let response = ApiResponse::success(BookIdData { book_id }).with_message(messages::CREATED);
    Ok((StatusCode::CREATED, Json(response)))
}

/// List books, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books as id, name and publisher", body = super::response::BookListResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    QueryParams(pairs): QueryParams<Vec<(String, String)>>,
) -> Json<ApiResponse<BookListData>> {
    let query = BookQuery::from_pairs(pairs);
    let books = state.services.books.list(&query).await;
    Json(ApiResponse::success(BookListData { books }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = super::response::BookResponse),
        (status = 404, description = "Book not found", body = MessageResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<ApiResponse<BookData>>> {
    let book = state.services.books.get_by_id(&book_id).await?;
    Ok(Json(ApiResponse::success(BookData { book })))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 400, description = "Missing name or readPage greater than pageCount", body = MessageResponse),
        (status = 404, description = "Book not found", body = MessageResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    JsonBody(data): JsonBody<BookPayload>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.update(&book_id, data).await?;
    Ok(Json(MessageResponse::success(messages::UPDATED)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = MessageResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(&book_id).await?;
    Ok(Json(MessageResponse::success(messages::DELETED)))
}
