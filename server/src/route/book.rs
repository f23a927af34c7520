use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    BookTransformer, CreateBookRequest, DeleteBookRequest, FindBookByNameRequest,
    FindBooksByNamesRequest, GetBookRequest, SearchBookRequest, UpdateBookRequest,
};
use crate::response::{BookPresenter, BookResponse, ErrorResponse};
use application::service::{
    CreateBookService, DeleteBookService, GetBookService, SearchBookService, UpdateBookService,
};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

pub trait BookRouter {
    fn route_book(self) -> Self;
}

fn found_or_else(res: Option<BookResponse>, id: i64) -> Response {
    res.map(BookResponse::into_response)
        .unwrap_or_else(|| ErrorResponse::not_found(format!("book {id} not found")).into_response())
}

fn any_or_else(Json(books): Json<Vec<BookResponse>>) -> Response {
    if books.is_empty() {
        ErrorResponse::not_found("No matching books found").into_response()
    } else {
        Json(books).into_response()
    }
}

impl BookRouter for Router<AppModule> {
    fn route_book(self) -> Self {
        self.route(
            "/books",
            post(
                |State(module): State<AppModule>, Json(req): Json<CreateBookRequest>| async move {
                    match Controller::new(BookTransformer, BookPresenter).try_intake(req) {
                        Ok(transformed) => transformed
                            .handle(|dto| async move { module.database().create_book(dto).await })
                            .await
                            .map_err(ErrorStatus::from),
                        Err(report) => Err(ErrorStatus::from(report)),
                    }
                },
            ),
        )
        .route(
            "/books/filter",
            get(
                |State(module): State<AppModule>, Query(req): Query<SearchBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().search_by_filter(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/names",
            get(
                |State(module): State<AppModule>,
                 axum_extra::extract::Query(req): axum_extra::extract::Query<
                    FindBooksByNamesRequest,
                >| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().find_by_names(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(any_or_else)
                },
            ),
        )
        .route(
            "/books/name/:name",
            get(
                |State(module): State<AppModule>, Path(name): Path<String>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(FindBookByNameRequest::new(name))
                        .handle(|dto| async move { module.database().find_by_name(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<i64>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(GetBookRequest::new(id))
                        .handle(|dto| async move { module.database().get_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| found_or_else(res, id))
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 Path(id): Path<i64>,
                 Json(req): Json<UpdateBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.database().update_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| found_or_else(res, id))
                },
            )
            .delete(
                |State(module): State<AppModule>, Path(id): Path<i64>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(DeleteBookRequest::new(id))
                        .handle(|dto| async move { module.database().delete_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| found_or_else(res, id))
                },
            ),
        )
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::Response;
    use axum::Json;
    use kernel::prelude::entity::{
        Book, BookAuthor, BookId, BookName, BookPrice, BookRating, BookVolumeCount,
    };
    use serde_json::{json, Value};

    use super::{any_or_else, found_or_else};
    use crate::response::BookResponse;

    fn dune() -> BookResponse {
        BookResponse::from(Book::new(
            BookId::new(1),
            BookName::new("Dune"),
            BookVolumeCount::new(6),
            BookAuthor::new("Frank Herbert"),
            BookPrice::new(12.5),
            BookRating::new(4.5),
        ))
    }

    async fn body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_book_is_not_found() {
        let response = found_or_else(None, 42);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(response).await, json!({ "error": "book 42 not found" }));

        let response = found_or_else(Some(dune()), 1);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(response).await["name"], "Dune");
    }

    #[tokio::test]
    async fn empty_name_match_is_not_found() {
        let response = any_or_else(Json(Vec::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body(response).await,
            json!({ "error": "No matching books found" })
        );

        let response = any_or_else(Json(vec![dune()]));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(response).await[0]["id"], 1);
    }
}
