use crate::controller::Exhaust;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::prelude::entity::{
    Book, BookAuthor, BookId, BookName, BookPrice, BookRating, BookVolumeCount, DestructBook,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BookResponse {
    id: BookId,
    name: BookName,
    volume_count: BookVolumeCount,
    author: BookAuthor,
    price: BookPrice,
    rating: BookRating,
}

impl From<Book> for BookResponse {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            name,
            volume_count,
            author,
            price,
            rating,
        } = value.into_destruct();
        Self {
            id,
            name,
            volume_count,
            author,
            price,
            rating,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CreatedBookResponse(BookResponse);

impl IntoResponse for CreatedBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<Book> for BookPresenter {
    type To = CreatedBookResponse;
    fn emit(&self, input: Book) -> Self::To {
        CreatedBookResponse(BookResponse::from(input))
    }
}

impl Exhaust<Option<Book>> for BookPresenter {
    type To = Option<BookResponse>;
    fn emit(&self, input: Option<Book>) -> Self::To {
        input.map(BookResponse::from)
    }
}

impl Exhaust<Vec<Book>> for BookPresenter {
    type To = axum::Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<Book>) -> Self::To {
        let result = input
            .into_iter()
            .map(BookResponse::from)
            .collect::<Vec<_>>();
        axum::Json::from(result)
    }
}

#[cfg(test)]
mod test {
    use kernel::prelude::entity::{
        Book, BookAuthor, BookId, BookName, BookPrice, BookRating, BookVolumeCount,
    };
    use serde_json::json;

    use super::BookResponse;

    #[test]
    fn serializes_flat() {
        let book = Book::new(
            BookId::new(3),
            BookName::new("Dune"),
            BookVolumeCount::new(6),
            BookAuthor::new("Frank Herbert"),
            BookPrice::new(12.5),
            BookRating::new(4.5),
        );
        let value = serde_json::to_value(BookResponse::from(book)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "name": "Dune",
                "volume_count": 6,
                "author": "Frank Herbert",
                "price": 12.5,
                "rating": 4.5,
            })
        );
    }
}
