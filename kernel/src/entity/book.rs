mod author;
mod id;
mod name;
mod pattern;
mod predicate;
mod price;
mod rating;
mod volume_count;

pub use self::{
    author::*, id::*, name::*, pattern::*, predicate::*, price::*, rating::*, volume_count::*,
};
use destructure::{Destructure, Mutation};
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    name: BookName,
    volume_count: BookVolumeCount,
    author: BookAuthor,
    price: BookPrice,
    rating: BookRating,
}

impl Book {
    pub fn new(
        id: BookId,
        name: BookName,
        volume_count: BookVolumeCount,
        author: BookAuthor,
        price: BookPrice,
        rating: BookRating,
    ) -> Self {
        Self {
            id,
            name,
            volume_count,
            author,
            price,
            rating,
        }
    }

    /// Attaches a store-assigned id to a draft.
    pub fn from_draft(id: BookId, draft: BookDraft) -> Self {
        let DestructBookDraft {
            name,
            volume_count,
            author,
            price,
            rating,
        } = draft.into_destruct();
        Self::new(id, name, volume_count, author, price, rating)
    }
}

/// A book that has not been persisted yet and so has no id.
#[derive(Debug, Clone, PartialEq, References, Destructure)]
pub struct BookDraft {
    name: BookName,
    volume_count: BookVolumeCount,
    author: BookAuthor,
    price: BookPrice,
    rating: BookRating,
}

impl BookDraft {
    pub fn new(
        name: BookName,
        volume_count: BookVolumeCount,
        author: BookAuthor,
        price: BookPrice,
        rating: BookRating,
    ) -> Self {
        Self {
            name,
            volume_count,
            author,
            price,
            rating,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_draft_keeps_every_field() {
        let draft = BookDraft::new(
            BookName::new("Dune"),
            BookVolumeCount::new(6),
            BookAuthor::new("Frank Herbert"),
            BookPrice::new(12.5),
            BookRating::new(4.8),
        );
        let book = Book::from_draft(BookId::new(7), draft);
        assert_eq!(book.id(), &BookId::new(7));
        assert_eq!(book.name().as_ref(), "Dune");
        assert_eq!(book.volume_count().as_ref(), &6);
        assert_eq!(book.author().as_ref(), "Frank Herbert");
        assert_eq!(book.price().as_ref(), &12.5);
        assert_eq!(book.rating().as_ref(), &4.8);
    }
}
