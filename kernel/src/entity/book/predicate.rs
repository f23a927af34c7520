use crate::entity::{Book, BookPrice, BookVolumeCount};

/// One inclusive bound of a range search. A list of predicates is read as
/// their conjunction; an empty list selects every book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BookPredicate {
    PriceAtLeast(BookPrice),
    PriceAtMost(BookPrice),
    VolumeCountAtLeast(BookVolumeCount),
    VolumeCountAtMost(BookVolumeCount),
}

impl BookPredicate {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookPredicate::PriceAtLeast(min) => book.price() >= min,
            BookPredicate::PriceAtMost(max) => book.price() <= max,
            BookPredicate::VolumeCountAtLeast(min) => book.volume_count() >= min,
            BookPredicate::VolumeCountAtMost(max) => book.volume_count() <= max,
        }
    }

    pub fn matches_all(predicates: &[BookPredicate], book: &Book) -> bool {
        predicates.iter().all(|predicate| predicate.matches(book))
    }
}

#[cfg(test)]
mod test {
    use super::BookPredicate;
    use crate::entity::{
        Book, BookAuthor, BookId, BookName, BookPrice, BookRating, BookVolumeCount,
    };

    fn book(price: f64, volume_count: i32) -> Book {
        Book::new(
            BookId::new(1),
            BookName::new("Dune"),
            BookVolumeCount::new(volume_count),
            BookAuthor::new("Frank Herbert"),
            BookPrice::new(price),
            BookRating::new(4.0),
        )
    }

    #[test]
    fn bounds_are_inclusive() {
        let at_ten = book(10.0, 3);
        assert!(BookPredicate::PriceAtLeast(BookPrice::new(10.0)).matches(&at_ten));
        assert!(BookPredicate::PriceAtMost(BookPrice::new(10.0)).matches(&at_ten));
        assert!(BookPredicate::VolumeCountAtLeast(BookVolumeCount::new(3)).matches(&at_ten));
        assert!(BookPredicate::VolumeCountAtMost(BookVolumeCount::new(3)).matches(&at_ten));
    }

    #[test]
    fn conjunction() {
        let predicates = [
            BookPredicate::PriceAtLeast(BookPrice::new(10.0)),
            BookPredicate::PriceAtMost(BookPrice::new(20.0)),
        ];
        assert!(BookPredicate::matches_all(&predicates, &book(15.0, 1)));
        assert!(!BookPredicate::matches_all(&predicates, &book(9.99, 1)));
        assert!(!BookPredicate::matches_all(&predicates, &book(20.01, 1)));
        assert!(BookPredicate::matches_all(&[], &book(1000.0, 1)));
    }
}
