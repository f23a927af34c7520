use kernel::prelude::entity::{
    BookAuthor, BookDraft, BookId, BookName, BookPredicate, BookPrice, BookRating,
    BookVolumeCount,
};

#[derive(Debug)]
pub struct GetBookDto {
    pub id: BookId,
}

#[derive(Debug)]
pub struct CreateBookDto {
    pub name: String,
    pub volume_count: i32,
    pub author: String,
    pub price: f64,
    pub rating: f64,
}

impl From<CreateBookDto> for BookDraft {
    fn from(value: CreateBookDto) -> Self {
        BookDraft::new(
            BookName::new(value.name),
            BookVolumeCount::new(value.volume_count),
            BookAuthor::new(value.author),
            BookPrice::new(value.price),
            BookRating::new(value.rating),
        )
    }
}

#[derive(Debug)]
pub struct UpdateBookDto {
    pub id: BookId,
    pub volume_count: Option<i32>,
    pub rating: Option<f64>,
}

#[derive(Debug)]
pub struct DeleteBookDto {
    pub id: BookId,
}

#[derive(Debug)]
pub struct FindBookByNameDto {
    pub name: String,
}

#[derive(Debug)]
pub struct FindBooksByNamesDto {
    pub names: Vec<String>,
}

#[derive(Debug, Default)]
pub struct SearchBookDto {
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub volume_count_min: Option<i32>,
    pub volume_count_max: Option<i32>,
}

impl SearchBookDto {
    /// One inclusive predicate per bound that is present.
    pub fn predicates(&self) -> Vec<BookPredicate> {
        let price_min = self
            .price_min
            .map(|min| BookPredicate::PriceAtLeast(BookPrice::new(min)));
        let price_max = self
            .price_max
            .map(|max| BookPredicate::PriceAtMost(BookPrice::new(max)));
        let volume_count_min = self
            .volume_count_min
            .map(|min| BookPredicate::VolumeCountAtLeast(BookVolumeCount::new(min)));
        let volume_count_max = self
            .volume_count_max
            .map(|max| BookPredicate::VolumeCountAtMost(BookVolumeCount::new(max)));

        [price_min, price_max, volume_count_min, volume_count_max]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod test {
    use kernel::prelude::entity::{BookPredicate, BookPrice, BookVolumeCount};

    use super::SearchBookDto;

    #[test]
    fn no_bounds_no_predicates() {
        assert!(SearchBookDto::default().predicates().is_empty());
    }

    #[test]
    fn only_present_bounds_become_predicates() {
        let dto = SearchBookDto {
            price_min: Some(10.0),
            volume_count_max: Some(0),
            ..Default::default()
        };
        assert_eq!(
            dto.predicates(),
            vec![
                BookPredicate::PriceAtLeast(BookPrice::new(10.0)),
                BookPredicate::VolumeCountAtMost(BookVolumeCount::new(0)),
            ]
        );
    }
}
