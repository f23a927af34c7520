use crate::controller::{Intake, TryIntake};
use application::transfer::{
    CreateBookDto, DeleteBookDto, FindBookByNameDto, FindBooksByNamesDto, GetBookDto,
    SearchBookDto, UpdateBookDto,
};
use error_stack::Report;
use kernel::prelude::entity::BookId;
use kernel::KernelError;
use serde::Deserialize;

const BOOK_NAME_MIN_LENGTH: usize = 3;

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    name: String,
    volume_count: i32,
    author: String,
    price: f64,
    rating: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    volume_count: Option<i32>,
    rating: Option<f64>,
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: i64,
}

impl GetBookRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: i64,
}

impl DeleteBookRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct FindBookByNameRequest {
    name: String,
}

impl FindBookByNameRequest {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

// `?names=Dune&names=Foundation`
#[derive(Debug, Deserialize)]
pub struct FindBooksByNamesRequest {
    #[serde(default)]
    names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchBookRequest {
    price_min: Option<f64>,
    price_max: Option<f64>,
    volume_count_min: Option<i32>,
    volume_count_max: Option<i32>,
}

pub struct BookTransformer;

impl TryIntake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CreateBookRequest) -> Result<Self::To, Self::Error> {
        if input.name.chars().count() < BOOK_NAME_MIN_LENGTH {
            return Err(Report::new(KernelError::Validation).attach_printable(format!(
                "\"name\" length must be at least {BOOK_NAME_MIN_LENGTH} characters long"
            )));
        }
        Ok(CreateBookDto {
            name: input.name,
            volume_count: input.volume_count,
            author: input.author,
            price: input.price,
            rating: input.rating,
        })
    }
}

impl Intake<(i64, UpdateBookRequest)> for BookTransformer {
    type To = UpdateBookDto;
    fn emit(&self, (id, input): (i64, UpdateBookRequest)) -> Self::To {
        UpdateBookDto {
            id: BookId::new(id),
            volume_count: input.volume_count,
            rating: input.rating,
        }
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto {
            id: BookId::new(input.id),
        }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto {
            id: BookId::new(input.id),
        }
    }
}

impl Intake<FindBookByNameRequest> for BookTransformer {
    type To = FindBookByNameDto;
    fn emit(&self, input: FindBookByNameRequest) -> Self::To {
        FindBookByNameDto { name: input.name }
    }
}

impl Intake<FindBooksByNamesRequest> for BookTransformer {
    type To = FindBooksByNamesDto;
    fn emit(&self, input: FindBooksByNamesRequest) -> Self::To {
        FindBooksByNamesDto { names: input.names }
    }
}

impl Intake<SearchBookRequest> for BookTransformer {
    type To = SearchBookDto;
    fn emit(&self, input: SearchBookRequest) -> Self::To {
        SearchBookDto {
            price_min: input.price_min,
            price_max: input.price_max,
            volume_count_min: input.volume_count_min,
            volume_count_max: input.volume_count_max,
        }
    }
}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use super::{BookTransformer, CreateBookRequest, SearchBookRequest};
    use crate::controller::{Intake, TryIntake};

    fn create(name: &str) -> CreateBookRequest {
        CreateBookRequest {
            name: name.to_string(),
            volume_count: 1,
            author: "author".to_string(),
            price: 9.5,
            rating: 4.0,
        }
    }

    #[test]
    fn short_names_are_rejected() {
        let report = TryIntake::emit(&BookTransformer, create("Du")).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Validation));
    }

    #[test]
    fn name_length_counts_characters() {
        assert!(TryIntake::emit(&BookTransformer, create("Dune")).is_ok());
        assert!(TryIntake::emit(&BookTransformer, create("Été")).is_ok());
    }

    #[test]
    fn search_query_maps_every_bound() {
        let request: SearchBookRequest =
            serde_json::from_str(r#"{"price_min": 10, "volume_count_max": 3}"#).unwrap();
        let dto = Intake::emit(&BookTransformer, request);
        assert_eq!(dto.price_min, Some(10.0));
        assert_eq!(dto.price_max, None);
        assert_eq!(dto.volume_count_min, None);
        assert_eq!(dto.volume_count_max, Some(3));
    }
}
