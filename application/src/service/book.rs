use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookDraft, BookName, BookNamePattern, BookRating, BookVolumeCount,
};
use kernel::KernelError;

use crate::transfer::{
    CreateBookDto, DeleteBookDto, FindBookByNameDto, FindBooksByNamesDto, GetBookDto,
    SearchBookDto, UpdateBookDto,
};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<Book>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        self.book_query().find_by_id(&mut connection, &dto.id).await
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait SearchBookService: 'static + Sync + Send + DependOnBookQuery {
    /// Case-sensitive substring match on the name.
    async fn find_by_name(
        &self,
        dto: FindBookByNameDto,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let pattern = BookNamePattern::contains(&dto.name);
        self.book_query()
            .find_by_name_pattern(&mut connection, &pattern)
            .await
    }

    async fn find_by_names(
        &self,
        dto: FindBooksByNamesDto,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        if dto.names.is_empty() {
            return Ok(Vec::new());
        }
        let names = dto.names.into_iter().map(BookName::new).collect::<Vec<_>>();
        let mut connection = self.database_connection().transact().await?;
        self.book_query()
            .find_by_names(&mut connection, &names)
            .await
    }

    async fn search_by_filter(
        &self,
        dto: SearchBookDto,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let predicates = dto.predicates();
        tracing::debug!(?predicates, "Searching books");
        let mut connection = self.database_connection().transact().await?;
        self.book_query()
            .find_by_predicates(&mut connection, &predicates)
            .await
    }
}

impl<T> SearchBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<Book, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let draft = BookDraft::from(dto);
        let book = self.book_modifier().create(&mut connection, &draft).await?;
        connection.commit().await?;

        tracing::debug!(id = ?book.id(), "Book created");
        Ok(book)
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    /// Overwrites the supplied fields of an existing book and returns the
    /// saved record, or `None` without writing when the id is unknown.
    ///
    /// A value of `0` (or `NaN` for the rating) counts as not supplied and
    /// leaves the stored field as it is.
    async fn update_book(
        &self,
        dto: UpdateBookDto,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let Some(mut book) = self.book_query().find_by_id(&mut connection, &dto.id).await? else {
            tracing::debug!(id = ?dto.id, "Book to update not found");
            return Ok(None);
        };

        let volume_count = dto.volume_count.filter(|count| *count != 0);
        let rating = dto.rating.filter(|rating| *rating != 0.0 && !rating.is_nan());
        book.substitute(|book| {
            if let Some(rating) = rating {
                *book.rating = BookRating::new(rating);
            }
            if let Some(volume_count) = volume_count {
                *book.volume_count = BookVolumeCount::new(volume_count);
            }
        });

        let book = self.book_modifier().save(&mut connection, &book).await?;
        connection.commit().await?;

        Ok(Some(book))
    }
}

impl<T> UpdateBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    /// Returns the snapshot of the removed book.
    async fn delete_book(
        &self,
        dto: DeleteBookDto,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let Some(book) = self.book_query().find_by_id(&mut connection, &dto.id).await? else {
            return Ok(None);
        };
        let removed = self.book_modifier().remove(&mut connection, &book).await?;
        connection.commit().await?;

        tracing::debug!(id = ?removed.id(), "Book deleted");
        Ok(Some(removed))
    }
}

impl<T> DeleteBookService for T where T: DependOnBookQuery + DependOnBookModifier {}
