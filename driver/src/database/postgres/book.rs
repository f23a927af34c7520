use sqlx::{PgConnection, Postgres, QueryBuilder};

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookAuthor, BookDraft, BookId, BookName, BookNamePattern, BookPredicate, BookPrice,
    BookRating, BookVolumeCount,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn find_by_name_pattern(
        &self,
        con: &mut PostgresConnection,
        pattern: &BookNamePattern,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_name_pattern(con, pattern).await
    }

    async fn find_by_names(
        &self,
        con: &mut PostgresConnection,
        names: &[BookName],
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_names(con, names).await
    }

    async fn find_by_predicates(
        &self,
        con: &mut PostgresConnection,
        predicates: &[BookPredicate],
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_predicates(con, predicates).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        draft: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        PgBookInternal::create(con, draft).await
    }

    async fn save(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<Book, KernelError> {
        PgBookInternal::save(con, book).await
    }

    async fn remove(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<Book, KernelError> {
        PgBookInternal::remove(con, book).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    name: String,
    volume_count: i32,
    author: String,
    price: f64,
    rating: f64,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookName::new(value.name),
            BookVolumeCount::new(value.volume_count),
            BookAuthor::new(value.author),
            BookPrice::new(value.price),
            BookRating::new(value.rating),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    #[tracing::instrument(skip(con))]
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, volume_count, author, price, rating
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    #[tracing::instrument(skip(con))]
    async fn find_by_name_pattern(
        con: &mut PgConnection,
        pattern: &BookNamePattern,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, volume_count, author, price, rating
            FROM books
            WHERE name LIKE $1
            "#,
        )
        .bind(AsRef::<str>::as_ref(pattern))
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    #[tracing::instrument(skip(con))]
    async fn find_by_names(
        con: &mut PgConnection,
        names: &[BookName],
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let names = names
            .iter()
            .map(|name| name.as_ref().clone())
            .collect::<Vec<String>>();
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, volume_count, author, price, rating
            FROM books
            WHERE name = ANY($1)
            "#,
        )
        .bind(names)
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    #[tracing::instrument(skip(con))]
    async fn find_by_predicates(
        con: &mut PgConnection,
        predicates: &[BookPredicate],
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT id, name, volume_count, author, price, rating FROM books",
        );
        for (i, predicate) in predicates.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            match predicate {
                BookPredicate::PriceAtLeast(min) => {
                    builder.push("price >= ").push_bind(*min.as_ref());
                }
                BookPredicate::PriceAtMost(max) => {
                    builder.push("price <= ").push_bind(*max.as_ref());
                }
                BookPredicate::VolumeCountAtLeast(min) => {
                    builder.push("volume_count >= ").push_bind(*min.as_ref());
                }
                BookPredicate::VolumeCountAtMost(max) => {
                    builder.push("volume_count <= ").push_bind(*max.as_ref());
                }
            }
        }
        let rows = builder
            .build_query_as::<BookRow>()
            .fetch_all(con)
            .await
            .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    #[tracing::instrument(skip(con))]
    async fn create(
        con: &mut PgConnection,
        draft: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            INSERT INTO books (name, volume_count, author, price, rating)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, volume_count, author, price, rating
            "#,
        )
        .bind(draft.name().as_ref())
        .bind(draft.volume_count().as_ref())
        .bind(draft.author().as_ref())
        .bind(draft.price().as_ref())
        .bind(draft.rating().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Book::from(row))
    }

    #[tracing::instrument(skip(con))]
    async fn save(con: &mut PgConnection, book: &Book) -> error_stack::Result<Book, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            INSERT INTO books (id, name, volume_count, author, price, rating)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET name = $2, volume_count = $3, author = $4, price = $5, rating = $6
            RETURNING id, name, volume_count, author, price, rating
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.name().as_ref())
        .bind(book.volume_count().as_ref())
        .bind(book.author().as_ref())
        .bind(book.price().as_ref())
        .bind(book.rating().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Book::from(row))
    }

    #[tracing::instrument(skip(con))]
    async fn remove(con: &mut PgConnection, book: &Book) -> error_stack::Result<Book, KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(book.id().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(book.clone())
    }
}
