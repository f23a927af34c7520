use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Book, BookId, BookName, BookNamePattern, BookPredicate};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    async fn find_by_name_pattern(
        &self,
        con: &mut Self::Transaction,
        pattern: &BookNamePattern,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    /// Books whose name equals one of `names` exactly.
    async fn find_by_names(
        &self,
        con: &mut Self::Transaction,
        names: &[BookName],
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    /// Books satisfying every predicate; all books when `predicates` is empty.
    async fn find_by_predicates(
        &self,
        con: &mut Self::Transaction,
        predicates: &[BookPredicate],
    ) -> error_stack::Result<Vec<Book>, KernelError>;
}

pub trait DependOnBookQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookQuery: BookQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_query(&self) -> &Self::BookQuery;
}
