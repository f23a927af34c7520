use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookDraft, BookId, BookName, BookNamePattern, BookPredicate,
};
use kernel::KernelError;

/// Process-local record store keeping books in id order.
///
/// A connection works on a snapshot taken at `transact`. Its writes reach
/// the shelf on `commit`; `roll_back` or dropping the connection discards them.
/// Ids come from a shared sequence and are not reused after a roll back.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    shelf: Arc<Shelf>,
}

#[derive(Default)]
struct Shelf {
    books: RwLock<BTreeMap<i64, Book>>,
    sequence: AtomicI64,
    writes: AtomicUsize,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of create/save/remove calls served so far, committed or not.
    pub fn writes(&self) -> usize {
        self.shelf.writes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryConnection;
    async fn transact(&self) -> error_stack::Result<InMemoryConnection, KernelError> {
        let snapshot = self.shelf.books.read().await.clone();
        Ok(InMemoryConnection {
            shelf: Arc::clone(&self.shelf),
            snapshot,
            staged: BTreeMap::new(),
        })
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}

pub struct InMemoryConnection {
    shelf: Arc<Shelf>,
    snapshot: BTreeMap<i64, Book>,
    // `None` marks a removal.
    staged: BTreeMap<i64, Option<Book>>,
}

impl InMemoryConnection {
    fn put(&mut self, book: Book) {
        let id: i64 = *book.id().as_ref();
        self.snapshot.insert(id, book.clone());
        self.staged.insert(id, Some(book));
        self.shelf.writes.fetch_add(1, Ordering::SeqCst);
    }

    fn take(&mut self, id: i64) {
        self.snapshot.remove(&id);
        self.staged.insert(id, None);
        self.shelf.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let mut books = self.shelf.books.write().await;
        for (id, book) in self.staged {
            match book {
                Some(book) => books.insert(id, book),
                None => books.remove(&id),
            };
        }
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

pub struct InMemoryBookRepository;

impl InMemoryBookRepository {
    fn select(con: &InMemoryConnection, filter: impl Fn(&Book) -> bool) -> Vec<Book> {
        con.snapshot
            .values()
            .filter(|book| filter(book))
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryConnection;

    async fn find_by_id(
        &self,
        con: &mut InMemoryConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let id: &i64 = id.as_ref();
        Ok(con.snapshot.get(id).cloned())
    }

    async fn find_by_name_pattern(
        &self,
        con: &mut InMemoryConnection,
        pattern: &BookNamePattern,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(Self::select(con, |book| pattern.is_match(book.name())))
    }

    async fn find_by_names(
        &self,
        con: &mut InMemoryConnection,
        names: &[BookName],
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(Self::select(con, |book| names.contains(book.name())))
    }

    async fn find_by_predicates(
        &self,
        con: &mut InMemoryConnection,
        predicates: &[BookPredicate],
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(Self::select(con, |book| BookPredicate::matches_all(predicates, book)))
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryConnection;

    async fn create(
        &self,
        con: &mut InMemoryConnection,
        draft: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let id = con.shelf.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let book = Book::from_draft(BookId::new(id), draft.clone());
        con.put(book.clone());
        Ok(book)
    }

    async fn save(
        &self,
        con: &mut InMemoryConnection,
        book: &Book,
    ) -> error_stack::Result<Book, KernelError> {
        con.put(book.clone());
        Ok(book.clone())
    }

    async fn remove(
        &self,
        con: &mut InMemoryConnection,
        book: &Book,
    ) -> error_stack::Result<Book, KernelError> {
        con.take(*book.id().as_ref());
        Ok(book.clone())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        BookAuthor, BookDraft, BookName, BookNamePattern, BookPrice, BookRating, BookVolumeCount,
    };
    use kernel::KernelError;

    use super::{InMemoryBookRepository, InMemoryDatabase};

    fn draft(name: &str) -> BookDraft {
        BookDraft::new(
            BookName::new(name),
            BookVolumeCount::new(1),
            BookAuthor::new("author"),
            BookPrice::new(1.0),
            BookRating::new(1.0),
        )
    }

    #[tokio::test]
    async fn ids_are_assigned_in_sequence() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let first = InMemoryBookRepository.create(&mut con, &draft("Dune")).await?;
        let second = InMemoryBookRepository
            .create(&mut con, &draft("Foundation"))
            .await?;
        assert_eq!(first.id().as_ref(), &1);
        assert_eq!(second.id().as_ref(), &2);
        assert_eq!(db.writes(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn clones_share_the_shelf() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let other = db.clone();
        let mut con = db.transact().await?;
        let book = InMemoryBookRepository.create(&mut con, &draft("Dune")).await?;
        con.commit().await?;

        let mut con = other.transact().await?;
        let found = InMemoryBookRepository.find_by_id(&mut con, book.id()).await?;
        assert_eq!(found, Some(book.clone()));

        InMemoryBookRepository.remove(&mut con, &book).await?;
        con.commit().await?;
        let mut con = db.transact().await?;
        let found = InMemoryBookRepository
            .find_by_name_pattern(&mut con, &BookNamePattern::contains(""))
            .await?;
        assert!(found.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn uncommitted_writes_are_discarded() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();

        let mut con = db.transact().await?;
        let dropped = InMemoryBookRepository.create(&mut con, &draft("Dune")).await?;
        let seen = InMemoryBookRepository.find_by_id(&mut con, dropped.id()).await?;
        assert_eq!(seen, Some(dropped.clone()));
        drop(con);

        let mut con = db.transact().await?;
        let rolled_back = InMemoryBookRepository
            .create(&mut con, &draft("Foundation"))
            .await?;
        con.roll_back().await?;

        let mut con = db.transact().await?;
        assert!(InMemoryBookRepository
            .find_by_id(&mut con, dropped.id())
            .await?
            .is_none());
        assert!(InMemoryBookRepository
            .find_by_id(&mut con, rolled_back.id())
            .await?
            .is_none());

        let kept = InMemoryBookRepository.create(&mut con, &draft("Emma")).await?;
        assert_eq!(kept.id().as_ref(), &3);
        Ok(())
    }
}
