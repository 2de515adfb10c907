use crate::types::{AccountId, BookId, Credits};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    Available,
    Borrowed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub cost: Credits,
    pub status: BookStatus,
    /// Present iff status == Borrowed. May reference a removed account.
    pub borrowed_by: Option<AccountId>,
}

impl Book {
    pub fn available(id: BookId, title: impl Into<String>, author: impl Into<String>, cost: Credits) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            cost,
            status: BookStatus::Available,
            borrowed_by: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }

    pub(crate) fn mark_borrowed(&mut self, by: &str) {
        self.status = BookStatus::Borrowed;
        self.borrowed_by = Some(by.to_string());
    }

    pub(crate) fn mark_returned(&mut self) {
        self.status = BookStatus::Available;
        self.borrowed_by = None;
    }
}

#[derive(Debug, Default)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.id == id)
    }

    pub fn all(&self) -> &[Book] {
        &self.books
    }

    pub fn borrowed_by<'a>(&'a self, account_id: &'a str) -> impl Iterator<Item = &'a Book> + 'a {
        self.books
            .iter()
            .filter(move |b| b.borrowed_by.as_deref() == Some(account_id))
    }
}
