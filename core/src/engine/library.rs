//! Library lending: borrowing charges the book's cost, returning refunds it.

use super::CampusEngine;
use crate::{
    error::{CreditError, CreditResult},
    event::CampusEvent,
    ledger::{Transaction, TransactionKind},
    session::Session,
    types::{BookId, Role},
};

impl CampusEngine {
    /// Charge the session's student for a book and mark it borrowed.
    pub fn borrow_book(&mut self, session: &Session, book_id: BookId) -> CreditResult<Transaction> {
        let (account_id, balance) = {
            let student = self.require_student(session)?;
            (student.id.clone(), student.credit_balance)
        };
        let book = self
            .library
            .get(book_id)
            .ok_or(CreditError::BookNotFound { id: book_id })?;
        if !book.is_available() {
            return Err(CreditError::BookUnavailable { id: book_id });
        }
        if balance < book.cost {
            log::warn!("{account_id} cannot afford book {book_id} ({balance} < {})", book.cost);
            return Err(CreditError::InsufficientCredits {
                balance,
                required: book.cost,
            });
        }
        let cost = book.cost;
        let description = format!("Borrowed \"{}\".", book.title);

        let transaction = self.post(&account_id, TransactionKind::SpendLibrary, -cost, description)?;
        if let Some(book) = self.library.get_mut(book_id) {
            book.mark_borrowed(&account_id);
        }
        self.emit(CampusEvent::BookBorrowed {
            book_id,
            account_id: account_id.clone(),
        });
        self.unlock_achievements(&account_id);
        Ok(transaction)
    }

    /// Return a borrowed book and refund its cost to the borrower.
    ///
    /// Allowed for the borrower, or for a session acting as Faculty. The
    /// refund always goes to the borrower, never to a faculty member who
    /// hands the book back for them, so each borrow/return pair nets to
    /// zero on one account. When
    /// the borrower has since been removed from the roster the book is
    /// still released, with no refund (returns `None`).
    pub fn return_book(&mut self, session: &Session, book_id: BookId) -> CreditResult<Option<Transaction>> {
        let caller = self.account(session.effective_account())?;
        let caller_id = caller.id.clone();
        let caller_is_faculty = session.acting_as() == Role::Faculty
            && !session.is_impersonating()
            && caller.role == Role::Faculty;

        let book = self
            .library
            .get(book_id)
            .ok_or(CreditError::BookNotFound { id: book_id })?;
        let borrower = match (&book.borrowed_by, book.is_available()) {
            (Some(borrower), false) => borrower.clone(),
            _ => return Err(CreditError::BookUnavailable { id: book_id }),
        };
        if borrower != caller_id && !caller_is_faculty {
            return Err(CreditError::not_eligible(
                "only the borrower or a faculty member can return this book",
            ));
        }
        let cost = book.cost;
        let description = format!("Returned \"{}\".", book.title);

        let transaction = if self.accounts.get(&borrower).is_some() {
            Some(self.post(&borrower, TransactionKind::ReturnLibrary, cost, description)?)
        } else {
            log::warn!("book {book_id} returned for removed account {borrower}; no refund");
            None
        };
        if let Some(book) = self.library.get_mut(book_id) {
            book.mark_returned();
        }
        self.emit(CampusEvent::BookReturned {
            book_id,
            borrower,
            returned_by: caller_id,
        });
        Ok(transaction)
    }
}
