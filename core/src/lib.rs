//! Campus time-credit core.
//!
//! Students earn and spend a virtual credit balance through quizzes, a daily
//! bonus wheel, verified activity submissions and a lending library. Faculty
//! manage the roster and verify submissions.
//!
//! LAYERING (leaf first):
//!   - `ledger`   append-only transaction log with sequence ids
//!   - `store`    cached account balances, activity board, library catalog
//!   - `policy`   reward rules (activity table, quiz thresholds, wheel)
//!   - `engine`   the only writer: every credit mutation goes through
//!                `CampusEngine`, which appends to the ledger and adjusts the
//!                cached balance as one unit
//!
//! RULE: balance(account) == initial_credits + Σ ledger amounts for that id.
//! `CampusEngine::audit_balances()` checks it.

pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod ledger;
pub mod policy;
pub mod quiz;
pub mod rng;
pub mod roster;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod types;

pub use command::CampusCommand;
pub use config::CampusConfig;
pub use engine::CampusEngine;
pub use error::{CreditError, CreditResult};
pub use ledger::{Ledger, Transaction, TransactionKind};
pub use session::Session;
pub use snapshot::CampusSnapshot;
pub use types::{AccountId, ActivityId, BookId, Credits, Role, TxnId};
