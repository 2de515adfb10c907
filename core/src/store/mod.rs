//! In-memory state stores.
//!
//! RULE: stores never mutate themselves in response to each other.
//! Only the engine writes to them, and every credit-affecting write is
//! paired with a ledger append (see engine/mod.rs).

mod account;
mod activity;
mod library;

pub use account::{Account, AccountStore, Achievement, AchievementIcon};
pub use activity::{Activity, ActivityBoard, ActivityStatus};
pub use library::{Book, BookStatus, Library};
