//! # shoresquad-store
//!
//! Local storage for ShoreSquad crews and events.
//!
//! Records live in memory in a [`CommunityStore`] and are mirrored, as JSON
//! text, to a key/value backend: a SQLite file via [`Database`] or the
//! volatile [`MemoryStorage`].

pub mod community;
pub mod database;
pub mod ids;
pub mod local_storage;
pub mod migrations;
pub mod models;
pub mod persistence;

mod error;

pub use community::{CommunityStore, JoinOutcome};
pub use database::Database;
pub use error::{Result, StoreError};
pub use models::*;
pub use persistence::{KeyValueStore, MemoryStorage, Persistence};
