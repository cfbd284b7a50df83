// Service exports
pub mod facepp;
pub mod memory;
pub mod postgres;
pub mod store;

pub use facepp::{FaceScorer, FaceppClient, ScorerError};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use store::{MatchStore, StoreError, UserStore};
