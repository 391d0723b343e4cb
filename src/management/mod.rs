mod auth;
pub mod daily;
mod fortune;

pub use auth::TokenManager;
pub use daily::{CacheState, DailyFortuneCache, FortuneSource, Obtained, Transition};
pub use fortune::{FileFortuneStore, FortuneStore, MemoryFortuneStore};
