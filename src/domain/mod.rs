pub mod completion;
pub mod feed;
pub mod follow;
pub mod habit;
pub mod period;
pub mod stats;
pub mod types;
pub mod user;
