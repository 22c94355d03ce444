pub mod completion;
#[cfg(feature = "server")]
pub mod config;
pub mod follow;
pub mod habit;
pub mod user;
