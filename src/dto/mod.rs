pub mod habits;
pub mod social;
