pub mod habits;
