pub mod message;
pub mod repository;
pub mod todo;
