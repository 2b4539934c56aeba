pub mod book;
pub mod file;
pub mod library;
pub mod user;
