pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::book;
pub use domain::file;
pub use domain::library;
pub use domain::user;
