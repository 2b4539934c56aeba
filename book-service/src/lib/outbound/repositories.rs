pub mod postgres;

pub use postgres::PostgresDocumentStore;
