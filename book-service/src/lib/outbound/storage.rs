pub mod gofile;
mod messages;

pub use gofile::GofileStorage;
