pub mod field;
pub mod timestamp;

pub mod author;
pub mod book;
