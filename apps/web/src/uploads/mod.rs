// CV and cover-letter templates: unique naming, file storage with rollback, metadata rows.

pub mod handlers;
pub mod naming;
pub mod records;
pub mod storage;
