//! Identity maintenance operations.

mod delete_persons;

pub use delete_persons::DeletePersonsHandler;
