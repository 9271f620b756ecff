//! SeaORM entities. These are the declared table shapes that the schema
//! drift check compares against the live database.

pub mod lead;
pub mod post;
pub mod user;
