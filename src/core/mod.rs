pub mod date;
pub mod empty;
pub mod form;
pub mod loading;
pub mod phone;
pub mod query;
pub mod table;

pub use crate::domain::model::{DisplayValue, PaginatedResponse, Person, PersonPayload};
pub use crate::domain::ports::{DateParser, DisplayPipe};
pub use crate::utils::error::Result;
