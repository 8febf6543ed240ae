pub mod document;
pub mod enums;
pub mod message;

pub use document::*;
pub use enums::*;
pub use message::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("A deal outcome is required for historical deals")]
    OutcomeRequired,

    #[error("A deal outcome is not allowed for category {category}")]
    OutcomeNotAllowed { category: String },
}
