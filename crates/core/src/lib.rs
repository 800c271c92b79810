//! Building blocks shared by the OCM API groups.
//!
//! This crate contains the wire conversion layer, the type declaration macros
//! and the error envelope. It has no transport concerns.

pub mod api_error;
pub mod class;
pub mod error;
pub mod list;
mod macros;
pub mod query;
pub mod wire;

pub use api_error::{ApiError, ApiErrorBuilder};
pub use class::Class;
pub use error::{Error, Result};
pub use list::{List, PageData};
pub use wire::{
    Float, Wire, marshal, marshal_list, marshal_to_writer, unmarshal, unmarshal_from_reader,
    unmarshal_list,
};

#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
}
