//! Catalog domain: the product record, its field constraints, and identifiers.

pub mod object_id;
pub mod product;

pub use object_id::{InvalidObjectId, ObjectId};
pub use product::{FieldError, Product};
