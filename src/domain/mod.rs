//! Product entity and request validation.

pub mod product;
pub mod validation;

pub use product::{NewProduct, Product, ProductChanges};
pub use validation::{FieldError, Location, PathId, ValidationErrors};
