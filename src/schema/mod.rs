//! Schema gate for jsondb
//!
//! A store may carry one schema. When it does, every value written by
//! `create`, `update` or a bulk load must pass [`SchemaGate::validate`]
//! before it reaches the mapping.
//!
//! The validation algorithm is a capability behind the [`Validator`]
//! trait; [`JsonSchemaValidator`] implements it with the `jsonschema`
//! crate.

mod errors;
mod gate;
mod validator;

pub use errors::{SchemaError, SchemaResult};
pub use gate::SchemaGate;
pub use validator::{JsonSchemaValidator, Validator};

pub(crate) use validator::json_type_name;
