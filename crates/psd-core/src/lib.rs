#![deny(missing_docs)]
#![doc = "Core error taxonomy, validation policy and schema descriptors shared by the PSD crates."]

pub mod errors;
pub mod policy;
pub mod schema;

pub use errors::{ErrorInfo, PsdError};
pub use policy::ValidationPolicy;
pub use schema::SchemaVersion;
