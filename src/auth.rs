//! Auth-domain value types: scope sets and redacted secrets.

pub mod scope;
pub mod secret;

pub use scope::*;
pub use secret::*;
