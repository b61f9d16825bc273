//! Provider-facing descriptor (data) and wire types.
//!
//! `descriptor` exposes the validated Mapbox API base, the fixed scope list granted to
//! every minted token, and the token lifetime. `wire` holds the JSON bodies exchanged
//! with the Tokens API.

pub mod descriptor;
pub mod wire;

pub use descriptor::*;
pub use wire::*;
