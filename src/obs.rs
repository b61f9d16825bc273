//! Observability helpers for token issuance.
//!
//! # Feature Flags
//!
//! - Spans named `mapbox_token_edge.issue` carry a `stage` field and are always emitted.
//! - Enable `metrics` to increment the `mapbox_token_edge_issue_total` counter for every
//!   attempt/success/failure, labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each issuance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueOutcome {
	/// Entry to the issuer.
	Attempt,
	/// Token minted and returned.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl IssueOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			IssueOutcome::Attempt => "attempt",
			IssueOutcome::Success => "success",
			IssueOutcome::Failure => "failure",
		}
	}
}
impl Display for IssueOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
