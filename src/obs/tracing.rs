// crates.io
use tracing::{Span, instrument::Instrumented};
// self
use crate::_prelude::*;

/// Span wrapper used around every issuance.
#[derive(Clone, Debug)]
pub struct IssueSpan {
	span: Span,
}
impl IssueSpan {
	/// Creates a new span tagged with the provided stage.
	pub fn new(stage: &'static str) -> Self {
		Self { span: tracing::info_span!("mapbox_token_edge.issue", stage) }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		use tracing::Instrument;

		fut.instrument(self.span.clone())
	}
}
