// self
use crate::{
	auth::Scope,
	obs::{OpKind, OpOutcome},
};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_op_outcome(kind: OpKind, scope: Scope, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"scoped_oauth2_op_total",
			"op" => kind.as_str(),
			"scope" => scope.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, scope, outcome);
	}
}
