// self
use crate::{_prelude::*, error::DecodeError, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("qq_connect.call", call = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a `warn` event for a provider-side rejection.
pub fn log_provider_rejection(kind: CallKind, code: i64, message: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			call = kind.as_str(),
			code,
			provider_message = message,
			"QQ Connect rejected the call"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, code, message);
	}
}

/// Emits a `debug` event for an optional response field that was present but unusable.
pub fn log_ignored_field(kind: CallKind, field: &'static str, value: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(call = kind.as_str(), field, value, "QQ Connect field ignored");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, field, value);
	}
}

/// Emits a `debug` event for a response that could not be decoded.
pub fn log_decode_failure(err: &DecodeError) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(call = err.call().as_str(), error = %err, "QQ Connect response did not decode");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = err;
	}
}
