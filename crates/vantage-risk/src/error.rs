//! Conversion of statistical failures into the pipeline error taxonomy.

use vantage_core::RiskError;
use vantage_math::MathError;

/// Returns a mapper that turns a [`MathError`] raised while computing
/// `context` into a [`RiskError`].
pub(crate) fn from_math(context: &'static str) -> impl FnOnce(MathError) -> RiskError {
    move |err| match err {
        MathError::InsufficientData { required, actual } => {
            RiskError::insufficient_data(context, required, actual)
        }
        MathError::InvalidInput { reason } => {
            RiskError::invalid_input(format!("{context}: {reason}"))
        }
    }
}
