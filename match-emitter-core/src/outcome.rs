//! Listener return value conversion.

use crate::error::BoxError;

/// Trait for converting a listener's return value into a delivery outcome.
///
/// # Default Implementations
///
/// - `()` → Success
/// - `Result<(), E>` → Success, or the error boxed
/// - `Result<(), BoxError>` → As is
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `IntoOutcome`",
    label = "listeners must return `()` or `Result<(), E>`",
    note = "IntoOutcome must implement the `into_outcome` method."
)]
pub trait IntoOutcome {
    /// Convert the return value into `Ok(())` or the listener's error.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> IntoOutcome for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}
