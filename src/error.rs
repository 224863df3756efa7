use thiserror::Error;

/// Precondition failures raised by [`Optional`](crate::Optional) itself.
///
/// Errors produced inside caller-supplied callbacks are never wrapped in
/// this type; they travel through the container untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OptionalError {
    /// An absent value reached a call that requires a present one.
    /// The payload names the call that rejected it.
    #[error("Null reference: {0}")]
    NullReference(&'static str),

    /// The value of an empty container was requested.
    #[error("No value present")]
    NoSuchElement,
}

impl OptionalError {
    /// True for [`OptionalError::NullReference`], whichever call raised it.
    pub fn is_null_reference(&self) -> bool {
        matches!(self, OptionalError::NullReference(_))
    }
}
