/// Convenience result type used across cardframe.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by the card surface APIs.
///
/// Non-positive render bounds and releasing an absent surface are defined no-ops,
/// not errors, so they have no variant here.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// A pixel buffer could not be allocated for the requested bounds.
    #[error("allocation error: {width}x{height} surface: {reason}")]
    Allocation {
        /// Requested width in device pixels.
        width: u32,
        /// Requested height in device pixels.
        height: u32,
        /// Why the allocation was refused.
        reason: String,
    },

    /// Invalid style configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The surface owner was already torn down.
    #[error("surface was torn down")]
    TornDown,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Allocation`] value.
    pub fn allocation(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::Allocation {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Build a [`CardError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
