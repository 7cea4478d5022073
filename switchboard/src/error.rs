//! Error types

/// Errors raised when a control is driven outside the context it needs.
///
/// These indicate wiring defects in the adapter layer. Ordinary no-op conditions
/// (activating a disabled item, navigating an empty list) never produce an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    /// The control has been unmounted and can no longer be operated.
    #[error("{control} used after unmount")]
    Unmounted {
        /// Name of the control type
        control: &'static str,
    },

    /// A delay timer was requested outside a Tokio runtime.
    #[error("Timers require a running Tokio runtime")]
    NoRuntime,

    /// A key name that does not map to a navigation key.
    #[error("Unknown navigation key: {0}")]
    UnknownKey(String),
}
