//! Mount/unmount tracking shared by controls that outlive a single event.

use tokio_util::sync::CancellationToken;

use crate::error::ControlError;

/// Liveness of a mounted control.
///
/// Backed by a [`CancellationToken`]: unmounting cancels it, which also cancels
/// every timer spawned from [`Lifecycle::child_token`]. Clones share the token.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    control: &'static str,
    token: CancellationToken,
}

impl Lifecycle {
    pub fn new(control: &'static str) -> Self {
        Self {
            control,
            token: CancellationToken::new(),
        }
    }

    /// Name of the owning control type (used in errors and logs).
    pub fn control(&self) -> &'static str {
        self.control
    }

    pub fn is_mounted(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Fail with [`ControlError::Unmounted`] once the control is torn down.
    pub fn ensure_mounted(&self) -> Result<(), ControlError> {
        if self.is_mounted() {
            Ok(())
        } else {
            Err(ControlError::Unmounted {
                control: self.control,
            })
        }
    }

    /// A token cancelled on unmount, or earlier by its holder.
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Tear down. Returns false if the control was already unmounted.
    pub fn unmount(&self) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        self.token.cancel();
        log::debug!("{} unmounted", self.control);
        true
    }
}
