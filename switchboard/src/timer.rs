//! Cancellable one-shot delay timers.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::ControlError;
use crate::lifecycle::Lifecycle;

/// A scheduled callback that has not fired yet.
///
/// Dropping the handle does not cancel the timer; call [`PendingTimer::cancel`].
#[derive(Debug)]
pub(crate) struct PendingTimer {
    seq: u64,
    token: CancellationToken,
}

impl PendingTimer {
    /// Sequence number the callback was scheduled with.
    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }

    pub(crate) fn cancel(self) {
        self.token.cancel();
    }
}

/// Run `fire` after `delay` unless cancelled first, either through the returned
/// handle or by unmounting `lifecycle`.
///
/// Callbacks still re-check liveness and `seq` when they run: a timer can elapse
/// in the same tick it is superseded.
pub(crate) fn schedule(
    lifecycle: &Lifecycle,
    delay: Duration,
    seq: u64,
    fire: impl FnOnce() + Send + 'static,
) -> Result<PendingTimer, ControlError> {
    let runtime = tokio::runtime::Handle::try_current().map_err(|_| ControlError::NoRuntime)?;
    let token = lifecycle.child_token();
    let cancel = token.clone();
    runtime.spawn(async move {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(delay) => fire(),
        }
    });
    Ok(PendingTimer { seq, token })
}

/// Serialize a `Duration` as whole milliseconds.
pub(crate) mod serde_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
