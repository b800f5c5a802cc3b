//! Running blocking driver calls from any calling context
//!
//! Both sqlx and the testcontainers sync runner drive futures with
//! `block_on`, which panics on a thread that already runs a tokio runtime.
//! Callers inside `#[tokio::test]` or an async service get the work moved to
//! a scoped thread instead.

use std::panic;
use std::thread;
use tokio::runtime::Handle;

/// Run `work` on this thread, or on a scoped helper thread when this thread
/// belongs to a tokio runtime.
pub(crate) fn outside_runtime<T, F>(work: F) -> T
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    if Handle::try_current().is_err() {
        return work();
    }

    thread::scope(|scope| {
        scope
            .spawn(work)
            .join()
            .unwrap_or_else(|payload| panic::resume_unwind(payload))
    })
}
