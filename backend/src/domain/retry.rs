//! Single-retry policy for transient read failures.
//!
//! Read paths retry a timed-out port call once after a short pause. Mutating
//! paths never come through here; their retries belong to the caller.

use std::future::Future;
use std::time::Duration;

pub(crate) const READ_RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// Run `op`, and run it one more time after [`READ_RETRY_BACKOFF`] when the
/// first attempt fails with an error `is_transient` accepts.
pub(crate) async fn retry_once_on_timeout<T, E, Fut, Op, P>(
    mut op: Op,
    is_transient: P,
) -> Result<T, E>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    match op().await {
        Err(error) if is_transient(&error) => {
            tokio::time::sleep(READ_RETRY_BACKOFF).await;
            op().await
        }
        result => result,
    }
}
