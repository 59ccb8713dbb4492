//! Bounding a store request by a deadline.

use std::future::Future;
use std::pin::pin;

use futures::future::{Either, select};

use crate::error::StoreError;

/// Races `operation` against `deadline`.
///
/// If the deadline resolves first, `on_expire` runs before the unfinished
/// operation is dropped, and the call fails with [`StoreError::Timeout`].
/// Dropping a future does not stop a request already handed to the browser,
/// so callers use `on_expire` to cancel it on the wire.
pub async fn with_deadline<T, F, D, E>(
    millis: u32,
    operation: F,
    deadline: D,
    on_expire: E,
) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
    D: Future<Output = ()>,
    E: FnOnce(),
{
    let operation = pin!(operation);
    let deadline = pin!(deadline);
    match select(operation, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            on_expire();
            Err(StoreError::Timeout { millis })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::{pending, ready};
    use std::cell::Cell;

    #[tokio::test]
    async fn finished_operation_wins_and_is_not_cancelled() {
        let expired = Cell::new(false);
        let result = with_deadline(50, ready(Ok(7)), pending(), || expired.set(true)).await;
        assert_eq!(result, Ok(7));
        assert!(!expired.get());
    }

    #[tokio::test]
    async fn operation_error_passes_through() {
        let expired = Cell::new(false);
        let result: Result<(), _> = with_deadline(
            50,
            ready(Err(StoreError::Network("offline".into()))),
            pending(),
            || expired.set(true),
        )
        .await;
        assert_eq!(result, Err(StoreError::Network("offline".into())));
        assert!(!expired.get());
    }

    #[tokio::test]
    async fn stalled_operation_is_cancelled_on_timeout() {
        let expired = Cell::new(false);
        let result: Result<(), _> =
            with_deadline(50, pending(), ready(()), || expired.set(true)).await;
        assert_eq!(result, Err(StoreError::Timeout { millis: 50 }));
        assert!(expired.get());
    }
}
