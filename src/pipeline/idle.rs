//! Inactivity guard for streaming responses.

use std::time::Duration;

use futures::{stream, StreamExt};

use crate::error::Error;
use crate::BoxStream;

/// Abort a stream that goes quiet.
///
/// If no item arrives within `window`, the stream yields a terminal
/// [`Error::Timeout`] and ends, even when the overall request deadline has not
/// elapsed. This protects against a server that opens a stream and then
/// stalls indefinitely.
pub fn with_inactivity_timeout<T: Send + 'static>(
    input: BoxStream<'static, T>,
    window: Duration,
) -> BoxStream<'static, T> {
    let stream = stream::unfold(Some(input), move |state| async move {
        let mut input = state?;
        match tokio::time::timeout(window, input.next()).await {
            Ok(Some(item)) => Some((item, Some(input))),
            Ok(None) => None,
            Err(_) => Some((
                Err(Error::timeout(format!(
                    "no stream data received within {:?}",
                    window
                ))),
                None,
            )),
        }
    });
    Box::pin(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[test]
    fn passes_items_through_while_active() {
        tokio_test::block_on(async {
            let input: BoxStream<'static, u32> =
                Box::pin(stream::iter(vec![Ok(1), Ok(2), Ok(3)]));
            let mut guarded = with_inactivity_timeout(input, Duration::from_secs(5));

            let mut seen = Vec::new();
            while let Some(item) = guarded.next().await {
                seen.push(item.unwrap());
            }
            assert_eq!(seen, vec![1, 2, 3]);
        });
    }

    #[test]
    fn stalled_stream_yields_terminal_timeout() {
        tokio_test::block_on(async {
            let input: BoxStream<'static, u32> = Box::pin(stream::pending());
            let mut guarded = with_inactivity_timeout(input, Duration::from_millis(20));

            let first = guarded.next().await.expect("expected a timeout item");
            assert!(matches!(first, Err(Error::Timeout { .. })));
            assert!(guarded.next().await.is_none());
        });
    }
}
