//! Bridges an incremental model call to its two client-facing projections:
//! an ordered event stream closed by a terminal sentinel, or one buffered
//! string.
//!
//! Once a response has started streaming, the transport can no longer carry
//! a protocol-level error, so upstream failures become a visible text
//! fragment followed by normal termination.

use futures::{
    Stream, StreamExt,
    stream::{self, BoxStream},
};

use crate::domain::common::entities::app_errors::CoreError;

/// Literal marker closing an event stream.
pub const DONE_SENTINEL: &str = "[DONE]";

pub fn error_fragment(error: &CoreError) -> String {
    format!("Error generating response: {error}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEnvelope {
    Content(String),
    Done,
}

impl StreamEnvelope {
    /// Wire form: `{"content": ...}` for a fragment, the bare sentinel otherwise.
    pub fn to_frame(&self) -> String {
        match self {
            StreamEnvelope::Content(content) => {
                serde_json::json!({ "content": content }).to_string()
            }
            StreamEnvelope::Done => DONE_SENTINEL.to_string(),
        }
    }
}

/// Passes fragments through in order. The first upstream error is turned
/// into a final error fragment and the upstream is not polled again.
pub fn degrade_errors<S>(upstream: S) -> impl Stream<Item = String> + Send + 'static
where
    S: Stream<Item = Result<String, CoreError>> + Send + 'static,
{
    stream::unfold(Some(Box::pin(upstream)), |state| async move {
        let Some(mut upstream) = state else {
            return None;
        };

        match upstream.next().await {
            Some(Ok(fragment)) => Some((fragment, Some(upstream))),
            Some(Err(error)) => {
                tracing::warn!(%error, "upstream stream failed, closing with error fragment");
                Some((error_fragment(&error), None))
            }
            None => None,
        }
    })
}

/// A single lazily produced fragment sequence. Consuming it through either
/// projection uses it up, so a repeat needs a fresh model call.
pub struct FragmentBridge {
    fragments: BoxStream<'static, String>,
}

impl FragmentBridge {
    pub fn new<S>(upstream: S) -> Self
    where
        S: Stream<Item = Result<String, CoreError>> + Send + 'static,
    {
        Self {
            fragments: degrade_errors(upstream).boxed(),
        }
    }

    /// Bridge for a call that failed before producing anything.
    pub fn failed(error: CoreError) -> Self {
        Self::new(stream::iter([Err(error)]))
    }

    /// One envelope per fragment, then exactly one `Done`.
    pub fn into_events(self) -> impl Stream<Item = StreamEnvelope> + Send + 'static {
        self.fragments
            .map(StreamEnvelope::Content)
            .chain(stream::once(async { StreamEnvelope::Done }))
    }

    /// All fragments concatenated without separator.
    pub async fn collect_full(self) -> String {
        self.fragments.collect::<String>().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    fn fragments(items: &[&str]) -> Vec<Result<String, CoreError>> {
        items.iter().map(|item| Ok(item.to_string())).collect()
    }

    fn boom() -> CoreError {
        CoreError::ExternalServiceError("boom".to_string())
    }

    #[tokio::test]
    async fn test_collect_full_concatenates() {
        let bridge = FragmentBridge::new(stream::iter(fragments(&["A", "B", "C"])));
        assert_eq!(bridge.collect_full().await, "ABC");
    }

    #[tokio::test]
    async fn test_events_end_with_single_sentinel() {
        let bridge = FragmentBridge::new(stream::iter(fragments(&["A", "B"])));
        let events: Vec<StreamEnvelope> = bridge.into_events().collect().await;

        assert_eq!(
            events,
            vec![
                StreamEnvelope::Content("A".to_string()),
                StreamEnvelope::Content("B".to_string()),
                StreamEnvelope::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_upstream_yields_only_sentinel() {
        let bridge = FragmentBridge::new(stream::iter(fragments(&[])));
        let events: Vec<StreamEnvelope> = bridge.into_events().collect().await;
        assert_eq!(events, vec![StreamEnvelope::Done]);
    }

    #[tokio::test]
    async fn test_mid_stream_error_becomes_fragment() {
        let upstream = vec![Ok("A".to_string()), Err(boom()), Ok("lost".to_string())];

        let events: Vec<StreamEnvelope> = FragmentBridge::new(stream::iter(upstream.clone()))
            .into_events()
            .collect()
            .await;
        assert_eq!(
            events,
            vec![
                StreamEnvelope::Content("A".to_string()),
                StreamEnvelope::Content("Error generating response: boom".to_string()),
                StreamEnvelope::Done,
            ]
        );

        let full = FragmentBridge::new(stream::iter(upstream))
            .collect_full()
            .await;
        assert_eq!(full, "AError generating response: boom");
    }

    #[tokio::test]
    async fn test_failed_bridge_reports_error() {
        let events: Vec<StreamEnvelope> = FragmentBridge::failed(boom())
            .into_events()
            .collect()
            .await;
        assert_eq!(
            events,
            vec![
                StreamEnvelope::Content("Error generating response: boom".to_string()),
                StreamEnvelope::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_dropping_consumer_stops_pulling_upstream() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = pulled.clone();
        let upstream = stream::iter(fragments(&["A", "B", "C", "D"])).inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let first: Vec<StreamEnvelope> = FragmentBridge::new(upstream)
            .into_events()
            .take(1)
            .collect()
            .await;

        assert_eq!(first, vec![StreamEnvelope::Content("A".to_string())]);
        assert_eq!(pulled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_envelope_frames() {
        assert_eq!(
            StreamEnvelope::Content("Hi \"there\"\n".to_string()).to_frame(),
            r#"{"content":"Hi \"there\"\n"}"#
        );
        assert_eq!(StreamEnvelope::Done.to_frame(), "[DONE]");
    }
}
