//! Concurrent fan-out of independent pipelines.

use crate::error::{FpError, Result};
use futures_util::stream::{self, FuturesUnordered};
use std::future::Future;
use tracing::warn;

/// Run every pipeline concurrently and return their results in input order.
///
/// Each pipeline is spawned on the ambient Tokio runtime, so this must be
/// awaited from inside one. The first failure (in completion order) is
/// returned immediately; pipelines still running are detached and their
/// results discarded.
///
/// # Errors
/// The first pipeline error, or [`FpError::Join`] if a pipeline panicked.
pub async fn all<I, F, T>(pipelines: I) -> Result<Vec<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let mut running: FuturesUnordered<_> = pipelines
        .into_iter()
        .enumerate()
        .map(|(idx, fut)| {
            let handle = tokio::spawn(fut);
            async move { (idx, handle.await) }
        })
        .collect();

    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(running.len()).collect();
    while let Some((idx, joined)) = stream::StreamExt::next(&mut running).await {
        let outcome = joined.map_err(|e| FpError::Join(e.to_string())).and_then(|r| r);
        match outcome {
            Ok(v) => slots[idx] = Some(v),
            Err(e) => {
                warn!(
                    pipeline = idx,
                    error = %e,
                    pending = running.len(),
                    "pipeline failed; abandoning the rest"
                );
                return Err(e);
            }
        }
    }
    Ok(slots.into_iter().flatten().collect())
}
