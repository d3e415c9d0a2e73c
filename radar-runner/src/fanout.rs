//! Settle-all fan-out: run every operation to completion, keep every outcome.

use futures::future::join_all;
use std::future::Future;

/// Outcome of one operation, tagged with the key it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct Settled<K, T, E> {
    pub key: K,
    pub outcome: Result<T, E>,
}

impl<K, T, E> Settled<K, T, E> {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Drive all operations concurrently and wait for every one to settle.
///
/// A failure never cancels or short-circuits the others. Outcomes come
/// back in input order, one per operation.
pub async fn settle_all<K, F, T, E, I>(ops: I) -> Vec<Settled<K, T, E>>
where
    I: IntoIterator<Item = (K, F)>,
    F: Future<Output = Result<T, E>>,
{
    join_all(
        ops.into_iter()
            .map(|(key, op)| async move { Settled { key, outcome: op.await } }),
    )
    .await
}

/// `(succeeded, failed)` counts.
pub fn tally<K, T, E>(settled: &[Settled<K, T, E>]) -> (usize, usize) {
    let ok = settled.iter().filter(|s| s.is_ok()).count();
    (ok, settled.len() - ok)
}
