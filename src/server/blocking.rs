use crate::error::{Error, Result};

/// Runs CPU-bound work (password hashing) on the blocking pool, keeping the
/// caller's tracing span so log lines stay tied to their request.
pub async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(f))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))?
}
