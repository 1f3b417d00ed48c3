use crate::error::{EasyToolsError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Waits a bounded time for something outside the process to become
/// available, then caches it.
///
/// A successful probe is cached for every later call. A timeout leaves the
/// gate empty, so the next call starts a fresh wait.
pub struct ReadyGate<T> {
    what: String,
    poll_interval: Duration,
    timeout: Duration,
    ready: Mutex<Option<Arc<T>>>,
}

impl<T> ReadyGate<T> {
    pub fn new(what: impl Into<String>, poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            what: what.into(),
            poll_interval,
            timeout,
            ready: Mutex::new(None),
        }
    }

    pub fn with_defaults(what: impl Into<String>) -> Self {
        Self::new(what, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT)
    }

    pub async fn is_ready(&self) -> bool {
        self.ready.lock().await.is_some()
    }

    /// Idempotent: concurrent callers serialize on the gate and only one
    /// probe loop runs at a time.
    pub async fn ensure_ready<F>(&self, mut probe: F) -> Result<Arc<T>>
    where
        F: FnMut() -> Option<T>,
    {
        let mut slot = self.ready.lock().await;
        if let Some(value) = slot.as_ref() {
            return Ok(Arc::clone(value));
        }

        let started = Instant::now();
        loop {
            if let Some(value) = probe() {
                let value = Arc::new(value);
                *slot = Some(Arc::clone(&value));
                debug!("{} ready after {:?}", self.what, started.elapsed());
                return Ok(value);
            }

            let waited = started.elapsed();
            if waited >= self.timeout {
                warn!("Gave up waiting for {} after {:?}", self.what, waited);
                return Err(EasyToolsError::Timeout {
                    what: self.what.clone(),
                    waited_ms: waited.as_millis(),
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Waits for `path` to exist as a regular file. `None` timeout means check
/// once and fail immediately if missing.
pub async fn wait_for_file(path: &Path, timeout: Option<Duration>) -> Result<PathBuf> {
    let Some(timeout) = timeout else {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(EasyToolsError::FileNotFound {
            path: path.display().to_string(),
        });
    };

    info!("Waiting up to {:?} for {}", timeout, path.display());
    let gate = ReadyGate::new(path.display().to_string(), DEFAULT_POLL_INTERVAL, timeout);
    let found = gate
        .ensure_ready(|| path.is_file().then(|| path.to_path_buf()))
        .await?;
    Ok((*found).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_success_is_cached() {
        let gate = ReadyGate::with_defaults("value");
        let calls = AtomicUsize::new(0);

        let first = gate
            .ensure_ready(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(42)
            })
            .await
            .unwrap();
        let second = gate
            .ensure_ready(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(7)
            })
            .await
            .unwrap();

        assert_eq!(*first, 42);
        assert_eq!(*second, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(gate.is_ready().await);
    }

    #[tokio::test]
    async fn test_polls_until_available() {
        let gate = ReadyGate::new("counter", Duration::from_millis(1), Duration::from_secs(5));
        let mut attempts = 0;
        let value = gate
            .ensure_ready(|| {
                attempts += 1;
                (attempts >= 3).then_some("loaded")
            })
            .await
            .unwrap();
        assert_eq!(*value, "loaded");
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn test_timeout_is_not_cached() {
        let gate: ReadyGate<u8> =
            ReadyGate::new("never", Duration::from_millis(1), Duration::from_millis(20));

        let err = gate.ensure_ready(|| None).await.unwrap_err();
        assert!(matches!(err, EasyToolsError::Timeout { .. }));
        assert!(!gate.is_ready().await);

        let value = gate.ensure_ready(|| Some(1)).await.unwrap();
        assert_eq!(*value, 1);
    }

    #[tokio::test]
    async fn test_wait_for_file_sees_late_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.pdf");

        let writer_path = path.clone();
        let writer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            tokio::fs::write(&writer_path, b"%PDF").await.unwrap();
        });

        let found = wait_for_file(&path, Some(Duration::from_secs(5))).await.unwrap();
        assert_eq!(found, path);
        writer.await.unwrap();
    }

    #[tokio::test]
    async fn test_wait_for_file_without_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.pdf");
        assert!(matches!(
            wait_for_file(&missing, None).await,
            Err(EasyToolsError::FileNotFound { .. })
        ));
    }
}
