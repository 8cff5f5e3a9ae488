use std::future::Future;

use tokio::runtime::Runtime;

/// Owns the tokio runtime the fetch tasks run on. The UI thread never
/// blocks on it; results come back over the message channel.
pub struct AsyncRuntime {
    runtime: Runtime,
}

impl AsyncRuntime {
    pub fn new() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("citadel-fetch")
            .build()?;
        Ok(Self { runtime })
    }

    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(future);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_spawned_task_delivers() {
        let runtime = AsyncRuntime::new().unwrap();
        let (tx, rx) = mpsc::channel();

        runtime.spawn(async move {
            let _ = tx.send(42u32);
        });

        let value = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
        assert_eq!(value, 42);
    }
}
