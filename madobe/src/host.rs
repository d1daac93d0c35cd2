use std::sync::mpsc;

/// Value representation handed to host callbacks.
pub type HostValue = serde_json::Value;

/// Unit of work queued for the host execution context.
pub type HostTask = Box<dyn FnOnce() + Send + 'static>;

/// Submission side of the host work queue.
///
/// Clonable and usable from any thread. `submit` is fire-and-forget: the
/// calling thread never waits for the task to run, and a task submitted
/// after the loop is gone is dropped.
#[derive(Clone)]
pub struct HostHandle {
    tx: mpsc::Sender<HostTask>,
}

impl HostHandle {
    pub fn submit(&self, task: HostTask) {
        if self.tx.send(task).is_err() {
            tracing::debug!("Host queue closed, dropping task");
        }
    }
}

/// The host's single-threaded execution context. Tasks run in submission
/// order, on whichever thread owns the loop.
pub struct HostLoop {
    rx: mpsc::Receiver<HostTask>,
}

impl HostLoop {
    pub fn new() -> (HostLoop, HostHandle) {
        let (tx, rx) = mpsc::channel();
        (HostLoop { rx }, HostHandle { tx })
    }

    /// Run everything queued at this moment, then return.
    pub fn drain(&self) {
        while let Ok(task) = self.rx.try_recv() {
            task();
        }
    }

    /// Process tasks until every `HostHandle` has been dropped.
    pub fn run(self) {
        tracing::info!("Host loop started");
        while let Ok(task) = self.rx.recv() {
            task();
        }
        tracing::info!("Host loop exited");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_drain_runs_tasks_in_submission_order() {
        let (host, handle) = HostLoop::new();
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        for i in 0..3 {
            let order = Arc::clone(&order);
            handle.submit(Box::new(move || order.lock().unwrap().push(i)));
        }

        host.drain();
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_drain_returns_when_queue_is_empty() {
        let (host, handle) = HostLoop::new();
        host.drain();

        let ran = Arc::new(AtomicUsize::new(0));
        let ran_clone = Arc::clone(&ran);
        handle.submit(Box::new(move || {
            ran_clone.fetch_add(1, Ordering::SeqCst);
        }));

        host.drain();
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_submit_after_loop_dropped_does_not_panic() {
        let (host, handle) = HostLoop::new();
        drop(host);
        handle.submit(Box::new(|| panic!("must never run")));
    }

    #[test]
    fn test_run_exits_when_all_handles_dropped() {
        let (host, handle) = HostLoop::new();
        let ran = Arc::new(AtomicUsize::new(0));

        let ran_clone = Arc::clone(&ran);
        handle.submit(Box::new(move || {
            ran_clone.fetch_add(1, Ordering::SeqCst);
        }));
        drop(handle);

        host.run();
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_submit_from_other_thread() {
        let (host, handle) = HostLoop::new();
        let ran = Arc::new(AtomicUsize::new(0));

        let ran_clone = Arc::clone(&ran);
        let worker = std::thread::spawn(move || {
            handle.submit(Box::new(move || {
                ran_clone.fetch_add(1, Ordering::SeqCst);
            }));
        });
        worker.join().unwrap();

        host.run();
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }
}
