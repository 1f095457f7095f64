//! Cancellable task handles
//!
//! The engine runs at most one timed activity per role (reveal, countdown,
//! post-evaluation delay). Each is held in a [`TaskSlot`] so starting a new
//! one always cancels its predecessor first, and cancellation is idempotent.

use std::future::Future;

use tokio::task::JoinHandle;

/// Handle to one spawned timed activity.
#[derive(Debug)]
pub struct TaskHandle {
    inner: JoinHandle<()>,
}

impl TaskHandle {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            inner: tokio::spawn(future),
        }
    }

    /// Best-effort cancellation. Cancelling twice, or cancelling a task
    /// that already finished, is a no-op.
    pub fn cancel(&self) {
        self.inner.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.inner.abort();
    }
}

/// Holder for at most one outstanding task of a given role.
#[derive(Debug, Default)]
pub struct TaskSlot {
    current: Option<TaskHandle>,
}

impl TaskSlot {
    /// Install a new task, cancelling whatever was running in this slot.
    pub fn replace(&mut self, handle: TaskHandle) {
        self.cancel();
        self.current = Some(handle);
    }

    /// Cancel and clear the slot. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.current
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_cancel_twice_same_as_once() {
        let (tx, mut rx) = mpsc::unbounded_channel::<u32>();
        let handle = TaskHandle::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            let _ = tx.send(1);
        });

        handle.cancel();
        handle.cancel();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err(), "cancelled task must not fire");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_finished_task_is_noop() {
        let handle = TaskHandle::spawn(async {});
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(handle.is_finished());
        handle.cancel();
        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_slot_replace_cancels_previous() {
        let (tx, mut rx) = mpsc::unbounded_channel::<u32>();

        let tx1 = tx.clone();
        let mut slot = TaskSlot::default();
        slot.replace(TaskHandle::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let _ = tx1.send(1);
        }));

        let tx2 = tx.clone();
        slot.replace(TaskHandle::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let _ = tx2.send(2);
        }));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(rx.try_recv().ok(), Some(2));
        assert!(rx.try_recv().is_err(), "superseded task must not fire");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slot_cancel_idempotent() {
        let mut slot = TaskSlot::default();
        slot.replace(TaskHandle::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }));
        assert!(slot.is_running());

        slot.cancel();
        slot.cancel();
        assert!(!slot.is_running());

        // Cancelling an empty slot is also fine.
        TaskSlot::default().cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_aborts() {
        let (tx, mut rx) = mpsc::unbounded_channel::<u32>();
        {
            let _handle = TaskHandle::spawn(async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                let _ = tx.send(1);
            });
        }
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }
}
