use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Opaque handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u64);

/// Deferred and background execution on the UI thread.
///
/// The browser implementation sits on `setTimeout` and the JS microtask
/// queue; tests plug in a tokio `LocalSet` with a paused clock.
pub trait Scheduler {
    /// Run `task` once after `delay`, unless cancelled first.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle;

    /// Cancel a scheduled task. Unknown or already-fired handles are ignored.
    fn cancel(&self, handle: TaskHandle);

    /// Drive a future to completion in the background.
    fn spawn(&self, future: LocalBoxFuture<'static, ()>);
}

/// Last-call-wins wrapper around a [`Scheduler`]: starting a new timer
/// always cancels the previous one, so at most one is alive.
pub struct Debouncer {
    scheduler: Rc<dyn Scheduler>,
    pending: Cell<Option<TaskHandle>>,
}

impl Debouncer {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            pending: Cell::new(None),
        }
    }

    /// Cancel any pending timer and schedule `task` after `delay`.
    pub fn restart(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.cancel();
        let handle = self.scheduler.schedule(delay, task);
        self.pending.set(Some(handle));
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Forget the pending handle once its timer has fired.
    pub fn fired(&self) {
        self.pending.set(None);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// [`Scheduler`] backed by browser timers (`gloo-timers`) and
/// `wasm-bindgen-futures`.
#[derive(Default)]
pub struct BrowserScheduler {
    next_id: Cell<u64>,
    timers: Rc<RefCell<HashMap<u64, gloo_timers::callback::Timeout>>>,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        let timers = Rc::clone(&self.timers);
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let timeout = gloo_timers::callback::Timeout::new(millis, move || {
            // The fired `Timeout` owns the closure running right now, so it
            // is released on a later tick instead of in place.
            if let Some(fired) = timers.borrow_mut().remove(&id) {
                wasm_bindgen_futures::spawn_local(async move { drop(fired) });
            }
            task();
        });
        self.timers.borrow_mut().insert(id, timeout);
        TaskHandle(id)
    }

    fn cancel(&self, handle: TaskHandle) {
        // Dropping the `Timeout` would also clear it; `cancel` is explicit.
        if let Some(timeout) = self.timers.borrow_mut().remove(&handle.0) {
            timeout.cancel();
        }
    }

    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(future);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records calls instead of running anything.
    #[derive(Default)]
    struct RecordingScheduler {
        scheduled: RefCell<Vec<(TaskHandle, Duration)>>,
        cancelled: RefCell<Vec<TaskHandle>>,
    }

    impl Scheduler for RecordingScheduler {
        fn schedule(&self, delay: Duration, _task: Box<dyn FnOnce()>) -> TaskHandle {
            let mut scheduled = self.scheduled.borrow_mut();
            let handle = TaskHandle(scheduled.len() as u64 + 1);
            scheduled.push((handle, delay));
            handle
        }

        fn cancel(&self, handle: TaskHandle) {
            self.cancelled.borrow_mut().push(handle);
        }

        fn spawn(&self, _future: LocalBoxFuture<'static, ()>) {}
    }

    #[test]
    fn test_restart_cancels_previous_timer() {
        let scheduler = Rc::new(RecordingScheduler::default());
        let debouncer = Debouncer::new(scheduler.clone());

        debouncer.restart(Duration::from_millis(300), Box::new(|| {}));
        debouncer.restart(Duration::from_millis(300), Box::new(|| {}));
        debouncer.restart(Duration::from_millis(300), Box::new(|| {}));

        assert_eq!(scheduler.scheduled.borrow().len(), 3);
        assert_eq!(
            *scheduler.cancelled.borrow(),
            vec![TaskHandle(1), TaskHandle(2)]
        );
        assert!(debouncer.is_pending());
    }

    #[test]
    fn test_cancel_without_pending_is_noop() {
        let scheduler = Rc::new(RecordingScheduler::default());
        let debouncer = Debouncer::new(scheduler.clone());
        debouncer.cancel();
        assert!(scheduler.cancelled.borrow().is_empty());
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_drop_cancels_pending() {
        let scheduler = Rc::new(RecordingScheduler::default());
        {
            let debouncer = Debouncer::new(scheduler.clone());
            debouncer.restart(Duration::from_millis(300), Box::new(|| {}));
        }
        assert_eq!(*scheduler.cancelled.borrow(), vec![TaskHandle(1)]);
    }
}
