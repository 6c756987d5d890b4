//! The designated UI thread.
//!
//! Capability queries are handled on a single dedicated thread, and the
//! query filter must also be destroyed there. `UiThread` owns that thread
//! and its task queue; `UiBound` wraps a value so that dropping it from any
//! other thread defers the drop onto the UI thread.
//!
//! # Example
//!
//! ```no_run
//! use pepper_host_daemon::ui_thread::{UiBound, UiThread};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let ui = UiThread::spawn("ui")?;
//! let answer = ui.handle().invoke(|| 6 * 7).await?;
//! assert_eq!(answer, 42);
//!
//! let bound = UiBound::new(String::from("dropped on the UI thread"), ui.handle());
//! drop(bound);
//!
//! ui.shutdown();
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::mem::ManuallyDrop;
use std::ops::Deref;
use std::thread::{self, JoinHandle, ThreadId};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

type Task = Box<dyn FnOnce() + Send + 'static>;

enum Job {
    Run(Task),
    Quit,
}

/// The UI thread has stopped accepting tasks.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("UI thread is no longer running")]
pub struct UiThreadGone;

/// Owner of the UI thread.
pub struct UiThread {
    handle: UiThreadHandle,
    join: Option<JoinHandle<()>>,
}

impl UiThread {
    /// Start the thread and its task queue.
    pub fn spawn(name: &str) -> std::io::Result<Self> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        let thread_name = name.to_string();

        let join = thread::Builder::new().name(name.to_string()).spawn(move || {
            debug!("UI thread '{}' started", thread_name);
            while let Some(job) = rx.blocking_recv() {
                match job {
                    Job::Run(task) => task(),
                    Job::Quit => break,
                }
            }
            debug!("UI thread '{}' stopped", thread_name);
        })?;

        let handle = UiThreadHandle {
            tx,
            thread_id: join.thread().id(),
        };

        info!("Spawned UI thread '{}'", name);
        Ok(Self {
            handle,
            join: Some(join),
        })
    }

    pub fn handle(&self) -> UiThreadHandle {
        self.handle.clone()
    }

    /// Run every task queued so far, then stop the thread and wait for it.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(join) = self.join.take() else {
            return;
        };

        // Tasks posted before this point still run; later posts fail.
        let _ = self.handle.tx.send(Job::Quit);

        if join.thread().id() == thread::current().id() {
            warn!("UI thread asked to join itself, detaching instead");
            return;
        }
        if join.join().is_err() {
            warn!("UI thread panicked");
        }
    }
}

impl Drop for UiThread {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Cloneable handle used to post work to the UI thread.
#[derive(Clone)]
pub struct UiThreadHandle {
    tx: mpsc::UnboundedSender<Job>,
    thread_id: ThreadId,
}

impl fmt::Debug for UiThreadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiThreadHandle")
            .field("thread_id", &self.thread_id)
            .finish()
    }
}

impl UiThreadHandle {
    /// Whether the caller is running on the UI thread.
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.thread_id
    }

    /// Queue `task` to run on the UI thread.
    pub fn post<F>(&self, task: F) -> Result<(), UiThreadGone>
    where
        F: FnOnce() + Send + 'static,
    {
        self.tx
            .send(Job::Run(Box::new(task)))
            .map_err(|_| UiThreadGone)
    }

    /// Run `f` on the UI thread and wait for its result.
    pub async fn invoke<F, R>(&self, f: F) -> Result<R, UiThreadGone>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.post(move || {
            let _ = reply_tx.send(f());
        })?;
        reply_rx.await.map_err(|_| UiThreadGone)
    }

    /// Drop `value` on the UI thread.
    ///
    /// If the UI thread is gone the value is dropped on the caller's thread.
    pub fn delete_soon<T>(&self, value: T)
    where
        T: Send + 'static,
    {
        if self.post(move || drop(value)).is_err() {
            warn!("UI thread gone, dropping value on {:?}", thread::current().name());
        }
    }
}

/// A value that must be destroyed on the UI thread.
pub struct UiBound<T: Send + 'static> {
    value: ManuallyDrop<T>,
    ui: UiThreadHandle,
}

impl<T: Send + 'static> UiBound<T> {
    pub fn new(value: T, ui: UiThreadHandle) -> Self {
        Self {
            value: ManuallyDrop::new(value),
            ui,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn ui(&self) -> &UiThreadHandle {
        &self.ui
    }
}

impl<T: Send + 'static> Deref for UiBound<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: Send + 'static> Drop for UiBound<T> {
    fn drop(&mut self) {
        // SAFETY: `value` is never touched again after this.
        let value = unsafe { ManuallyDrop::take(&mut self.value) };
        if self.ui.is_current() {
            drop(value);
        } else {
            self.ui.delete_soon(value);
        }
    }
}
