//! Exit-hook registry.
//!
//! `ExitHookRegistry` is the capability a `ShutdownHook` talks to. The
//! process-wide implementation keeps hooks in a global list that
//! `run_exit_hooks` drains exactly once, typically from a signal handler or
//! right before the process exits.
//!
//! Like most runtime hook registries it is strict: adding a hook twice,
//! removing one that is absent, or changing anything once shutdown has begun
//! is an error.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info};

use crate::errors::HookError;
use crate::shutdown;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A unit of work meant to run once, at process termination.
/// Clones share identity: they are the same hook as far as a registry cares.
#[derive(Clone)]
pub struct DeferredWork {
    id: u64,
    name: Arc<str>,
    task: Arc<dyn Fn() + Send + Sync>,
}

impl DeferredWork {
    pub fn new<F>(name: impl Into<String>, task: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            name: Arc::from(name.into()),
            task: Arc::new(task),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self) {
        (self.task)()
    }
}

impl fmt::Debug for DeferredWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredWork")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for DeferredWork {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DeferredWork {}

/// Somewhere deferred work can be added to and removed from.
pub trait ExitHookRegistry: Send + Sync {
    fn add(&self, work: &DeferredWork) -> Result<(), HookError>;
    fn remove(&self, work: &DeferredWork) -> Result<(), HookError>;
}

impl<T: ExitHookRegistry + ?Sized> ExitHookRegistry for Arc<T> {
    fn add(&self, work: &DeferredWork) -> Result<(), HookError> {
        (**self).add(work)
    }

    fn remove(&self, work: &DeferredWork) -> Result<(), HookError> {
        (**self).remove(work)
    }
}

impl<T: ExitHookRegistry + ?Sized> ExitHookRegistry for &T {
    fn add(&self, work: &DeferredWork) -> Result<(), HookError> {
        (**self).add(work)
    }

    fn remove(&self, work: &DeferredWork) -> Result<(), HookError> {
        (**self).remove(work)
    }
}

static PROCESS_HOOKS: Mutex<Vec<DeferredWork>> = Mutex::new(Vec::new());

fn process_hooks() -> MutexGuard<'static, Vec<DeferredWork>> {
    // The list is only ever pushed to or filtered; a panic cannot leave it torn.
    PROCESS_HOOKS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The process-global registry drained by [`run_exit_hooks`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExitHooks;

impl ExitHookRegistry for ProcessExitHooks {
    fn add(&self, work: &DeferredWork) -> Result<(), HookError> {
        let mut hooks = process_hooks();
        if shutdown::is_requested() {
            return Err(HookError::ShutdownInProgress);
        }
        if hooks.iter().any(|h| h == work) {
            return Err(HookError::AlreadyRegistered(work.name().to_string()));
        }
        hooks.push(work.clone());
        debug!(hook = work.name(), id = work.id(), "exit hook added");
        Ok(())
    }

    fn remove(&self, work: &DeferredWork) -> Result<(), HookError> {
        let mut hooks = process_hooks();
        if shutdown::is_requested() {
            return Err(HookError::ShutdownInProgress);
        }
        let Some(pos) = hooks.iter().position(|h| h == work) else {
            return Err(HookError::NotRegistered(work.name().to_string()));
        };
        hooks.remove(pos);
        debug!(hook = work.name(), id = work.id(), "exit hook removed");
        Ok(())
    }
}

/// Number of hooks currently in the process registry.
pub fn registered_hook_count() -> usize {
    process_hooks().len()
}

/// Request shutdown, then run every registered hook once, in registration order.
/// A panicking hook is logged and does not stop the rest. Returns how many ran.
pub fn run_exit_hooks() -> usize {
    let drained = {
        let mut hooks = process_hooks();
        shutdown::request();
        std::mem::take(&mut *hooks)
    };

    let count = drained.len();
    for work in drained {
        debug!(hook = work.name(), id = work.id(), "running exit hook");
        if panic::catch_unwind(AssertUnwindSafe(|| work.run())).is_err() {
            error!(hook = work.name(), id = work.id(), "exit hook panicked");
        }
    }
    if count > 0 {
        info!(count, "Ran exit hooks");
    }
    count
}
