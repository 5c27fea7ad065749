//! Idempotent handle around one exit hook.
//!
//! A `ShutdownHook` owns one `DeferredWork` and remembers whether it is in the
//! registry. `register` and `unregister` may be called any number of times, in
//! any order, from any thread: the registry sees at most one add per
//! registration and one remove per add.
//!
//! Once `run_exit_hooks` has drained the process registry, a handle that was
//! registered keeps reporting `is_registered() == true`: the hook already ran
//! and the registry is frozen, so `unregister` returns `ShutdownInProgress`
//! and the flag is left as it was.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use super::registry::{DeferredWork, ExitHookRegistry, ProcessExitHooks};
use crate::errors::HookError;

#[derive(Debug)]
pub struct ShutdownHook<R: ExitHookRegistry = ProcessExitHooks> {
    work: DeferredWork,
    registry: R,
    // Guards both the flag and the registry call that changes it.
    registered: Mutex<bool>,
}

impl ShutdownHook<ProcessExitHooks> {
    /// Wrap `work` for the process-wide registry. Starts unregistered.
    pub fn new(work: DeferredWork) -> Self {
        Self::with_registry(work, ProcessExitHooks)
    }
}

impl<R: ExitHookRegistry> ShutdownHook<R> {
    /// Wrap `work` for an arbitrary registry. Starts unregistered.
    pub fn with_registry(work: DeferredWork, registry: R) -> Self {
        Self {
            work,
            registry,
            registered: Mutex::new(false),
        }
    }

    pub fn work(&self) -> &DeferredWork {
        &self.work
    }

    fn state(&self) -> MutexGuard<'_, bool> {
        // The flag is only written after the registry call succeeded, so a
        // poisoned guard still holds the truth.
        self.registered.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_registered(&self) -> bool {
        *self.state()
    }

    /// Add the hook to the registry unless it is already there.
    /// On failure the handle stays unregistered.
    pub fn register(&self) -> Result<(), HookError> {
        let mut registered = self.state();
        if *registered {
            return Ok(());
        }
        self.registry.add(&self.work)?;
        *registered = true;
        debug!(hook = self.work.name(), "shutdown hook registered");
        Ok(())
    }

    /// Remove the hook from the registry unless it is already gone.
    /// On failure the handle stays registered.
    pub fn unregister(&self) -> Result<(), HookError> {
        let mut registered = self.state();
        if !*registered {
            return Ok(());
        }
        self.registry.remove(&self.work)?;
        *registered = false;
        debug!(hook = self.work.name(), "shutdown hook unregistered");
        Ok(())
    }
}
