//! Process exit hooks.
//! Provides the registry capability, the process-wide registry and the
//! idempotent `ShutdownHook` handle.

mod handle;
mod registry;

pub use handle::ShutdownHook;
pub use registry::{
    registered_hook_count, run_exit_hooks, DeferredWork, ExitHookRegistry, ProcessExitHooks,
};
