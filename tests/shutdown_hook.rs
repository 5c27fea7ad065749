use fshelper::{DeferredWork, ExitHookRegistry, HookError, ShutdownHook};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

/// Registry double that records calls and, like a real runtime registry,
/// refuses duplicate adds and removals of absent hooks.
#[derive(Debug, Default)]
struct RecordingRegistry {
    adds: AtomicUsize,
    removes: AtomicUsize,
    present: Mutex<Vec<u64>>,
    refuse_adds: bool,
}

impl ExitHookRegistry for RecordingRegistry {
    fn add(&self, work: &DeferredWork) -> Result<(), HookError> {
        if self.refuse_adds {
            return Err(HookError::ShutdownInProgress);
        }
        let mut present = self.present.lock().unwrap();
        if present.contains(&work.id()) {
            return Err(HookError::AlreadyRegistered(work.name().to_string()));
        }
        present.push(work.id());
        self.adds.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, work: &DeferredWork) -> Result<(), HookError> {
        let mut present = self.present.lock().unwrap();
        let Some(pos) = present.iter().position(|id| *id == work.id()) else {
            return Err(HookError::NotRegistered(work.name().to_string()));
        };
        present.remove(pos);
        self.removes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn noop(name: &str) -> DeferredWork {
    DeferredWork::new(name, || {})
}

#[test]
fn starts_unregistered() {
    let registry = Arc::new(RecordingRegistry::default());
    let hook = ShutdownHook::with_registry(noop("idle"), Arc::clone(&registry));
    assert!(!hook.is_registered());
    assert_eq!(registry.adds.load(Ordering::SeqCst), 0);
}

#[test]
fn register_and_unregister_are_idempotent() {
    let registry = Arc::new(RecordingRegistry::default());
    let hook = ShutdownHook::with_registry(noop("cleanup"), Arc::clone(&registry));

    hook.register().unwrap();
    assert!(hook.is_registered());
    hook.register().unwrap();
    assert_eq!(registry.adds.load(Ordering::SeqCst), 1);

    hook.unregister().unwrap();
    assert!(!hook.is_registered());
    hook.unregister().unwrap();
    assert_eq!(registry.removes.load(Ordering::SeqCst), 1);

    // And the cycle can repeat.
    hook.register().unwrap();
    hook.unregister().unwrap();
    assert_eq!(registry.adds.load(Ordering::SeqCst), 2);
    assert_eq!(registry.removes.load(Ordering::SeqCst), 2);
}

#[test]
fn unregister_before_register_never_touches_registry() {
    let registry = RecordingRegistry::default();
    let hook = ShutdownHook::with_registry(noop("never"), &registry);

    hook.unregister().unwrap();

    assert_eq!(registry.removes.load(Ordering::SeqCst), 0);
    assert!(!hook.is_registered());
}

#[test]
fn refused_add_keeps_handle_unregistered() {
    let registry = RecordingRegistry {
        refuse_adds: true,
        ..Default::default()
    };
    let hook = ShutdownHook::with_registry(noop("late"), &registry);

    assert_eq!(hook.register(), Err(HookError::ShutdownInProgress));
    assert!(!hook.is_registered());
    hook.unregister().unwrap();
    assert_eq!(registry.removes.load(Ordering::SeqCst), 0);
}

#[test]
fn mixed_register_and_unregister_stay_consistent() {
    let registry = Arc::new(RecordingRegistry::default());
    let hook = Arc::new(ShutdownHook::with_registry(noop("racy"), Arc::clone(&registry)));
    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let hook = Arc::clone(&hook);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                if i % 2 == 0 {
                    hook.register()
                } else {
                    hook.register().and_then(|()| hook.unregister())
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap().expect("no registry error under contention");
    }

    // Every add was matched by at most one remove, and the flag agrees with the registry.
    let adds = registry.adds.load(Ordering::SeqCst);
    let removes = registry.removes.load(Ordering::SeqCst);
    let present = registry.present.lock().unwrap().len();
    assert_eq!(adds - removes, present);
    assert_eq!(hook.is_registered(), present == 1);
}

#[test]
fn concurrent_register_only_calls_add_once() {
    let registry = Arc::new(RecordingRegistry::default());
    let hook = Arc::new(ShutdownHook::with_registry(noop("many"), Arc::clone(&registry)));
    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let hook = Arc::clone(&hook);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                hook.register()
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap().expect("register never errors once added");
    }

    assert_eq!(registry.adds.load(Ordering::SeqCst), 1);
    assert!(hook.is_registered());
}

#[test]
fn concurrent_unregister_only_calls_remove_once() {
    let registry = Arc::new(RecordingRegistry::default());
    let hook = Arc::new(ShutdownHook::with_registry(noop("many"), Arc::clone(&registry)));
    hook.register().unwrap();
    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let hook = Arc::clone(&hook);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                hook.unregister()
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap().expect("unregister never errors once removed");
    }

    assert_eq!(registry.removes.load(Ordering::SeqCst), 1);
    assert!(!hook.is_registered());
    assert!(registry.present.lock().unwrap().is_empty());
}

#[test]
fn wrapped_work_is_the_one_given() {
    let counter = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&counter);
    let work = DeferredWork::new("count", move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    let registry = RecordingRegistry::default();
    let hook = ShutdownHook::with_registry(work.clone(), &registry);

    assert_eq!(hook.work(), &work);
    assert_eq!(hook.work().name(), "count");
    hook.work().run();
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}
