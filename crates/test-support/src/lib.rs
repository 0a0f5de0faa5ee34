use std::sync::{Mutex, MutexGuard, OnceLock};

pub use tempfile;

pub fn test_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Overrides process environment variables for the lifetime of the guard.
///
/// Guards are serialized through [`test_lock`], and every touched variable is
/// restored (or removed) on drop.
pub struct TestEnvGuard {
    _lock: MutexGuard<'static, ()>,
    previous: Vec<(String, Option<String>)>,
}

impl TestEnvGuard {
    pub fn new(vars: &[(&str, Option<&str>)]) -> Self {
        let lock = test_lock().lock().unwrap_or_else(|err| err.into_inner());
        let mut previous = Vec::with_capacity(vars.len());

        for (key, value) in vars {
            previous.push((key.to_string(), std::env::var(key).ok()));
            // SAFETY: tests using TestEnvGuard are serialized by test_lock.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }

        Self {
            _lock: lock,
            previous,
        }
    }
}

impl Drop for TestEnvGuard {
    fn drop(&mut self) {
        // SAFETY: tests using TestEnvGuard are serialized by test_lock.
        unsafe {
            for (key, value) in self.previous.drain(..).rev() {
                match value {
                    Some(value) => std::env::set_var(&key, value),
                    None => std::env::remove_var(&key),
                }
            }
        }
    }
}
