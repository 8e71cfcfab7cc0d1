//! Shared test utilities for integration tests
//!
//! Provides centralized environment setup/teardown so tests that exercise
//! home-directory discovery and config loading stay isolated from the real
//! user environment and from each other.

use std::ffi::OsString;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
/// This prevents race conditions when tests run in parallel
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<OsString>,
    xdg_config_home: Option<OsString>,
    settle_vars: Vec<(OsString, OsString)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var_os("HOME"),
            xdg_config_home: std::env::var_os("XDG_CONFIG_HOME"),
            settle_vars: std::env::vars_os()
                .filter(|(key, _)| key.to_string_lossy().starts_with("SETTLE"))
                .collect(),
        }
    }

    fn restore(self) {
        match self.home {
            Some(orig) => std::env::set_var("HOME", orig),
            None => std::env::remove_var("HOME"),
        }
        match self.xdg_config_home {
            Some(orig) => std::env::set_var("XDG_CONFIG_HOME", orig),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
        for (key, value) in self.settle_vars {
            std::env::set_var(key, value);
        }
    }
}

/// Run a test with HOME and XDG_CONFIG_HOME pointed into a temp directory
///
/// This function:
/// - Sets HOME to `<test_dir>/home` and XDG_CONFIG_HOME to `<test_dir>/config`
/// - Removes any SETTLE-prefixed variables so config loading sees a clean slate
/// - Restores the original environment after the test
/// - Uses a global mutex to prevent race conditions in parallel test execution
pub fn with_home_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    let test_config_home = test_dir.path().join("config");
    std::fs::create_dir_all(&test_home).unwrap();
    std::fs::create_dir_all(&test_config_home).unwrap();

    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", &test_config_home);
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("SETTLE") {
            std::env::remove_var(key);
        }
    }

    let result = f();

    env_state.restore();

    result
}
