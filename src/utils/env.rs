use std::env::VarError;

use crate::error::GopathsError;

/// Read/write access to environment variables.
///
/// The binary uses [`ProcessEnv`]; tests substitute an in-memory map so they
/// never touch the real process environment.
pub trait Environment {
    /// `Ok(None)` when unset; a value that is not UTF-8 is an error, never `None`.
    fn var(&self, key: &str) -> Result<Option<String>, GopathsError>;
    fn set_var(&mut self, key: &str, value: &str);
    fn remove_var(&mut self, key: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Result<Option<String>, GopathsError> {
        match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(GopathsError::NonUnicodeVar {
                name: key.to_string(),
            }),
        }
    }

    fn set_var(&mut self, key: &str, value: &str) {
        // SAFETY: gopaths is single-threaded; nothing reads the environment concurrently.
        unsafe { std::env::set_var(key, value) }
    }

    fn remove_var(&mut self, key: &str) {
        // SAFETY: see `set_var`.
        unsafe { std::env::remove_var(key) }
    }
}

#[cfg(test)]
pub use memory::MemoryEnv;


#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const SCRATCH_VAR: &str = "GOPATHS_TEST_SCRATCH";

    #[test]
    #[serial]
    fn process_env_round_trips_through_std() {
        let mut env = ProcessEnv;
        env.set_var(SCRATCH_VAR, "/tmp/scratch");
        assert_eq!(std::env::var(SCRATCH_VAR).as_deref(), Ok("/tmp/scratch"));
        assert_eq!(env.var(SCRATCH_VAR).expect("utf-8").as_deref(), Some("/tmp/scratch"));

        env.remove_var(SCRATCH_VAR);
        assert!(env.var(SCRATCH_VAR).expect("unset").is_none());
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn process_env_rejects_non_utf8_values() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        // SAFETY: serialised with the other process-env tests.
        unsafe { std::env::set_var(SCRATCH_VAR, OsStr::from_bytes(b"/usr/lib/g\xffo")) };
        let err = ProcessEnv.var(SCRATCH_VAR).expect_err("non-utf-8 value");
        unsafe { std::env::remove_var(SCRATCH_VAR) };

        assert!(matches!(err, GopathsError::NonUnicodeVar { ref name } if name == SCRATCH_VAR));
    }

    #[test]
    fn memory_env_is_isolated() {
        let mut env = MemoryEnv::with(&[("GOPATH", "/usr/lib/go")]);
        env.set_var("GOPATH", "/other");
        assert_eq!(env.var("GOPATH").expect("var").as_deref(), Some("/other"));
        env.remove_var("GOPATH");
        assert_eq!(env.var("GOPATH").expect("var"), None);
    }
}
