use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{MANAGED_VAR, TARGET_VAR};
use crate::error::GopathsError;
use crate::repos::RepoRecord;
use crate::repos::compose;
use crate::repos::store::RepoStore;
use crate::utils::env::Environment;
use crate::utils::paths::strip_suffix_segment;
use crate::utils::shell::state_line;

/// One loaded repo store plus the environment it is applied to.
pub struct App<E: Environment> {
    store: RepoStore,
    record: RepoRecord,
    env: E,
}

impl<E: Environment> App<E> {
    /// Load the store and capture the baseline GOPATH on first use.
    pub fn open(store: RepoStore, env: E) -> Result<Self, GopathsError> {
        let record = store.load()?;
        let mut app = Self { store, record, env };
        if app.capture_baseline()? {
            app.store.save(&app.record)?;
        }
        Ok(app)
    }

    #[cfg(test)]
    pub fn record(&self) -> &RepoRecord {
        &self.record
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    #[cfg(test)]
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Emit the shell assignment, or apply it to this process when `emit` is off.
    pub fn init(&mut self, emit: bool) -> Option<String> {
        if emit {
            Some(self.shell_line(true))
        } else {
            self.enable();
            None
        }
    }

    /// The line a shell evals to reach the enabled (or baseline) state.
    ///
    /// It carries `GOPATHS_MANAGED` too, so a later first run in that shell
    /// can tell the composed GOPATH apart from the baseline.
    pub fn shell_line(&self, enabled: bool) -> String {
        if enabled {
            state_line(
                TARGET_VAR,
                &compose::compose(&self.record),
                MANAGED_VAR,
                &compose::managed_segment(&self.record),
            )
        } else {
            state_line(TARGET_VAR, self.record.baseline(), MANAGED_VAR, "")
        }
    }

    /// Install the composed value into this process's GOPATH and return it.
    pub fn enable(&mut self) -> String {
        let value = compose::compose(&self.record);
        let managed = compose::managed_segment(&self.record);
        self.env.set_var(TARGET_VAR, &value);
        if managed.is_empty() {
            self.env.remove_var(MANAGED_VAR);
        } else {
            self.env.set_var(MANAGED_VAR, &managed);
        }
        debug!(gopath = %value, "enabled managed paths");
        value
    }

    /// Put the baseline back into this process's GOPATH and return it.
    pub fn disable(&mut self) -> String {
        let baseline = self.record.baseline().to_string();
        self.env.set_var(TARGET_VAR, &baseline);
        self.env.remove_var(MANAGED_VAR);
        debug!(gopath = %baseline, "restored baseline");
        baseline
    }

    pub fn add(
        &mut self,
        candidates: &[String],
        cwd: &Path,
    ) -> Result<Vec<String>, GopathsError> {
        let added = compose::add_paths(&mut self.record, candidates, cwd)?;
        self.persist_if(!added.is_empty())?;
        Ok(added)
    }

    pub fn remove(
        &mut self,
        candidates: &[String],
        remove_all: bool,
        cwd: &Path,
    ) -> Result<Vec<String>, GopathsError> {
        let removed = compose::remove_paths(&mut self.record, candidates, remove_all, cwd)?;
        self.persist_if(!removed.is_empty())?;
        Ok(removed)
    }

    pub fn enable_paths(
        &mut self,
        candidates: &[String],
        cwd: &Path,
    ) -> Result<Vec<String>, GopathsError> {
        let enabled = compose::enable_paths(&mut self.record, candidates, cwd)?;
        self.persist_if(!enabled.is_empty())?;
        Ok(enabled)
    }

    pub fn disable_paths(
        &mut self,
        candidates: &[String],
        cwd: &Path,
    ) -> Result<Vec<String>, GopathsError> {
        let disabled = compose::disable_paths(&mut self.record, candidates, cwd)?;
        self.persist_if(!disabled.is_empty())?;
        Ok(disabled)
    }

    /// Human-readable dump of the record and the value it composes to.
    pub fn show(&self) -> String {
        let record = &self.record;
        let mut lines = vec![
            format!("store: {}", self.store.path().display()),
            format!("version: {}", record.version),
        ];
        lines.push(match record.baseline_path_value.as_deref() {
            Some(baseline) => format!("baseline: {baseline}"),
            None => "baseline: (not captured)".to_string(),
        });
        if record.managed_paths.is_empty() {
            lines.push("managed: (none)".to_string());
        } else {
            lines.push("managed:".to_string());
            for path in &record.managed_paths {
                if record.is_disabled(path) {
                    lines.push(format!("  {path} (disabled)"));
                } else {
                    lines.push(format!("  {path}"));
                }
            }
        }
        lines.push(format!("{TARGET_VAR}: {}", compose::compose(record)));
        lines.join("\n") + "\n"
    }

    fn capture_baseline(&mut self) -> Result<bool, GopathsError> {
        if self.record.baseline_path_value.is_some() {
            return Ok(false);
        }
        let current = self.env.var(TARGET_VAR)?.unwrap_or_default();
        // A GOPATH we composed earlier must not become the baseline.
        let baseline = self
            .env
            .var(MANAGED_VAR)?
            .and_then(|segment| strip_suffix_segment(&current, &segment).map(str::to_string))
            .unwrap_or_else(|| current.clone());
        info!(baseline = %baseline, "captured baseline {TARGET_VAR}");
        Ok(self.record.capture_baseline(&baseline))
    }

    fn persist_if(&self, changed: bool) -> Result<(), GopathsError> {
        if changed {
            self.store.save(&self.record)?;
        }
        Ok(())
    }
}

pub fn current_dir() -> Result<PathBuf, GopathsError> {
    std::env::current_dir().map_err(|source| GopathsError::Io {
        what: "resolving current working directory",
        source,
    })
}
