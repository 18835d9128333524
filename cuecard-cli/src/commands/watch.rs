//! Watch command implementation
//!
//! Keeps an in-memory snapshot of the library and replaces it wholesale every
//! time the directory watcher reports a settled change.

use crate::context::CliContext;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::{Context, Result};
use cuecard_prompts::{load_directory, DirectoryWatcher, Prompt, ReloadCallback};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Shared, replace-on-reload view of the prompts directory
pub type Snapshot = Arc<RwLock<Vec<Prompt>>>;

/// Reloads the snapshot on every watcher notification
pub struct SnapshotReloader {
    dir: PathBuf,
    snapshot: Snapshot,
    quiet: bool,
}

impl SnapshotReloader {
    pub fn new(dir: impl Into<PathBuf>, snapshot: Snapshot, quiet: bool) -> Self {
        Self {
            dir: dir.into(),
            snapshot,
            quiet,
        }
    }

    /// Load the directory and swap the snapshot. Returns the new prompt count.
    pub fn reload(&self) -> Result<usize> {
        let prompts = load_directory(&self.dir)?;
        let count = prompts.len();

        match self.snapshot.write() {
            Ok(mut guard) => *guard = prompts,
            Err(poisoned) => *poisoned.into_inner() = prompts,
        }
        Ok(count)
    }
}

impl ReloadCallback for SnapshotReloader {
    fn on_reload(&self) {
        match self.reload() {
            Ok(count) => {
                tracing::info!("Reloaded {} prompts from {}", count, self.dir.display());
                if !self.quiet {
                    println!("Reloaded: {count} prompts");
                }
            }
            Err(e) => tracing::error!("Reload failed: {:#}", e),
        }
    }

    fn on_error(&self, error: String) {
        tracing::warn!("Watcher error: {}", error);
    }
}

/// Watch the prompts directory until Ctrl-C
pub async fn handle_command(context: &CliContext) -> Result<i32> {
    let snapshot: Snapshot = Arc::new(RwLock::new(Vec::new()));
    let reloader = SnapshotReloader::new(&context.prompts_dir, snapshot.clone(), context.quiet);

    let initial = reloader.reload()?;
    context.status(format!(
        "Watching {} ({} prompts). Press Ctrl-C to stop.",
        context.prompts_dir.display(),
        initial
    ));

    let mut watcher = DirectoryWatcher::new(&context.prompts_dir, reloader);
    watcher.set_debounce(context.watch_debounce())?;
    watcher.start()?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;

    tokio::task::spawn_blocking(move || watcher.stop())
        .await
        .context("failed to stop watcher")?;
    context.status("Stopped watching");
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reload_replaces_snapshot() {
        let temp = TempDir::new().unwrap();
        let snapshot: Snapshot = Arc::new(RwLock::new(Vec::new()));
        let reloader = SnapshotReloader::new(temp.path(), snapshot.clone(), true);

        fs::write(temp.path().join("a.md"), "---\ntitle: A\n---\nA").unwrap();
        assert_eq!(reloader.reload().unwrap(), 1);
        assert_eq!(snapshot.read().unwrap()[0].title, "A");

        fs::write(temp.path().join("b.md"), "---\ntitle: B\n---\nB").unwrap();
        fs::remove_file(temp.path().join("a.md")).unwrap();
        reloader.on_reload();

        let titles: Vec<String> = snapshot
            .read()
            .unwrap()
            .iter()
            .map(|p| p.title.clone())
            .collect();
        assert_eq!(titles, vec!["B"]);
    }

    #[test]
    fn test_reload_missing_directory_keeps_snapshot() {
        let temp = TempDir::new().unwrap();
        let snapshot: Snapshot = Arc::new(RwLock::new(vec![Prompt::new("Old", "x")]));
        let reloader = SnapshotReloader::new(temp.path().join("gone"), snapshot.clone(), true);

        reloader.on_reload();
        assert_eq!(snapshot.read().unwrap().len(), 1);
    }
}
