//! Debounced directory watching for prompt reloads
//!
//! A [`DirectoryWatcher`] observes one directory (non-recursively) and calls
//! back once a burst of `.md` changes has settled. The callback carries no
//! details about what changed: the expected reaction is to reload the whole
//! directory with [`load_directory`](crate::load_directory).
//!
//! # Example
//!
//! ```no_run
//! use cuecard_prompts::{load_directory, DirectoryWatcher};
//! use std::sync::{Arc, RwLock};
//!
//! # async fn run() -> cuecard_prompts::Result<()> {
//! let dir = "/home/me/prompts";
//! let library = Arc::new(RwLock::new(load_directory(dir)?));
//!
//! let snapshot = library.clone();
//! let mut watcher = DirectoryWatcher::new(dir, move || {
//!     if let Ok(prompts) = load_directory(dir) {
//!         if let Ok(mut guard) = snapshot.write() {
//!             *guard = prompts;
//!         }
//!     }
//! });
//! watcher.start()?;
//!
//! // Later...
//! watcher.stop();
//! # Ok(())
//! # }
//! ```

use crate::library::has_markdown_extension;
use cuecard_common::{CuecardError, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Quiet period after the last qualifying event before a reload fires
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Receives reload notifications from a [`DirectoryWatcher`]
///
/// Both methods run on a tokio worker thread, never on the thread that
/// started the watcher. They must not call [`DirectoryWatcher::stop`] on the
/// watcher that invoked them.
pub trait ReloadCallback: Send + Sync + 'static {
    /// Called once per settled burst of changes
    fn on_reload(&self);

    /// Called when the native watcher reports an error. Watching continues.
    fn on_error(&self, error: String) {
        let _ = error;
    }
}

impl<F> ReloadCallback for F
where
    F: Fn() + Send + Sync + 'static,
{
    fn on_reload(&self) {
        self()
    }
}

/// Lifecycle of a [`DirectoryWatcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    /// Created, not yet observing
    Idle,
    /// Observing the directory
    Watching,
    /// Stopped for good
    Stopped,
}

impl fmt::Display for WatcherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WatcherState::Idle => "idle",
            WatcherState::Watching => "watching",
            WatcherState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Open/closed flag shared by the event loop and [`DirectoryWatcher::stop`].
///
/// Callbacks run while holding the lock, so closing the gate waits for any
/// callback in flight.
type CallbackGate = Arc<Mutex<bool>>;

/// Watches a directory and invokes a [`ReloadCallback`] after changes settle
pub struct DirectoryWatcher {
    path: PathBuf,
    debounce: Duration,
    callback: Arc<dyn ReloadCallback>,
    state: WatcherState,
    gate: CallbackGate,
    /// Keeps the native subscription alive while watching
    native: Option<RecommendedWatcher>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl DirectoryWatcher {
    /// Create a watcher for `path`. Nothing is observed until [`start`](Self::start).
    pub fn new(path: impl Into<PathBuf>, callback: impl ReloadCallback) -> Self {
        Self {
            path: path.into(),
            debounce: DEFAULT_DEBOUNCE,
            callback: Arc::new(callback),
            state: WatcherState::Idle,
            gate: Arc::new(Mutex::new(true)),
            native: None,
            shutdown_tx: None,
            handle: None,
        }
    }

    /// The watched directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The configured debounce interval
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Current lifecycle state
    pub fn state(&self) -> WatcherState {
        self.state
    }

    /// Check if currently watching
    pub fn is_watching(&self) -> bool {
        self.state == WatcherState::Watching
    }

    /// Change the debounce interval. Only allowed before [`start`](Self::start).
    pub fn set_debounce(&mut self, debounce: Duration) -> Result<()> {
        if self.state != WatcherState::Idle {
            return Err(CuecardError::invalid_watcher_state(format!(
                "cannot change debounce while {}",
                self.state
            )));
        }
        self.debounce = debounce;
        Ok(())
    }

    /// Subscribe to filesystem events and spawn the event loop on the current
    /// tokio runtime.
    ///
    /// On failure the watcher stays idle.
    pub fn start(&mut self) -> Result<()> {
        if self.state != WatcherState::Idle {
            return Err(CuecardError::invalid_watcher_state(format!(
                "cannot start a watcher that is {}",
                self.state
            )));
        }

        let metadata = std::fs::metadata(&self.path)
            .map_err(|e| CuecardError::watcher_subscription(&self.path, e.to_string()))?;
        if !metadata.is_dir() {
            return Err(CuecardError::watcher_subscription(
                &self.path,
                "not a directory",
            ));
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| CuecardError::watcher_subscription(&self.path, e.to_string()))?;

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let mut native = RecommendedWatcher::new(
            move |result: notify::Result<Event>| {
                // The receiver is gone once the loop has exited
                let _ = event_tx.send(result);
            },
            notify::Config::default(),
        )
        .map_err(|e| CuecardError::watcher_subscription(&self.path, e.to_string()))?;

        native
            .watch(&self.path, RecursiveMode::NonRecursive)
            .map_err(|e| CuecardError::watcher_subscription(&self.path, e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = runtime.spawn(run_event_loop(
            event_rx,
            shutdown_rx,
            self.debounce,
            self.gate.clone(),
            self.callback.clone(),
        ));

        self.native = Some(native);
        self.shutdown_tx = Some(shutdown_tx);
        self.handle = Some(handle);
        self.state = WatcherState::Watching;

        tracing::info!(
            "Watching {} (debounce {:?})",
            self.path.display(),
            self.debounce
        );
        Ok(())
    }

    /// Stop watching. Idempotent.
    ///
    /// Blocks until a reload callback that is already running returns. Once
    /// this returns no callback will start.
    pub fn stop(&mut self) {
        match self.state {
            WatcherState::Stopped => return,
            WatcherState::Idle => {
                self.state = WatcherState::Stopped;
                return;
            }
            WatcherState::Watching => {}
        }

        *self.gate.lock().unwrap_or_else(PoisonError::into_inner) = false;

        // Dropping the native watcher ends the subscription
        self.native.take();

        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }

        self.state = WatcherState::Stopped;
        tracing::info!("Stopped watching {}", self.path.display());
    }
}

impl fmt::Debug for DirectoryWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryWatcher")
            .field("path", &self.path)
            .field("debounce", &self.debounce)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Drop for DirectoryWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Whether an event should schedule a reload.
///
/// Access events are read-only touches (including the reload's own reads)
/// and never qualify. Anything else qualifies if it names a `.md` path.
pub(crate) fn is_relevant_event(event: &Event) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    event.paths.iter().any(|path| has_markdown_extension(path))
}

/// Run `f` only while the gate is open, holding the gate for its duration
fn run_gated(gate: &Mutex<bool>, f: impl FnOnce()) {
    let open = gate.lock().unwrap_or_else(PoisonError::into_inner);
    if *open {
        f();
    } else {
        tracing::debug!("Watcher stopped, discarding callback");
    }
}

/// Resolves at `deadline`, or never when there is none
async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// The watcher's event loop.
///
/// Each qualifying event pushes the pending deadline out by `debounce`; the
/// callback fires when the deadline passes undisturbed.
pub(crate) async fn run_event_loop(
    mut events: mpsc::UnboundedReceiver<notify::Result<Event>>,
    mut shutdown: oneshot::Receiver<()>,
    debounce: Duration,
    gate: CallbackGate,
    callback: Arc<dyn ReloadCallback>,
) {
    let mut deadline: Option<Instant> = None;

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                tracing::debug!("Received shutdown signal, stopping directory watcher");
                break;
            }
            event = events.recv() => match event {
                Some(Ok(event)) => {
                    if is_relevant_event(&event) {
                        tracing::trace!("Change detected: {:?}", event);
                        deadline = Some(Instant::now() + debounce);
                    } else {
                        tracing::trace!("Ignoring event: {:?}", event.kind);
                    }
                }
                Some(Err(e)) => {
                    tracing::trace!("Forwarding watcher error: {}", e);
                    run_gated(&gate, || callback.on_error(e.to_string()));
                }
                None => {
                    tracing::debug!("Watch channel closed, stopping directory watcher");
                    break;
                }
            },
            _ = wait_for(deadline) => {
                deadline = None;
                tracing::debug!("Changes settled, reloading");
                run_gated(&gate, || callback.on_reload());
            }
        }
    }

    tracing::debug!("Directory watcher task exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    const TEST_DEBOUNCE: Duration = Duration::from_millis(50);

    #[derive(Default)]
    struct Counts {
        reloads: AtomicUsize,
        errors: AtomicUsize,
    }

    struct CountingCallback(Arc<Counts>);

    impl ReloadCallback for CountingCallback {
        fn on_reload(&self) {
            self.0.reloads.fetch_add(1, Ordering::SeqCst);
        }

        fn on_error(&self, _error: String) {
            self.0.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn event(kind: EventKind, path: &str) -> Event {
        Event {
            kind,
            paths: vec![PathBuf::from(path)],
            attrs: Default::default(),
        }
    }

    struct LoopHarness {
        events: mpsc::UnboundedSender<notify::Result<Event>>,
        shutdown: Option<oneshot::Sender<()>>,
        gate: CallbackGate,
        counts: Arc<Counts>,
        handle: JoinHandle<()>,
    }

    fn spawn_loop() -> LoopHarness {
        let (events, event_rx) = mpsc::unbounded_channel();
        let (shutdown, shutdown_rx) = oneshot::channel();
        let gate: CallbackGate = Arc::new(Mutex::new(true));
        let counts = Arc::new(Counts::default());
        let callback: Arc<dyn ReloadCallback> = Arc::new(CountingCallback(counts.clone()));

        let handle = tokio::spawn(run_event_loop(
            event_rx,
            shutdown_rx,
            TEST_DEBOUNCE,
            gate.clone(),
            callback,
        ));

        LoopHarness {
            events,
            shutdown: Some(shutdown),
            gate,
            counts,
            handle,
        }
    }

    async fn settle() {
        tokio::time::sleep(TEST_DEBOUNCE * 4).await;
    }

    #[test]
    fn test_relevant_events() {
        assert!(is_relevant_event(&event(
            EventKind::Create(CreateKind::File),
            "/p/a.md"
        )));
        assert!(is_relevant_event(&event(
            EventKind::Modify(ModifyKind::Any),
            "/p/A.MD"
        )));
        assert!(is_relevant_event(&event(
            EventKind::Remove(RemoveKind::File),
            "/p/readme.md"
        )));
        assert!(!is_relevant_event(&event(
            EventKind::Create(CreateKind::File),
            "/p/a.txt"
        )));
        assert!(!is_relevant_event(&event(
            EventKind::Access(AccessKind::Any),
            "/p/a.md"
        )));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_burst_fires_once() {
        let harness = spawn_loop();

        for i in 0..10 {
            let path = format!("/p/{i}.md");
            harness
                .events
                .send(Ok(event(EventKind::Modify(ModifyKind::Any), &path)))
                .unwrap();
        }

        settle().await;
        assert_eq!(harness.counts.reloads.load(Ordering::SeqCst), 1);

        harness
            .events
            .send(Ok(event(EventKind::Create(CreateKind::File), "/p/new.md")))
            .unwrap();
        settle().await;
        assert_eq!(harness.counts.reloads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_irrelevant_events_do_not_fire() {
        let harness = spawn_loop();

        harness
            .events
            .send(Ok(event(EventKind::Create(CreateKind::File), "/p/a.txt")))
            .unwrap();
        harness
            .events
            .send(Ok(event(EventKind::Access(AccessKind::Any), "/p/a.md")))
            .unwrap();

        settle().await;
        assert_eq!(harness.counts.reloads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_errors_forwarded_without_reload() {
        let harness = spawn_loop();

        harness
            .events
            .send(Err(notify::Error::generic("queue overflow")))
            .unwrap();

        settle().await;
        assert_eq!(harness.counts.errors.load(Ordering::SeqCst), 1);
        assert_eq!(harness.counts.reloads.load(Ordering::SeqCst), 0);
        assert!(!harness.handle.is_finished());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    // Current-thread runtime so the spawned loop sees the scoped subscriber
    #[tokio::test]
    async fn test_stream_errors_are_left_to_the_callback() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let harness = spawn_loop();
        harness
            .events
            .send(Err(notify::Error::generic("queue overflow")))
            .unwrap();
        settle().await;

        assert_eq!(harness.counts.errors.load(Ordering::SeqCst), 1);
        assert_eq!(logs.contents(), "");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_closed_gate_discards_pending_reload() {
        let harness = spawn_loop();

        harness
            .events
            .send(Ok(event(EventKind::Modify(ModifyKind::Any), "/p/a.md")))
            .unwrap();
        *harness.gate.lock().unwrap() = false;

        settle().await;
        assert_eq!(harness.counts.reloads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_shutdown_ends_loop() {
        let mut harness = spawn_loop();

        harness.shutdown.take().unwrap().send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(1), harness.handle)
            .await
            .expect("loop did not exit")
            .unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_closed_channel_ends_loop() {
        let harness = spawn_loop();

        drop(harness.events);
        tokio::time::timeout(Duration::from_secs(1), harness.handle)
            .await
            .expect("loop did not exit")
            .unwrap();
    }

    #[test]
    fn test_new_watcher_is_idle() {
        let watcher = DirectoryWatcher::new("/tmp", || {});
        assert_eq!(watcher.state(), WatcherState::Idle);
        assert!(!watcher.is_watching());
        assert_eq!(watcher.debounce(), DEFAULT_DEBOUNCE);
        assert_eq!(watcher.path(), Path::new("/tmp"));
    }

    #[test]
    fn test_stop_from_idle() {
        let mut watcher = DirectoryWatcher::new("/tmp", || {});
        watcher.stop();
        assert_eq!(watcher.state(), WatcherState::Stopped);
        watcher.stop();
        assert_eq!(watcher.state(), WatcherState::Stopped);

        assert!(matches!(
            watcher.start(),
            Err(CuecardError::InvalidWatcherState { .. })
        ));
        assert!(matches!(
            watcher.set_debounce(Duration::from_millis(10)),
            Err(CuecardError::InvalidWatcherState { .. })
        ));
    }

    #[test]
    fn test_start_without_runtime_fails() {
        let temp = TempDir::new().unwrap();
        let mut watcher = DirectoryWatcher::new(temp.path(), || {});

        let result = watcher.start();
        assert!(matches!(
            result,
            Err(CuecardError::WatcherSubscription { .. })
        ));
        assert_eq!(watcher.state(), WatcherState::Idle);
    }

    #[tokio::test]
    async fn test_start_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let mut watcher = DirectoryWatcher::new(temp.path().join("missing"), || {});

        assert!(matches!(
            watcher.start(),
            Err(CuecardError::WatcherSubscription { .. })
        ));
        assert_eq!(watcher.state(), WatcherState::Idle);
    }

    #[tokio::test]
    async fn test_start_on_file_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.md");
        std::fs::write(&file, "x").unwrap();
        let mut watcher = DirectoryWatcher::new(&file, || {});

        let error = watcher.start().unwrap_err();
        assert!(error.to_string().contains("not a directory"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_lifecycle_transitions() {
        let temp = TempDir::new().unwrap();
        let mut watcher = DirectoryWatcher::new(temp.path(), || {});

        watcher.set_debounce(TEST_DEBOUNCE).unwrap();
        watcher.start().unwrap();
        assert_eq!(watcher.state(), WatcherState::Watching);

        assert!(matches!(
            watcher.start(),
            Err(CuecardError::InvalidWatcherState { .. })
        ));
        assert!(matches!(
            watcher.set_debounce(DEFAULT_DEBOUNCE),
            Err(CuecardError::InvalidWatcherState { .. })
        ));
        assert_eq!(watcher.debounce(), TEST_DEBOUNCE);

        watcher.stop();
        assert_eq!(watcher.state(), WatcherState::Stopped);
        watcher.stop();
        assert_eq!(watcher.state(), WatcherState::Stopped);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_drop_stops_watching() {
        let temp = TempDir::new().unwrap();

        {
            let mut watcher = DirectoryWatcher::new(temp.path(), || {});
            watcher.start().unwrap();
            assert!(watcher.is_watching());
        }

        // No panic means drop worked correctly
    }
}
