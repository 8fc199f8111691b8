//! Timer-driven silent draft saves.
//!
//! The controller is Idle while title and content are both empty and Armed
//! otherwise. Every title/content change re-arms it, replacing the running
//! timer with a fresh one. Each tick spawns at most one silent save; a tick
//! that lands while the previous save is still in flight is dropped, so two
//! concurrent creates can never race for the same draft.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::EditorMode;
use crate::domain::PostId;
use crate::error::EditorError;

/// Whatever performs the silent save on a tick.
#[async_trait]
pub trait SilentSave: Send + Sync + 'static {
    async fn save_silently(&self) -> Result<PostId, EditorError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveState {
    Idle,
    Armed,
}

/// Counters since the controller was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutosaveStats {
    pub ticks: u64,
    /// Silent saves started.
    pub attempts: u64,
    /// Ticks dropped because a save was still in flight.
    pub skipped: u64,
    pub failures: u64,
}

#[derive(Default)]
struct Counters {
    ticks: AtomicU64,
    attempts: AtomicU64,
    skipped: AtomicU64,
    failures: AtomicU64,
}

struct Shared {
    state: Mutex<AutosaveState>,
    in_flight: Arc<AsyncMutex<()>>,
    counters: Counters,
}

pub struct AutosaveController {
    period: Duration,
    mode: EditorMode,
    target: Arc<dyn SilentSave>,
    shared: Arc<Shared>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl AutosaveController {
    pub fn new(period: Duration, mode: EditorMode, target: Arc<dyn SilentSave>) -> Self {
        Self {
            period,
            mode,
            target,
            shared: Arc::new(Shared {
                state: Mutex::new(AutosaveState::Idle),
                in_flight: Arc::new(AsyncMutex::new(())),
                counters: Counters::default(),
            }),
            timer: Mutex::new(None),
        }
    }

    pub fn state(&self) -> AutosaveState {
        *self.shared.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn stats(&self) -> AutosaveStats {
        let c = &self.shared.counters;
        AutosaveStats {
            ticks: c.ticks.load(Ordering::SeqCst),
            attempts: c.attempts.load(Ordering::SeqCst),
            skipped: c.skipped.load(Ordering::SeqCst),
            failures: c.failures.load(Ordering::SeqCst),
        }
    }

    /// Re-evaluate after title or content changed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn sync(&self, has_meaningful_content: bool) {
        if has_meaningful_content {
            self.arm();
        } else {
            self.disarm();
        }
    }

    /// Cancel any scheduled tick and start a new timer.
    pub fn arm(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = timer.take() {
            previous.abort();
        }
        *self.shared.state.lock().unwrap_or_else(|e| e.into_inner()) = AutosaveState::Armed;

        let period = self.period;
        let mode = self.mode;
        let shared = self.shared.clone();
        let target = self.target.clone();

        *timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                shared.tick(mode, &target);
            }
        }));
        tracing::debug!(period_secs = period.as_secs(), "Autosave armed");
    }

    /// Tear the timer down and return to Idle. Saves already in flight finish.
    pub fn disarm(&self) {
        if let Some(previous) = self.timer.lock().unwrap_or_else(|e| e.into_inner()).take() {
            previous.abort();
            tracing::debug!("Autosave disarmed");
        }
        *self.shared.state.lock().unwrap_or_else(|e| e.into_inner()) = AutosaveState::Idle;
    }

    /// Wait for the silent save in flight, if any, to finish.
    pub async fn settle(&self) {
        drop(self.shared.in_flight.lock().await);
    }
}

impl Drop for AutosaveController {
    fn drop(&mut self) {
        self.disarm();
    }
}

impl Shared {
    fn tick(self: &Arc<Self>, mode: EditorMode, target: &Arc<dyn SilentSave>) {
        self.counters.ticks.fetch_add(1, Ordering::SeqCst);

        let armed = *self.state.lock().unwrap_or_else(|e| e.into_inner()) == AutosaveState::Armed;
        if !armed || mode != EditorMode::Create {
            return;
        }

        let Ok(guard) = self.in_flight.clone().try_lock_owned() else {
            self.counters.skipped.fetch_add(1, Ordering::SeqCst);
            tracing::debug!("Autosave tick dropped; previous save still in flight");
            return;
        };

        self.counters.attempts.fetch_add(1, Ordering::SeqCst);
        let shared = self.clone();
        let target = target.clone();

        // Detached from the timer task so re-arming never cancels a save.
        tokio::spawn(async move {
            let _guard = guard;
            match target.save_silently().await {
                Ok(id) => tracing::debug!(post_id = %id, "Autosaved draft"),
                Err(err) => {
                    shared.counters.failures.fetch_add(1, Ordering::SeqCst);
                    tracing::warn!(error = %err, "Autosave failed");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use std::sync::atomic::AtomicBool;

    const PERIOD: Duration = Duration::from_secs(30);

    #[derive(Default)]
    struct Target {
        calls: AtomicU64,
        fail: AtomicBool,
        delay: Mutex<Option<Duration>>,
    }

    #[async_trait]
    impl SilentSave for Target {
        async fn save_silently(&self) -> Result<PostId, EditorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = *self.delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(RemoteError::Transport("offline".into()).into());
            }
            Ok(PostId::new("draft-1"))
        }
    }

    fn controller(mode: EditorMode) -> (AutosaveController, Arc<Target>) {
        let target = Arc::new(Target::default());
        (AutosaveController::new(PERIOD, mode, target.clone()), target)
    }

    async fn wait(secs: u64) {
        tokio::time::sleep(Duration::from_secs(secs)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_until_content_appears() {
        let (autosave, target) = controller(EditorMode::Create);
        assert_eq!(autosave.state(), AutosaveState::Idle);

        wait(95).await;
        assert_eq!(target.calls.load(Ordering::SeqCst), 0);

        autosave.sync(true);
        assert_eq!(autosave.state(), AutosaveState::Armed);
        wait(31).await;
        assert_eq!(target.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_every_period_while_armed() {
        let (autosave, target) = controller(EditorMode::Create);
        autosave.sync(true);

        wait(95).await;

        assert_eq!(target.calls.load(Ordering::SeqCst), 3);
        assert_eq!(autosave.stats().ticks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_mode_never_saves() {
        let (autosave, target) = controller(EditorMode::Edit);
        autosave.sync(true);

        wait(65).await;

        assert_eq!(autosave.stats().ticks, 2);
        assert_eq!(target.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_restarts_timer() {
        let (autosave, target) = controller(EditorMode::Create);
        autosave.sync(true);
        wait(20).await;
        autosave.sync(true);

        wait(15).await;
        assert_eq!(target.calls.load(Ordering::SeqCst), 0);

        wait(16).await;
        assert_eq!(target.calls.load(Ordering::SeqCst), 1);
        assert_eq!(autosave.stats().ticks, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_content_disarms() {
        let (autosave, target) = controller(EditorMode::Create);
        autosave.sync(true);
        wait(10).await;

        autosave.sync(false);
        assert_eq!(autosave.state(), AutosaveState::Idle);
        wait(120).await;

        assert_eq!(autosave.stats().ticks, 0);
        assert_eq!(target.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_during_inflight_save_is_dropped() {
        let (autosave, target) = controller(EditorMode::Create);
        *target.delay.lock().unwrap() = Some(Duration::from_secs(45));
        autosave.sync(true);

        // Ticks at 30 (starts a save until 75), 60 (dropped), 90 (starts).
        wait(91).await;

        let stats = autosave.stats();
        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.attempts, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(target.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_for_inflight_save() {
        let (autosave, target) = controller(EditorMode::Create);
        *target.delay.lock().unwrap() = Some(Duration::from_secs(45));
        autosave.sync(true);
        wait(31).await;

        autosave.disarm();
        let started = Instant::now();
        autosave.settle().await;

        assert!(started.elapsed() >= Duration::from_secs(44));
        assert_eq!(target.calls.load(Ordering::SeqCst), 1);
        assert_eq!(autosave.stats().failures, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_do_not_stop_future_ticks() {
        let (autosave, target) = controller(EditorMode::Create);
        target.fail.store(true, Ordering::SeqCst);
        autosave.sync(true);

        wait(65).await;

        let stats = autosave.stats();
        assert_eq!(stats.attempts, 2);
        assert_eq!(stats.failures, 2);
        assert_eq!(autosave.state(), AutosaveState::Armed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let (autosave, target) = controller(EditorMode::Create);
        autosave.sync(true);
        drop(autosave);

        wait(65).await;

        assert_eq!(target.calls.load(Ordering::SeqCst), 0);
    }
}
