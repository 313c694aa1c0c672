// Update loop - owns all dashboard state and drives cycles from a single pending deadline
use crate::application::dashboard_service::DashboardService;
use crate::application::error::DashboardError;
use crate::application::scheduler::UpdateScheduler;
use crate::domain::dashboard::DashboardSnapshot;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

const COMMAND_BUFFER: usize = 32;

/// External requests delivered into the loop between cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCommand {
    Pause,
    Resume,
    Toggle,
    SetInterval(u64),
    Reset,
    ToggleTheme,
}

struct Envelope {
    command: DashboardCommand,
    reply: oneshot::Sender<Arc<DashboardSnapshot>>,
}

/// Cloneable front door to a running update loop.
///
/// Every command answers with the snapshot published right after it was applied.
#[derive(Clone)]
pub struct DashboardHandle {
    commands: mpsc::Sender<Envelope>,
    snapshots: watch::Receiver<Arc<DashboardSnapshot>>,
}

impl DashboardHandle {
    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardSnapshot>> {
        self.snapshots.clone()
    }

    pub async fn send(&self, command: DashboardCommand) -> Result<Arc<DashboardSnapshot>, DashboardError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Envelope { command, reply })
            .await
            .map_err(|_| DashboardError::LoopStopped)?;
        response.await.map_err(|_| DashboardError::LoopStopped)
    }

    pub async fn pause(&self) -> Result<Arc<DashboardSnapshot>, DashboardError> {
        self.send(DashboardCommand::Pause).await
    }

    pub async fn resume(&self) -> Result<Arc<DashboardSnapshot>, DashboardError> {
        self.send(DashboardCommand::Resume).await
    }

    pub async fn toggle(&self) -> Result<Arc<DashboardSnapshot>, DashboardError> {
        self.send(DashboardCommand::Toggle).await
    }

    pub async fn set_interval(&self, millis: u64) -> Result<Arc<DashboardSnapshot>, DashboardError> {
        self.send(DashboardCommand::SetInterval(millis)).await
    }

    pub async fn reset(&self) -> Result<Arc<DashboardSnapshot>, DashboardError> {
        self.send(DashboardCommand::Reset).await
    }

    pub async fn toggle_theme(&self) -> Result<Arc<DashboardSnapshot>, DashboardError> {
        self.send(DashboardCommand::ToggleTheme).await
    }
}

pub struct UpdateLoop {
    service: DashboardService,
    scheduler: UpdateScheduler,
    commands: mpsc::Receiver<Envelope>,
    snapshots: watch::Sender<Arc<DashboardSnapshot>>,
}

impl UpdateLoop {
    /// Run the first cycle (when starting in the running state) and publish the
    /// initial snapshot, so the handle never observes an empty dashboard.
    pub fn new(mut service: DashboardService, mut scheduler: UpdateScheduler) -> (Self, DashboardHandle) {
        if scheduler.is_running() {
            service.run_cycle();
            scheduler.cycle_completed(now());
        }

        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let initial = Arc::new(service.snapshot(scheduler.state()));
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);

        let update_loop = Self {
            service,
            scheduler,
            commands: command_rx,
            snapshots: snapshot_tx,
        };
        let handle = DashboardHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        };
        (update_loop, handle)
    }

    pub fn spawn(service: DashboardService, scheduler: UpdateScheduler) -> (DashboardHandle, JoinHandle<()>) {
        let (update_loop, handle) = Self::new(service, scheduler);
        let task = tokio::spawn(update_loop.run());
        (handle, task)
    }

    /// Process commands and due cycles until every handle is dropped
    pub async fn run(mut self) {
        let state = self.scheduler.state();
        tracing::info!(
            running = state.running,
            interval_millis = state.interval_millis,
            "dashboard update loop started"
        );

        loop {
            let deadline = self.scheduler.pending_deadline();

            tokio::select! {
                envelope = self.commands.recv() => {
                    let Some(Envelope { command, reply }) = envelope else {
                        break;
                    };
                    self.apply(command);
                    let snapshot = self.publish();
                    let _ = reply.send(snapshot);
                }
                _ = wait_until(deadline) => {
                    if self.scheduler.take_due(now()) {
                        self.run_cycle();
                        self.publish();
                    }
                }
            }
        }

        tracing::info!(cycles = self.service.cycle(), "dashboard update loop stopped");
    }

    fn apply(&mut self, command: DashboardCommand) {
        match command {
            DashboardCommand::Pause => self.pause(),
            DashboardCommand::Resume => self.resume(),
            DashboardCommand::Toggle => {
                if self.scheduler.is_running() {
                    self.pause();
                } else {
                    self.resume();
                }
            }
            DashboardCommand::SetInterval(requested) => {
                let applied = self.scheduler.set_interval(requested);
                if applied != requested {
                    tracing::warn!(requested, applied, "update interval clamped");
                }
                tracing::info!(interval_millis = applied, "update interval changed");
            }
            DashboardCommand::Reset => self.service.reset(),
            DashboardCommand::ToggleTheme => {
                let theme = self.service.toggle_theme();
                tracing::info!(?theme, "theme toggled");
            }
        }
    }

    fn pause(&mut self) {
        if self.scheduler.pause() {
            tracing::info!(cycle = self.service.cycle(), "updates paused");
        }
    }

    fn resume(&mut self) {
        if self.scheduler.resume() {
            tracing::info!(cycle = self.service.cycle(), "updates resumed");
            self.run_cycle();
        }
    }

    fn run_cycle(&mut self) {
        self.service.run_cycle();
        self.scheduler.cycle_completed(now());
    }

    fn publish(&self) -> Arc<DashboardSnapshot> {
        let snapshot = Arc::new(self.service.snapshot(self.scheduler.state()));
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::DashboardConfig;
    use std::time::Duration;

    fn start(interval_millis: u64, running: bool) -> (DashboardHandle, JoinHandle<()>) {
        let mut config = DashboardConfig::default();
        config.generator.seed = Some(3);
        let service = DashboardService::new(&config);
        UpdateLoop::spawn(service, UpdateScheduler::new(interval_millis, running))
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    async fn advance_ms(millis: u64) {
        tokio::time::advance(Duration::from_millis(millis)).await;
        settle().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_cycle_runs_immediately() {
        let (handle, _task) = start(1500, true);
        let snapshot = handle.snapshot();

        assert_eq!(snapshot.cycle, 1);
        assert_eq!(snapshot.series.len(), 11);
        assert_eq!(snapshot.activity.len(), 1);
        assert!(snapshot.schedule.running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycles_follow_interval() {
        let (handle, _task) = start(1500, true);

        advance_ms(1499).await;
        assert_eq!(handle.snapshot().cycle, 1);
        advance_ms(1).await;
        assert_eq!(handle.snapshot().cycle, 2);
        advance_ms(1500).await;
        assert_eq!(handle.snapshot().cycle, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_then_resume_fires_one_cycle() {
        let (handle, _task) = start(1500, true);

        let paused = handle.pause().await.unwrap();
        assert!(!paused.schedule.running);
        assert_eq!(paused.cycle, 1);

        advance_ms(5000).await;
        assert_eq!(handle.snapshot().cycle, 1);

        let resumed = handle.resume().await.unwrap();
        assert!(resumed.schedule.running);
        assert_eq!(resumed.cycle, 2);

        advance_ms(1499).await;
        assert_eq!(handle.snapshot().cycle, 2);
        advance_ms(1).await;
        assert_eq!(handle.snapshot().cycle, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_while_running_is_noop() {
        let (handle, _task) = start(1500, true);
        let snapshot = handle.resume().await.unwrap();
        assert_eq!(snapshot.cycle, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_flips_running_state() {
        let (handle, _task) = start(1500, true);

        assert!(!handle.toggle().await.unwrap().schedule.running);
        let resumed = handle.toggle().await.unwrap();
        assert!(resumed.schedule.running);
        assert_eq!(resumed.cycle, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_change_keeps_pending_cycle() {
        let (handle, _task) = start(1500, true);

        advance_ms(1000).await;
        let snapshot = handle.set_interval(500).await.unwrap();
        assert_eq!(snapshot.schedule.interval_millis, 500);

        advance_ms(499).await;
        assert_eq!(handle.snapshot().cycle, 1);
        advance_ms(1).await;
        assert_eq!(handle.snapshot().cycle, 2);

        advance_ms(499).await;
        assert_eq!(handle.snapshot().cycle, 2);
        advance_ms(1).await;
        assert_eq!(handle.snapshot().cycle, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_request_is_clamped() {
        let (handle, _task) = start(1500, true);

        assert_eq!(handle.set_interval(1).await.unwrap().schedule.interval_millis, 100);
        assert_eq!(handle.set_interval(50_000).await.unwrap().schedule.interval_millis, 10_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_while_paused_does_not_schedule() {
        let (handle, _task) = start(1500, true);
        handle.pause().await.unwrap();

        let snapshot = handle.reset().await.unwrap();
        assert!(snapshot.series.is_empty());
        assert_eq!(snapshot.activity.len(), 1);
        assert_eq!(snapshot.activity[0].title, "System Reset");
        assert!(!snapshot.schedule.running);
        assert_eq!(snapshot.cycle, 1);

        advance_ms(10_000).await;
        assert_eq!(handle.snapshot().cycle, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_while_running_keeps_schedule() {
        let (handle, _task) = start(1500, true);

        advance_ms(700).await;
        handle.reset().await.unwrap();

        advance_ms(800).await;
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.cycle, 2);
        assert_eq!(snapshot.series.len(), 1);
        assert_eq!(snapshot.activity.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_paused_waits_for_resume() {
        let (handle, _task) = start(1500, false);
        assert_eq!(handle.snapshot().cycle, 0);

        advance_ms(3000).await;
        assert_eq!(handle.snapshot().cycle, 0);

        assert_eq!(handle.resume().await.unwrap().cycle, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_new_cycles() {
        let (handle, _task) = start(1500, true);
        let mut rx = handle.subscribe();
        let _ = rx.borrow_and_update();

        advance_ms(1500).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().cycle, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_exits_when_handles_dropped() {
        let (handle, task) = start(1500, true);
        drop(handle);
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_commands_fail_after_loop_stops() {
        let (handle, task) = start(1500, true);
        task.abort();
        let _ = task.await;

        assert!(matches!(handle.pause().await, Err(DashboardError::LoopStopped)));
        assert_eq!(handle.snapshot().cycle, 1);
    }
}
