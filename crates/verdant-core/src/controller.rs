// ── Controller abstraction ──
//
// Full lifecycle for one greenhouse backend connection: the combined
// reads that keep SyncState fresh, the polling scheduler that drives
// them, and the gated command dispatch with mandatory resync after
// every write.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use verdant_api::GreenhouseClient;
use verdant_api::model::{Actuator, ActuatorSet, OperationMode, SensorSnapshot, SwitchState};
use verdant_api::transport::TransportConfig;

use crate::command::{Command, CommandEnvelope, CommandResult};
use crate::config::ControllerConfig;
use crate::error::CoreError;
use crate::gate;
use crate::store::{Slice, SyncState, SyncStatus};

const COMMAND_CHANNEL_SIZE: usize = 16;

// ── Controller ───────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc`. Owns the HTTP client, the SyncState
/// store, the polling scheduler, and the command processor task.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    client: GreenhouseClient,
    store: Arc<SyncState>,
    command_tx: mpsc::Sender<CommandEnvelope>,
    command_rx: Mutex<Option<mpsc::Receiver<CommandEnvelope>>>,
    command_task: Mutex<Option<JoinHandle<()>>>,
    cancel: CancellationToken,
    poller: Mutex<Option<PollHandle>>,
}

/// The armed polling task: its cancellation token and join handle.
/// Arm/cancel are paired on every exit path so two polling loops can
/// never run concurrently.
struct PollHandle {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Controller {
    /// Create a new Controller from configuration. Does not issue any
    /// requests -- call [`start()`](Self::start) to sync and spawn
    /// background tasks.
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = GreenhouseClient::new(config.base_url.clone(), &transport)?;
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);

        Ok(Self {
            inner: Arc::new(ControllerInner {
                config,
                client,
                store: Arc::new(SyncState::new()),
                command_tx,
                command_rx: Mutex::new(Some(command_rx)),
                command_task: Mutex::new(None),
                cancel: CancellationToken::new(),
                poller: Mutex::new(None),
            }),
        })
    }

    /// Access the controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    /// Access the underlying SyncState store.
    pub fn store(&self) -> &Arc<SyncState> {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Start the controller: spawn the command processor, perform the
    /// initial combined read, and arm the polling scheduler if
    /// auto-refresh is configured on.
    ///
    /// The returned result reflects the initial read; its failures are
    /// also recorded in the store, so callers driving a UI may ignore it.
    pub async fn start(&self) -> Result<(), CoreError> {
        if let Some(rx) = self.inner.command_rx.lock().await.take() {
            let ctrl = self.clone();
            *self.inner.command_task.lock().await =
                Some(tokio::spawn(command_processor_task(ctrl, rx)));
        }

        let result = self.fetch_all().await;

        if self.inner.config.auto_refresh {
            // The initial read just ran; arm without an immediate tick.
            self.arm_poller(false).await;
        }

        debug!("controller started");
        result
    }

    /// Stop background tasks. Idempotent; in-flight requests run to
    /// completion but no further polls or commands are processed.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        self.disarm_poller().await;
        if let Some(handle) = self.inner.command_task.lock().await.take() {
            let _ = handle.await;
        }
        debug!("controller stopped");
    }

    /// One-shot: start, run closure, shut down.
    ///
    /// Optimized for CLI use: auto-refresh is forced off since only a
    /// single request-response cycle is needed.
    pub async fn oneshot<F, Fut, T>(config: ControllerConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Controller) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.auto_refresh = false;

        let controller = Controller::new(cfg)?;
        if let Err(err) = controller.start().await {
            controller.shutdown().await;
            return Err(err);
        }
        let result = f(controller.clone()).await;
        controller.shutdown().await;
        result
    }

    // ── Polling scheduler ────────────────────────────────────────────

    /// Toggle auto-refresh. Idempotent in both directions.
    ///
    /// Enabling triggers one immediate combined read and arms the 3 s
    /// repeating timer; disabling cancels the timer without fetching.
    pub async fn set_auto_refresh(&self, enabled: bool) {
        if enabled {
            self.arm_poller(true).await;
        } else {
            self.disarm_poller().await;
        }
    }

    /// Whether the polling scheduler is currently armed.
    pub async fn auto_refresh(&self) -> bool {
        self.inner.poller.lock().await.is_some()
    }

    async fn arm_poller(&self, immediate: bool) {
        let mut slot = self.inner.poller.lock().await;
        if slot.is_some() {
            return;
        }

        let cancel = self.inner.cancel.child_token();
        let handle = tokio::spawn(poll_task(
            self.clone(),
            self.inner.config.poll_interval,
            immediate,
            cancel.clone(),
        ));
        *slot = Some(PollHandle { cancel, handle });
        debug!("polling armed");
    }

    async fn disarm_poller(&self) {
        let armed = self.inner.poller.lock().await.take();
        if let Some(PollHandle { cancel, handle }) = armed {
            cancel.cancel();
            let _ = handle.await;
            debug!("polling disarmed");
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Fetch sensors, actuators, and operation mode concurrently.
    ///
    /// All three reads always run; a failure in one never aborts the
    /// others. Returns the first failure for callers that want it -- the
    /// store's shared error field reflects the last completed failure.
    pub async fn fetch_all(&self) -> Result<(), CoreError> {
        let (sensors, actuators, mode) = tokio::join!(
            self.fetch_sensors(),
            self.fetch_actuators(),
            self.fetch_operation_mode(),
        );
        sensors.and(actuators).and(mode)
    }

    /// Fetch the sensor snapshot and fold it into the store.
    pub async fn fetch_sensors(&self) -> Result<(), CoreError> {
        let store = &self.inner.store;
        let ticket = store.begin_read(Slice::Sensors);
        let _op = store.begin_operation();

        match self.inner.client.sensors().await {
            Ok(snapshot) => {
                store.apply_sensors(ticket, snapshot);
                Ok(())
            }
            Err(err) => Err(record(store, err)),
        }
    }

    /// Fetch all actuator states and fold them into the store.
    pub async fn fetch_actuators(&self) -> Result<(), CoreError> {
        let store = &self.inner.store;
        let ticket = store.begin_read(Slice::Actuators);
        let _op = store.begin_operation();

        match self.inner.client.actuators().await {
            Ok(set) => {
                store.apply_actuators(ticket, set);
                Ok(())
            }
            Err(err) => Err(record(store, err)),
        }
    }

    /// Fetch the operation mode and fold it into the store.
    pub async fn fetch_operation_mode(&self) -> Result<(), CoreError> {
        let store = &self.inner.store;
        let ticket = store.begin_read(Slice::Mode);
        let _op = store.begin_operation();

        match self.inner.client.operation_mode().await {
            Ok(mode) => {
                store.apply_mode(ticket, mode);
                Ok(())
            }
            Err(err) => Err(record(store, err)),
        }
    }

    // ── Command execution ────────────────────────────────────────────

    /// Execute a write command.
    ///
    /// Commands are serialized through the processor task; each is
    /// checked against the mode gate before any request is issued.
    pub async fn execute(&self, command: Command) -> Result<CommandResult, CoreError> {
        // Not started yet: the processor task would never pick this up.
        if self.inner.command_rx.lock().await.is_some() {
            return Err(CoreError::ControllerStopped);
        }

        let (tx, rx) = oneshot::channel();
        self.inner
            .command_tx
            .send(CommandEnvelope {
                command,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::ControllerStopped)?;
        rx.await.map_err(|_| CoreError::ControllerStopped)?
    }

    /// Switch an actuator on or off (command-then-resync).
    pub async fn set_actuator_state(
        &self,
        actuator: Actuator,
        state: SwitchState,
    ) -> Result<CommandResult, CoreError> {
        self.execute(Command::SetActuatorState { actuator, state })
            .await
    }

    /// Set an actuator's drive strength (command-then-resync).
    pub async fn set_actuator_power(
        &self,
        actuator: Actuator,
        duty_cycle: u16,
    ) -> Result<CommandResult, CoreError> {
        self.execute(Command::SetActuatorPower {
            actuator,
            duty_cycle,
        })
        .await
    }

    /// Toggle the operation mode (guess verified against a fresh read).
    pub async fn toggle_operation_mode(&self) -> Result<CommandResult, CoreError> {
        self.execute(Command::ToggleOperationMode).await
    }

    // ── Snapshot accessors (delegate to SyncState) ───────────────────

    pub fn sensors(&self) -> Option<SensorSnapshot> {
        self.inner.store.sensors()
    }

    pub fn actuators(&self) -> Option<ActuatorSet> {
        self.inner.store.actuators()
    }

    pub fn operation_mode(&self) -> Option<OperationMode> {
        self.inner.store.operation_mode()
    }

    pub fn status(&self) -> SyncStatus {
        self.inner.store.status()
    }
}

// ── Background tasks ─────────────────────────────────────────────────

/// Periodically run the combined read until cancelled.
///
/// With `immediate`, the interval's first tick fires at once -- the
/// "one immediate fetch on activation" contract; otherwise the first
/// tick is consumed because the caller already fetched.
async fn poll_task(
    controller: Controller,
    period: Duration,
    immediate: bool,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    if !immediate {
        interval.tick().await;
    }

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = controller.fetch_all().await {
                    warn!(error = %e, "poll tick failed");
                }
            }
        }
    }
}

/// Process commands from the mpsc channel, one at a time.
async fn command_processor_task(controller: Controller, mut rx: mpsc::Receiver<CommandEnvelope>) {
    let cancel = controller.inner.cancel.clone();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            envelope = rx.recv() => {
                let Some(envelope) = envelope else { break };
                let result = route_command(&controller, envelope.command).await;
                let _ = envelope.response_tx.send(result);
            }
        }
    }
}

// ── Command routing ──────────────────────────────────────────────────

/// Route a command: gate check, write, mandatory resync.
async fn route_command(
    controller: &Controller,
    command: Command,
) -> Result<CommandResult, CoreError> {
    let store = &controller.inner.store;
    let client = &controller.inner.client;

    match command {
        Command::SetActuatorState { actuator, state } => {
            check_actuator_gate(store)?;
            let _op = store.begin_operation();
            match client.set_actuator_state(actuator, state).await {
                Ok(()) => {
                    // Pull the authoritative post-write state; a resync
                    // failure is recorded in the store, not fatal here.
                    let _ = controller.fetch_actuators().await;
                    Ok(CommandResult::Applied)
                }
                Err(err) => Err(record(store, err)),
            }
        }

        Command::SetActuatorPower {
            actuator,
            duty_cycle,
        } => {
            check_actuator_gate(store)?;
            let _op = store.begin_operation();
            match client.set_actuator_power(actuator, duty_cycle).await {
                Ok(()) => {
                    let _ = controller.fetch_actuators().await;
                    Ok(CommandResult::Applied)
                }
                Err(err) => Err(record(store, err)),
            }
        }

        Command::ToggleOperationMode => {
            let status = store.status();
            let Some(last_known) = store.operation_mode() else {
                return Err(CoreError::ModeUnknown);
            };
            if !gate::mode_toggle_enabled(Some(last_known), status.loading) {
                return Err(CoreError::Busy);
            }

            let _op = store.begin_operation();

            // Compute the toggle target from a fresh read, not the
            // possibly-stale local view; a concurrent change through
            // another client is surfaced as a conflict.
            let ticket = store.begin_read(Slice::Mode);
            let current = match client.operation_mode().await {
                Ok(mode) => mode,
                Err(err) => return Err(record(store, err)),
            };
            store.apply_mode(ticket, current);

            if current != last_known {
                let err = CoreError::ModeConflict {
                    expected: last_known,
                    actual: current,
                };
                store.record_failure(err.to_string());
                return Err(err);
            }

            let ticket = store.begin_read(Slice::Mode);
            match client.set_operation_mode(current.toggled()).await {
                Ok(mode) => {
                    // Adopt the backend's answer, not our guess.
                    store.apply_mode(ticket, mode);
                    Ok(CommandResult::Mode(mode))
                }
                Err(err) => Err(record(store, err)),
            }
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Check the actuator write gate; no request is issued when it rejects.
fn check_actuator_gate(store: &Arc<SyncState>) -> Result<(), CoreError> {
    let mode = store.operation_mode();
    let loading = store.status().loading;
    if gate::actuator_controls_enabled(mode, loading) {
        return Ok(());
    }
    Err(match mode {
        Some(OperationMode::Autonomous) => CoreError::AutonomousMode,
        None => CoreError::ModeUnknown,
        Some(OperationMode::Manual) => CoreError::Busy,
    })
}

/// Fold an API error into the store's shared error field and return the
/// core-level equivalent.
fn record(store: &Arc<SyncState>, err: verdant_api::Error) -> CoreError {
    let err = CoreError::from(err);
    store.record_failure(err.to_string());
    err
}
