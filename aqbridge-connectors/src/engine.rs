//! Polling Engine
//!
//! ## Overview
//!
//! One engine drives one device. It owns the fetch client, the sink, the
//! static settings derived from [`DeviceConfig`], and the timer task.
//!
//! ## Cycle Phases
//!
//! ```text
//!          tick                    fetch returns (ok or err)
//!  Idle ─────────▶ Fetching ─────────────────────────▶ Publishing
//!   ▲                                                      │
//!   └──────────────── exactly one DeviceState written ─────┘
//! ```
//!
//! Publishing writes either a complete nominal state or a complete fault
//! state. A failed fetch, an empty batch or a reconcile error all end in the
//! same fault publish and are only logged; nothing is raised to the caller.
//!
//! ## Scheduling
//!
//! `start()` runs one cycle right away. With a positive polling interval it
//! also starts a fixed-period timer; every tick spawns its own cycle task.
//! Cycles are not serialized: a fetch slower than the interval overlaps the
//! next cycle and the two may publish in either order.
//!
//! ## Teardown
//!
//! `stop()` (also run on drop) cancels the timer. A fetch already in flight is
//! left to finish, but its publish is skipped.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use aqbridge_core::{
    ConfigError, CycleSettings, DeviceConfig, DeviceInfo, DeviceState, DeviceStateSink,
    ReconcileError,
};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::{FetchClient, FetchError};

/// Why a cycle ended in a fault publish
#[derive(Debug, Error)]
pub enum CycleFailure {
    /// The fetch client reported an error
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The batch could not be reconciled (e.g. it was empty)
    #[error("reconcile failed: {0}")]
    Reconcile(#[from] ReconcileError),
}

/// Phase of the most recently advanced cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EnginePhase {
    /// No cycle is running
    Idle = 0,
    /// Waiting on the fetch client
    Fetching = 1,
    /// Deriving and writing state
    Publishing = 2,
}

impl EnginePhase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => EnginePhase::Fetching,
            2 => EnginePhase::Publishing,
            _ => EnginePhase::Idle,
        }
    }
}

/// What a cycle did with its result
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// The state was written to the sink
    Published(DeviceState),
    /// The engine was stopped before publishing; nothing was written
    Discarded,
}

/// Cycle statistics
#[derive(Debug, Default, Clone)]
pub struct CycleStats {
    /// Cycles that reached the publish step
    pub cycles: u64,
    /// Cycles that published live data
    pub nominal: u64,
    /// Cycles that published a fault
    pub faults: u64,
    /// Cycles whose result was dropped after teardown
    pub discarded: u64,
    /// Last failure message
    pub last_failure: Option<String>,
}

/// State shared between the engine handle and its cycle tasks
struct Shared<F, S> {
    fetcher: F,
    sink: Mutex<S>,
    settings: CycleSettings,
    url: String,
    stopped: AtomicBool,
    phase: AtomicU8,
    stats: Mutex<CycleStats>,
}

impl<F, S> Shared<F, S> {
    /// Raise the stop flag and wait out any publish already holding the sink
    fn tear_down(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        drop(self.sink.lock().unwrap_or_else(PoisonError::into_inner));
    }
}

impl<F, S> Shared<F, S>
where
    F: FetchClient,
    S: DeviceStateSink + Send,
{
    fn set_phase(&self, phase: EnginePhase) {
        self.phase.store(phase as u8, Ordering::SeqCst);
    }

    fn record(&self, update: impl FnOnce(&mut CycleStats)) {
        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        update(&mut *stats);
    }

    async fn run_cycle(&self) -> CycleOutcome {
        if self.stopped.load(Ordering::SeqCst) {
            return CycleOutcome::Discarded;
        }

        self.set_phase(EnginePhase::Fetching);
        if self.settings.logging {
            log::info!("[{}] url: {}", self.settings.serial, self.url);
        }
        let fetched = self.fetcher.fetch().await;

        self.set_phase(EnginePhase::Publishing);
        let state = match fetched.map_err(CycleFailure::from).and_then(|batch| {
            self.settings.derive(&batch).map_err(CycleFailure::from)
        }) {
            Ok(state) => state,
            Err(failure) => {
                log::warn!("[{}] {}", self.settings.serial, failure);
                let message = failure.to_string();
                self.record(|stats| stats.last_failure = Some(message));
                DeviceState::Fault
            }
        };

        // tear_down() raises the flag, then waits on this lock
        let published = {
            let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
            if self.stopped.load(Ordering::SeqCst) {
                false
            } else {
                state.publish(&mut *sink, self.settings.has_co2_channel);
                true
            }
        };

        let outcome = if !published {
            if self.settings.logging {
                log::debug!("[{}] engine stopped, discarding cycle result", self.settings.serial);
            }
            self.record(|stats| stats.discarded += 1);
            CycleOutcome::Discarded
        } else {
            self.record(|stats| {
                stats.cycles += 1;
                if state.is_fault() {
                    stats.faults += 1;
                } else {
                    stats.nominal += 1;
                }
            });
            CycleOutcome::Published(state)
        };

        self.set_phase(EnginePhase::Idle);
        outcome
    }
}

fn spawn_cycle<F, S>(shared: &Arc<Shared<F, S>>)
where
    F: FetchClient + 'static,
    S: DeviceStateSink + Send + 'static,
{
    let shared = Arc::clone(shared);
    tokio::spawn(async move {
        shared.run_cycle().await;
    });
}

/// Periodic fetch-reconcile-publish loop for one device
pub struct PollingEngine<F, S> {
    shared: Arc<Shared<F, S>>,
    period: Option<Duration>,
    info: DeviceInfo,
    started: bool,
    timer: Option<JoinHandle<()>>,
}

impl<F, S> fmt::Debug for PollingEngine<F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollingEngine")
            .field("serial", &self.shared.settings.serial)
            .field("period", &self.period)
            .field("started", &self.started)
            .field("stopped", &self.shared.stopped.load(Ordering::SeqCst))
            .finish()
    }
}

impl<F, S> PollingEngine<F, S>
where
    F: FetchClient + 'static,
    S: DeviceStateSink + Send + 'static,
{
    /// Create an engine for a device; nothing runs until [`start`](Self::start)
    pub fn new(config: &DeviceConfig, fetcher: F, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            shared: Arc::new(Shared {
                fetcher,
                sink: Mutex::new(sink),
                settings: config.cycle_settings(),
                url: config.data_url(),
                stopped: AtomicBool::new(false),
                phase: AtomicU8::new(EnginePhase::Idle as u8),
                stats: Mutex::new(CycleStats::default()),
            }),
            period: config.polling_period(),
            info: config.device_info(),
            started: false,
            timer: None,
        })
    }

    /// Run the initial cycle and, if enabled, the periodic timer
    ///
    /// Must be called from within a tokio runtime. Calling it again, or after
    /// [`stop`](Self::stop), does nothing.
    pub fn start(&mut self) {
        if self.started || self.is_stopped() {
            return;
        }
        self.started = true;

        spawn_cycle(&self.shared);

        if let Some(period) = self.period {
            let shared = Arc::clone(&self.shared);
            self.timer = Some(tokio::spawn(async move {
                let mut ticker = time::interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                loop {
                    ticker.tick().await;
                    spawn_cycle(&shared);
                }
            }));
        } else if self.shared.settings.logging {
            log::info!("[{}] periodic polling disabled", self.shared.settings.serial);
        }
    }

    /// Run one cycle now and wait for it
    pub async fn run_cycle(&self) -> CycleOutcome {
        self.shared.run_cycle().await
    }

    /// Cancel the timer; in-flight cycles finish without publishing
    ///
    /// Once this returns the sink receives no further writes.
    pub fn stop(&mut self) {
        self.shared.tear_down();
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.shared.stopped.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> EnginePhase {
        EnginePhase::from_u8(self.shared.phase.load(Ordering::SeqCst))
    }

    /// Snapshot of cycle statistics
    pub fn stats(&self) -> CycleStats {
        self.shared.stats.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Polling period, `None` when only the initial cycle runs
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Accessory metadata for the device
    pub fn device_info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Inspect the sink
    pub fn with_sink<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let sink = self.shared.sink.lock().unwrap_or_else(PoisonError::into_inner);
        f(&sink)
    }
}

impl<F, S> Drop for PollingEngine<F, S> {
    fn drop(&mut self) {
        self.shared.tear_down();
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
