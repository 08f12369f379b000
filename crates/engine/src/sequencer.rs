// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recipe sequencer
//!
//! One run is a single async task: Initializing, the cycle loop, then
//! Finalizing. Countdown observations are the only points where an abort
//! request is honoured. Whatever ends the run, every actuator in the
//! universe is closed before the terminal record is written.

use crate::abort::AbortHandle;
use crate::error::RunError;
use crate::events::{Observer, Phase, PhaseEvent, RunEvent};
use ald_adapters::{Actuator, ActuatorError};
use ald_core::{
    plan, successor, validate, ActuatorCommand, ActuatorId, ActuatorSet, Clock, Countdown,
    Ending, FailurePolicy, Position, RecipeDefinition, SystemClock, Transition, Universe,
};
use ald_storage::{log_path, LogError, ProgressLog};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Sequencer settings
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// Directory that receives progress logs
    pub log_root: PathBuf,
    pub failure_policy: FailurePolicy,
}

/// Why a run ended early
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    /// External abort request
    Requested,
    /// Actuator command failed under [`FailurePolicy::Abort`]
    ActuatorFailure,
}

/// Outcome of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub ending: Ending,
    pub abort_reason: Option<AbortReason>,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub cycles_completed: u32,
    /// Step countdowns that ran to completion
    pub steps_run: u64,
    pub log_path: PathBuf,
    pub actuator_failures: u32,
    pub log_failures: u32,
}

/// Drives recipes against one actuator set, one run at a time
pub struct Sequencer<A, C = SystemClock> {
    actuator: A,
    universe: Universe,
    clock: C,
    config: SequencerConfig,
    abort: AbortHandle,
    running: Arc<AtomicBool>,
}

impl<A: Actuator, C: Clock> Sequencer<A, C> {
    pub fn new(actuator: A, universe: Universe, clock: C, config: SequencerConfig) -> Self {
        Self {
            actuator,
            universe,
            clock,
            config,
            abort: AbortHandle::new(),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for requesting an abort from elsewhere (e.g. a signal handler)
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    pub fn request_abort(&self) {
        self.abort.request();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Run `recipe` to a terminal phase
    ///
    /// Errors are returned only when the run cannot start: another run is
    /// active, the recipe is invalid, or the progress log cannot be created.
    /// Nothing is sent to the actuators in those cases.
    pub async fn start<O: Observer>(
        &self,
        recipe: &RecipeDefinition,
        observer: &mut O,
    ) -> Result<RunReport, RunError> {
        let _guard =
            RunGuard::acquire(&self.running, &self.abort).ok_or(RunError::ConcurrentRun)?;
        let warnings = validate(recipe, &self.universe)?;

        let started_at = self.clock.now();
        let mut log = ProgressLog::open(&log_path(
            &self.config.log_root,
            &started_at,
            &recipe.name,
        ))?;
        let path = log.path().to_path_buf();
        log.append_header(recipe)?;
        log.append_start(recipe, &started_at)?;

        tracing::info!(
            recipe = %recipe.name,
            cycles = recipe.cycles,
            steps = recipe.steps.len(),
            log = %path.display(),
            "run started"
        );

        for warning in warnings {
            tracing::warn!(%warning, "recipe warning");
            observer.notify(&RunEvent::Warning { warning });
        }

        let mut run = Run {
            seq: self,
            recipe,
            observer,
            log,
            phase: Phase::Idle,
            position: None,
            active: ActuatorSet::new(),
            remaining_total: recipe.total_seconds(),
            cycles_completed: 0,
            steps_run: 0,
            actuator_failures: 0,
            log_failures: 0,
        };

        let (ending, abort_reason) = match run.execute().await {
            Ok(()) => (Ending::Normal, None),
            Err(Interrupted(reason)) => {
                run.abort(reason).await;
                (Ending::Forced, Some(reason))
            }
        };

        let ended_at = self.clock.now();
        run.write_log(|log| log.finish(&started_at, &ended_at, ending));

        tracing::info!(
            %ending,
            cycles_completed = run.cycles_completed,
            actuator_failures = run.actuator_failures,
            log_failures = run.log_failures,
            "run finished"
        );

        Ok(RunReport {
            ending,
            abort_reason,
            started_at,
            ended_at,
            cycles_completed: run.cycles_completed,
            steps_run: run.steps_run,
            log_path: path,
            actuator_failures: run.actuator_failures,
            log_failures: run.log_failures,
        })
    }
}

/// Exclusive claim on the sequencer; released on drop
///
/// Releasing also consumes any abort request, so a request made before or
/// during a run ends that run and never the next one.
struct RunGuard<'a> {
    running: &'a AtomicBool,
    abort: &'a AbortHandle,
}

impl<'a> RunGuard<'a> {
    fn acquire(running: &'a AtomicBool, abort: &'a AbortHandle) -> Option<Self> {
        running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { running, abort })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.abort.clear();
        self.running.store(false, Ordering::SeqCst);
    }
}

/// The run stopped before reaching Completed
struct Interrupted(AbortReason);

/// Mutable state of one run
struct Run<'a, A, C, O> {
    seq: &'a Sequencer<A, C>,
    recipe: &'a RecipeDefinition,
    observer: &'a mut O,
    log: ProgressLog,
    phase: Phase,
    position: Option<Position>,
    /// Actuators believed open
    active: ActuatorSet,
    remaining_total: f64,
    cycles_completed: u32,
    steps_run: u64,
    actuator_failures: u32,
    log_failures: u32,
}

impl<A: Actuator, C: Clock, O: Observer> Run<'_, A, C, O> {
    async fn execute(&mut self) -> Result<(), Interrupted> {
        let recipe = self.recipe;

        self.enter(PhaseEvent::Start);
        self.check_abort()?;
        self.apply(plan(&self.active, &recipe.init.actuators)).await?;
        self.countdown(recipe.init.wait).await?;

        if recipe.cycles > 0 {
            self.enter(PhaseEvent::BeginCycles);
            for pos in recipe.positions() {
                self.run_step(pos).await?;
            }
        }
        self.position = None;
        self.enter(PhaseEvent::CyclesDone);

        self.apply(plan(&self.active, &recipe.finalize.actuators)).await?;
        self.countdown(recipe.finalize.wait).await?;
        self.close_all().await;
        self.enter(PhaseEvent::Finish);
        Ok(())
    }

    async fn run_step(&mut self, pos: Position) -> Result<(), Interrupted> {
        let recipe = self.recipe;
        let step = &recipe.steps[pos.step];
        self.position = Some(pos);
        tracing::debug!(cycle = pos.cycle, step = pos.step, actuators = %step.actuators, "step");

        self.apply(plan(&self.active, &step.actuators)).await?;
        self.progress(step.duration);
        self.countdown(step.duration).await?;
        self.steps_run += 1;

        // Close only what the next configuration does not need
        let next = successor(recipe, pos);
        self.apply(plan(&self.active, next).release_only()).await?;

        if pos.step + 1 == recipe.steps.len() {
            self.cycles_completed = pos.cycle + 1;
            let (done, total) = (self.cycles_completed, recipe.cycles);
            self.write_log(|log| log.record_cycle(done, total));
        }
        Ok(())
    }

    /// Issue a transition: deactivations first, then activations, each in id order
    async fn apply(&mut self, transition: Transition) -> Result<(), Interrupted> {
        let commands = transition
            .deactivate
            .iter()
            .map(|id| (ActuatorCommand::Deactivate, id))
            .chain(
                transition
                    .activate
                    .iter()
                    .map(|id| (ActuatorCommand::Activate, id)),
            );
        for (command, id) in commands {
            let failed = self.command(command, id).await.is_err();
            if failed && self.seq.config.failure_policy == FailurePolicy::Abort {
                return Err(Interrupted(AbortReason::ActuatorFailure));
            }
        }
        Ok(())
    }

    async fn command(&mut self, command: ActuatorCommand, id: &ActuatorId) -> Result<(), ActuatorError> {
        let result = self.seq.actuator.apply(command, id).await;
        match &result {
            Ok(()) => match command {
                ActuatorCommand::Activate => {
                    self.active.insert(id.clone());
                }
                ActuatorCommand::Deactivate => {
                    self.active.remove(id);
                }
            },
            Err(e) => self.actuator_failed(command, id, e),
        }
        result
    }

    fn actuator_failed(&mut self, command: ActuatorCommand, id: &ActuatorId, error: &ActuatorError) {
        self.actuator_failures += 1;
        tracing::warn!(actuator = %id, %command, %error, "actuator command failed");
        self.observer.notify(&RunEvent::ActuatorFailed {
            id: id.clone(),
            command,
            error: error.to_string(),
        });
    }

    /// Close every actuator in the universe, one attempt each
    async fn close_all(&mut self) {
        let seq = self.seq;
        for id in seq.universe.iter() {
            // Failures are reported by `command` and never retried
            let _ = self.command(ActuatorCommand::Deactivate, id).await;
        }
    }

    async fn abort(&mut self, reason: AbortReason) {
        tracing::warn!(?reason, phase = %self.phase, "aborting run");
        self.enter(PhaseEvent::Abort);
        self.close_all().await;
    }

    /// Pace `seconds`, sampling the abort flag at every observation
    async fn countdown(&mut self, seconds: f64) -> Result<(), Interrupted> {
        for tick in Countdown::new(seconds, self.remaining_total) {
            self.check_abort()?;
            self.emit_progress(tick.remaining_step, tick.remaining_total);
            tokio::time::sleep(tick.wait).await;
        }
        self.check_abort()?;
        if seconds.is_finite() && seconds > 0.0 {
            self.remaining_total = (self.remaining_total - seconds).max(0.0);
        }
        Ok(())
    }

    fn check_abort(&self) -> Result<(), Interrupted> {
        if self.seq.abort.is_requested() {
            return Err(Interrupted(AbortReason::Requested));
        }
        Ok(())
    }

    fn enter(&mut self, event: PhaseEvent) {
        match self.phase.transition(event) {
            Ok(next) => {
                tracing::info!(from = %self.phase, to = %next, "phase");
                self.phase = next;
                self.progress(0.0);
            }
            Err(e) => tracing::error!(error = %e, "ignoring phase event"),
        }
    }

    fn progress(&mut self, remaining_step: f64) {
        self.emit_progress(remaining_step, self.remaining_total);
    }

    fn emit_progress(&mut self, remaining_step: f64, remaining_total: f64) {
        self.observer.notify(&RunEvent::Progress {
            phase: self.phase,
            cycle: self.position.map(|p| p.cycle),
            step: self.position.map(|p| p.step),
            remaining_step,
            remaining_total,
        });
    }

    /// Mid-run log writes degrade to a reported skip
    fn write_log(&mut self, write: impl FnOnce(&mut ProgressLog) -> Result<(), LogError>) {
        if let Err(e) = write(&mut self.log) {
            self.log_failures += 1;
            tracing::warn!(error = %e, "progress log write failed");
            self.observer.notify(&RunEvent::LogWriteFailed {
                error: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
#[path = "sequencer_tests.rs"]
mod tests;
