// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced actuator wrapper for consistent observability

use crate::actuator::{Actuator, ActuatorError};
use ald_core::{ActuatorCommand, ActuatorId};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any Actuator
#[derive(Clone)]
pub struct TracedActuator<A> {
    inner: A,
}

impl<A> TracedActuator<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

impl<A: Actuator> TracedActuator<A> {
    async fn traced(&self, command: ActuatorCommand, id: &ActuatorId) -> Result<(), ActuatorError> {
        let span = tracing::info_span!("actuator", %command, actuator = %id);

        async {
            let start = std::time::Instant::now();
            let result = match command {
                ActuatorCommand::Activate => self.inner.activate(id).await,
                ActuatorCommand::Deactivate => self.inner.deactivate(id).await,
            };
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "switched"),
                // A valve left open is the dangerous failure
                Err(e) if command == ActuatorCommand::Deactivate => {
                    tracing::error!(elapsed_ms, error = %e, "deactivate failed")
                }
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "activate failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl<A: Actuator> Actuator for TracedActuator<A> {
    async fn activate(&self, id: &ActuatorId) -> Result<(), ActuatorError> {
        self.traced(ActuatorCommand::Activate, id).await
    }

    async fn deactivate(&self, id: &ActuatorId) -> Result<(), ActuatorError> {
        self.traced(ActuatorCommand::Deactivate, id).await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
