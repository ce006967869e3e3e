/*!
 * Shared Simulation
 * Cloneable handle serializing all access behind one lock
 */

use super::types::{StepReport, SubmitOutcome};
use super::Simulation;
use crate::core::types::{Lifetime, Size, Tick};
use crate::memory::HeapStats;
use crate::process::ProcessResult;
use parking_lot::Mutex;
use std::sync::Arc;

/// Thread-safe handle to a [`Simulation`]
///
/// Splits and releases are not commutative, so every heap mutation goes
/// through the same mutex. Clones share the same simulation.
#[derive(Debug, Clone)]
pub struct SharedSimulation {
    inner: Arc<Mutex<Simulation>>,
}

impl SharedSimulation {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            inner: Arc::new(Mutex::new(simulation)),
        }
    }

    pub fn submit(&self, size: Size, lifetime: Lifetime) -> ProcessResult<SubmitOutcome> {
        self.inner.lock().submit(size, lifetime)
    }

    pub fn step(&self) -> StepReport {
        self.inner.lock().step()
    }

    pub fn clock(&self) -> Tick {
        self.inner.lock().clock()
    }

    pub fn stats(&self) -> HeapStats {
        self.inner.lock().heap().stats()
    }

    pub fn is_idle(&self) -> bool {
        self.inner.lock().is_idle()
    }

    /// Run `f` with exclusive access
    pub fn with<R>(&self, f: impl FnOnce(&mut Simulation) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<Simulation> for SharedSimulation {
    fn from(simulation: Simulation) -> Self {
        Self::new(simulation)
    }
}
