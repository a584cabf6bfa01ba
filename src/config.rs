//! The runtime configuration of a chipset.
use rand::{rngs::OsRng, rngs::SmallRng, RngCore, SeedableRng};

use crate::definitions::cpu;

/// What happens when an instruction faults on the stack or on the memory bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Report the fault and stop executing until the chipset is reset.
    Halt,
    /// Log the fault, treat the instruction as a no-op and carry on.
    Continue,
}

impl Default for FaultPolicy {
    fn default() -> Self {
        FaultPolicy::Halt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The amount of instructions executed between two timer ticks.
    pub instructions_per_tick: usize,
    pub fault_policy: FaultPolicy,
    /// Seeds the random number generator used by `CXNN`, if set.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instructions_per_tick: cpu::INSTRUCTIONS_PER_TICK,
            fault_policy: FaultPolicy::default(),
            seed: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instructions_per_tick(mut self, instructions_per_tick: usize) -> Self {
        self.instructions_per_tick = instructions_per_tick;
        self
    }

    pub fn with_fault_policy(mut self, fault_policy: FaultPolicy) -> Self {
        self.fault_policy = fault_policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the random number generator described by this configuration.
    pub fn rng(&self) -> Box<dyn RngCore + Send> {
        match self.seed {
            Some(seed) => Box::new(SmallRng::seed_from_u64(seed)),
            None => Box::new(OsRng),
        }
    }
}
