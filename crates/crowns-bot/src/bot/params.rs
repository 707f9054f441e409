use crowns_core::meld::{AllocationLimits, DEFAULT_MAX_STEPS};

const MAX_STEPS_ENV: &str = "CROWNS_MAX_ALLOCATION_STEPS";

/// Knobs handed to the meld engine for each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineParams {
    max_allocation_steps: usize,
}

impl EngineParams {
    pub const fn new(max_allocation_steps: usize) -> Self {
        Self {
            max_allocation_steps,
        }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub const fn max_allocation_steps(self) -> usize {
        self.max_allocation_steps
    }

    pub fn with_max_allocation_steps(mut self, steps: usize) -> Self {
        self.max_allocation_steps = steps;
        self
    }

    pub const fn limits(self) -> AllocationLimits {
        AllocationLimits {
            max_steps: self.max_allocation_steps,
        }
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let max_allocation_steps = read(MAX_STEPS_ENV)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|steps| *steps > 0)
            .unwrap_or(DEFAULT_MAX_STEPS);

        Self {
            max_allocation_steps,
        }
    }
}

impl Default for EngineParams {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STEPS)
    }
}
