/// Identifies one run of the progress animation. Ticks carrying any other
/// handle than the live one are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Done,
    Current,
    Pending,
}

/// Cycles the agent-step indicators while a request is outstanding.
///
/// Steps below the current index are shown as done, so a pass over the steps
/// fills them up cumulatively before wrapping back to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressAnimator {
    step_count: usize,
    step: usize,
    active: Option<AnimationHandle>,
    next_handle: u64,
}

impl Default for ProgressAnimator {
    fn default() -> Self {
        Self::new(5)
    }
}

impl ProgressAnimator {
    pub fn new(step_count: usize) -> Self {
        Self {
            step_count: step_count.max(1),
            step: 0,
            active: None,
            next_handle: 1,
        }
    }

    /// Starts a new run at step 0, stopping any run still alive.
    pub fn start(&mut self) -> AnimationHandle {
        if let Some(previous) = self.active {
            self.stop(previous);
        }
        let handle = AnimationHandle(self.next_handle);
        self.next_handle += 1;
        self.step = 0;
        self.active = Some(handle);
        handle
    }

    /// Stops the run identified by `handle`. Returns false (and changes
    /// nothing) when that run is not the live one.
    pub fn stop(&mut self, handle: AnimationHandle) -> bool {
        if self.active != Some(handle) {
            return false;
        }
        self.active = None;
        self.step = 0;
        true
    }

    /// Advances one step. Stale handles are ignored.
    pub fn tick(&mut self, handle: AnimationHandle) -> bool {
        if self.active != Some(handle) {
            return false;
        }
        self.step = (self.step + 1) % self.step_count;
        true
    }

    pub fn active(&self) -> Option<AnimationHandle> {
        self.active
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn step_states(&self) -> Vec<StepState> {
        (0..self.step_count)
            .map(|index| {
                if !self.is_running() {
                    StepState::Pending
                } else if index < self.step {
                    StepState::Done
                } else if index == self.step {
                    StepState::Current
                } else {
                    StepState::Pending
                }
            })
            .collect()
    }
}
