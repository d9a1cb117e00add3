/// Container lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Refreshing,
    Running,
    Stopped,
    Failed,
}

/// Tracks the lifecycle of a container
#[derive(Debug)]
pub struct LifecycleManager {
    state: LifecycleState,
}

impl LifecycleManager {
    /// Create a new lifecycle manager
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Created,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Check if the container finished refreshing
    pub fn is_running(&self) -> bool {
        self.state == LifecycleState::Running
    }

    /// Move to a new state
    pub fn transition(&mut self, state: LifecycleState) {
        tracing::debug!(from = ?self.state, to = ?state, "Container lifecycle transition");
        self.state = state;
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_transitions() {
        let mut lifecycle = LifecycleManager::default();
        assert_eq!(lifecycle.state(), LifecycleState::Created);
        assert!(!lifecycle.is_running());

        lifecycle.transition(LifecycleState::Refreshing);
        lifecycle.transition(LifecycleState::Running);
        assert!(lifecycle.is_running());

        lifecycle.transition(LifecycleState::Stopped);
        assert_eq!(lifecycle.state(), LifecycleState::Stopped);
    }
}
