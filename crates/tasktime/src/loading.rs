//! Loading-spinner state shared by views with overlapping backend calls.

/// Count of outstanding loads; the spinner shows while it is non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadState {
    pending: usize,
}

impl LoadState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_loading(&mut self) {
        self.pending += 1;
    }

    /// Mark one load finished. Extra calls are ignored.
    pub fn done_loading(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    pub fn pending(&self) -> usize {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_loads() {
        let mut state = LoadState::new();
        assert!(!state.is_loading());
        state.start_loading();
        state.start_loading();
        state.done_loading();
        assert!(state.is_loading());
        state.done_loading();
        assert!(!state.is_loading());
    }

    #[test]
    fn test_done_never_goes_negative() {
        let mut state = LoadState::new();
        state.done_loading();
        assert_eq!(state.pending(), 0);
        state.start_loading();
        assert!(state.is_loading());
    }
}
