use std::sync::Arc;

use tf_core::State;

/// One narrative branch: the states visited on it, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub index: usize,
    pub year: i32,
    pub states: Vec<Arc<State>>,
}

impl Timeline {
    pub fn new(index: usize, year: i32) -> Self {
        Self {
            index,
            year,
            states: Vec::new(),
        }
    }

    pub fn push(&mut self, state: Arc<State>) {
        self.states.push(state);
    }

    pub fn last(&self) -> Option<&Arc<State>> {
        self.states.last()
    }

    pub fn state_names(&self) -> Vec<&str> {
        self.states.iter().map(|state| state.name.as_str()).collect()
    }
}
