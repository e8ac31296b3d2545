use std::sync::Arc;

use tf_core::{TimeforkError, Trigger};

use crate::config::RuntimeConfig;
use crate::store::StateStore;
use crate::timeline::Timeline;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEffect {
    Advanced {
        state: String,
        timeline: usize,
    },
    Forked {
        state: String,
        timeline: usize,
        year: i32,
    },
}

/// All mutable play state: timelines, the active state and timeline, and the
/// trigger rectangles from the latest layout pass.
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    config: RuntimeConfig,
    timelines: Vec<Timeline>,
    current_timeline: usize,
    current_state: String,
    observing_timeline: usize,
    scroll_to_timeline_end: bool,
    triggers: Vec<Trigger>,
}

impl RuntimeContext {
    pub fn start(store: &StateStore, config: RuntimeConfig) -> Result<Self, TimeforkError> {
        let initial = store.get(&config.initial_state).ok_or_else(|| {
            TimeforkError::new(
                "RUNTIME_INITIAL_STATE_MISSING",
                format!("Initial state \"{}\" is not in the store.", config.initial_state),
            )
        })?;

        let mut timeline = Timeline::new(0, config.start_year);
        timeline.push(Arc::clone(initial));

        Ok(Self {
            current_state: config.initial_state.clone(),
            config,
            timelines: vec![timeline],
            current_timeline: 0,
            observing_timeline: 0,
            scroll_to_timeline_end: false,
            triggers: Vec::new(),
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn timelines(&self) -> &[Timeline] {
        &self.timelines
    }

    pub fn current_timeline(&self) -> usize {
        self.current_timeline
    }

    pub fn current_state(&self) -> &str {
        &self.current_state
    }

    pub fn active_timeline(&self) -> &Timeline {
        &self.timelines[self.current_timeline]
    }

    pub fn observing_timeline(&self) -> usize {
        self.observing_timeline
    }

    pub fn scroll_requested(&self) -> bool {
        self.scroll_to_timeline_end
    }

    /// Returns whether a scroll to the observed timeline's end was pending, and clears it.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_timeline_end)
    }

    pub fn request_scroll(&mut self) {
        self.scroll_to_timeline_end = true;
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn set_triggers(&mut self, triggers: Vec<Trigger>) {
        self.triggers = triggers;
    }

    pub fn observe_previous(&mut self) {
        self.observing_timeline = self.observing_timeline.saturating_sub(1);
        self.scroll_to_timeline_end = true;
    }

    pub fn observe_next(&mut self) {
        let last = self.timelines.len().saturating_sub(1);
        self.observing_timeline = (self.observing_timeline + 1).min(last);
        self.scroll_to_timeline_end = true;
    }

    /// Fires every transition of the current state whose trigger is `name`.
    ///
    /// Transitions are scanned in authoring order on the state that was current
    /// when the call began; when several fire, the last one decides the new
    /// current state. Unknown destinations are skipped without error.
    pub fn activate_trigger(&mut self, store: &StateStore, name: &str) -> Vec<TriggerEffect> {
        let origin = self.current_state.clone();
        let mut effects = Vec::new();

        for edge in store.edges(&origin) {
            if edge.trigger != name {
                continue;
            }
            let Some(destination) = edge.destination.as_deref() else {
                tracing::debug!(state = %origin, trigger = name, "transition has no destination");
                continue;
            };
            let Some(state) = store.get(destination) else {
                tracing::debug!(
                    state = %origin,
                    trigger = name,
                    destination,
                    "destination state is unknown"
                );
                continue;
            };

            let effect = match self.config.fork_year(name) {
                Some(year) => {
                    let index = self.timelines.len();
                    self.timelines.push(Timeline::new(index, year));
                    self.current_timeline = index;
                    tracing::info!(timeline = index, year, state = destination, "forked timeline");
                    TriggerEffect::Forked {
                        state: destination.to_string(),
                        timeline: index,
                        year,
                    }
                }
                None => TriggerEffect::Advanced {
                    state: destination.to_string(),
                    timeline: self.current_timeline,
                },
            };

            self.timelines[self.current_timeline].push(Arc::clone(state));
            self.current_state = destination.to_string();
            self.observing_timeline = self.current_timeline;
            self.scroll_to_timeline_end = true;
            effects.push(effect);
        }

        if effects.is_empty() {
            tracing::debug!(state = %origin, trigger = name, "trigger had no effect");
        }
        effects
    }
}
