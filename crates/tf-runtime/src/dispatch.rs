use tf_core::Trigger;

use crate::context::{RuntimeContext, TriggerEffect};
use crate::store::StateStore;

/// Names of every trigger whose rectangle strictly contains the point, in layout order.
pub fn hit_triggers(triggers: &[Trigger], x: f32, y: f32) -> Vec<&str> {
    triggers
        .iter()
        .filter(|trigger| trigger.contains(x, y))
        .map(|trigger| trigger.name.as_str())
        .collect()
}

impl RuntimeContext {
    /// Activates every trigger under a world-space click. Overlapping triggers all fire.
    pub fn dispatch_click(&mut self, store: &StateStore, x: f32, y: f32) -> Vec<TriggerEffect> {
        let names = hit_triggers(self.triggers(), x, y)
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut effects = Vec::new();
        for name in names {
            tracing::debug!(trigger = %name, x, y, "click hit trigger");
            effects.extend(self.activate_trigger(store, &name));
        }
        effects
    }
}

#[cfg(test)]
mod dispatch_tests {
    use super::*;
    use crate::config::RuntimeConfig;
    use crate::runtime_test_support::*;

    fn trigger(name: &str, x: f32, y: f32, width: f32) -> Trigger {
        Trigger {
            name: name.to_string(),
            x,
            y,
            width,
            height: 24.0,
        }
    }

    #[test]
    fn hit_triggers_returns_all_overlaps() {
        let triggers = vec![
            trigger("a", 0.0, 0.0, 50.0),
            trigger("b", 40.0, 0.0, 50.0),
            trigger("c", 200.0, 0.0, 50.0),
        ];
        assert_eq!(hit_triggers(&triggers, 45.0, 10.0), vec!["a", "b"]);
        assert_eq!(hit_triggers(&triggers, 10.0, 10.0), vec!["a"]);
        assert!(hit_triggers(&triggers, 150.0, 10.0).is_empty());
    }

    #[test]
    fn click_inside_trigger_activates_it() {
        let store = story_store();
        let mut context =
            RuntimeContext::start(&store, RuntimeConfig::default()).expect("start should pass");
        context.set_triggers(vec![trigger("Next", 100.0, 600.0, 48.0)]);

        let effects = context.dispatch_click(&store, 120.0, 610.0);
        assert_eq!(effects.len(), 1);
        assert_eq!(context.current_state(), "ask_age_kairos");
    }

    #[test]
    fn click_outside_every_trigger_changes_nothing() {
        let store = story_store();
        let mut context =
            RuntimeContext::start(&store, RuntimeConfig::default()).expect("start should pass");
        context.set_triggers(vec![
            trigger("Next", 100.0, 600.0, 48.0),
            trigger("15 YEARS AGO", 300.0, 600.0, 120.0),
        ]);

        for (x, y) in [(100.0, 610.0), (99.0, 610.0), (160.0, 610.0), (120.0, 624.0), (0.0, 0.0)] {
            assert!(context.dispatch_click(&store, x, y).is_empty());
        }
        assert_eq!(context.current_state(), "start");
        assert_eq!(context.current_timeline(), 0);
        assert_eq!(context.timelines().len(), 1);
    }

    #[test]
    fn overlapping_triggers_all_fire() {
        let store = store_from_scripts(&[
            ("start", "Both.\n-\n[one] -> a\n[two] -> b\n"),
            ("a", "A.\n-\n[two] -> c\n"),
            ("b", "B.\n"),
            ("c", "C.\n"),
        ]);
        let mut context =
            RuntimeContext::start(&store, RuntimeConfig::default()).expect("start should pass");
        context.set_triggers(vec![
            trigger("one", 0.0, 0.0, 100.0),
            trigger("two", 0.0, 0.0, 100.0),
        ]);

        let effects = context.dispatch_click(&store, 50.0, 12.0);
        assert_eq!(effects.len(), 2);
        assert_eq!(context.current_state(), "c");
        assert_eq!(context.timelines()[0].state_names(), vec!["start", "a", "c"]);
    }
}
