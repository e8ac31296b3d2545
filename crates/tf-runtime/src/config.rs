use serde::{Deserialize, Serialize};

pub const DEFAULT_INITIAL_STATE: &str = "start";
pub const DEFAULT_START_YEAR: i32 = 2094;

/// A trigger name that opens a new timeline at `year` instead of extending the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkTrigger {
    pub name: String,
    pub year: i32,
}

impl ForkTrigger {
    pub fn new(name: impl Into<String>, year: i32) -> Self {
        Self {
            name: name.into(),
            year,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub initial_state: String,
    pub start_year: i32,
    pub fork_triggers: Vec<ForkTrigger>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            initial_state: DEFAULT_INITIAL_STATE.to_string(),
            start_year: DEFAULT_START_YEAR,
            fork_triggers: vec![
                ForkTrigger::new("Go to 2034", 2034),
                ForkTrigger::new("15 YEARS AGO", 2019),
            ],
        }
    }
}

impl RuntimeConfig {
    pub fn fork_year(&self, trigger: &str) -> Option<i32> {
        self.fork_triggers
            .iter()
            .find(|fork| fork.name == trigger)
            .map(|fork| fork.year)
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn defaults_carry_fork_allowlist() {
        let config = RuntimeConfig::default();
        assert_eq!(config.initial_state, "start");
        assert_eq!(config.start_year, 2094);
        assert_eq!(config.fork_year("15 YEARS AGO"), Some(2019));
        assert_eq!(config.fork_year("Go to 2034"), Some(2034));
        assert_eq!(config.fork_year("Next"), None);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: RuntimeConfig =
            serde_json::from_str(r#"{"initialState":"prologue"}"#).expect("json should parse");
        assert_eq!(config.initial_state, "prologue");
        assert_eq!(config.start_year, DEFAULT_START_YEAR);
        assert_eq!(config.fork_triggers.len(), 2);

        let config: RuntimeConfig = serde_json::from_str(
            r#"{"forkTriggers":[{"name":"1999","year":1999}],"startYear":2000}"#,
        )
        .expect("json should parse");
        assert_eq!(config.fork_year("1999"), Some(1999));
        assert_eq!(config.fork_year("15 YEARS AGO"), None);
        assert_eq!(config.start_year, 2000);
    }
}
