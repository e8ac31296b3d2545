use std::sync::OnceLock;

use regex::Regex;
use tf_core::{Condition, ConditionRange, Line, Span, State, TimeforkError, Transition};

const ARROW: &str = " -> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Body,
    Footer,
}

pub fn compile_state(name: &str, source: &str) -> Result<State, TimeforkError> {
    let mut state = State::new(name);
    let mut section = Section::Body;

    for (index, raw) in source.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.is_empty() {
            continue;
        }
        let line_number = index + 1;

        match section {
            Section::Body if line.starts_with('-') => section = Section::Footer,
            Section::Body => compile_body_line(&mut state, line, line_number)?,
            Section::Footer => compile_transition_line(&mut state, line, line_number)?,
        }
    }

    tracing::debug!(
        state = name,
        lines = state.lines.len(),
        transitions = state.transitions.len(),
        conditions = state.conditions.len(),
        "compiled state"
    );
    Ok(state)
}

fn compile_body_line(
    state: &mut State,
    line: &str,
    line_number: usize,
) -> Result<(), TimeforkError> {
    let span = state.arena.push_str(line);
    if !line.starts_with('*') {
        state.lines.push(Line::plain(span));
        return Ok(());
    }

    let colon = line.find(':').ok_or_else(|| {
        TimeforkError::at_line(
            "COMPILE_SPEAKER_COLON_MISSING",
            format!(
                "State \"{}\": spoken line needs \"*Speaker: text\", got \"{}\".",
                state.name, line
            ),
            line_number,
        )
    })?;

    // Skip the ": " that separates speaker from text.
    let text_start = (span.start + colon + 2).min(span.end);
    state.lines.push(Line::spoken(
        Span::new(span.start + 1, span.start + colon),
        Span::new(text_start, span.end),
    ));
    Ok(())
}

fn transition_header_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[^\[]*\[(.*?)\] ").expect("transition header regex must compile")
    })
}

fn compile_transition_line(
    state: &mut State,
    line: &str,
    line_number: usize,
) -> Result<(), TimeforkError> {
    let captures = transition_header_regex().captures(line).ok_or_else(|| {
        TimeforkError::at_line(
            "COMPILE_TRANSITION_SYNTAX",
            format!(
                "State \"{}\": transitions must start with a [name in square brackets] followed by a space, got \"{}\".",
                state.name, line
            ),
            line_number,
        )
    })?;
    let (Some(header), Some(trigger)) = (captures.get(0), captures.get(1)) else {
        return Err(TimeforkError::at_line(
            "COMPILE_TRANSITION_SYNTAX",
            format!("State \"{}\": unreadable transition \"{}\".", state.name, line),
            line_number,
        ));
    };

    let trigger = state.arena.push_str(trigger.as_str());
    let body_start = header.end();

    // The arrow may begin on the space that closes the trigger header.
    let arrow = line[body_start - 1..]
        .find(ARROW)
        .map(|offset| offset + body_start - 1);

    let (preconditions, postconditions) = match arrow {
        Some(arrow) => {
            let pre_text = line.get(body_start..arrow).unwrap_or("");
            let preconditions = push_conditions(state, pre_text);
            let postconditions = push_conditions(state, &line[arrow + ARROW.len()..]);
            (preconditions, postconditions)
        }
        None => {
            let start = state.conditions.len();
            let preconditions = ConditionRange::new(start, start);
            (preconditions, push_conditions(state, &line[body_start..]))
        }
    };

    if postconditions.is_empty() {
        tracing::warn!(
            state = %state.name,
            line = line_number,
            "transition has no destination and can never fire"
        );
    }

    state.transitions.push(Transition {
        trigger,
        preconditions,
        postconditions,
    });
    Ok(())
}

fn push_conditions(state: &mut State, text: &str) -> ConditionRange {
    let start = state.conditions.len();
    for token in text.split(' ').filter(|token| !token.is_empty()) {
        let (negated, name) = match token.strip_prefix('~') {
            Some(name) => (true, name),
            None => (false, token),
        };
        let name = state.arena.push_str(name);
        state.conditions.push(Condition { name, negated });
    }
    ConditionRange::new(start, state.conditions.len())
}
