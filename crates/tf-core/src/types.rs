use std::borrow::Cow;

use crate::arena::{Span, StringArena};
use crate::error::TimeforkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Line {
    pub text: Span,
    pub spoken: bool,
    /// Only meaningful when `spoken` is set; plain lines carry [`Span::EMPTY`].
    pub speaker: Span,
}

impl Line {
    pub fn plain(text: Span) -> Self {
        Self {
            text,
            spoken: false,
            speaker: Span::EMPTY,
        }
    }

    pub fn spoken(speaker: Span, text: Span) -> Self {
        Self {
            text,
            spoken: true,
            speaker,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Condition {
    pub name: Span,
    pub negated: bool,
}

/// Half-open index range into a state's condition list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConditionRange {
    pub start: usize,
    pub end: usize,
}

impl ConditionRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    pub trigger: Span,
    pub preconditions: ConditionRange,
    pub postconditions: ConditionRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    pub name: String,
    pub lines: Vec<Line>,
    pub transitions: Vec<Transition>,
    pub conditions: Vec<Condition>,
    pub arena: StringArena,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn text(&self, span: Span) -> Cow<'_, str> {
        self.arena.text(span)
    }

    pub fn speaker(&self, line: &Line) -> Option<Cow<'_, str>> {
        line.spoken.then(|| self.text(line.speaker))
    }

    /// Display text of a line: `"Speaker: text"` for spoken lines.
    pub fn line_text(&self, index: usize) -> Option<String> {
        let line = self.lines.get(index)?;
        let text = self.text(line.text);
        Some(match self.speaker(line) {
            Some(speaker) => format!("{}: {}", speaker, text),
            None => text.into_owned(),
        })
    }

    pub fn trigger_name(&self, transition: &Transition) -> Cow<'_, str> {
        self.text(transition.trigger)
    }

    pub fn preconditions(&self, transition: &Transition) -> &[Condition] {
        self.condition_slice(transition.preconditions)
    }

    pub fn postconditions(&self, transition: &Transition) -> &[Condition] {
        self.condition_slice(transition.postconditions)
    }

    /// The first postcondition names the state a transition leads to.
    pub fn destination(&self, transition: &Transition) -> Option<Cow<'_, str>> {
        self.postconditions(transition)
            .first()
            .map(|condition| self.text(condition.name))
    }

    fn condition_slice(&self, range: ConditionRange) -> &[Condition] {
        if range.start > range.end {
            return &[];
        }
        self.conditions.get(range.start..range.end).unwrap_or(&[])
    }

    pub fn validate(&self) -> Result<(), TimeforkError> {
        for (index, line) in self.lines.iter().enumerate() {
            self.check_span(line.text, || format!("line {} text", index))?;
            if line.spoken {
                self.check_span(line.speaker, || format!("line {} speaker", index))?;
            }
        }

        for (index, condition) in self.conditions.iter().enumerate() {
            self.check_span(condition.name, || format!("condition {} name", index))?;
        }

        for (index, transition) in self.transitions.iter().enumerate() {
            self.check_span(transition.trigger, || format!("transition {} trigger", index))?;
            for (label, range) in [
                ("preconditions", transition.preconditions),
                ("postconditions", transition.postconditions),
            ] {
                if range.start > range.end || range.end > self.conditions.len() {
                    return Err(TimeforkError::new(
                        "ASSET_SPAN_OUT_OF_BOUNDS",
                        format!(
                            "State \"{}\": transition {} {} {}..{} exceed {} conditions.",
                            self.name,
                            index,
                            label,
                            range.start,
                            range.end,
                            self.conditions.len()
                        ),
                    ));
                }
            }
        }

        Ok(())
    }

    fn check_span(&self, span: Span, what: impl FnOnce() -> String) -> Result<(), TimeforkError> {
        if self.arena.contains(span) {
            return Ok(());
        }
        Err(TimeforkError::new(
            "ASSET_SPAN_OUT_OF_BOUNDS",
            format!(
                "State \"{}\": {} span {}..{} outside arena of {} bytes.",
                self.name,
                what(),
                span.start,
                span.end,
                self.arena.len()
            ),
        ))
    }
}

/// Clickable region produced by a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Trigger {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x > self.x && x < self.x + self.width && y > self.y && y < self.y + self.height
    }
}
