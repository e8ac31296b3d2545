use glam::{IVec2, Vec2};
use tf_core::{State, Trigger};
use tf_layout::{Color, GlyphShaper, TextLayouter, TileStrip};
use tf_runtime::Timeline;

use crate::config::PlayConfig;

/// Which timeline a pending scroll-to-end targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScrollRequest {
    pub(crate) observing: usize,
    pub(crate) current: usize,
}

/// One frame's worth of tiles plus the view offset to draw them at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub strip: TileStrip,
    pub scroll: IVec2,
}

/// Accumulates tiles and trigger rectangles while walking every timeline.
pub(crate) struct FramePainter<'a, S> {
    layouter: &'a TextLayouter<S>,
    config: &'a PlayConfig,
    strip: TileStrip,
    triggers: Vec<Trigger>,
    scroll: IVec2,
    scroll_request: Option<ScrollRequest>,
}

impl<'a, S: GlyphShaper> FramePainter<'a, S> {
    pub(crate) fn new(
        layouter: &'a TextLayouter<S>,
        config: &'a PlayConfig,
        scroll: IVec2,
        scroll_request: Option<ScrollRequest>,
    ) -> Self {
        Self {
            layouter,
            config,
            strip: TileStrip::new(),
            triggers: Vec::new(),
            scroll,
            scroll_request,
        }
    }

    pub(crate) fn finish(self) -> (Frame, Vec<Trigger>) {
        (
            Frame {
                strip: self.strip,
                scroll: self.scroll,
            },
            self.triggers,
        )
    }

    fn draw_text(&mut self, text: &str, position: Vec2, width: i32, color: Color) -> i32 {
        self.layouter
            .layout(
                text,
                position,
                width as f32,
                color,
                &mut self.strip,
                &mut self.triggers,
            )
            .extent
    }

    /// Draws every line of `state` downward from `position`, returning the height used.
    pub(crate) fn draw_state(&mut self, state: &State, position: IVec2) -> i32 {
        let font_size = self.config.font_size;
        let mut y = position.y;
        for (index, line) in state.lines.iter().enumerate() {
            let color = match state.speaker(line) {
                Some(speaker) => self.config.speaker_color(&speaker),
                None => self.config.default_color,
            };
            let text = state.line_text(index).unwrap_or_default();
            y -= self.draw_text(
                &text,
                Vec2::new(position.x as f32, y as f32),
                self.config.state_width,
                color,
            );
            y -= font_size;
        }
        position.y - y
    }

    pub(crate) fn draw_timeline(&mut self, timeline: &Timeline) {
        let config = self.config;
        let font_size = config.font_size;
        let x = timeline.index as i32 * config.timeline_width;
        let mut y = config.screen_height;

        self.draw_text(
            &format!("Year {}", timeline.year),
            Vec2::new(x as f32, y as f32),
            config.timeline_width,
            config.date_color,
        );
        y -= font_size * 2;

        for (index, state) in timeline.states.iter().enumerate() {
            if let Some(request) = self.scroll_request {
                let focused = timeline.index == request.observing
                    && (index == 0 || request.observing == request.current);
                if focused {
                    self.scroll.x = x - (config.screen_width - config.timeline_width) / 2;
                    self.scroll.y = y - config.screen_height;
                    if index == 0 {
                        self.scroll.y += font_size * 2;
                    }
                }
            }

            y -= self.draw_state(state, IVec2::new(x, y));
            y -= font_size;
        }

        let label_x = x as f32 - config.timeline_width as f32 * 0.05;
        let label_y = self.scroll.y + config.screen_height;
        self.draw_text(
            &timeline.index.to_string(),
            Vec2::new(label_x, label_y as f32),
            config.timeline_width,
            config.timeline_index_color,
        );
    }
}

#[cfg(test)]
mod draw_tests {
    use super::*;
    use std::sync::Arc;
    use tf_compiler::compile_state;
    use tf_layout::{FixedAdvanceShaper, GlyphCell, VERTICES_PER_TILE};

    fn layouter(config: &PlayConfig) -> TextLayouter<FixedAdvanceShaper> {
        TextLayouter::new(
            FixedAdvanceShaper::new(10),
            GlyphCell {
                width: 10,
                top: 18,
                bottom: 6,
            },
            config.char_range(),
            config.font_size,
            config.trigger_color,
        )
    }

    fn timeline(index: usize, scripts: &[&str]) -> Timeline {
        let mut timeline = Timeline::new(index, 2094);
        for (n, source) in scripts.iter().enumerate() {
            let state = compile_state(&format!("s{}", n), source).expect("compile should pass");
            timeline.push(Arc::new(state));
        }
        timeline
    }

    fn tile_colors(frame: &Frame) -> Vec<Color> {
        frame
            .strip
            .vertices()
            .chunks(VERTICES_PER_TILE)
            .map(|tile| tile[0].color)
            .collect()
    }

    #[test]
    fn state_height_counts_lines_and_gaps() {
        let config = PlayConfig::default();
        let layouter = layouter(&config);
        let mut painter = FramePainter::new(&layouter, &config, IVec2::ZERO, None);
        let state = compile_state("s", "*Angela: Hi.\nThe room is quiet.\n").expect("compile");
        let used = painter.draw_state(&state, IVec2::new(0, 720));
        assert_eq!(used, 24 * 4);

        let (frame, triggers) = painter.finish();
        assert!(triggers.is_empty());
        let colors = tile_colors(&frame);
        assert_eq!(colors.len(), "Angela: Hi.".len() + "The room is quiet.".len());
        assert_eq!(colors[0], config.speaker_color("Angela"));
        assert_eq!(colors["Angela: Hi.".len()], config.default_color);
    }

    #[test]
    fn timeline_header_label_and_triggers() {
        let config = PlayConfig::default();
        let layouter = layouter(&config);
        let mut painter = FramePainter::new(&layouter, &config, IVec2::ZERO, None);
        painter.draw_timeline(&timeline(1, &["*You: Shall we [Go to 2034]?\n"]));
        let (frame, triggers) = painter.finish();

        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].name, "Go to 2034");
        // Header line, blank line, then the dialogue line.
        assert_eq!(triggers[0].y, (720 - 24 * 3) as f32);
        assert!(triggers[0].x > 600.0);

        let colors = tile_colors(&frame);
        assert_eq!(colors[0], config.date_color);
        assert_eq!(*colors.last().expect("label tile"), config.timeline_index_color);
        assert_eq!(frame.scroll, IVec2::ZERO);
    }

    #[test]
    fn scroll_request_targets_observed_timeline_end() {
        let config = PlayConfig::default();
        let layouter = layouter(&config);
        let request = ScrollRequest {
            observing: 0,
            current: 0,
        };
        let mut painter = FramePainter::new(&layouter, &config, IVec2::ZERO, Some(request));
        painter.draw_timeline(&timeline(0, &["One.\n", "Two.\n"]));
        let (frame, _) = painter.finish();

        // Below the header, the first state's line and gap, and the gap between states.
        let second_state_y = 720 - 48 - 48 - 24;
        assert_eq!(frame.scroll.x, -(1280 - 600) / 2);
        assert_eq!(frame.scroll.y, second_state_y - 720);
    }

    #[test]
    fn scroll_on_other_timeline_stops_at_first_state() {
        let config = PlayConfig::default();
        let layouter = layouter(&config);
        let request = ScrollRequest {
            observing: 1,
            current: 2,
        };
        let mut painter = FramePainter::new(&layouter, &config, IVec2::ZERO, Some(request));
        painter.draw_timeline(&timeline(0, &["Elsewhere.\n"]));
        painter.draw_timeline(&timeline(1, &["One.\n", "Two.\n"]));
        let (frame, _) = painter.finish();

        assert_eq!(frame.scroll.x, 600 - (1280 - 600) / 2);
        assert_eq!(frame.scroll.y, 720 - 48 - 720 + 48);
    }
}
