use glam::IVec2;
use tf_core::TimeforkError;
use tf_layout::{GlyphCell, GlyphShaper, TextLayouter, TileVertex};
use tf_runtime::{RuntimeContext, StateStore, TriggerEffect};

use crate::config::PlayConfig;
use crate::draw::{Frame, FramePainter, ScrollRequest};
use crate::input::{InputEvent, InputState, Key};

/// Host-side sink for a finished frame.
pub trait TileRenderer {
    /// `scroll` is the world position of the bottom-left screen corner.
    fn submit(&mut self, vertices: &[TileVertex], scroll: IVec2);
}

impl<R: TileRenderer + ?Sized> TileRenderer for &mut R {
    fn submit(&mut self, vertices: &[TileVertex], scroll: IVec2) {
        (**self).submit(vertices, scroll)
    }
}

pub struct PlaySession<S> {
    config: PlayConfig,
    store: StateStore,
    context: RuntimeContext,
    layouter: TextLayouter<S>,
    input: InputState,
    scroll: IVec2,
}

impl<S: GlyphShaper> PlaySession<S> {
    pub fn new(
        config: PlayConfig,
        store: StateStore,
        shaper: S,
        cell: GlyphCell,
    ) -> Result<Self, TimeforkError> {
        let context = RuntimeContext::start(&store, config.runtime.clone())?;
        let layouter = TextLayouter::new(
            shaper,
            cell,
            config.char_range(),
            config.font_size,
            config.trigger_color,
        );
        tracing::info!(
            states = store.len(),
            initial_state = context.current_state(),
            "play session started"
        );
        Ok(Self {
            config,
            store,
            context,
            layouter,
            input: InputState::default(),
            scroll: IVec2::ZERO,
        })
    }

    pub fn config(&self) -> &PlayConfig {
        &self.config
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn context(&self) -> &RuntimeContext {
        &self.context
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn scroll(&self) -> IVec2 {
        self.scroll
    }

    /// Returns whether the event was consumed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::KeyDown(Key::Escape) => true,
            InputEvent::KeyDown(key) => {
                match key {
                    Key::A => self.context.observe_previous(),
                    Key::D => self.context.observe_next(),
                    _ => {}
                }
                self.input.key_down(key)
            }
            InputEvent::KeyUp(key) => self.input.key_up(key),
            InputEvent::MouseDown { x, y } => {
                self.click(x, y);
                true
            }
            InputEvent::MouseWheel { dy } => {
                self.scroll.y += dy * self.config.scroll_speed;
                false
            }
        }
    }

    /// Dispatches a click at window coordinates against the last frame's triggers.
    pub fn click(&mut self, x: i32, y: i32) -> Vec<TriggerEffect> {
        let world_x = x + self.scroll.x;
        let world_y = self.config.screen_height - y + self.scroll.y;
        self.context
            .dispatch_click(&self.store, world_x as f32, world_y as f32)
    }

    pub fn update(&mut self, _elapsed: f32) {
        self.input.clear_downs();
    }

    /// Lays out every timeline, refreshing the clickable triggers and the scroll offset.
    pub fn draw(&mut self) -> Frame {
        let scroll_request = self
            .context
            .take_scroll_request()
            .then(|| ScrollRequest {
                observing: self.context.observing_timeline(),
                current: self.context.current_timeline(),
            });

        let mut painter = FramePainter::new(&self.layouter, &self.config, self.scroll, scroll_request);
        for timeline in self.context.timelines() {
            painter.draw_timeline(timeline);
        }
        let (frame, triggers) = painter.finish();

        self.scroll = frame.scroll;
        self.context.set_triggers(triggers);
        frame
    }

    pub fn render<R: TileRenderer + ?Sized>(&mut self, renderer: &mut R) {
        let frame = self.draw();
        renderer.submit(frame.strip.vertices(), frame.scroll);
    }
}
