use glam::{IVec2, Vec2};
use tf_core::Trigger;

use crate::cell::{CharRange, GlyphCell};
use crate::shaping::{GlyphPosition, GlyphShaper};
use crate::tile::{Color, TileStrip};

/// One wrapped output line, as char indices into the laid-out text.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidLine {
    pub start: usize,
    /// Exclusive; a space consumed by the line break lies at `end`.
    pub end: usize,
    /// Sum of the x advances of the characters placed on this line.
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLayout {
    /// Vertical space consumed: line count times font size.
    pub extent: i32,
    pub lines: Vec<LaidLine>,
}

#[derive(Debug)]
struct OpenTrigger {
    name: String,
    x: f64,
    y: f64,
}

pub struct TextLayouter<S> {
    shaper: S,
    cell: GlyphCell,
    chars: CharRange,
    font_size: i32,
    trigger_color: Color,
}

impl<S: GlyphShaper> TextLayouter<S> {
    pub fn new(
        shaper: S,
        cell: GlyphCell,
        chars: CharRange,
        font_size: i32,
        trigger_color: Color,
    ) -> Self {
        Self {
            shaper,
            cell,
            chars,
            font_size,
            trigger_color,
        }
    }

    pub fn font_size(&self) -> i32 {
        self.font_size
    }

    pub fn cell(&self) -> &GlyphCell {
        &self.cell
    }

    /// Lays out one paragraph whose first baseline sits one `font_size` below `origin`.
    ///
    /// Text between `[` and `]` is drawn in the trigger color and recorded as a
    /// clickable [`Trigger`]. Lines wrap at spaces outside markup; a bracketed
    /// run never splits, and a token too wide for `width` sits alone on its line.
    pub fn layout(
        &self,
        text: &str,
        origin: Vec2,
        width: f32,
        color: Color,
        strip: &mut TileStrip,
        triggers: &mut Vec<Trigger>,
    ) -> TextLayout {
        let chars = text.char_indices().collect::<Vec<_>>();
        let scale = self.cell.scale(self.font_size);
        let tile_width = f64::from(self.cell.width as f32 * scale);
        let limit = f64::from(origin.x) + f64::from(width);

        let mut layout = TextLayout::default();
        let mut in_trigger = false;
        let mut open: Option<OpenTrigger> = None;
        let mut start = 0;

        while start < chars.len() {
            let line_number = layout.lines.len() as i32 + 1;
            let positions = self.shaper.shape(&text[chars[start].0..]);
            let position_at = |local: usize| positions.get(local).copied().unwrap_or_default();

            let mut x = f64::from(origin.x);
            let mut y = f64::from(origin.y) - f64::from(line_number * self.font_size);
            let mut line_width = 0.0;
            let mut end = chars.len();
            let mut next = chars.len();

            for (local, &(_, ch)) in chars[start..].iter().enumerate() {
                let position = position_at(local);

                match ch {
                    '[' => {
                        in_trigger = true;
                        open = Some(OpenTrigger {
                            name: String::new(),
                            x,
                            y,
                        });
                    }
                    ']' if in_trigger => {
                        in_trigger = false;
                        if let Some(trigger) = open.take() {
                            triggers.push(Trigger {
                                name: trigger.name,
                                x: trigger.x as f32,
                                y: trigger.y as f32,
                                width: (x - trigger.x) as f32,
                                height: self.font_size as f32,
                            });
                        }
                    }
                    _ if in_trigger => {
                        if let Some(trigger) = open.as_mut() {
                            trigger.name.push(ch);
                        }
                    }
                    _ => {}
                }

                if !in_trigger && ch == ' ' && local > 0 {
                    let following = &chars[start + local + 1..];
                    let cursor = x + position.x_advance_px();
                    if next_word_overflows(following, local + 1, cursor, &position_at, tile_width, limit)
                    {
                        end = start + local;
                        next = end + 1;
                        break;
                    }
                }

                let tile_color = if in_trigger || ch == ']' {
                    self.trigger_color
                } else {
                    color
                };
                let lower_left = IVec2::new(
                    (x + position.x_offset_px()) as i32,
                    (y + position.y_offset_px()) as i32,
                );
                strip.push_tile(
                    lower_left,
                    self.chars.tile_index(ch),
                    tile_color,
                    &self.cell,
                    scale,
                );

                x += position.x_advance_px();
                y += position.y_advance_px();
                line_width += position.x_advance_px();
            }

            layout.lines.push(LaidLine {
                start,
                end,
                width: line_width,
            });
            start = next;
        }

        if open.is_some() {
            tracing::trace!(text, "trigger markup left open");
        }

        layout.extent = layout.lines.len() as i32 * self.font_size;
        layout
    }
}

/// Whether the word starting at `following` would cross `limit` from `cursor`.
///
/// A bracketed run counts as part of the word, even across spaces.
fn next_word_overflows(
    following: &[(usize, char)],
    first: usize,
    mut cursor: f64,
    position_at: &impl Fn(usize) -> GlyphPosition,
    tile_width: f64,
    limit: f64,
) -> bool {
    let mut bracketed = false;
    for (offset, &(_, ch)) in following.iter().enumerate() {
        match ch {
            '[' => bracketed = true,
            ']' => bracketed = false,
            ' ' if !bracketed => return false,
            _ => {}
        }
        cursor += position_at(first + offset).x_advance_px();
        if cursor + tile_width > limit {
            return true;
        }
    }
    false
}
