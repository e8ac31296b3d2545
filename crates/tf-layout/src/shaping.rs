use std::collections::HashMap;

/// Shaping results are 26.6 fixed point, as FreeType and HarfBuzz report them.
pub const SUBPIXELS_PER_PIXEL: i32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphPosition {
    pub x_advance: i32,
    pub y_advance: i32,
    pub x_offset: i32,
    pub y_offset: i32,
}

impl GlyphPosition {
    pub fn from_pixels(x_advance: i32) -> Self {
        Self {
            x_advance: x_advance * SUBPIXELS_PER_PIXEL,
            ..Self::default()
        }
    }

    pub fn x_advance_px(&self) -> f64 {
        f64::from(self.x_advance) / f64::from(SUBPIXELS_PER_PIXEL)
    }

    pub fn y_advance_px(&self) -> f64 {
        f64::from(self.y_advance) / f64::from(SUBPIXELS_PER_PIXEL)
    }

    pub fn x_offset_px(&self) -> f64 {
        f64::from(self.x_offset) / f64::from(SUBPIXELS_PER_PIXEL)
    }

    pub fn y_offset_px(&self) -> f64 {
        f64::from(self.y_offset) / f64::from(SUBPIXELS_PER_PIXEL)
    }
}

/// External shaping service: one position per `char` of the input.
pub trait GlyphShaper {
    fn shape(&self, text: &str) -> Vec<GlyphPosition>;
}

impl<S: GlyphShaper + ?Sized> GlyphShaper for &S {
    fn shape(&self, text: &str) -> Vec<GlyphPosition> {
        (**self).shape(text)
    }
}

impl<S: GlyphShaper + ?Sized> GlyphShaper for Box<S> {
    fn shape(&self, text: &str) -> Vec<GlyphPosition> {
        (**self).shape(text)
    }
}

/// Monospace shaper with optional per-character advances, for headless hosts and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedAdvanceShaper {
    advance_px: i32,
    overrides: HashMap<char, i32>,
}

impl FixedAdvanceShaper {
    pub fn new(advance_px: i32) -> Self {
        Self {
            advance_px,
            overrides: HashMap::new(),
        }
    }

    pub fn with_advance(mut self, ch: char, advance_px: i32) -> Self {
        self.overrides.insert(ch, advance_px);
        self
    }

    pub fn advance_px(&self, ch: char) -> i32 {
        self.overrides.get(&ch).copied().unwrap_or(self.advance_px)
    }
}

impl GlyphShaper for FixedAdvanceShaper {
    fn shape(&self, text: &str) -> Vec<GlyphPosition> {
        text.chars()
            .map(|ch| GlyphPosition::from_pixels(self.advance_px(ch)))
            .collect()
    }
}
