//! Rendering collaborator.
//!
//! Scenes draw onto a [`Surface`] in virtual screen pixels
//! (`SCREEN_WIDTH x SCREEN_HEIGHT`); the frontend decides how pixels map to
//! its output. Text goes through [`draw_text`], which falls back to one
//! colored block per glyph when no font is loaded.

mod camera;
mod font;

pub use camera::Camera;
pub use font::{AssetSource, DEFAULT_FONT, Font, FsAssets, MemoryAssets, NoAssets};

/// Virtual screen width in pixels.
pub const SCREEN_WIDTH: i32 = 1280;
/// Virtual screen height in pixels.
pub const SCREEN_HEIGHT: i32 = 720;

/// Width of one fallback glyph block.
pub const GLYPH_WIDTH: i32 = 8;
/// Height of one fallback glyph block (and the line advance).
pub const GLYPH_HEIGHT: i32 = 12;

/// Palette shared by every scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Black.
    Black,
    /// White.
    White,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Dark blue, the battle background.
    DarkBlue,
    /// Yellow.
    Yellow,
    /// Orange.
    Orange,
    /// Brown.
    Brown,
    /// Gray.
    Gray,
    /// Dark gray.
    DarkGray,
    /// Cyan.
    Cyan,
}

/// Integer rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Whether the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// Something scenes can draw on.
pub trait Surface {
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline a rectangle with a border `thickness` pixels wide.
    fn outline_rect(&mut self, rect: Rect, color: Color, thickness: i32);

    /// Draw a line of text with its top-left corner at `(x, y)`.
    fn text(&mut self, x: i32, y: i32, text: &str, color: Color);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// [`Surface::fill_rect`].
    Fill(Rect, Color),
    /// [`Surface::outline_rect`].
    Outline(Rect, Color, i32),
    /// [`Surface::text`].
    Text {
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
        /// The string drawn.
        text: String,
        /// Text color.
        color: Color,
    },
}

/// A surface that only records what was drawn.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    /// Commands in draw order.
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every text string drawn, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether any drawn text contains `needle`.
    #[must_use]
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// Number of filled rectangles of exactly `size` pixels.
    #[must_use]
    pub fn count_fills_of_size(&self, w: i32, h: i32) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill(r, _) if r.w == w && r.h == h))
            .count()
    }
}

impl Surface for Recorder {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Fill(rect, color));
    }

    fn outline_rect(&mut self, rect: Rect, color: Color, thickness: i32) {
        self.commands.push(DrawCommand::Outline(rect, color, thickness));
    }

    fn text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }
}

/// Draw text with `font`, or as glyph blocks when there is none.
///
/// Without a font every non-space character becomes a
/// `GLYPH_WIDTH x GLYPH_HEIGHT` filled block; a space only advances the pen
/// and `\n` returns to `x` one line lower.
pub fn draw_text(
    surface: &mut dyn Surface,
    font: Option<&Font>,
    x: i32,
    y: i32,
    text: &str,
    color: Color,
) {
    if let Some(font) = font {
        for (row, line) in (0..).zip(text.split('\n')) {
            surface.text(x, y + row * GLYPH_HEIGHT, &font.render(line), color);
        }
        return;
    }

    let mut pen_x = x;
    let mut pen_y = y;
    for c in text.chars() {
        match c {
            ' ' => pen_x += GLYPH_WIDTH,
            '\n' => {
                pen_x = x;
                pen_y += GLYPH_HEIGHT;
            }
            _ => {
                surface.fill_rect(Rect::new(pen_x, pen_y, GLYPH_WIDTH, GLYPH_HEIGHT), color);
                pen_x += GLYPH_WIDTH;
            }
        }
    }
}

/// Fill a rectangle and draw `label` inside its top-left corner.
pub fn draw_labelled_rect(
    surface: &mut dyn Surface,
    font: Option<&Font>,
    rect: Rect,
    fill: Color,
    label: &str,
    label_color: Color,
) {
    surface.fill_rect(rect, fill);
    draw_text(surface, font, rect.x + 4, rect.y + 4, label, label_color);
}

/// Draw a horizontal gauge (HP or MP).
///
/// Black background, white 1 px outline, and a fill proportional to
/// `current / max` inset by one pixel.
pub fn draw_bar(surface: &mut dyn Surface, rect: Rect, current: u32, max: u32, color: Color) {
    surface.fill_rect(rect, Color::Black);
    surface.outline_rect(rect, Color::White, 1);

    if max == 0 {
        return;
    }
    let ratio = f64::from(current.min(max)) / f64::from(max);
    #[allow(clippy::cast_possible_truncation)]
    let fill_width = (f64::from(rect.w) * ratio) as i32;
    let fill = Rect::new(rect.x + 1, rect.y + 1, fill_width - 2, rect.h - 2);
    if fill_width > 0 && !fill.is_empty() {
        surface.fill_rect(fill, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_with_font_is_one_call() {
        let font = Font::builtin();
        let mut rec = Recorder::new();
        draw_text(&mut rec, Some(&font), 10, 20, "HP: 5", Color::Red);
        assert_eq!(
            rec.commands,
            vec![DrawCommand::Text {
                x: 10,
                y: 20,
                text: "HP: 5".into(),
                color: Color::Red
            }]
        );
    }

    #[test]
    fn test_text_without_font_draws_blocks() {
        let mut rec = Recorder::new();
        draw_text(&mut rec, None, 10, 20, "ab c", Color::White);
        assert_eq!(
            rec.commands,
            vec![
                DrawCommand::Fill(Rect::new(10, 20, 8, 12), Color::White),
                DrawCommand::Fill(Rect::new(18, 20, 8, 12), Color::White),
                DrawCommand::Fill(Rect::new(34, 20, 8, 12), Color::White),
            ]
        );
        assert_eq!(rec.texts().count(), 0);
    }

    #[test]
    fn test_fallback_newline_returns_to_start() {
        let mut rec = Recorder::new();
        draw_text(&mut rec, None, 5, 5, "a\nb", Color::White);
        assert_eq!(
            rec.commands[1],
            DrawCommand::Fill(Rect::new(5, 17, 8, 12), Color::White)
        );
    }

    #[test]
    fn test_font_text_splits_lines() {
        let font = Font::builtin();
        let mut rec = Recorder::new();
        draw_text(&mut rec, Some(&font), 0, 0, "one\ntwo", Color::White);
        assert_eq!(rec.texts().collect::<Vec<_>>(), vec!["one", "two"]);
    }

    #[test]
    fn test_bar_fill_width() {
        let mut rec = Recorder::new();
        draw_bar(&mut rec, Rect::new(0, 0, 200, 20), 50, 100, Color::Red);
        assert_eq!(rec.commands.len(), 3);
        assert_eq!(rec.commands[2], DrawCommand::Fill(Rect::new(1, 1, 98, 18), Color::Red));
    }

    #[test]
    fn test_bar_empty_and_zero_max() {
        let mut rec = Recorder::new();
        draw_bar(&mut rec, Rect::new(0, 0, 200, 20), 0, 100, Color::Red);
        draw_bar(&mut rec, Rect::new(0, 0, 200, 20), 10, 0, Color::Red);
        // background + outline only, twice
        assert_eq!(rec.commands.len(), 4);
    }

    #[test]
    fn test_labelled_rect() {
        let mut rec = Recorder::new();
        draw_labelled_rect(&mut rec, None, Rect::new(0, 0, 50, 20), Color::Gray, "ok", Color::White);
        assert_eq!(rec.commands[0], DrawCommand::Fill(Rect::new(0, 0, 50, 20), Color::Gray));
        assert_eq!(rec.count_fills_of_size(GLYPH_WIDTH, GLYPH_HEIGHT), 2);
    }
}
