//! A [`Surface`] backed by a grid of terminal cells.
//!
//! The game draws in virtual pixels (`SCREEN_WIDTH x SCREEN_HEIGHT`); each
//! cell covers a block of them. A filled rectangle paints the background of
//! every cell whose center it contains; text is placed one character per
//! cell starting at the cell under its top-left corner.

// Pixel to cell conversion uses intentional casts
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use ratatui::buffer::Buffer;
use ratatui::layout::Rect as Area;
use ratatui::style::Color as TermColor;
use ratatui::widgets::Widget;
use tilequest::render::{Color, Rect, SCREEN_HEIGHT, SCREEN_WIDTH, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::White,
    bg: Color::Black,
};

/// Cell grid the game draws into each frame.
#[derive(Debug, Clone)]
pub(crate) struct TerminalSurface {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    /// Create a blank grid of `cols x rows` cells.
    pub(crate) fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![BLANK; usize::from(cols) * usize::from(rows)],
        }
    }

    /// Blank every cell, resizing to `cols x rows` if needed.
    pub(crate) fn reset(&mut self, cols: u16, rows: u16) {
        if cols.max(1) != self.cols || rows.max(1) != self.rows {
            *self = Self::new(cols, rows);
        } else {
            self.cells.fill(BLANK);
        }
    }

    fn cell_w(&self) -> f64 {
        f64::from(SCREEN_WIDTH) / f64::from(self.cols)
    }

    fn cell_h(&self) -> f64 {
        f64::from(SCREEN_HEIGHT) / f64::from(self.rows)
    }

    fn cell_mut(&mut self, col: i64, row: i64) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= i64::from(self.cols) || row >= i64::from(self.rows) {
            return None;
        }
        let idx = row as usize * usize::from(self.cols) + col as usize;
        self.cells.get_mut(idx)
    }

    /// Cells whose centers fall inside `rect`, as `(col, row)` ranges.
    fn covered(&self, rect: Rect) -> (std::ops::Range<i64>, std::ops::Range<i64>) {
        let (cw, ch) = (self.cell_w(), self.cell_h());
        let first = |start: i32, size: f64| (f64::from(start) / size - 0.5).ceil() as i64;
        let cols = first(rect.x, cw)..first(rect.x + rect.w, cw);
        let rows = first(rect.y, ch)..first(rect.y + rect.h, ch);
        (cols, rows)
    }

    fn paint(&mut self, col: i64, row: i64, color: Color) {
        if let Some(cell) = self.cell_mut(col, row) {
            cell.bg = color;
            cell.ch = ' ';
        }
    }
}

impl Surface for TerminalSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        let (cols, rows) = self.covered(rect);
        for row in rows {
            for col in cols.clone() {
                self.paint(col, row, color);
            }
        }
    }

    fn outline_rect(&mut self, rect: Rect, color: Color, _thickness: i32) {
        if rect.is_empty() {
            return;
        }
        let (cols, rows) = self.covered(rect);
        let (Some(last_col), Some(last_row)) = (cols.clone().last(), rows.clone().last()) else {
            return;
        };
        for col in cols.clone() {
            self.paint(col, rows.start, color);
            self.paint(col, last_row, color);
        }
        for row in rows {
            self.paint(cols.start, row, color);
            self.paint(last_col, row, color);
        }
    }

    fn text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        let row = (f64::from(y) / self.cell_h()).floor() as i64;
        let start = (f64::from(x) / self.cell_w()).floor() as i64;
        for (offset, ch) in (0..).zip(text.chars()) {
            if let Some(cell) = self.cell_mut(start + offset, row) {
                cell.ch = ch;
                cell.fg = color;
            }
        }
    }
}

impl Widget for &TerminalSurface {
    fn render(self, area: Area, buf: &mut Buffer) {
        for row in 0..self.rows.min(area.height) {
            for col in 0..self.cols.min(area.width) {
                let idx = usize::from(row) * usize::from(self.cols) + usize::from(col);
                let Some(cell) = self.cells.get(idx) else {
                    continue;
                };
                if let Some(target) = buf.cell_mut((area.x + col, area.y + row)) {
                    target
                        .set_char(cell.ch)
                        .set_fg(term_color(cell.fg))
                        .set_bg(term_color(cell.bg));
                }
            }
        }
    }
}

const fn term_color(color: Color) -> TermColor {
    match color {
        Color::Black => TermColor::Black,
        Color::White => TermColor::White,
        Color::Red => TermColor::Red,
        Color::Green => TermColor::Green,
        Color::Blue => TermColor::Blue,
        Color::DarkBlue => TermColor::Rgb(0, 0, 139),
        Color::Yellow => TermColor::Yellow,
        Color::Orange => TermColor::Rgb(255, 165, 0),
        Color::Brown => TermColor::Rgb(139, 69, 19),
        Color::Gray => TermColor::Gray,
        Color::DarkGray => TermColor::DarkGray,
        Color::Cyan => TermColor::Cyan,
    }
}
