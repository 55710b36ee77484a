//! BoardView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O). Host-only state that the rules do not know about (cursor,
//! hint, status message) is passed in as [`Marks`].

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Axis, Candy, Coord, Phase, SpecialKind, TokenType};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 95);
const SELECTED_BG: Rgb = Rgb::new(130, 105, 30);
const HINT_BG: Rgb = Rgb::new(35, 95, 70);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const PROGRESS_BAR_W: u16 = 10;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Host-side decorations drawn on top of the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Marks<'a> {
    pub cursor: Option<Coord>,
    pub hint: Option<(Coord, Coord)>,
    /// One line shown under the board.
    pub message: Option<&'a str>,
}

/// Where the board frame lands in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Board frame placement for a `size` x `size` board, border included.
    pub fn board_rect(&self, size: usize, viewport: Viewport) -> BoardRect {
        let size = size as u16;
        let w = size * self.cell_w + 2;
        let h = size + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        BoardRect { x, y, w, h }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        marks: &Marks<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let rect = self.board_rect(snap.board.size, viewport);
        let inside = Style::default().on(BOARD_BG);
        fb.fill_rect(rect.x + 1, rect.y + 1, rect.w - 2, rect.h - 2, ' ', inside);
        let border = Style::new(Rgb::new(200, 200, 200), PANEL_BG);
        fb.draw_box(rect.x, rect.y, rect.w, rect.h, border);

        let size = snap.board.size;
        for row in 0..size {
            for col in 0..size {
                let at = Coord::new(row, col);
                let cell = snap.board.get(at).flatten();
                self.draw_cell(fb, rect, at, cell, cell_bg(snap, marks, at));
            }
        }

        if let Some(msg) = marks.message {
            let y = rect.y + rect.h;
            if y < viewport.height {
                fb.put_str(rect.x, y, msg, Style::new(Rgb::new(230, 200, 120), PANEL_BG));
            }
        }

        self.draw_side_panel(fb, snap, viewport, rect);

        match snap.phase {
            Phase::Won => self.draw_overlay(fb, rect, "LEVEL COMPLETE!", "n next  r retry"),
            Phase::Lost => self.draw_overlay(fb, rect, "OUT OF MOVES", "r retry"),
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        marks: &Marks<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, marks, viewport, &mut fb);
        fb
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        rect: BoardRect,
        at: Coord,
        cell: Option<Candy>,
        bg: Rgb,
    ) {
        let px = rect.x + 1 + at.col as u16 * self.cell_w;
        let py = rect.y + 1 + at.row as u16;

        let (ch, style) = match cell {
            Some(candy) => {
                let style = Style::new(candy_color(candy.token), bg);
                let style = if candy.special.is_some() { style.bold() } else { style };
                (candy_glyph(candy), style)
            }
            None => ('·', Style::new(Rgb::new(90, 90, 100), bg).dim()),
        };
        fb.fill_rect(px, py, self.cell_w, 1, ' ', Style::default().on(bg));
        fb.put_char(px, py, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        rect: BoardRect,
    ) {
        let x = rect.x.saturating_add(rect.w).saturating_add(2);
        if x >= viewport.width || viewport.width - x < 14 {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = rect.y;
        let fields = [
            ("LEVEL", snap.level),
            ("SCORE", snap.score),
            ("GOAL", snap.goal),
            ("MOVES", snap.moves_remaining),
        ];
        for (name, v) in fields {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        let pct = snap.progress_percent();
        let filled = (pct as u16 * PROGRESS_BAR_W / 100).min(PROGRESS_BAR_W);
        let bar = Style::new(Rgb::new(255, 110, 150), PANEL_BG);
        for i in 0..PROGRESS_BAR_W {
            let ch = if i < filled { '█' } else { '░' };
            fb.put_char(x + i, y, ch, if i < filled { bar } else { dim });
        }
        let end = fb.put_u32(x + PROGRESS_BAR_W + 1, y, pct, value);
        fb.put_char(end, y, '%', value);
        y = y.saturating_add(2);

        fb.put_str(x, y, &snap.mission, dim);
        y = y.saturating_add(2);

        for line in ["arrows  move", "space   select", "?       hint", "r retry  q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, line, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, rect: BoardRect, title: &str, help: &str) {
        let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let mid_y = rect.y.saturating_add(rect.h / 2);
        for (dy, text) in [(0, title), (1, help)] {
            let w = text.chars().count() as u16;
            let x = rect.x.saturating_add(rect.w.saturating_sub(w) / 2);
            fb.put_str(x, mid_y + dy, text, if dy == 0 { style } else { style.dim() });
        }
    }
}

fn cell_bg(snap: &GameSnapshot, marks: &Marks<'_>, at: Coord) -> Rgb {
    if snap.selected == Some(at) {
        SELECTED_BG
    } else if marks.cursor == Some(at) {
        CURSOR_BG
    } else if matches!(marks.hint, Some((a, b)) if a == at || b == at) {
        HINT_BG
    } else {
        BOARD_BG
    }
}

/// Glyph for a candy; specials get their own shapes.
pub fn candy_glyph(candy: Candy) -> char {
    match candy.special {
        None => '●',
        Some(SpecialKind::AreaClear) => '◆',
        Some(SpecialKind::LineClear(Axis::Horizontal)) => '═',
        Some(SpecialKind::LineClear(Axis::Vertical)) => '║',
    }
}

pub fn candy_color(token: TokenType) -> Rgb {
    match token.0 {
        0 => Rgb::new(220, 60, 60),   // apple
        1 => Rgb::new(255, 150, 40),  // orange
        2 => Rgb::new(240, 220, 70),  // lemon
        3 => Rgb::new(160, 90, 210),  // grape
        4 => Rgb::new(90, 200, 110),  // watermelon
        5 => Rgb::new(255, 110, 150), // strawberry
        6 => Rgb::new(180, 30, 60),   // cherry
        _ => Rgb::new(255, 190, 150), // peach
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoardSnapshot;

    fn snapshot(size: usize) -> GameSnapshot {
        GameSnapshot {
            board: BoardSnapshot {
                size,
                cells: vec![Some(Candy::plain(TokenType(1))); size * size],
            },
            level: 1,
            goal: 1000,
            moves_remaining: 25,
            mission: "Score 1000 points in 25 moves!".into(),
            ..Default::default()
        }
    }

    #[test]
    fn board_frame_fits_exactly() {
        // 8 cells * 2 columns + border = 18 wide, 8 + border = 10 tall.
        let view = BoardView::default();
        let fb = view.render(&snapshot(8), &Marks::default(), Viewport::new(18, 10));
        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
        assert_eq!(fb.get(17, 0).unwrap().ch, '┐');
        assert_eq!(fb.get(0, 9).unwrap().ch, '└');
        assert_eq!(fb.get(17, 9).unwrap().ch, '┘');
        assert_eq!(fb.get(1, 1).unwrap().ch, '●');
        assert_eq!(fb.get(2, 1).unwrap().ch, ' ');
        assert_eq!(fb.get(1, 1).unwrap().style.fg, candy_color(TokenType(1)));
    }

    #[test]
    fn specials_and_holes_have_distinct_glyphs() {
        let mut snap = snapshot(3);
        snap.board.cells[0] = Some(Candy::special(TokenType(0), SpecialKind::AreaClear));
        snap.board.cells[1] = Some(Candy::special(
            TokenType(0),
            SpecialKind::LineClear(Axis::Vertical),
        ));
        snap.board.cells[2] = None;

        let fb = BoardView::default().render(&snap, &Marks::default(), Viewport::new(8, 5));
        assert_eq!(fb.get(1, 1).unwrap().ch, '◆');
        assert!(fb.get(1, 1).unwrap().style.bold);
        assert_eq!(fb.get(3, 1).unwrap().ch, '║');
        assert_eq!(fb.get(5, 1).unwrap().ch, '·');
    }

    #[test]
    fn selection_wins_over_cursor_and_hint() {
        let mut snap = snapshot(3);
        snap.selected = Some(Coord::new(0, 0));
        let marks = Marks {
            cursor: Some(Coord::new(0, 0)),
            hint: Some((Coord::new(2, 1), Coord::new(2, 2))),
            message: None,
        };
        let fb = BoardView::default().render(&snap, &marks, Viewport::new(8, 5));
        assert_eq!(fb.get(1, 1).unwrap().style.bg, SELECTED_BG);
        assert_eq!(fb.get(2, 1).unwrap().style.bg, SELECTED_BG);
        assert_eq!(fb.get(3, 3).unwrap().style.bg, HINT_BG);
        assert_eq!(fb.get(5, 3).unwrap().style.bg, HINT_BG);
        assert_eq!(fb.get(3, 2).unwrap().style.bg, BOARD_BG);
    }
}
