//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure, no I/O.

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

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

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const PANEL_MIN_WIDTH: u16 = 10;

/// Terminal layout for one game: bordered playfield plus a side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_ghost: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self::new(2, 1)
    }
}

/// Where the playfield landed inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            show_ghost: true,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_ghost(mut self, show_ghost: bool) -> Self {
        self.show_ghost = show_ghost;
        self
    }

    /// Render into a reused framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = BOARD_WIDTH as u16 * self.cell_w;
        let board_h = BOARD_HEIGHT as u16 * self.cell_h;
        let (w, h) = (board_w + 2, board_h + 2);
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_w,
            board_h,
            ' ',
            CellStyle::new(PLAYFIELD_BG, PLAYFIELD_BG),
        );
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as i8, y as i8);
                match cell {
                    Some(kind) => self.draw_block(fb, frame, x, y, *kind),
                    None => self.fill_cell(
                        fb,
                        frame,
                        x,
                        y,
                        '·',
                        CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim(),
                    ),
                }
            }
        }

        if let (Some(current), Some(ghost_y), true) = (snap.current, snap.ghost_y, self.show_ghost)
        {
            let ghost = PieceSnapshot {
                y: ghost_y,
                ..current
            };
            let style = CellStyle::new(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
            for (x, y) in ghost.cells() {
                self.fill_cell(fb, frame, x, y, '░', style);
            }
        }

        if let Some(current) = snap.current {
            for (x, y) in current.cells() {
                self.draw_block(fb, frame, x, y, current.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.paused {
            draw_overlay_text(fb, frame, "PAUSED");
        } else if snap.game_over {
            draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Allocating convenience wrapper around [`GameView::render_into`].
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, kind: PieceKind) {
        let style = CellStyle::new(kind.color().into(), PLAYFIELD_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    /// Fill one board cell; cells off the board (above the top included) are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if viewport.width.saturating_sub(panel_x) < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y, &next);
        }
    }

    /// Draw a piece's shape normalised to its bounding box.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &PieceSnapshot) {
        let min_x = piece.shape.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
        let min_y = piece.shape.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
        let style = CellStyle::new(piece.color().into(), PANEL_BG).bold();
        for &(dx, dy) in piece.shape.iter() {
            let px = x + (dx - min_x) as u16 * self.cell_w;
            let py = y + (dy - min_y) as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, f: Frame, style: CellStyle) {
    if f.w < 2 || f.h < 2 {
        return;
    }
    let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

    fb.put_char(f.x, f.y, '┌', style);
    fb.put_char(right, f.y, '┐', style);
    fb.put_char(f.x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for x in f.x + 1..right {
        fb.put_char(x, f.y, '─', style);
        fb.put_char(x, bottom, '─', style);
    }
    for y in f.y + 1..bottom {
        fb.put_char(f.x, y, '│', style);
        fb.put_char(right, y, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, f: Frame, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = f.x.saturating_add(f.w.saturating_sub(text_w) / 2);
    let y = f.y.saturating_add(f.h / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameSession, PieceQueue, SessionConfig};

    fn session(kinds: &[PieceKind]) -> GameSession {
        GameSession::with_queue(SessionConfig::default(), PieceQueue::scripted(kinds), 0)
    }

    fn find(fb: &FrameBuffer, needle: &str) -> Option<(u16, u16)> {
        (0..fb.height()).find_map(|y| {
            let row = fb.row_text(y);
            row.find(needle)
                .map(|byte| (row[..byte].chars().count() as u16, y))
        })
    }

    #[test]
    fn board_fits_with_border() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&GameSnapshot::default(), Viewport::new(22, 22));
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('┌'));
        assert_eq!(fb.get(21, 21).map(|c| c.ch), Some('┘'));
        // Empty cells show the grid dot.
        assert_eq!(fb.get(1, 1).map(|c| c.ch), Some('·'));
    }

    #[test]
    fn active_piece_uses_kind_color() {
        let game = session(&[PieceKind::O]);
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&game.snapshot(), Viewport::new(22, 22));

        // O at spawn covers board (5,0); column 5 starts at 1 + 5 * 2.
        let cell = fb.get(11, 1).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, Rgb::new(255, 255, 0));
    }

    #[test]
    fn ghost_is_drawn_at_landing_row() {
        let game = session(&[PieceKind::O]);
        let snap = game.snapshot();
        assert_eq!(snap.ghost_y, Some(18));

        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&snap, Viewport::new(22, 22));
        assert_eq!(fb.get(11, 19).map(|c| c.ch), Some('░'));
        assert_eq!(fb.get(11, 20).map(|c| c.ch), Some('░'));

        let fb = view.with_ghost(false).render(&snap, Viewport::new(22, 22));
        assert_eq!(fb.get(11, 20).map(|c| c.ch), Some('·'));
    }

    #[test]
    fn side_panel_shows_stats_and_next() {
        let game = session(&[PieceKind::O, PieceKind::I]);
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&game.snapshot(), Viewport::new(60, 22));

        let (x, y) = find(&fb, "SCORE").expect("score label");
        assert_eq!(fb.get(x, y + 1).map(|c| c.ch), Some('0'));
        let (x, y) = find(&fb, "LEVEL").expect("level label");
        assert_eq!(fb.get(x, y + 1).map(|c| c.ch), Some('1'));
        assert!(find(&fb, "LINES").is_some());

        // The next piece is an I: one row of eight columns.
        let (x, y) = find(&fb, "NEXT").expect("next label");
        let preview = fb.row_text(y + 1);
        let preview: String = preview.chars().skip(x as usize).take(8).collect();
        assert_eq!(preview, "████████");
    }

    #[test]
    fn narrow_viewport_skips_side_panel() {
        let fb = GameView::default().render(&GameSnapshot::default(), Viewport::new(24, 22));
        assert!(find(&fb, "SCORE").is_none());
    }

    #[test]
    fn overlays() {
        let view = GameView::default();
        let mut snap = GameSnapshot {
            paused: true,
            ..GameSnapshot::default()
        };
        assert!(find(&view.render(&snap, Viewport::new(40, 24)), "PAUSED").is_some());

        snap.paused = false;
        snap.game_over = true;
        assert!(find(&view.render(&snap, Viewport::new(40, 24)), "GAME OVER").is_some());
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let game = session(&[PieceKind::T]);
        let fb = GameView::default().render(&game.snapshot(), Viewport::new(3, 2));
        assert_eq!((fb.width(), fb.height()), (3, 2));
    }
}
