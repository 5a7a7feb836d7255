//! GameView: maps a board snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::BoardSnapshot;
use crate::input::SelectionState;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{EngineState, Gem, Position};

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

/// One entry per allowed color index.
const GEM_PALETTE: [Rgb; 6] = [
    Rgb::new(220, 80, 80),   // red
    Rgb::new(100, 220, 120), // green
    Rgb::new(80, 120, 220),  // blue
    Rgb::new(240, 220, 80),  // yellow
    Rgb::new(200, 120, 220), // purple
    Rgb::new(80, 220, 220),  // cyan
];

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(90, 90, 120);
const ANCHOR_BG: Rgb = Rgb::new(140, 110, 40);

/// A lightweight terminal renderer for the gem board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render a snapshot (plus the local selection state) into a
    /// framebuffer sized to the viewport.
    pub fn render(
        &self,
        snapshot: &BoardSnapshot,
        selection: &SelectionState,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_px_w = snapshot.width() as u16 * self.cell_w;
        let board_px_h = snapshot.height() as u16 * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };

        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        for y in 0..snapshot.height() {
            for x in 0..snapshot.width() {
                let pos = Position::new(x, y);
                let bg = if selection.cursor() == pos {
                    CURSOR_BG
                } else if selection.anchor() == Some(pos) {
                    ANCHOR_BG
                } else {
                    BOARD_BG
                };

                match snapshot.get(x, y).flatten() {
                    Some(gem) => self.draw_gem(&mut fb, start_x, start_y, pos, gem, bg),
                    None => self.draw_cleared_cell(&mut fb, start_x, start_y, pos, bg),
                }
            }
        }

        self.draw_status_line(&mut fb, snapshot.state, viewport);

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_gem(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        pos: Position,
        gem: Gem,
        bg: Rgb,
    ) {
        let fg = GEM_PALETTE[gem as usize % GEM_PALETTE.len()];
        let style = CellStyle {
            fg,
            bg,
            bold: true,
        };
        self.fill_cell_rect(fb, start_x, start_y, pos, '●', style);
    }

    /// Cleared cells show as dim dots while a cascade is resolving.
    fn draw_cleared_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        pos: Position,
        bg: Rgb,
    ) {
        let style = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg,
            bold: false,
        };
        self.fill_cell_rect(fb, start_x, start_y, pos, '·', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        pos: Position,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + pos.x as u16 * self.cell_w;
        let py = start_y + 1 + pos.y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_status_line(&self, fb: &mut FrameBuffer, state: EngineState, viewport: Viewport) {
        if viewport.height == 0 {
            return;
        }
        let y = viewport.height - 1;

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };
        let hint = CellStyle {
            fg: Rgb::new(140, 140, 140),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };

        let text = match state {
            EngineState::WaitingForInput => "your move",
            EngineState::SwappingGems => "swapping...",
            EngineState::CheckingBoardState => "checking...",
            EngineState::ScoringCombinations => "clearing...",
            EngineState::RefillingEmptySlots => "refilling...",
            EngineState::Idle => "starting...",
        };
        fb.put_str(1, y, text, label);
        fb.put_str(
            14,
            y,
            "arrows/hjkl move · space select · esc cancel · q quit",
            hint,
        );
    }
}
