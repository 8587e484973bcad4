//! GameView: paints a [`GameSnapshot`] into a framebuffer.
//!
//! Pure, no I/O. The board is drawn with a configurable cell width (2 columns
//! per cell by default to offset the glyph aspect ratio), with the HUD panel
//! to its right.

use crate::core::{rotation_shape, GameSnapshot};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{PieceKind, Rarity, EMPTY_CELL};

const BLACK: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 14;
const MAX_INVENTORY_ROWS: usize = 9;

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
pub struct GameView {
    cell_w: u16,
    center: bool,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 2,
            center: true,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            ..Self::default()
        }
    }

    /// Pin the board to the top-left corner instead of centering it.
    pub fn top_left(mut self) -> Self {
        self.center = false;
        self
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Render into a reused framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let well_w = snap.width as u16 * self.cell_w;
        let well_h = snap.height as u16;
        let frame_w = well_w + 2;
        let frame_h = well_h + 2;
        let panel_w = PANEL_MIN_WIDTH + 2;

        let (ox, oy) = if self.center {
            (
                viewport.width.saturating_sub(frame_w + panel_w) / 2,
                viewport.height.saturating_sub(frame_h) / 2,
            )
        } else {
            (0, 0)
        };

        let border = if snap.frozen {
            Style::plain(Rgb::new(120, 200, 255), BLACK).bold()
        } else {
            Style::plain(Rgb::new(200, 200, 200), BLACK)
        };
        fb.frame(ox, oy, frame_w, frame_h, border);

        let empty = Style::plain(Rgb::new(90, 90, 100), WELL_BG).dim();
        for y in 0..snap.height {
            for x in 0..snap.width {
                let glyph = match PieceKind::from_color(snap.cell(x, y)) {
                    Some(kind) => Glyph::new('█', Style::plain(piece_rgb(kind), WELL_BG).bold()),
                    None => Glyph::new('·', empty),
                };
                self.paint_cell(fb, ox, oy, x as i32, y as i32, glyph);
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost = Glyph::new('░', Style::plain(piece_rgb(active.kind), WELL_BG).dim());
            for &(dx, dy) in active.mask().cells().iter() {
                let (x, y) = (active.x + dx, ghost_y + dy);
                if x >= 0 && y >= 0 && snap.cell(x as usize, y as usize) == EMPTY_CELL {
                    self.paint_cell(fb, ox, oy, x, y, ghost);
                }
            }
        }

        self.draw_panel(fb, snap, ox + frame_w + 2, oy, viewport);

        if snap.game_over {
            self.banner(fb, ox, oy, frame_w, frame_h, "GAME OVER");
        } else if snap.paused {
            self.banner(fb, ox, oy, frame_w, frame_h, "PAUSED");
        }
    }

    fn paint_cell(&self, fb: &mut FrameBuffer, ox: u16, oy: u16, x: i32, y: i32, glyph: Glyph) {
        if x < 0 || y < 0 {
            return;
        }
        let px = ox + 1 + x as u16 * self.cell_w;
        let py = oy + 1 + y as u16;
        fb.rect(px, py, self.cell_w, 1, glyph.ch, glyph.style);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, top: u16, viewport: Viewport) {
        if x.saturating_add(PANEL_MIN_WIDTH) > viewport.width {
            return;
        }
        let label = Style::default().bold();
        let value = Style::plain(Rgb::new(200, 200, 200), BLACK);
        let muted = value.dim();
        let mut y = top;

        let stats = [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("PIECES", snap.pieces_locked),
        ];
        for (name, n) in stats {
            fb.text(x, y, name, label);
            fb.text(x + 7, y, &n.to_string(), value);
            y += 1;
        }
        fb.text(x, y, &format!("{}ms/row", snap.fall_interval_ms), muted);
        if snap.score_multiplier > 1 {
            fb.text(
                x + 10,
                y,
                &format!("x{}", snap.score_multiplier),
                Style::plain(rarity_rgb(Rarity::Epic), BLACK).bold(),
            );
        }
        y += 2;

        fb.text(x, y, "NEXT", label);
        y += 1;
        let mask = rotation_shape(snap.next, 0);
        let next = Style::plain(piece_rgb(snap.next), BLACK);
        for dy in 0..mask.size() {
            for dx in 0..mask.size() {
                if mask.is_filled(dx, dy) {
                    fb.rect(x + dx as u16 * 2, y + dy as u16, 2, 1, '█', next);
                }
            }
        }
        y += mask.size() as u16 + 1;

        fb.text(x, y, "EFFECTS", label);
        y += 1;
        if snap.effects.is_empty() {
            fb.text(x, y, "-", muted);
            y += 1;
        }
        for effect in &snap.effects {
            let secs = effect.remaining_ms.div_ceil(1000);
            let style = Style::plain(rarity_rgb(effect.rarity), BLACK);
            fb.text(x, y, &format!("{} {}s", effect.name, secs), style);
            y += 1;
        }
        y += 1;

        fb.text(x, y, "ITEMS", label);
        y += 1;
        if snap.inventory.is_empty() {
            fb.text(x, y, "-", muted);
        }
        for (i, item) in snap.inventory.iter().take(MAX_INVENTORY_ROWS).enumerate() {
            let style = Style::plain(rarity_rgb(item.rarity), BLACK);
            fb.text(x, y, &format!("{} {}", i + 1, item.name), style);
            y += 1;
        }
        if snap.inventory.len() > MAX_INVENTORY_ROWS {
            fb.text(
                x,
                y,
                &format!("+{} more", snap.inventory.len() - MAX_INVENTORY_ROWS),
                muted,
            );
        }
    }

    fn banner(&self, fb: &mut FrameBuffer, ox: u16, oy: u16, frame_w: u16, frame_h: u16, text: &str) {
        let len = text.chars().count() as u16;
        let x = ox + frame_w.saturating_sub(len) / 2;
        let y = oy + frame_h / 2;
        fb.text(x, y, text, Style::plain(Rgb::new(255, 255, 255), BLACK).bold());
    }
}

pub fn piece_rgb(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

pub fn rarity_rgb(rarity: Rarity) -> Rgb {
    match rarity {
        Rarity::Common => Rgb::new(200, 200, 200),
        Rarity::Uncommon => Rgb::new(90, 210, 90),
        Rarity::Rare => Rgb::new(80, 140, 240),
        Rarity::Epic => Rgb::new(180, 90, 230),
        Rarity::Legendary => Rgb::new(250, 170, 40),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{definition, GameEngine, SequenceSource};
    use crate::types::ItemKind;

    fn o_engine() -> GameEngine<SequenceSource> {
        GameEngine::new(SequenceSource::new(vec![1]))
    }

    #[test]
    fn board_cells_are_painted() {
        let engine = o_engine();
        let view = GameView::default().top_left();
        let fb = view.render(&engine.snapshot(0), Viewport::new(60, 24));

        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
        // O piece at x=4..5, y=0: columns 1 + 4*2 .. 1 + 6*2
        assert_eq!(fb.get(9, 1).unwrap().ch, '█');
        assert_eq!(fb.get(12, 1).unwrap().ch, '█');
        assert_eq!(fb.get(13, 1).unwrap().ch, '·');
    }

    #[test]
    fn ghost_only_with_preview() {
        let mut engine = o_engine();
        let view = GameView::default().top_left();
        let fb = view.render(&engine.snapshot(0), Viewport::new(60, 24));
        assert_eq!(fb.get(9, 19).unwrap().ch, '·');

        engine.add_item(definition(ItemKind::GhostPiece));
        assert!(engine.use_item(0, 0));
        let fb = view.render(&engine.snapshot(0), Viewport::new(60, 24));
        assert_eq!(fb.get(9, 19).unwrap().ch, '░');
        assert_eq!(fb.get(9, 20).unwrap().ch, '░');
    }

    #[test]
    fn panel_lists_effects_and_items() {
        let mut engine = o_engine();
        engine.add_item(definition(ItemKind::SlowMotion));
        engine.add_item(definition(ItemKind::Bomb));
        assert!(engine.use_item(0, 0));

        let fb = GameView::default()
            .top_left()
            .render(&engine.snapshot(2_500), Viewport::new(60, 24));
        let text: Vec<String> = (0..24).map(|y| fb.row_text(y)).collect();
        assert!(text.iter().any(|r| r.contains("Slow Motion 8s")));
        assert!(text.iter().any(|r| r.contains("1 Bomb")));
        assert!(text.iter().any(|r| r.contains("400ms/row")));
    }

    #[test]
    fn pause_banner() {
        let mut engine = o_engine();
        engine.pause();
        let fb = GameView::default()
            .top_left()
            .render(&engine.snapshot(0), Viewport::new(60, 24));
        assert!(fb.row_text(11).contains("PAUSED"));
    }

    #[test]
    fn small_viewport_does_not_panic() {
        let engine = o_engine();
        let fb = GameView::default().render(&engine.snapshot(0), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
