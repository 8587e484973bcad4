//! TerminalRenderer: flushes framebuffers to the real terminal.
//!
//! Each frame is compared against the previous one row by row; only the span
//! between the first and last changed glyph of a dirty row is re-emitted.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

pub struct TerminalRenderer {
    out: io::Stdout,
    prev: Option<FrameBuffer>,
    scratch: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            prev: None,
            scratch: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.scratch.clear();
        self.scratch.queue(terminal::EnterAlternateScreen)?;
        self.scratch.queue(cursor::Hide)?;
        self.scratch.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.scratch.clear();
        self.scratch.queue(ResetColor)?;
        self.scratch.queue(SetAttribute(Attribute::Reset))?;
        self.scratch.queue(terminal::EnableLineWrap)?;
        self.scratch.queue(cursor::Show)?;
        self.scratch.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode().context("disable raw mode")
    }

    /// Force a full redraw on the next frame (e.g. after a resize)
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    pub fn draw(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.scratch.clear();
        match &self.prev {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                encode_diff(prev, frame, &mut self.scratch)?;
            }
            _ => encode_full(frame, &mut self.scratch)?,
        }
        self.flush()?;

        self.prev = Some(frame.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out
            .write_all(&self.scratch)
            .and_then(|_| self.out.flush())
            .context("write to terminal")
    }
}

/// Encode a full redraw of `frame` into `out`
pub fn encode_full(frame: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut style = None;
    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y))?;
        write_glyphs(out, frame.row(y), &mut style)?;
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the changed span of each dirty row
pub fn encode_diff(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    for y in 0..next.height() {
        let Some((start, end)) = dirty_span(prev.row(y), next.row(y)) else {
            continue;
        };
        out.queue(cursor::MoveTo(start as u16, y))?;
        write_glyphs(out, &next.row(y)[start..end], &mut style)?;
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Half-open range covering every differing glyph, or None if the rows match
fn dirty_span(a: &[Glyph], b: &[Glyph]) -> Option<(usize, usize)> {
    let first = a.iter().zip(b).position(|(x, y)| x != y)?;
    let last = a.iter().zip(b).rposition(|(x, y)| x != y)?;
    Some((first, last + 1))
}

fn write_glyphs(out: &mut Vec<u8>, glyphs: &[Glyph], current: &mut Option<Style>) -> Result<()> {
    for glyph in glyphs {
        if *current != Some(glyph.style) {
            set_style(out, glyph.style)?;
            *current = Some(glyph.style);
        }
        out.queue(Print(glyph.ch))?;
    }
    Ok(())
}

fn set_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
