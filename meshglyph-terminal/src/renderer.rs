/// Writes a rendered framebuffer to the terminal
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use meshglyph_core::framebuffer::BLANK_GLYPH;
use meshglyph_core::shading::{LIT_GLYPH, SHADOW_GLYPH};
use meshglyph_core::{FrameBuffer, ShadingMode};
use std::io::Write;
use std::time::Duration;

/// Background colors for palette glyphs
const MATERIAL_COLORS: [Color; 7] = [
    Color::DarkRed,
    Color::DarkGreen,
    Color::DarkYellow,
    Color::DarkBlue,
    Color::DarkMagenta,
    Color::DarkCyan,
    Color::Grey,
];

/// Background of shadowed cells in color mode
const ALBEDO: Color = Color::DarkRed;

/// How a frame gets printed
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphPresenter {
    /// Print colored blocks instead of glyphs
    pub color: bool,
}

impl GlyphPresenter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Color for a cell, `None` when it should print its glyph as is
    fn cell_color(&self, glyph: char, shading: ShadingMode) -> Option<Color> {
        if !self.color {
            return None;
        }
        if glyph == BLANK_GLYPH {
            return Some(Color::Black);
        }

        let color = match shading {
            ShadingMode::Lit => match glyph {
                SHADOW_GLYPH => ALBEDO,
                LIT_GLYPH => Color::White,
                _ => Color::Black,
            },
            ShadingMode::Material => MATERIAL_COLORS[glyph as usize % MATERIAL_COLORS.len()],
        };
        Some(color)
    }

    fn draw_row<W: Write>(
        &self,
        writer: &mut W,
        row: &[char],
        shading: ShadingMode,
    ) -> std::io::Result<()> {
        if self.color {
            for &glyph in row {
                if let Some(color) = self.cell_color(glyph, shading) {
                    writer.queue(SetBackgroundColor(color))?;
                }
                writer.queue(Print(' '))?;
            }
            writer.queue(ResetColor)?;
        } else {
            let line: String = row.iter().collect();
            writer.queue(Print(line))?;
        }
        Ok(())
    }

    /// Queue the grid as plain lines, for output that scrolls
    pub fn draw_lines<W: Write>(
        &self,
        writer: &mut W,
        buffer: &FrameBuffer,
        shading: ShadingMode,
    ) -> std::io::Result<()> {
        for row in buffer.rows() {
            self.draw_row(writer, row, shading)?;
            writer.queue(Print('\n'))?;
        }
        Ok(())
    }

    /// Queue the grid over the whole screen, one cursor move per row
    pub fn draw_screen<W: Write>(
        &self,
        writer: &mut W,
        buffer: &FrameBuffer,
        shading: ShadingMode,
    ) -> std::io::Result<()> {
        for (y, row) in buffer.rows().enumerate() {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            self.draw_row(writer, row, shading)?;
        }
        Ok(())
    }

    /// Queue a highlighted status line
    pub fn draw_status<W: Write>(&self, writer: &mut W, text: &str) -> std::io::Result<()> {
        writer.queue(SetForegroundColor(Color::Yellow))?;
        writer.queue(Print(text))?;
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Frame timing text shown with `--frame-time`
pub fn frame_time(total: Duration, render: Duration) -> String {
    format!(
        "[Frame: {:.1} ms (Render: {:.1} ms)]",
        total.as_secs_f64() * 1000.0,
        render.as_secs_f64() * 1000.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_draw_prints_glyphs() {
        let mut buffer = FrameBuffer::new(3, 2);
        buffer.test_and_set(1, 0, 1.0, '#');
        buffer.test_and_set(2, 1, 1.0, '!');

        let mut out = Vec::new();
        GlyphPresenter::new(false)
            .draw_lines(&mut out, &buffer, ShadingMode::Lit)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), " # \n  !\n");
    }

    #[test]
    fn test_colors() {
        let presenter = GlyphPresenter::new(true);
        assert_eq!(presenter.cell_color(' ', ShadingMode::Lit), Some(Color::Black));
        assert_eq!(presenter.cell_color(SHADOW_GLYPH, ShadingMode::Lit), Some(ALBEDO));
        assert_eq!(presenter.cell_color(LIT_GLYPH, ShadingMode::Lit), Some(Color::White));
        assert_eq!(
            presenter.cell_color('a', ShadingMode::Material),
            Some(MATERIAL_COLORS['a' as usize % 7])
        );
        assert_eq!(GlyphPresenter::new(false).cell_color('#', ShadingMode::Lit), None);
    }

    #[test]
    fn test_frame_time_text() {
        let text = frame_time(Duration::from_millis(12), Duration::from_micros(3500));
        assert_eq!(text, "[Frame: 12.0 ms (Render: 3.5 ms)]");
    }
}
