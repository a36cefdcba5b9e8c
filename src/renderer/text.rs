//! HUD text rendering
//!
//! Uses fontdue to rasterize an embedded TrueType font once at load time.
//! Each glyph's coverage bitmap is emitted as quads whose alpha is the pixel
//! coverage, so text flows through the same alpha-blended vertex pipeline as
//! every other shape.

use super::shapes;
use super::vertex::Vertex;
use crate::sim::Rect;

/// DejaVu Sans Bold, see `assets/fonts/LICENSE`
const HUD_FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// Requested size of the death counter font
pub const HUD_FONT_SIZE: f32 = 36.0;
/// The classic default game font is drawn at this fraction of the requested size
const DEFAULT_FONT_SCALE: f32 = 0.6875;

/// Rasterized range (printable ASCII)
const FIRST_CHAR: u32 = 32;
const LAST_CHAR: u32 = 126;

/// Pixel size the HUD font is rasterized at for a requested size
pub fn hud_pixel_size(requested: f32) -> f32 {
    (requested * DEFAULT_FONT_SCALE).floor()
}

struct Glyph {
    metrics: fontdue::Metrics,
    /// Row-major coverage, `metrics.width * metrics.height` bytes
    coverage: Vec<u8>,
}

/// A font rasterized at a single pixel size
pub struct HudFont {
    /// Indexed by `char as u32 - FIRST_CHAR`
    glyphs: Vec<Glyph>,
    px: f32,
    ascent: f32,
}

impl HudFont {
    /// Load the embedded HUD font at the death counter size
    pub fn load() -> Result<Self, &'static str> {
        Self::from_bytes(HUD_FONT_DATA, hud_pixel_size(HUD_FONT_SIZE))
    }

    pub fn from_bytes(data: &[u8], px: f32) -> Result<Self, &'static str> {
        let font = fontdue::Font::from_bytes(
            data,
            fontdue::FontSettings {
                scale: px,
                ..Default::default()
            },
        )?;

        let glyphs = (FIRST_CHAR..=LAST_CHAR)
            .filter_map(char::from_u32)
            .map(|ch| {
                let (metrics, coverage) = font.rasterize(ch, px);
                Glyph { metrics, coverage }
            })
            .collect();

        let ascent = font
            .horizontal_line_metrics(px)
            .map(|m| m.ascent)
            .unwrap_or(px);

        log::debug!("HUD font rasterized at {} px (ascent {:.1})", px, ascent);

        Ok(Self {
            glyphs,
            px,
            ascent: ascent.round(),
        })
    }

    /// Pixel size the glyphs were rasterized at
    pub fn px(&self) -> f32 {
        self.px
    }

    fn glyph(&self, ch: char) -> Option<&Glyph> {
        let code = ch as u32;
        if !(FIRST_CHAR..=LAST_CHAR).contains(&code) {
            return None;
        }
        self.glyphs.get((code - FIRST_CHAR) as usize)
    }

    /// Append `text` with the top of its line box at `y` and the pen starting at `x`.
    /// Characters outside printable ASCII are skipped.
    pub fn draw_text(&self, out: &mut Vec<Vertex>, text: &str, x: f32, y: f32, color: [f32; 4]) {
        let baseline = y + self.ascent;
        let mut pen = x;

        for ch in text.chars() {
            let Some(glyph) = self.glyph(ch) else {
                continue;
            };
            let m = &glyph.metrics;
            // fontdue's ymin is the glyph bottom relative to the baseline, y-up
            let left = (pen + m.xmin as f32).round();
            let top = baseline - (m.ymin + m.height as i32) as f32;

            if m.width > 0 {
                for (row, line) in glyph.coverage.chunks_exact(m.width).enumerate() {
                    for (start, len, value) in coverage_runs(line) {
                        let mut tint = color;
                        tint[3] *= value as f32 / 255.0;
                        let run = Rect::new(left + start as f32, top + row as f32, len as f32, 1.0);
                        shapes::rect(out, &run, tint);
                    }
                }
            }

            pen += m.advance_width;
        }
    }
}

/// Runs of equal, non-zero coverage in a bitmap row as (start, length, coverage)
fn coverage_runs(row: &[u8]) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
    let mut col = 0;
    std::iter::from_fn(move || {
        while col < row.len() && row[col] == 0 {
            col += 1;
        }
        if col == row.len() {
            return None;
        }
        let start = col;
        let value = row[col];
        while col < row.len() && row[col] == value {
            col += 1;
        }
        Some((start, col - start, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    fn font() -> HudFont {
        HudFont::load().unwrap()
    }

    fn max_x(vertices: &[Vertex]) -> f32 {
        vertices.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max)
    }

    #[test]
    fn test_hud_font_size() {
        assert_eq!(hud_pixel_size(HUD_FONT_SIZE), 24.0);
        assert_eq!(font().px(), 24.0);
    }

    #[test]
    fn test_coverage_runs() {
        let row = [0, 255, 255, 0, 128, 128, 64];
        assert_eq!(
            coverage_runs(&row).collect::<Vec<_>>(),
            vec![(1, 2, 255), (4, 2, 128), (6, 1, 64)]
        );
        assert_eq!(coverage_runs(&[0, 0, 0]).count(), 0);
        assert_eq!(coverage_runs(&[]).count(), 0);
    }

    #[test]
    fn test_label_glyphs_have_coverage() {
        let font = font();
        for c in "Deaths:0123456789".chars() {
            let mut out = Vec::new();
            font.draw_text(&mut out, &c.to_string(), 0.0, 0.0, BLACK);
            assert!(!out.is_empty(), "no pixels for {c:?}");
        }
    }

    #[test]
    fn test_space_and_non_ascii_draw_nothing() {
        let mut out = Vec::new();
        font().draw_text(&mut out, " \u{e9}", 0.0, 0.0, BLACK);
        assert!(out.is_empty());
    }

    #[test]
    fn test_alpha_follows_coverage() {
        let mut out = Vec::new();
        font().draw_text(&mut out, "Deaths: 8", 10.0, 10.0, BLACK);
        assert!(out.iter().all(|v| v.color[3] > 0.0 && v.color[3] <= 1.0));
        assert!(out.iter().any(|v| v.color[3] == 1.0));
        assert!(out.iter().any(|v| v.color[3] < 1.0));
        assert!(out.iter().all(|v| v.color[..3] == BLACK[..3]));
    }

    #[test]
    fn test_text_hangs_below_its_origin() {
        let font = font();
        let mut out = Vec::new();
        font.draw_text(&mut out, "Deaths: 42", 10.0, 10.0, BLACK);
        assert!(out.iter().all(|v| {
            v.position[0] >= 9.0
                && v.position[1] >= 10.0
                && v.position[1] <= 10.0 + font.px() * 1.5
        }));
    }

    #[test]
    fn test_longer_count_draws_wider() {
        let font = font();
        let mut one = Vec::new();
        let mut ten = Vec::new();
        font.draw_text(&mut one, "Deaths: 1", 10.0, 10.0, BLACK);
        font.draw_text(&mut ten, "Deaths: 10", 10.0, 10.0, BLACK);
        assert!(max_x(&ten) > max_x(&one) + font.px() * 0.3);
    }
}
