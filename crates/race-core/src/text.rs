// File: crates/race-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout; left, right and centered placement.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

const SANS: &[&str] = &["DejaVu Sans", "Segoe UI", "Arial", "Helvetica", "Roboto", "sans-serif"];
const MONO: &[&str] = &["DejaVu Sans Mono", "Roboto Mono", "Consolas", "Menlo", "monospace"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, mono_numeric: bool, bold: bool) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        // Tabular digits keep value labels aligned frame to frame
        ts.set_font_families(if mono_numeric { MONO } else { SANS });
        if bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, mono_numeric: bool, bold: bool) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color, mono_numeric, bold);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32, mono_numeric: bool) -> f32 {
        let p = self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0), mono_numeric, false);
        p.longest_line()
    }

    /// Draw with the text's left edge at `x`, vertically centered on `cy`.
    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, cy: f32, size: f32, color: skia::Color, mono_numeric: bool) {
        let p = self.layout(text, size, color, mono_numeric, false);
        p.paint(canvas, (x, cy - p.height() * 0.5));
    }

    /// Draw with the text's right edge at `x`, vertically centered on `cy`.
    pub fn draw_right(&self, canvas: &skia::Canvas, text: &str, x: f32, cy: f32, size: f32, color: skia::Color) {
        let p = self.layout(text, size, color, false, false);
        p.paint(canvas, (x - p.longest_line(), cy - p.height() * 0.5));
    }

    /// Draw horizontally centered on `cx` with the top of the line box at `top`.
    pub fn draw_centered(&self, canvas: &skia::Canvas, text: &str, cx: f32, top: f32, size: f32, color: skia::Color, bold: bool) {
        let p = self.layout(text, size, color, false, bold);
        p.paint(canvas, (cx - p.longest_line() * 0.5, top));
    }

    /// Draw rotated 90° counter-clockwise, centered on (cx, cy). Used for the vertical axis label.
    pub fn draw_vertical(&self, canvas: &skia::Canvas, text: &str, cx: f32, cy: f32, size: f32, color: skia::Color) {
        let p = self.layout(text, size, color, false, false);
        canvas.save();
        canvas.translate((cx, cy));
        canvas.rotate(-90.0, None);
        p.paint(canvas, (-p.longest_line() * 0.5, -p.height() * 0.5));
        canvas.restore();
    }
}
