// File: crates/race-core/src/chart.rs
// Summary: BarChartRace: owns the table, color assignment and a CPU raster surface; draws one frame per period.

use std::path::Path;

use skia_safe as skia;
use tracing::{debug, info};

use crate::animation::{AnimationOptions, Playback};
use crate::color::ColorScheme;
use crate::error::{RaceError, Result};
use crate::frame::{format_tick, format_value_label, value_extent, Frame, ValueFormat};
use crate::grid::ticks;
use crate::table::{Table, TableOptions};
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{Insets, RgbaFrame, HEIGHT, WIDTH};

// Pixel sizes of 18/14/10pt text at 100 dpi.
const TITLE_PX: f32 = 25.0;
const AXIS_LABEL_PX: f32 = 19.0;
const TICK_PX: f32 = 14.0;

/// Text shown around the bars.
#[derive(Clone, Debug)]
pub struct ChartLabels {
    pub title: String,
    /// Word placed before the period in the title, e.g. "Year".
    pub period_word: String,
    pub value_axis: String,
    /// Overrides the entity column name on the vertical axis.
    pub entity_axis: Option<String>,
    pub format: ValueFormat,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            title: "GDP Per Year".to_string(),
            period_word: "Year".to_string(),
            value_axis: "GDP (in billions)".to_string(),
            entity_axis: None,
            format: ValueFormat::default(),
        }
    }
}

impl ChartLabels {
    pub fn title_for(&self, period: &str) -> String {
        format!("{} ({}: {})", self.title, self.period_word, period)
    }
}

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    pub colors: ColorScheme,
    pub labels: ChartLabels,
    /// Skip all text; keeps pixel output independent of installed fonts.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            colors: ColorScheme::default(),
            labels: ChartLabels::default(),
            draw_labels: true,
        }
    }
}

pub struct BarChartRace {
    table: Table,
    colors: Vec<skia::Color>,
    opts: RenderOptions,
    surface: skia::Surface,
    text: TextShaper,
}

impl BarChartRace {
    pub fn new(table: Table, opts: RenderOptions) -> Result<Self> {
        let colors = opts.colors.assign(table.entities());
        let surface = raster(opts.width, opts.height)?;
        debug!(entities = table.len(), scheme = ?opts.colors, "assigned colors");
        Ok(Self { table, colors, opts, surface, text: TextShaper::new() })
    }

    pub fn from_path(path: impl AsRef<Path>, table_opts: &TableOptions, opts: RenderOptions) -> Result<Self> {
        Self::new(Table::from_path(path, table_opts)?, opts)
    }

    pub fn table(&self) -> &Table { &self.table }

    pub fn options(&self) -> &RenderOptions { &self.opts }

    /// Periods in frame order.
    pub fn periods(&self) -> &[String] { self.table.periods() }

    /// Colors in table row order.
    pub fn colors(&self) -> &[skia::Color] { &self.colors }

    pub fn color_of(&self, entity: &str) -> Option<skia::Color> {
        let row = self.table.entities().iter().position(|e| e == entity)?;
        self.colors.get(row).copied()
    }

    pub fn size(&self) -> (i32, i32) { (self.opts.width, self.opts.height) }

    /// Reallocate the surface. The next `render_frame` draws at the new size.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        if (width, height) == self.size() { return Ok(()); }
        self.surface = raster(width, height)?;
        self.opts.width = width;
        self.opts.height = height;
        Ok(())
    }

    /// Entities of `period` ascending by value, each with its fixed color.
    pub fn sort_for_frame(&self, period: &str) -> Result<Frame<'_>> {
        Frame::compute(&self.table, &self.colors, period)
    }

    /// Clear the surface and draw the chart for `period`.
    pub fn render_frame(&mut self, period: &str) -> Result<()> {
        let frame = Frame::compute(&self.table, &self.colors, period)?;
        debug!(period, bars = frame.len(), "render frame");
        let entity_axis = self
            .opts
            .labels
            .entity_axis
            .as_deref()
            .unwrap_or(self.table.entity_column());
        let canvas = self.surface.canvas();
        draw_frame(canvas, &self.text, &self.opts, entity_axis, &frame);
        Ok(())
    }

    /// Copy the current surface contents out as RGBA8.
    pub fn snapshot_rgba(&mut self) -> Result<RgbaFrame> {
        let (w, h) = self.size();
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = w as usize * 4;
        let mut pixels = vec![0u8; row_bytes * h as usize];
        if !self.surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(RaceError::Surface { width: w, height: h });
        }
        Ok(RgbaFrame { width: w as u32, height: h as u32, pixels })
    }

    /// Render `period` and write it as a PNG at `path`.
    pub fn render_to_png(&mut self, period: &str, path: impl AsRef<Path>) -> Result<()> {
        self.render_frame(period)?;
        let frame = self.snapshot_rgba()?;
        let (w, h) = (frame.width, frame.height);
        let img = frame.into_image().ok_or(RaceError::Surface { width: w as i32, height: h as i32 })?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        img.save(path)?;
        info!(period, path = %path.display(), "wrote frame png");
        Ok(())
    }

    /// Play every period through `playback` (window or recorder).
    pub fn run(&mut self, playback: &mut dyn Playback, opts: &AnimationOptions) -> Result<()> {
        playback.play(self, opts)
    }
}

fn raster(width: i32, height: i32) -> Result<skia::Surface> {
    if width <= 0 || height <= 0 {
        return Err(RaceError::Surface { width, height });
    }
    skia::surfaces::raster_n32_premul((width, height)).ok_or(RaceError::Surface { width, height })
}

// ---- drawing ----------------------------------------------------------------

/// Plot rectangle in pixels.
#[derive(Clone, Copy, Debug)]
struct Plot {
    l: f32,
    t: f32,
    r: f32,
    b: f32,
}

fn draw_frame(canvas: &skia::Canvas, text: &TextShaper, opts: &RenderOptions, entity_axis: &str, frame: &Frame<'_>) {
    let theme = &opts.theme;
    canvas.clear(theme.background);

    let mut left = opts.insets.left as f32;
    if opts.draw_labels {
        // Full entity names must fit left of the axis, plus the rotated axis label.
        let widest = frame
            .bars
            .iter()
            .map(|b| text.measure_width(b.entity, TICK_PX, false))
            .fold(0.0f32, f32::max);
        left = left.max(widest + AXIS_LABEL_PX + 24.0);
    }
    let plot = Plot {
        l: left,
        t: opts.insets.top as f32,
        r: (opts.width - opts.insets.right as i32) as f32,
        b: (opts.height - opts.insets.bottom as i32) as f32,
    };
    if plot.r <= plot.l || plot.b <= plot.t {
        return;
    }

    let fmt = &opts.labels.format;
    let (lo, hi) = value_extent(frame, fmt);
    let sx = |v: f64| -> f32 { plot.l + ((v - lo) / (hi - lo)) as f32 * (plot.r - plot.l) };

    let tick_values = ticks(lo, hi, 6);
    draw_grid(canvas, theme, plot, tick_values.iter().map(|&v| sx(v)));
    draw_bars(canvas, plot, frame, fmt, &sx);
    draw_axes(canvas, theme, plot);

    if !opts.draw_labels {
        return;
    }

    let n = frame.len().max(1) as f32;
    let slot = (plot.b - plot.t) / n;
    for (i, bar) in frame.bars.iter().enumerate() {
        let cy = plot.b - (i as f32 + 0.5) * slot;
        let v = fmt.scaled(bar.value);
        // Entity tick label
        text.draw_right(canvas, bar.entity, plot.l - 6.0, cy, TICK_PX, theme.tick);
        // Value label just past the bar end
        let label = format_value_label(bar.value, fmt);
        text.draw_left(canvas, &label, sx(v.max(0.0)) + 4.0, cy, TICK_PX, theme.value_label, true);
    }
    for &v in &tick_values {
        text.draw_centered(canvas, &format_tick(v), sx(v), plot.b + 6.0, TICK_PX, theme.tick, false);
    }

    let cx = (plot.l + plot.r) * 0.5;
    text.draw_centered(canvas, &opts.labels.title_for(frame.period), cx, 16.0, TITLE_PX, theme.title, true);
    text.draw_centered(canvas, &opts.labels.value_axis, cx, plot.b + TICK_PX + 16.0, AXIS_LABEL_PX, theme.axis_label, false);
    text.draw_vertical(canvas, entity_axis, 8.0 + AXIS_LABEL_PX * 0.5, (plot.t + plot.b) * 0.5, AXIS_LABEL_PX, theme.axis_label);
}

fn draw_grid(canvas: &skia::Canvas, theme: &Theme, plot: Plot, xs: impl Iterator<Item = f32>) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    for x in xs {
        canvas.draw_line((x, plot.t), (x, plot.b), &paint);
    }
}

fn draw_bars(canvas: &skia::Canvas, plot: Plot, frame: &Frame<'_>, fmt: &ValueFormat, sx: &dyn Fn(f64) -> f32) {
    let mut body = skia::Paint::default();
    body.set_anti_alias(true);
    body.set_style(skia::paint::Style::Fill);

    let n = frame.len().max(1) as f32;
    let slot = (plot.b - plot.t) / n;
    let half = slot * 0.4;
    let zero = sx(0.0);

    // Index 0 (smallest) sits at the bottom.
    for (i, bar) in frame.bars.iter().enumerate() {
        let cy = plot.b - (i as f32 + 0.5) * slot;
        let end = sx(fmt.scaled(bar.value));
        body.set_color(bar.color);
        let rect = skia::Rect::from_ltrb(zero.min(end), cy - half, zero.max(end), cy + half);
        canvas.draw_rect(rect, &body);
    }
}

fn draw_axes(canvas: &skia::Canvas, theme: &Theme, plot: Plot) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(0.5);

    // Left and bottom spines only
    canvas.draw_line((plot.l, plot.b), (plot.r, plot.b), &axis_paint);
    canvas.draw_line((plot.l, plot.t), (plot.l, plot.b), &axis_paint);
}
