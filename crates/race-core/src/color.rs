// File: crates/race-core/src/color.rs
// Summary: Entity → color assignment, fixed for the lifetime of a run.

use skia_safe as skia;

/// matplotlib's `tab20` qualitative palette.
pub const TAB20: [(u8, u8, u8); 20] = [
    (31, 119, 180), (174, 199, 232), (255, 127, 14), (255, 187, 120),
    (44, 160, 44), (152, 223, 138), (214, 39, 40), (255, 152, 150),
    (148, 103, 189), (197, 176, 213), (140, 86, 75), (196, 156, 148),
    (227, 119, 194), (247, 182, 210), (127, 127, 127), (199, 199, 199),
    (188, 189, 34), (219, 219, 141), (23, 190, 207), (158, 218, 229),
];

const SATURATION: [f32; 3] = [0.55, 0.65, 0.75];
const LIGHTNESS: [f32; 2] = [0.45, 0.55];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
    /// Color derived from the entity name; unbounded and order independent.
    #[default]
    Hashed,
    /// `tab20` by row position, wrapping around after 20 entities.
    Tab20,
}

impl ColorScheme {
    /// One color per entity, in the same order as `entities`.
    pub fn assign(&self, entities: &[String]) -> Vec<skia::Color> {
        match self {
            ColorScheme::Hashed => entities.iter().map(|e| hashed_color(e)).collect(),
            ColorScheme::Tab20 => (0..entities.len()).map(tab20_color).collect(),
        }
    }
}

pub fn tab20_color(index: usize) -> skia::Color {
    let (r, g, b) = TAB20[index % TAB20.len()];
    skia::Color::from_rgb(r, g, b)
}

/// Stable color for `name`: blake3 digest picks hue, saturation band and lightness band.
pub fn hashed_color(name: &str) -> skia::Color {
    let digest = blake3::hash(name.as_bytes());
    let d = digest.as_bytes();
    let hue = (u16::from_le_bytes([d[0], d[1]]) % 360) as f32;
    let s = SATURATION[d[2] as usize % SATURATION.len()];
    let l = LIGHTNESS[d[3] as usize % LIGHTNESS.len()];
    let (r, g, b) = hsl_to_rgb(hue, s, l);
    skia::Color::from_rgb(r, g, b)
}

/// `h` in degrees, `s`/`l` in [0, 1].
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c * 0.5;
    let to_u8 = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    (to_u8(r1), to_u8(g1), to_u8(b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_colors_depend_only_on_name() {
        let a = ColorScheme::Hashed.assign(&["China".into(), "India".into()]);
        let b = ColorScheme::Hashed.assign(&["India".into(), "China".into()]);
        assert_eq!(a[0], b[1]);
        assert_eq!(a[1], b[0]);
        assert_eq!(hashed_color("China"), hashed_color("China"));
    }

    #[test]
    fn tab20_wraps_after_palette_end() {
        let names: Vec<String> = (0..45).map(|i| format!("E{i}")).collect();
        let colors = ColorScheme::Tab20.assign(&names);
        assert_eq!(colors.len(), 45);
        assert_eq!(colors[0], colors[20]);
        assert_eq!(colors[4], colors[44]);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), (0, 0, 255));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), (255, 255, 255));
    }
}
