// File: crates/race-core/src/grid.rs
// Summary: Tick layout helpers for the value axis.

/// Round `span / target` up to a 1-2-5 step so tick labels stay readable.
pub fn nice_step(span: f64, target: usize) -> f64 {
    if !(span > 0.0) || target == 0 { return 1.0; }
    let raw = span / target as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm <= 1.0 { 1.0 } else if norm <= 2.0 { 2.0 } else if norm <= 5.0 { 5.0 } else { 10.0 };
    nice * mag
}

/// Tick positions covering `[min, max]` on multiples of a nice step.
pub fn ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let step = nice_step(max - min, target);
    let first = (min / step).ceil() as i64;
    let last = (max / step + 1e-9).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_step_snaps_to_1_2_5() {
        assert_eq!(nice_step(10.0, 5), 2.0);
        assert_eq!(nice_step(300.0, 5), 100.0);
        assert!((nice_step(0.9, 5) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn ticks_stay_inside_domain() {
        let t = ticks(0.0, 315.0, 5);
        assert_eq!(t.first().copied(), Some(0.0));
        assert!(t.iter().all(|&v| v <= 315.0));
        assert_eq!(t.last().copied(), Some(300.0));
    }
}
