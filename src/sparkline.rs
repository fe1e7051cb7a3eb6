// src/sparkline.rs
use itertools::Itertools;

pub const PADDING: f64 = 2.0;
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Lower bound pulled down to at least 0 and upper bound raised to at least
/// 0.1, so the range is never zero.
fn bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(0.0_f64, f64::min);
    let max = values.iter().copied().fold(0.1_f64, f64::max);
    (min, max)
}

/// Plot coordinates, or `None` when there are fewer than two points.
pub fn points(values: &[f64], width: f64, height: f64) -> Option<Vec<(f64, f64)>> {
    if values.len() < 2 {
        return None;
    }
    let (min, max) = bounds(values);
    let range = max - min;
    let last = (values.len() - 1) as f64;

    Some(
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let x = PADDING + (i as f64 / last) * (width - 2.0 * PADDING);
                let y = PADDING + (1.0 - (v - min) / range) * (height - 2.0 * PADDING);
                (x, y)
            })
            .collect(),
    )
}

pub fn render_svg(values: &[f64], width: f64, height: f64, color: &str) -> Option<String> {
    let pts = points(values, width, height)?;
    let polyline = pts.iter().map(|(x, y)| format!("{:.1},{:.1}", x, y)).join(" ");
    Some(format!(
        r#"<svg class="sparkline" width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg"><polyline points="{pts}" fill="none" stroke="{c}" stroke-width="2" stroke-linejoin="round" stroke-linecap="round"/></svg>"#,
        w = width,
        h = height,
        pts = polyline,
        c = color
    ))
}

/// Block-character trend for terminals, same normalisation as the SVG.
pub fn render_text(values: &[f64]) -> Option<String> {
    if values.len() < 2 {
        return None;
    }
    let (min, max) = bounds(values);
    let top = (BLOCKS.len() - 1) as f64;
    Some(
        values
            .iter()
            .map(|&v| {
                let idx = (((v - min) / (max - min)) * top).round().clamp(0.0, top) as usize;
                BLOCKS[idx]
            })
            .collect(),
    )
}
