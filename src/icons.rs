// src/icons.rs
use crate::models::WeatherCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    Small,
    Medium,
    Large,
}

impl IconSize {
    pub fn px(&self) -> u32 {
        match self {
            IconSize::Small => 48,
            IconSize::Medium => 80,
            IconSize::Large => 128,
        }
    }
}

/// Single-character stand-in for terminals.
pub fn glyph(category: WeatherCategory) -> &'static str {
    match category {
        WeatherCategory::Sunny => "☀",
        WeatherCategory::PartlyCloudy => "⛅",
        WeatherCategory::Cloudy => "☁",
        WeatherCategory::Rainy => "☂",
        WeatherCategory::Stormy => "⛈",
        WeatherCategory::Foggy => "≋",
    }
}

const SUN: &str = "#fbbf24";
const CLOUD: &str = "#cbd5e1";
const DARK_CLOUD: &str = "#64748b";
const RAIN: &str = "#60a5fa";
const BOLT: &str = "#facc15";
const FOG: &str = "#94a3b8";

/// Inline SVG drawn on a 100x100 viewBox and scaled to the requested size.
pub fn render_icon(category: WeatherCategory, size: IconSize, animated: bool) -> String {
    let body = match category {
        WeatherCategory::Sunny => sun(50.0, 50.0, 22.0, animated),
        WeatherCategory::PartlyCloudy => {
            format!("{}{}", sun(36.0, 36.0, 16.0, animated), cloud(56.0, 62.0, 1.0, CLOUD, animated))
        }
        WeatherCategory::Cloudy => format!(
            "{}{}",
            cloud(40.0, 44.0, 0.8, DARK_CLOUD, false),
            cloud(56.0, 60.0, 1.0, CLOUD, animated)
        ),
        WeatherCategory::Rainy => format!("{}{}", cloud(50.0, 44.0, 1.0, DARK_CLOUD, false), rain(animated)),
        WeatherCategory::Stormy => format!(
            "{}{}{}",
            cloud(50.0, 40.0, 1.0, DARK_CLOUD, false),
            rain(animated),
            bolt(animated)
        ),
        WeatherCategory::Foggy => fog(animated),
    };

    let px = size.px();
    format!(
        r#"<svg class="weather-icon weather-{cls}" width="{px}" height="{px}" viewBox="0 0 100 100" role="img" aria-label="{label}" xmlns="http://www.w3.org/2000/svg">{body}</svg>"#,
        cls = category.as_str(),
        px = px,
        label = category.default_label(),
        body = body
    )
}

fn sun(cx: f64, cy: f64, r: f64, animated: bool) -> String {
    let mut rays = String::new();
    for i in 0..8 {
        let a = (i as f64) * std::f64::consts::FRAC_PI_4;
        let (s, c) = a.sin_cos();
        rays.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="4" stroke-linecap="round"/>"#,
            cx + c * (r + 6.0),
            cy + s * (r + 6.0),
            cx + c * (r + 14.0),
            cy + s * (r + 14.0),
            SUN
        ));
    }
    let spin = if animated {
        format!(
            r#"<animateTransform attributeName="transform" type="rotate" from="0 {cx} {cy}" to="360 {cx} {cy}" dur="20s" repeatCount="indefinite"/>"#,
            cx = cx,
            cy = cy
        )
    } else {
        String::new()
    };
    format!(
        r#"<g class="sun"><g class="rays">{rays}{spin}</g><circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"/></g>"#,
        rays = rays,
        spin = spin,
        cx = cx,
        cy = cy,
        r = r,
        fill = SUN
    )
}

fn cloud(cx: f64, cy: f64, scale: f64, fill: &str, animated: bool) -> String {
    let drift = if animated {
        r#"<animateTransform attributeName="transform" type="translate" values="0 0; 3 0; 0 0" dur="6s" repeatCount="indefinite"/>"#
    } else {
        ""
    };
    format!(
        r#"<g class="cloud"><g transform="translate({cx} {cy}) scale({s})"><ellipse cx="0" cy="6" rx="30" ry="14" fill="{fill}"/><circle cx="-12" cy="-2" r="13" fill="{fill}"/><circle cx="8" cy="-8" r="17" fill="{fill}"/></g>{drift}</g>"#,
        cx = cx,
        cy = cy,
        s = scale,
        fill = fill,
        drift = drift
    )
}

fn rain(animated: bool) -> String {
    let mut drops = String::new();
    for (i, x) in [36.0, 50.0, 64.0].iter().enumerate() {
        let fall = if animated {
            format!(
                r#"<animate attributeName="opacity" values="1;0.2;1" dur="1.2s" begin="{:.1}s" repeatCount="indefinite"/>"#,
                i as f64 * 0.3
            )
        } else {
            String::new()
        };
        drops.push_str(&format!(
            r#"<line x1="{x}" y1="66" x2="{x2}" y2="80" stroke="{c}" stroke-width="4" stroke-linecap="round">{fall}</line>"#,
            x = x,
            x2 = x - 4.0,
            c = RAIN,
            fall = fall
        ));
    }
    format!(r#"<g class="rain">{}</g>"#, drops)
}

fn bolt(animated: bool) -> String {
    let flash = if animated {
        r#"<animate attributeName="opacity" values="1;1;0;1" keyTimes="0;0.8;0.9;1" dur="2.5s" repeatCount="indefinite"/>"#
    } else {
        ""
    };
    format!(
        r#"<polygon class="bolt" points="52,52 42,72 50,72 45,90 62,66 53,66 58,52" fill="{}">{}</polygon>"#,
        BOLT, flash
    )
}

fn fog(animated: bool) -> String {
    let mut bands = String::new();
    for (i, y) in [34.0, 50.0, 66.0].iter().enumerate() {
        let sway = if animated {
            format!(
                r#"<animateTransform attributeName="transform" type="translate" values="0 0; {d} 0; 0 0" dur="5s" repeatCount="indefinite"/>"#,
                d = if i % 2 == 0 { 4 } else { -4 }
            )
        } else {
            String::new()
        };
        bands.push_str(&format!(
            r#"<line x1="20" y1="{y}" x2="80" y2="{y}" stroke="{c}" stroke-width="6" stroke-linecap="round">{sway}</line>"#,
            y = y,
            c = FOG,
            sway = sway
        ));
    }
    format!(r#"<g class="fog">{}</g>"#, bands)
}
