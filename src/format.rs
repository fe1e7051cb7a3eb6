// src/format.rs
use chrono::{DateTime, Utc};

use crate::models::{Signal, SignalKind};

pub const NO_DATA: &str = "No data";
pub const PLACEHOLDER: &str = "—";
pub const RANK_TIERS: u8 = 5;

/// Rounds half toward +inf, the way browsers round display percentages.
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// `None` -> "No data". Out-of-range values are not clamped.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}%", round_half_up(v * 100.0)),
        None => NO_DATA.to_string(),
    }
}

pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) => round_half_up(s * 100.0).to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn parse_vs_peers(raw: Option<&str>) -> Option<f64> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|d| d.is_finite())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerDelta {
    pub label: String,
    pub positive: bool, // includes "At average"
    pub arrow: &'static str,
}

pub fn peer_delta(raw: Option<&str>) -> Option<PeerDelta> {
    let d = parse_vs_peers(raw)?;
    let pct = round_half_up(d.abs() * 100.0);

    let delta = if pct == 0 {
        PeerDelta { label: "At average".into(), positive: true, arrow: "→" }
    } else if d > 0.0 {
        PeerDelta { label: format!("{}% above avg", pct), positive: true, arrow: "↑" }
    } else {
        PeerDelta { label: format!("{}% below avg", pct), positive: false, arrow: "↓" }
    };
    Some(delta)
}

/// Coarse tier from the peer delta. Not a true rank among companies.
pub fn rank_bucket(raw: Option<&str>) -> Option<u8> {
    let d = parse_vs_peers(raw)?;
    let tier = if d > 0.10 {
        1
    } else if d > 0.0 {
        2
    } else if d > -0.05 {
        3
    } else if d > -0.10 {
        4
    } else {
        5
    };
    Some(tier)
}

pub fn rank_label(raw: Option<&str>) -> Option<String> {
    rank_bucket(raw).map(|r| format!("{} of {}", r, RANK_TIERS))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    Green,
    Amber,
    Red,
}

impl BarColor {
    pub fn hex(&self) -> &'static str {
        match self {
            BarColor::Green => "#22c55e",
            BarColor::Amber => "#f59e0b",
            BarColor::Red => "#ef4444",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BarColor::Green => "green",
            BarColor::Amber => "amber",
            BarColor::Red => "red",
        }
    }
}

pub fn bar_color(value: Option<f64>) -> BarColor {
    let v = value.unwrap_or(0.0);
    if v >= 0.6 {
        BarColor::Green
    } else if v >= 0.4 {
        BarColor::Amber
    } else {
        BarColor::Red
    }
}

/// Bar fill in percent of track width; unlike the label this one is clamped.
pub fn bar_width(value: Option<f64>) -> f64 {
    (value.unwrap_or(0.0) * 100.0).clamp(0.0, 100.0)
}

pub fn signal_title(kind: SignalKind) -> &'static str {
    match kind {
        SignalKind::Sentiment => "Sentiment",
        SignalKind::Shipping => "Shipping",
        SignalKind::Market => "Market",
        SignalKind::Competitive => "Competitive",
    }
}

/// Compact one-liner for overview cards, e.g. "Sentiment: 64% ↑".
pub fn signal_summary_line(kind: SignalKind, signal: &Signal) -> String {
    let mut line = format!("{}: {}", signal_title(kind), format_percent(signal.value));
    if let Some(d) = peer_delta(signal.vs_peers.as_deref()) {
        line.push(' ');
        line.push_str(d.arrow);
    }
    line
}

pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => dt.with_timezone(&Utc).format("%b %-d, %Y %H:%M UTC").to_string(),
        Err(_) => raw.to_string(),
    }
}
