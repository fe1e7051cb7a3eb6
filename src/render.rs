// src/render.rs
use html_escape::{encode_double_quoted_attribute, encode_text};
use itertools::Itertools;

use crate::companies::{self, Company, COMPANIES};
use crate::controller::Controller;
use crate::explain::explainer;
use crate::format::*;
use crate::icons::{glyph, render_icon, IconSize};
use crate::models::{CompanyForecast, Dataset, MoodDocument, Signal, SignalKind, WeatherCategory};
use crate::sparkline;
use crate::state::{DetailPanel, LoadState, Screen, Timeframe, ViewState};

pub const MAX_POSTS: usize = 5;
const CARD_TREND: (f64, f64) = (120.0, 32.0);
const DETAIL_TREND: (f64, f64) = (280.0, 80.0);

pub fn overview_href() -> &'static str {
    "index.html"
}

pub fn detail_href(company_id: &str) -> String {
    format!("{}.html", company_id)
}

pub fn panel_href(company_id: &str, kind: SignalKind) -> String {
    format!("{}-{}.html", company_id, kind.as_str())
}

/// The panel only overlays the detail screen of the company it was opened on.
fn visible_panel(view: &ViewState) -> Option<&DetailPanel> {
    view.panel
        .as_ref()
        .filter(|p| view.selected_company_id() == Some(p.company_id.as_str()))
}

/* -------------------------------------------------------------------------- */
/* Page                                                                       */
/* -------------------------------------------------------------------------- */

pub fn render_page(c: &Controller) -> String {
    let view = c.view();
    let (last_updated, body, panel) = match c.load_state() {
        LoadState::Loading => (None, render_loading(), String::new()),
        LoadState::Failed { message } => (None, render_error(message), String::new()),
        LoadState::Ready(ds) => {
            let body = match &view.screen {
                Screen::Overview => render_overview(ds),
                Screen::Detail { company_id } => match companies::find(company_id) {
                    Some(company) => render_detail(company, ds.forecast_for(company_id), ds.mood_for(company_id)),
                    None => render_overview(ds),
                },
            };
            let panel = visible_panel(view).map(render_panel).unwrap_or_default();
            (Some(ds.forecast.last_updated.as_str()), body, panel)
        }
    };

    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>AI Weather</title>\n<style>{}</style>\n</head>\n<body>\n{}\n<main>\n{}\n</main>\n{}\n</body>\n</html>\n",
        STYLE,
        render_header(last_updated, view.timeframe),
        body,
        panel
    )
}

fn render_header(last_updated: Option<&str>, timeframe: Timeframe) -> String {
    let updated = match last_updated {
        Some(ts) => format!(r#"<span class="updated">Updated {}</span>"#, encode_text(&format_timestamp(ts))),
        None => String::new(),
    };
    let selector = Timeframe::ALL
        .iter()
        .map(|tf| {
            let cls = if *tf == timeframe { "tf active" } else { "tf" };
            format!(r#"<span class="{}" data-timeframe="{}">{}</span>"#, cls, tf.as_str(), tf.as_str())
        })
        .join("");
    format!(
        r#"<header>{logo}<h1><a href="{home}">AI Weather</a></h1>{updated}<nav class="timeframes">{selector}</nav><a class="refresh" href="{home}" data-action="refresh">Refresh</a></header>"#,
        logo = render_icon(WeatherCategory::PartlyCloudy, IconSize::Small, false),
        home = overview_href(),
        updated = updated,
        selector = selector
    )
}

fn render_loading() -> String {
    r#"<section class="loading"><p>Loading forecast…</p></section>"#.to_string()
}

fn render_error(message: &str) -> String {
    format!(
        r#"<section class="error"><h2>Couldn't load the forecast</h2><p>{}</p><a class="retry" href="{}" data-action="retry">Try again</a></section>"#,
        encode_text(message),
        overview_href()
    )
}

/* -------------------------------------------------------------------------- */
/* Overview                                                                   */
/* -------------------------------------------------------------------------- */

/// One card per registry company, in registry order.
pub fn render_overview(ds: &Dataset) -> String {
    let cards = COMPANIES
        .iter()
        .map(|c| render_card(c, ds.forecast_for(c.id), ds.mood_for(c.id)))
        .join("\n");
    format!(r#"<section class="overview">{}</section>"#, cards)
}

pub fn render_card(company: &Company, forecast: Option<&CompanyForecast>, mood: Option<&MoodDocument>) -> String {
    let category = forecast.map(|f| f.category).unwrap_or(WeatherCategory::Foggy);
    let label = forecast.map(|f| f.label.as_str()).unwrap_or("No forecast");
    let score = format_score(forecast.and_then(|f| f.score));

    let mut out = String::new();
    out.push_str(&format!(
        r#"<article class="card" data-company="{id}" style="--accent: {accent}">"#,
        id = company.id,
        accent = company.accent_color
    ));
    out.push_str(&format!(
        r#"<div class="card-head">{icon}<div><h2>{name}</h2><p class="weather-label">{label}</p></div><span class="score">{score}</span></div>"#,
        icon = render_icon(category, IconSize::Medium, false),
        name = encode_text(company.display_name),
        label = encode_text(label),
        score = score
    ));

    if let Some(signals) = forecast.and_then(|f| f.signals.as_ref()) {
        out.push_str(r#"<ul class="card-signals">"#);
        for kind in SignalKind::CARD {
            let signal = signals.get(kind);
            out.push_str(&format!(
                r#"<li><a href="{href}" style="color: {color}">{line}</a></li>"#,
                href = panel_href(company.id, kind),
                color = bar_color(signal.value).hex(),
                line = encode_text(&signal_summary_line(kind, signal))
            ));
        }
        out.push_str("</ul>");
    }

    if let Some(svg) = mood.and_then(|m| sparkline::render_svg(&m.history, CARD_TREND.0, CARD_TREND.1, company.accent_color)) {
        out.push_str(&format!(r#"<div class="trend">{}</div>"#, svg));
    }

    if let Some(summary) = forecast.and_then(|f| f.summary.as_deref()) {
        out.push_str(&format!(r#"<p class="summary">{}</p>"#, encode_text(summary)));
    }

    out.push_str(&format!(
        r#"<a class="details" href="{}">View details</a></article>"#,
        detail_href(company.id)
    ));
    out
}

/* -------------------------------------------------------------------------- */
/* Detail                                                                     */
/* -------------------------------------------------------------------------- */

pub fn render_detail(company: &Company, forecast: Option<&CompanyForecast>, mood: Option<&MoodDocument>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        r#"<section class="detail" data-company="{}" style="--accent: {}"><a class="back" href="{}">← All companies</a>"#,
        company.id,
        company.accent_color,
        overview_href()
    ));

    let Some(f) = forecast else {
        out.push_str(&format!(
            r#"<div class="hero">{}<div><h2>{}</h2><p>No forecast available.</p></div></div></section>"#,
            render_icon(WeatherCategory::Foggy, IconSize::Large, true),
            encode_text(company.display_name)
        ));
        return out;
    };

    out.push_str(&format!(
        r#"<div class="hero">{icon}<div><h2>{name}</h2><p class="weather-label">{label}</p><p class="weather-description">{desc}</p></div><span class="score big">{score}</span></div>"#,
        icon = render_icon(f.category, IconSize::Large, true),
        name = encode_text(company.display_name),
        label = encode_text(&f.label),
        desc = encode_text(&f.description),
        score = format_score(f.score)
    ));

    if let Some(summary) = &f.summary {
        out.push_str(&format!(r#"<p class="summary long">{}</p>"#, encode_text(summary)));
    }

    out.push_str(r#"<div class="detail-body"><div class="breakdown"><h3>Signals</h3>"#);
    match &f.signals {
        Some(signals) => {
            for (kind, signal) in signals.iter() {
                out.push_str(&render_signal_row(company.id, kind, signal));
            }
        }
        None => out.push_str(&format!(r#"<p class="no-data">{}</p>"#, NO_DATA)),
    }
    out.push_str("</div>");

    out.push_str(&render_sidebar(company, mood));
    out.push_str("</div></section>");
    out
}

fn render_signal_row(company_id: &str, kind: SignalKind, signal: &Signal) -> String {
    let color = bar_color(signal.value);
    let mut badges = String::new();
    if let Some(d) = peer_delta(signal.vs_peers.as_deref()) {
        let cls = if d.positive { "badge up" } else { "badge down" };
        badges.push_str(&format!(r#"<span class="{}">{} {}</span>"#, cls, d.arrow, encode_text(&d.label)));
    }
    if let Some(rank) = rank_label(signal.vs_peers.as_deref()) {
        badges.push_str(&format!(r#"<span class="badge rank">{}</span>"#, rank));
    }

    format!(
        r#"<a class="signal-row" href="{href}" data-signal="{kind}"><span class="signal-name">{title}</span><span class="bar"><span class="fill {cname}" style="width: {width:.0}%; background: {hex}"></span></span><span class="pct">{pct}</span>{badges}</a>"#,
        href = panel_href(company_id, kind),
        kind = kind.as_str(),
        title = signal_title(kind),
        cname = color.name(),
        width = bar_width(signal.value),
        hex = color.hex(),
        pct = format_percent(signal.value),
        badges = badges
    )
}

fn render_sidebar(company: &Company, mood: Option<&MoodDocument>) -> String {
    let Some(mood) = mood else {
        return r#"<aside class="sidebar"></aside>"#.to_string();
    };

    let mut out = String::from(r#"<aside class="sidebar">"#);
    if let Some(svg) = sparkline::render_svg(&mood.history, DETAIL_TREND.0, DETAIL_TREND.1, company.accent_color) {
        out.push_str(&format!(r#"<div class="trend"><h3>Sentiment trend</h3>{}</div>"#, svg));
    }

    if !mood.posts.is_empty() {
        out.push_str(r#"<div class="activity"><h3>Recent activity</h3><ul>"#);
        for p in mood.posts.iter().take(MAX_POSTS) {
            let date = p
                .date
                .as_deref()
                .map(|d| format!(r#" <time>{}</time>"#, encode_text(d)))
                .unwrap_or_default();
            out.push_str(&format!(
                r#"<li><a href="{}" rel="noopener">{}</a>{}</li>"#,
                encode_double_quoted_attribute(&p.url),
                encode_text(&p.title),
                date
            ));
        }
        out.push_str("</ul></div>");
    }

    if let Some(badge) = &mood.sentiment_badge {
        out.push_str(&format!(r#"<p class="mood-badge">Mood: <strong>{}</strong></p>"#, encode_text(badge)));
    }
    out.push_str("</aside>");
    out
}

/* -------------------------------------------------------------------------- */
/* Panel                                                                      */
/* -------------------------------------------------------------------------- */

pub fn render_panel(panel: &DetailPanel) -> String {
    let e = explainer(panel.kind);
    let signal = panel.signals.get(panel.kind);
    let company = companies::find(&panel.company_id)
        .map(|c| c.display_name)
        .unwrap_or(panel.company_id.as_str());

    let delta = peer_delta(signal.vs_peers.as_deref())
        .map(|d| format!("{} {}", d.arrow, d.label))
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let rank = rank_label(signal.vs_peers.as_deref()).unwrap_or_else(|| PLACEHOLDER.to_string());

    let others = panel
        .signals
        .iter()
        .filter(|(k, _)| *k != panel.kind)
        .map(|(k, s)| format!("<li>{}: {}</li>", signal_title(k), format_percent(s.value)))
        .join("");

    format!(
        r#"<div class="panel-backdrop"><aside class="panel" data-signal="{kind}"><a class="close" href="{close}">×</a><h2>{company} · {title}</h2><p class="question">{question}</p><dl><dt>Value</dt><dd style="color: {hex}">{pct}</dd><dt>vs peers</dt><dd>{delta}</dd><dt>Rank</dt><dd>{rank}</dd></dl><h3>How it's measured</h3><p>{method}</p><p><strong>High:</strong> {high}</p><p><strong>Low:</strong> {low}</p><h3>Other signals</h3><ul>{others}</ul></aside></div>"#,
        kind = panel.kind.as_str(),
        close = detail_href(&panel.company_id),
        company = encode_text(company),
        title = e.title,
        question = e.question,
        hex = bar_color(signal.value).hex(),
        pct = format_percent(signal.value),
        delta = encode_text(&delta),
        rank = rank,
        method = e.methodology,
        high = e.high_means,
        low = e.low_means,
        others = others
    )
}

/* -------------------------------------------------------------------------- */
/* Static site                                                                */
/* -------------------------------------------------------------------------- */

/// Every reachable screen as `(file name, html)`.
pub fn render_site(ds: &Dataset) -> Vec<(String, String)> {
    let mut c = Controller::new();
    let ticket = c.begin_load();
    c.finish_load(ticket, Ok(ds.clone()));

    let mut pages = vec![(overview_href().to_string(), render_page(&c))];
    for company in COMPANIES.iter() {
        c.select_company(company.id);
        pages.push((detail_href(company.id), render_page(&c)));
        for kind in SignalKind::ALL {
            if c.open_detail_panel(kind) {
                pages.push((panel_href(company.id, kind), render_page(&c)));
                c.close_detail_panel();
            }
        }
        c.go_back();
    }
    pages
}

/* -------------------------------------------------------------------------- */
/* Terminal                                                                   */
/* -------------------------------------------------------------------------- */

pub fn render_text(c: &Controller) -> String {
    let view = c.view();
    let mut out = String::new();

    match c.load_state() {
        LoadState::Loading => out.push_str("Loading forecast…\n"),
        LoadState::Failed { message } => {
            out.push_str("Couldn't load the forecast.\n");
            out.push_str(&format!("  {}\n", message));
            out.push_str("Type `retry` to try again.\n");
        }
        LoadState::Ready(ds) => {
            out.push_str(&format!(
                "AI Weather · updated {} · timeframe {}\n\n",
                format_timestamp(&ds.forecast.last_updated),
                view.timeframe.as_str()
            ));
            match &view.screen {
                Screen::Overview => {
                    for company in COMPANIES.iter() {
                        out.push_str(&card_text(company, ds.forecast_for(company.id), ds.mood_for(company.id)));
                        out.push('\n');
                    }
                }
                Screen::Detail { company_id } => {
                    if let Some(company) = companies::find(company_id) {
                        out.push_str(&detail_text(company, ds.forecast_for(company_id), ds.mood_for(company_id)));
                    }
                }
            }
            if let Some(panel) = visible_panel(view) {
                out.push('\n');
                out.push_str(&panel_text(panel));
            }
        }
    }
    out
}

fn card_text(company: &Company, forecast: Option<&CompanyForecast>, mood: Option<&MoodDocument>) -> String {
    let category = forecast.map(|f| f.category).unwrap_or(WeatherCategory::Foggy);
    let mut out = format!(
        "{} {:<16} {:<14} {:>3}\n",
        glyph(category),
        company.display_name,
        forecast.map(|f| f.label.as_str()).unwrap_or("No forecast"),
        format_score(forecast.and_then(|f| f.score))
    );
    if let Some(signals) = forecast.and_then(|f| f.signals.as_ref()) {
        let line = SignalKind::CARD
            .iter()
            .map(|k| signal_summary_line(*k, signals.get(*k)))
            .join(" | ");
        out.push_str(&format!("    {}\n", line));
    }
    if let Some(trend) = mood.and_then(|m| sparkline::render_text(&m.history)) {
        out.push_str(&format!("    trend {}\n", trend));
    }
    if let Some(summary) = forecast.and_then(|f| f.summary.as_deref()) {
        out.push_str(&format!("    {}\n", summary));
    }
    out
}

fn detail_text(company: &Company, forecast: Option<&CompanyForecast>, mood: Option<&MoodDocument>) -> String {
    let mut out = String::new();
    let Some(f) = forecast else {
        out.push_str(&format!("{} {}\n  No forecast available.\n", glyph(WeatherCategory::Foggy), company.display_name));
        return out;
    };

    out.push_str(&format!(
        "{} {} · {} · score {}\n  {}\n",
        glyph(f.category),
        company.display_name,
        f.label,
        format_score(f.score),
        f.description
    ));
    if let Some(summary) = &f.summary {
        out.push_str(&format!("\n  {}\n", summary));
    }

    out.push_str("\nSignals\n");
    match &f.signals {
        Some(signals) => {
            for (kind, s) in signals.iter() {
                let mut line = format!("  {:<12} {:>8}", signal_title(kind), format_percent(s.value));
                if let Some(d) = peer_delta(s.vs_peers.as_deref()) {
                    line.push_str(&format!("  {} {}", d.arrow, d.label));
                }
                if let Some(rank) = rank_label(s.vs_peers.as_deref()) {
                    line.push_str(&format!("  [{}]", rank));
                }
                out.push_str(&line);
                out.push('\n');
            }
        }
        None => out.push_str(&format!("  {}\n", NO_DATA)),
    }

    if let Some(m) = mood {
        if let Some(trend) = sparkline::render_text(&m.history) {
            out.push_str(&format!("\nTrend  {}\n", trend));
        }
        if !m.posts.is_empty() {
            out.push_str("\nRecent activity\n");
            for p in m.posts.iter().take(MAX_POSTS) {
                match &p.date {
                    Some(d) => out.push_str(&format!("  - {} ({})\n", p.title, d)),
                    None => out.push_str(&format!("  - {}\n", p.title)),
                }
            }
        }
        if let Some(badge) = &m.sentiment_badge {
            out.push_str(&format!("\nMood: {}\n", badge));
        }
    }
    out
}

fn panel_text(panel: &DetailPanel) -> String {
    let e = explainer(panel.kind);
    let s = panel.signals.get(panel.kind);
    let mut out = format!("── {} · {} ──\n{}\n", panel.company_id, e.title, e.question);
    out.push_str(&format!("  value     {}\n", format_percent(s.value)));
    if let Some(d) = peer_delta(s.vs_peers.as_deref()) {
        out.push_str(&format!("  vs peers  {} {}\n", d.arrow, d.label));
    }
    if let Some(rank) = rank_label(s.vs_peers.as_deref()) {
        out.push_str(&format!("  rank      {}\n", rank));
    }
    out.push_str(&format!("  {}\n", e.methodology));
    out
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #0f172a; color: #e2e8f0; }
header { display: flex; gap: 1rem; align-items: center; padding: 1rem 2rem; border-bottom: 1px solid #1e293b; }
header h1 { font-size: 1.25rem; margin: 0; } header a { color: inherit; text-decoration: none; }
.updated { color: #94a3b8; font-size: .85rem; }
.timeframes { margin-left: auto; display: flex; gap: .25rem; }
.tf { padding: .2rem .6rem; border-radius: 999px; background: #1e293b; font-size: .8rem; }
.tf.active { background: #334155; font-weight: 600; }
.refresh, .retry, .details, .back { color: #93c5fd; }
main { padding: 2rem; }
.overview { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
.card { background: #111827; border-top: 4px solid var(--accent); border-radius: 12px; padding: 1rem; }
.card-head, .hero { display: flex; gap: 1rem; align-items: center; }
.card-head h2, .hero h2 { margin: 0; }
.score { margin-left: auto; font-size: 1.75rem; font-weight: 700; } .score.big { font-size: 3rem; }
.card-signals { list-style: none; padding: 0; } .card-signals a { text-decoration: none; }
.summary { color: #cbd5e1; }
.detail-body { display: grid; grid-template-columns: 2fr 1fr; gap: 2rem; }
.signal-row { display: grid; grid-template-columns: 8rem 1fr 4rem auto auto; gap: .5rem; align-items: center; padding: .5rem 0; color: inherit; text-decoration: none; }
.bar { height: 8px; background: #1e293b; border-radius: 4px; overflow: hidden; } .fill { display: block; height: 100%; }
.badge { font-size: .75rem; padding: .1rem .4rem; border-radius: 4px; background: #1e293b; }
.badge.up { color: #22c55e; } .badge.down { color: #ef4444; }
.panel-backdrop { position: fixed; inset: 0; background: rgba(0,0,0,.5); }
.panel { position: absolute; right: 0; top: 0; bottom: 0; width: 380px; background: #111827; padding: 1.5rem; overflow-y: auto; }
.close { float: right; color: inherit; text-decoration: none; font-size: 1.5rem; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::*;
    use std::collections::BTreeMap;

    fn dataset_without(mood_for: &str) -> Dataset {
        let moods: BTreeMap<_, _> = COMPANIES
            .iter()
            .filter(|c| c.id != mood_for)
            .map(|c| (c.id.to_string(), sample_mood()))
            .collect();
        Dataset { forecast: sample_snapshot(), moods }
    }

    fn ready(ds: Dataset) -> Controller {
        let mut c = Controller::new();
        let t = c.begin_load();
        c.finish_load(t, Ok(ds));
        c
    }

    fn card_html<'a>(page: &'a str, id: &str) -> &'a str {
        let start = page.find(&format!(r#"data-company="{}""#, id)).unwrap();
        let end = page[start..].find("</article>").unwrap();
        &page[start..start + end]
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(encode_text("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
        assert_eq!(
            encode_double_quoted_attribute(r#"https://x.test/?q="a"&b=1"#),
            "https://x.test/?q=&quot;a&quot;&amp;b=1"
        );
    }

    #[test]
    fn company_without_mood_loses_trend_only() {
        let page = render_page(&ready(dataset_without("meta")));

        let meta = card_html(&page, "meta");
        assert!(!meta.contains("sparkline"));
        assert!(meta.contains("Sentiment: 64%"));
        for id in ["anthropic", "openai", "google", "xai"] {
            assert!(card_html(&page, id).contains("sparkline"), "{}", id);
        }
        assert!(!page.contains(r#"class="error""#));
    }

    #[test]
    fn cards_follow_registry_order_and_skip_competitive() {
        let mut ds = dataset_without("");
        ds.forecast.forecasts.get_mut("xai").unwrap().score = Some(0.99);
        let page = render_overview(&ds);

        let positions: Vec<_> = COMPANIES
            .iter()
            .map(|c| page.find(&format!(r#"data-company="{}""#, c.id)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!page.contains("Competitive:"));
    }

    #[test]
    fn short_history_has_no_trend() {
        let mut ds = dataset_without("");
        ds.moods.get_mut("openai").unwrap().history = vec![0.4];
        let page = render_overview(&ds);
        assert!(!card_html(&page, "openai").contains("sparkline"));
        assert!(card_html(&page, "google").contains("sparkline"));
    }

    #[test]
    fn detail_shows_all_signals_five_posts_and_badge() {
        let mut c = ready(dataset_without(""));
        c.select_company("openai");
        let page = render_page(&c);

        assert_eq!(page.matches(r#"class="signal-row""#).count(), 4);
        assert!(page.contains(r#"href="openai-shipping.html""#));
        assert!(page.contains("Post 5"));
        assert!(!page.contains("Post 6"));
        assert!(page.contains("confident"));
        assert!(page.contains("12% above avg"));
        assert!(page.contains("1 of 5"));
    }

    #[test]
    fn detail_without_mood_omits_sidebar_sections() {
        let mut c = ready(dataset_without("openai"));
        c.select_company("openai");
        let page = render_page(&c);
        assert!(!page.contains("Recent activity"));
        assert!(!page.contains("sparkline"));
        assert!(!page.contains("mood-badge"));
        assert!(page.contains(r#"class="signal-row""#));
    }

    #[test]
    fn missing_market_signal_renders_no_data_without_badges() {
        let mut c = ready(dataset_without(""));
        c.select_company("google");
        let page = render_page(&c);
        let start = page.find(r#"data-signal="market""#).unwrap();
        let row = &page[start..start + page[start..].find("</a>").unwrap()];
        assert!(row.contains("No data"));
        assert!(!row.contains("badge"));
    }

    #[test]
    fn panel_overlay_follows_view_state() {
        let mut c = ready(dataset_without(""));
        c.select_company("anthropic");
        c.open_detail_panel(SignalKind::Shipping);
        let page = render_page(&c);
        assert!(page.contains(r#"class="panel" data-signal="shipping""#));
        assert!(page.contains("Anthropic · Shipping"));

        c.close_detail_panel();
        assert!(!render_page(&c).contains(r#"class="panel-backdrop""#));
    }

    #[test]
    fn error_and_loading_screens() {
        let mut c = Controller::new();
        assert!(render_page(&c).contains("Loading forecast"));

        let t = c.begin_load();
        c.finish_load(t, Err(anyhow::anyhow!("HTTP error for /data/forecast.json: 500 <oops>")));
        let page = render_page(&c);
        assert!(page.contains(r#"class="error""#));
        assert!(page.contains("&lt;oops&gt;"));
        assert!(page.contains("data-action=\"retry\""));
        assert!(render_text(&c).contains("retry"));
    }

    #[test]
    fn failed_or_pending_refresh_hides_the_panel() {
        let mut c = ready(dataset_without(""));
        c.select_company("openai");
        assert!(c.open_detail_panel(SignalKind::Shipping));

        let t = c.begin_load();
        let loading = render_page(&c);
        assert!(loading.contains("Loading forecast"));
        assert!(!loading.contains(r#"class="panel-backdrop""#));
        assert!(!render_text(&c).contains("── openai · Shipping ──"));

        c.finish_load(t, Err(anyhow::anyhow!("HTTP error for /data/forecast.json: 500")));
        let failed = render_page(&c);
        assert!(failed.contains(r#"class="error""#));
        assert!(!failed.contains(r#"class="panel-backdrop""#));
        let text = render_text(&c);
        assert!(text.contains("retry"));
        assert!(!text.contains("Shipping"));

        let t = c.begin_load();
        c.finish_load(t, Ok(dataset_without("")));
        assert!(render_page(&c).contains(r#"class="panel" data-signal="shipping""#));
    }

    #[test]
    fn site_covers_every_screen() {
        let pages = render_site(&dataset_without(""));
        assert_eq!(pages.len(), 1 + COMPANIES.len() + COMPANIES.len() * SignalKind::ALL.len());
        assert_eq!(pages[0].0, "index.html");
        assert!(pages.iter().any(|(name, _)| name == "meta-competitive.html"));
        assert!(!pages[0].1.contains(r#"class="panel-backdrop""#));
    }

    #[test]
    fn text_rendering_tracks_the_screen() {
        let mut c = ready(dataset_without("xai"));
        let overview = render_text(&c);
        assert!(overview.contains("Anthropic"));
        assert!(overview.contains("xAI"));
        assert!(overview.contains("trend "));

        c.select_company("google");
        c.open_detail_panel(SignalKind::Competitive);
        let detail = render_text(&c);
        assert!(detail.contains("Recent activity"));
        assert!(detail.contains("18% below avg"));
        assert!(detail.contains("── google · Competitive ──"));
    }
}
