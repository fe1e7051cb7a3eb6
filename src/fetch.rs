use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::api_types::*;
use crate::companies::COMPANIES;
use crate::models::*;

/// Where forecast and mood documents come from.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn forecast(&self) -> Result<ForecastSnapshot>;

    /// `Ok(None)` when the company simply has no mood document.
    async fn mood(&self, company_id: &str) -> Result<Option<MoodDocument>>;

    fn describe(&self) -> String;
}

pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        // Url::join drops the last path segment unless the base ends in '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base = Url::parse(&normalized).with_context(|| format!("Invalid base URL {}", base_url))?;

        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self { client: builder.build()?, base })
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("Joining {} onto {}", path, self.base))
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn forecast(&self) -> Result<ForecastSnapshot> {
        let url = self.url_for("data/forecast.json")?;
        debug!("Fetching forecast - url={}", url);

        let resp = self.client.get(url.clone()).send().await
            .with_context(|| format!("Request failed for {}", url))?;
        let resp = resp.error_for_status()
            .with_context(|| format!("HTTP error for {}", url))?;
        let doc: ApiForecastDoc = resp.json().await
            .with_context(|| format!("Decoding JSON for {}", url))?;

        Ok(forecast_from_api(doc))
    }

    async fn mood(&self, company_id: &str) -> Result<Option<MoodDocument>> {
        let url = self.url_for(&format!("data/mood/{}.json", company_id))?;
        debug!("Fetching mood - company={}, url={}", company_id, url);

        let resp = self.client.get(url.clone()).send().await
            .with_context(|| format!("Request failed for {}", url))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let resp = resp.error_for_status()
            .with_context(|| format!("HTTP error for {}", url))?;
        let doc: ApiMoodDoc = resp.json().await
            .with_context(|| format!("Decoding JSON for {}", url))?;

        Ok(Some(mood_from_api(doc)))
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

/// Reads `<root>/forecast.json` and `<root>/mood/<id>.json` from disk.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DataSource for DirSource {
    async fn forecast(&self) -> Result<ForecastSnapshot> {
        let path = self.root.join("forecast.json");
        debug!("Reading forecast - path={}", path.display());

        let bytes = tokio::fs::read(&path).await
            .with_context(|| format!("Reading {}", path.display()))?;
        let doc: ApiForecastDoc = serde_json::from_slice(&bytes)
            .with_context(|| format!("Decoding JSON for {}", path.display()))?;

        Ok(forecast_from_api(doc))
    }

    async fn mood(&self, company_id: &str) -> Result<Option<MoodDocument>> {
        let path = self.root.join("mood").join(format!("{}.json", company_id));
        debug!("Reading mood - company={}, path={}", company_id, path.display());

        let bytes = match tokio::fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("Reading {}", path.display())),
        };
        let doc: ApiMoodDoc = serde_json::from_slice(&bytes)
            .with_context(|| format!("Decoding JSON for {}", path.display()))?;

        Ok(Some(mood_from_api(doc)))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

pub fn forecast_from_api(doc: ApiForecastDoc) -> ForecastSnapshot {
    let forecasts = doc
        .forecast
        .into_iter()
        .map(|(id, f)| {
            let category = WeatherCategory::from_wire(f.weather.as_deref());
            let info = f.weather_info.unwrap_or(ApiWeatherInfo {
                icon: None,
                emoji: None,
                label: None,
                description: None,
            });
            let label = info
                .label
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| category.default_label().to_string());
            let description = info
                .description
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| category.default_description().to_string());

            let forecast = CompanyForecast {
                category,
                label,
                description,
                score: f.score,
                signals: f.signals.map(signals_from_api),
                summary: f.summary.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            };
            (id.trim().to_ascii_lowercase(), forecast)
        })
        .collect();

    ForecastSnapshot {
        last_updated: doc.lastUpdated,
        forecasts,
    }
}

fn signals_from_api(s: ApiSignals) -> SignalSet {
    SignalSet {
        sentiment: signal_from_api(s.sentiment),
        shipping: signal_from_api(s.shipping),
        market: signal_from_api(s.market),
        competitive: signal_from_api(s.competitive),
    }
}

fn signal_from_api(s: Option<ApiSignal>) -> Signal {
    match s {
        Some(s) => Signal {
            value: s.value,
            vs_peers: s.vs_peers.map(ApiDecimal::into_text),
        },
        None => Signal::default(),
    }
}

pub fn mood_from_api(doc: ApiMoodDoc) -> MoodDocument {
    let (sentiment_badge, sentiment_score) = match doc.sentiment {
        Some(s) => (s.label.filter(|l| !l.trim().is_empty()), s.score),
        None => (None, None),
    };

    MoodDocument {
        sentiment_badge,
        sentiment_score,
        posts: doc
            .posts
            .into_iter()
            .map(|p| Post {
                title: p.title.trim().to_string(),
                url: p.url,
                date: p.date.filter(|d| !d.trim().is_empty()),
            })
            .collect(),
        history: doc.history,
    }
}

/// One full fetch cycle: the forecast first, then each registry company's
/// mood document in registry order. Only the forecast can fail the cycle.
pub async fn fetch_dataset(source: &dyn DataSource) -> Result<Dataset> {
    let start = std::time::Instant::now();
    info!("Load started - source={}", source.describe());

    let forecast = match source.forecast().await {
        Ok(f) => f,
        Err(e) => {
            error!("Forecast fetch failed - source={}, error={:#}", source.describe(), e);
            return Err(e);
        }
    };
    info!(
        "Forecast fetch completed - duration={:.2}s, companies={}, last_updated={}",
        start.elapsed().as_secs_f32(),
        forecast.forecasts.len(),
        forecast.last_updated
    );

    let mut moods = BTreeMap::new();
    for company in COMPANIES.iter() {
        match source.mood(company.id).await {
            Ok(Some(m)) => {
                debug!(
                    "Mood loaded - company={}, posts={}, history_points={}",
                    company.id, m.posts.len(), m.history.len()
                );
                moods.insert(company.id.to_string(), m);
            }
            Ok(None) => {
                debug!("No mood document - company={}", company.id);
            }
            Err(e) => {
                warn!("Mood fetch failed, rendering without mood data - company={}, error={:#}", company.id, e);
            }
        }
    }

    info!(
        "Load completed - duration={:.2}s, moods={}/{}",
        start.elapsed().as_secs_f32(),
        moods.len(),
        COMPANIES.len()
    );

    Ok(Dataset { forecast, moods })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use anyhow::bail;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory source with switchable failures and call counters.
    pub struct StubSource {
        pub forecast_fails: Mutex<bool>,
        pub failing_moods: HashSet<String>,
        pub forecast_calls: AtomicUsize,
        pub mood_calls: AtomicUsize,
        pub snapshot: ForecastSnapshot,
    }

    impl StubSource {
        pub fn new() -> Self {
            Self {
                forecast_fails: Mutex::new(false),
                failing_moods: HashSet::new(),
                forecast_calls: AtomicUsize::new(0),
                mood_calls: AtomicUsize::new(0),
                snapshot: sample_snapshot(),
            }
        }

        pub fn set_forecast_fails(&self, fails: bool) {
            *self.forecast_fails.lock().unwrap() = fails;
        }
    }

    #[async_trait]
    impl DataSource for StubSource {
        async fn forecast(&self) -> Result<ForecastSnapshot> {
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            if *self.forecast_fails.lock().unwrap() {
                bail!("HTTP error for /data/forecast.json: 500 Internal Server Error");
            }
            Ok(self.snapshot.clone())
        }

        async fn mood(&self, company_id: &str) -> Result<Option<MoodDocument>> {
            self.mood_calls.fetch_add(1, Ordering::SeqCst);
            if self.failing_moods.contains(company_id) {
                bail!("HTTP error for /data/mood/{}.json: 500 Internal Server Error", company_id);
            }
            Ok(Some(sample_mood()))
        }

        fn describe(&self) -> String {
            "stub".into()
        }
    }

    pub fn sample_signals() -> SignalSet {
        SignalSet {
            sentiment: Signal { value: Some(0.64), vs_peers: Some("+0.12".into()) },
            shipping: Signal { value: Some(0.45), vs_peers: Some("-0.03".into()) },
            market: Signal { value: None, vs_peers: None },
            competitive: Signal { value: Some(0.2), vs_peers: Some("-0.18".into()) },
        }
    }

    pub fn sample_snapshot() -> ForecastSnapshot {
        let forecasts = COMPANIES
            .iter()
            .map(|c| {
                (
                    c.id.to_string(),
                    CompanyForecast {
                        category: WeatherCategory::PartlyCloudy,
                        label: "Partly Cloudy".into(),
                        description: "Mixed signals, some uncertainty".into(),
                        score: Some(0.58),
                        signals: Some(sample_signals()),
                        summary: Some(format!("Outperforming on sentiment at {}", c.display_name)),
                    },
                )
            })
            .collect();
        ForecastSnapshot {
            last_updated: "2025-01-10T12:34:56.123456Z".into(),
            forecasts,
        }
    }

    pub fn sample_mood() -> MoodDocument {
        MoodDocument {
            sentiment_badge: Some("confident".into()),
            sentiment_score: Some(0.21),
            posts: (1..=7)
                .map(|i| Post {
                    title: format!("Post {}", i),
                    url: format!("https://example.com/{}", i),
                    date: Some(format!("2025-01-0{}", i)),
                })
                .collect(),
            history: vec![0.1, 0.3, 0.2, 0.4],
        }
    }
}
