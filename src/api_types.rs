use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[allow(non_snake_case)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiForecastDoc {
    pub lastUpdated: String,                          // "2025-01-10T12:34:56.123456Z"
    #[serde(default)]
    pub forecast: BTreeMap<String, ApiCompanyForecast>, // company id -> forecast
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCompanyForecast {
    #[serde(default)]
    pub weather: Option<String>,                      // "sunny" | "partly_cloudy" | ... | "foggy"
    #[serde(default)]
    pub weather_info: Option<ApiWeatherInfo>,
    #[serde(default)]
    pub score: Option<f64>,                           // 0..1, null when every signal is missing
    #[serde(default)]
    pub signals: Option<ApiSignals>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiWeatherInfo {
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSignals {
    #[serde(default)]
    pub sentiment: Option<ApiSignal>,
    #[serde(default)]
    pub shipping: Option<ApiSignal>,
    #[serde(default)]
    pub market: Option<ApiSignal>,
    #[serde(default)]
    pub competitive: Option<ApiSignal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSignal {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub vs_peers: Option<ApiDecimal>,                 // "+0.15" | "-0.08", occasionally a bare number
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiDecimal {
    Text(String),
    Number(f64),
}

impl ApiDecimal {
    pub fn into_text(self) -> String {
        match self {
            ApiDecimal::Text(s) => s,
            ApiDecimal::Number(n) => n.to_string(),
        }
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMoodDoc {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub lastUpdated: Option<String>,
    #[serde(default)]
    pub sentiment: Option<ApiSentiment>,
    #[serde(default)]
    pub posts: Vec<ApiPost>,                          // newest first
    #[serde(default)]
    pub history: Vec<f64>,                            // oldest first, up to 30 points
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSentiment {
    #[serde(default)]
    pub score: Option<f64>,                           // [-1.0, 1.0]
    #[serde(default)]
    pub label: Option<String>,                        // "confident" | "cautious" | "defensive"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPost {
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub date: Option<String>,                         // "YYYY-MM-DD" or ""
    #[serde(default)]
    pub sentiment: Option<f64>,
}
