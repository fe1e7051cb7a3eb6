use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCategory {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Stormy,
    Foggy,
}

impl WeatherCategory {
    pub const ALL: [WeatherCategory; 6] = [
        WeatherCategory::Sunny,
        WeatherCategory::PartlyCloudy,
        WeatherCategory::Cloudy,
        WeatherCategory::Rainy,
        WeatherCategory::Stormy,
        WeatherCategory::Foggy,
    ];

    /// Unknown or missing names fall back to `Foggy`.
    pub fn from_wire(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some("sunny") => WeatherCategory::Sunny,
            Some("partly_cloudy") => WeatherCategory::PartlyCloudy,
            Some("cloudy") => WeatherCategory::Cloudy,
            Some("rainy") => WeatherCategory::Rainy,
            Some("stormy") => WeatherCategory::Stormy,
            _ => WeatherCategory::Foggy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCategory::Sunny => "sunny",
            WeatherCategory::PartlyCloudy => "partly_cloudy",
            WeatherCategory::Cloudy => "cloudy",
            WeatherCategory::Rainy => "rainy",
            WeatherCategory::Stormy => "stormy",
            WeatherCategory::Foggy => "foggy",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            WeatherCategory::Sunny => "Sunny",
            WeatherCategory::PartlyCloudy => "Partly Cloudy",
            WeatherCategory::Cloudy => "Cloudy",
            WeatherCategory::Rainy => "Rainy",
            WeatherCategory::Stormy => "Stormy",
            WeatherCategory::Foggy => "Foggy",
        }
    }

    pub fn default_description(&self) -> &'static str {
        match self {
            WeatherCategory::Sunny => "Bright outlook with strong signals",
            WeatherCategory::PartlyCloudy => "Mixed signals, some uncertainty",
            WeatherCategory::Cloudy => "Below average performance",
            WeatherCategory::Rainy => "Concerning trends emerging",
            WeatherCategory::Stormy => "Turbulent times ahead",
            WeatherCategory::Foggy => "Insufficient data available",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Sentiment,
    Shipping,
    Market,
    Competitive,
}

impl SignalKind {
    pub const ALL: [SignalKind; 4] = [
        SignalKind::Sentiment,
        SignalKind::Shipping,
        SignalKind::Market,
        SignalKind::Competitive,
    ];

    /// The subset shown on compact overview cards.
    pub const CARD: [SignalKind; 3] = [SignalKind::Sentiment, SignalKind::Shipping, SignalKind::Market];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sentiment" => Some(SignalKind::Sentiment),
            "shipping" => Some(SignalKind::Shipping),
            "market" => Some(SignalKind::Market),
            "competitive" => Some(SignalKind::Competitive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Sentiment => "sentiment",
            SignalKind::Shipping => "shipping",
            SignalKind::Market => "market",
            SignalKind::Competitive => "competitive",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub value: Option<f64>,       // conceptually [0, 1]
    pub vs_peers: Option<String>, // signed decimal, e.g. "+0.15"
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalSet {
    pub sentiment: Signal,
    pub shipping: Signal,
    pub market: Signal,
    pub competitive: Signal,
}

impl SignalSet {
    pub fn get(&self, kind: SignalKind) -> &Signal {
        match kind {
            SignalKind::Sentiment => &self.sentiment,
            SignalKind::Shipping => &self.shipping,
            SignalKind::Market => &self.market,
            SignalKind::Competitive => &self.competitive,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SignalKind, &Signal)> + '_ {
        SignalKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyForecast {
    pub category: WeatherCategory,
    pub label: String,
    pub description: String,
    pub score: Option<f64>,
    pub signals: Option<SignalSet>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    pub last_updated: String,
    pub forecasts: BTreeMap<String, CompanyForecast>, // company id -> forecast
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub url: String,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodDocument {
    pub sentiment_badge: Option<String>,
    pub sentiment_score: Option<f64>,
    pub posts: Vec<Post>,
    pub history: Vec<f64>,
}

/// One completed fetch cycle. Companies whose mood document could not be
/// loaded are absent from `moods`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub forecast: ForecastSnapshot,
    pub moods: BTreeMap<String, MoodDocument>,
}

impl Dataset {
    pub fn forecast_for(&self, company_id: &str) -> Option<&CompanyForecast> {
        self.forecast.forecasts.get(company_id)
    }

    pub fn mood_for(&self, company_id: &str) -> Option<&MoodDocument> {
        self.moods.get(company_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_weather_is_foggy() {
        assert_eq!(WeatherCategory::from_wire(Some("hail")), WeatherCategory::Foggy);
        assert_eq!(WeatherCategory::from_wire(None), WeatherCategory::Foggy);
        for c in WeatherCategory::ALL {
            assert_eq!(WeatherCategory::from_wire(Some(c.as_str())), c);
        }
    }

    #[test]
    fn signal_kind_parse_is_case_insensitive() {
        assert_eq!(SignalKind::parse(" Shipping "), Some(SignalKind::Shipping));
        assert_eq!(SignalKind::parse("buzz"), None);
    }

    #[test]
    fn signal_set_iterates_in_fixed_order() {
        let set = SignalSet {
            market: Signal { value: Some(0.3), vs_peers: None },
            ..Default::default()
        };
        let kinds: Vec<_> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, SignalKind::ALL.to_vec());
        assert_eq!(set.get(SignalKind::Market).value, Some(0.3));
    }
}
