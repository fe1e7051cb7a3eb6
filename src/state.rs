use crate::models::{Dataset, SignalKind, SignalSet};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Overview,
    Detail { company_id: String },
}

/// Display-only; switching it never refetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    #[default]
    SevenDays,
    FourteenDays,
    ThirtyDays,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::SevenDays, Timeframe::FourteenDays, Timeframe::ThirtyDays];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "7d" => Some(Timeframe::SevenDays),
            "14d" => Some(Timeframe::FourteenDays),
            "30d" => Some(Timeframe::ThirtyDays),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::SevenDays => "7d",
            Timeframe::FourteenDays => "14d",
            Timeframe::ThirtyDays => "30d",
        }
    }
}

/// Snapshot of one company's signals taken when the panel was opened.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    pub kind: SignalKind,
    pub company_id: String,
    pub signals: SignalSet,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub screen: Screen,
    pub timeframe: Timeframe,
    pub panel: Option<DetailPanel>,
}

impl ViewState {
    pub fn selected_company_id(&self) -> Option<&str> {
        match &self.screen {
            Screen::Overview => None,
            Screen::Detail { company_id } => Some(company_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Failed { message: String },
    Ready(Dataset),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Refresh,
    Select(String),
    Back,
    OpenPanel(SignalKind),
    ClosePanel,
    SetTimeframe(Timeframe),
}
