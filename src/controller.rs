use anyhow::Result;
use tracing::{debug, info, warn};

use crate::companies;
use crate::fetch::{fetch_dataset, DataSource};
use crate::models::{Dataset, SignalKind};
use crate::state::{Action, DetailPanel, LoadState, Screen, Timeframe, ViewState};

/// Identifies one fetch cycle. Only the newest ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Sole owner of the dashboard state. Every change goes through a named
/// transition.
#[derive(Debug)]
pub struct Controller {
    view: ViewState,
    load: LoadState,
    generation: u64,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            view: ViewState::default(),
            load: LoadState::Loading,
            generation: 0,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match &self.load {
            LoadState::Ready(ds) => Some(ds),
            _ => None,
        }
    }

    /// Enters `Loading` and supersedes any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.load = LoadState::Loading;
        debug!("Load begun - generation={}", self.generation);
        LoadTicket(self.generation)
    }

    /// Returns false when the ticket was superseded and the result dropped.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Dataset>) -> bool {
        if ticket.0 != self.generation {
            debug!("Stale load result dropped - generation={}, current={}", ticket.0, self.generation);
            return false;
        }
        self.load = match result {
            Ok(ds) => LoadState::Ready(ds),
            Err(e) => LoadState::Failed { message: format!("{:#}", e) },
        };
        true
    }

    pub async fn load_all(&mut self, source: &dyn DataSource) {
        let ticket = self.begin_load();
        let result = fetch_dataset(source).await;
        self.finish_load(ticket, result);
    }

    /// Applies one user action; returns a ticket when the action starts a load
    /// the caller must run.
    pub fn dispatch(&mut self, action: Action) -> Option<LoadTicket> {
        match action {
            Action::Refresh => return Some(self.begin_load()),
            Action::Select(id) => {
                self.select_company(&id);
            }
            Action::Back => self.go_back(),
            Action::OpenPanel(kind) => {
                self.open_detail_panel(kind);
            }
            Action::ClosePanel => self.close_detail_panel(),
            Action::SetTimeframe(tf) => self.set_timeframe(tf),
        }
        None
    }

    pub fn select_company(&mut self, company_id: &str) -> bool {
        if companies::find(company_id).is_none() {
            warn!("Ignoring selection of unknown company - company={}", company_id);
            return false;
        }
        if self.view.selected_company_id() != Some(company_id) {
            self.view.panel = None;
        }
        self.view.screen = Screen::Detail { company_id: company_id.to_string() };
        info!("Company selected - company={}", company_id);
        true
    }

    /// Back to the overview; the panel belongs to the detail screen and goes too.
    pub fn go_back(&mut self) {
        self.view.screen = Screen::Overview;
        self.view.panel = None;
    }

    pub fn open_detail_panel(&mut self, kind: SignalKind) -> bool {
        let Some(company_id) = self.view.selected_company_id().map(str::to_string) else {
            debug!("Panel not opened, no company selected - signal={}", kind.as_str());
            return false;
        };
        let Some(signals) = self
            .dataset()
            .and_then(|ds| ds.forecast_for(&company_id))
            .and_then(|f| f.signals.clone())
        else {
            debug!("Panel not opened, no signals - company={}, signal={}", company_id, kind.as_str());
            return false;
        };

        self.view.panel = Some(DetailPanel { kind, company_id, signals });
        true
    }

    pub fn close_detail_panel(&mut self) {
        self.view.panel = None;
    }

    pub fn set_timeframe(&mut self, tf: Timeframe) {
        self.view.timeframe = tf;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::*;
    use anyhow::anyhow;
    use std::sync::atomic::Ordering;

    async fn ready() -> (Controller, StubSource) {
        let stub = StubSource::new();
        let mut c = Controller::new();
        c.load_all(&stub).await;
        assert!(c.dataset().is_some());
        (c, stub)
    }

    #[test]
    fn starts_loading_on_the_overview() {
        let c = Controller::new();
        assert_eq!(c.load_state(), &LoadState::Loading);
        assert_eq!(c.view(), &ViewState::default());
    }

    #[tokio::test]
    async fn forecast_500_shows_error_and_retry_refetches_everything() {
        let stub = StubSource::new();
        stub.set_forecast_fails(true);
        let mut c = Controller::new();
        c.load_all(&stub).await;

        match c.load_state() {
            LoadState::Failed { message } => assert!(message.contains("500")),
            other => panic!("expected failure, got {:?}", other),
        }

        stub.set_forecast_fails(false);
        let ticket = c.dispatch(Action::Refresh).expect("refresh starts a load");
        assert_eq!(c.load_state(), &LoadState::Loading);
        let result = fetch_dataset(&stub).await;
        assert!(c.finish_load(ticket, result));

        assert!(c.dataset().is_some());
        assert_eq!(stub.forecast_calls.load(Ordering::SeqCst), 2);
        assert_eq!(stub.mood_calls.load(Ordering::SeqCst), companies::COMPANIES.len());
    }

    #[tokio::test]
    async fn select_then_back_clears_selection_and_panel() {
        let (mut c, _stub) = ready().await;
        assert!(c.select_company("openai"));
        assert_eq!(c.view().selected_company_id(), Some("openai"));
        assert!(c.open_detail_panel(SignalKind::Market));

        c.go_back();
        assert_eq!(c.view().screen, Screen::Overview);
        assert!(c.view().selected_company_id().is_none());
        assert!(c.view().panel.is_none());

        c.select_company("google");
        assert!(c.view().panel.is_none());
    }

    #[tokio::test]
    async fn panel_captures_signals_and_close_keeps_screen() {
        let (mut c, _stub) = ready().await;
        c.select_company("meta");
        assert!(c.open_detail_panel(SignalKind::Shipping));

        let panel = c.view().panel.clone().unwrap();
        assert_eq!(panel.kind, SignalKind::Shipping);
        assert_eq!(panel.company_id, "meta");
        assert_eq!(panel.signals, sample_signals());

        c.close_detail_panel();
        assert!(c.view().panel.is_none());
        assert_eq!(c.view().selected_company_id(), Some("meta"));
    }

    #[tokio::test]
    async fn panel_snapshot_survives_refresh() {
        let (mut c, _stub) = ready().await;
        c.select_company("anthropic");
        c.open_detail_panel(SignalKind::Sentiment);

        let mut changed = sample_snapshot();
        if let Some(f) = changed.forecasts.get_mut("anthropic") {
            f.signals = None;
        }
        let ticket = c.begin_load();
        c.finish_load(ticket, Ok(Dataset { forecast: changed, moods: Default::default() }));

        assert_eq!(c.view().panel.as_ref().map(|p| p.signals.clone()), Some(sample_signals()));
    }

    #[tokio::test]
    async fn panel_needs_a_selection_and_signals() {
        let (mut c, _stub) = ready().await;
        assert!(!c.open_detail_panel(SignalKind::Market));

        let mut no_signals = sample_snapshot();
        no_signals.forecasts.get_mut("xai").unwrap().signals = None;
        let ticket = c.begin_load();
        c.finish_load(ticket, Ok(Dataset { forecast: no_signals, moods: Default::default() }));
        c.select_company("xai");
        assert!(!c.open_detail_panel(SignalKind::Market));
        assert!(c.view().panel.is_none());
    }

    #[test]
    fn unknown_company_is_ignored() {
        let mut c = Controller::new();
        assert!(!c.select_company("acme"));
        assert_eq!(c.view().screen, Screen::Overview);
    }

    #[test]
    fn timeframe_does_not_start_a_load() {
        let mut c = Controller::new();
        assert!(c.dispatch(Action::SetTimeframe(Timeframe::ThirtyDays)).is_none());
        assert_eq!(c.view().timeframe, Timeframe::ThirtyDays);
    }

    #[test]
    fn newer_load_supersedes_older_one() {
        let mut c = Controller::new();
        let first = c.begin_load();
        let second = c.begin_load();

        assert!(c.finish_load(second, Err(anyhow!("forecast down"))));
        assert!(!c.finish_load(
            first,
            Ok(Dataset { forecast: sample_snapshot(), moods: Default::default() })
        ));
        assert!(matches!(c.load_state(), LoadState::Failed { .. }));
    }
}
