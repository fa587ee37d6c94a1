use drawkit::alert::Alerts;

use crate::client::FetchResult;
use crate::model::{BuildingCatalog, PathResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The view opened; the catalog is needed.
    Started,
    CatalogLoaded(FetchResult<BuildingCatalog>),
    StartSelected(Option<String>),
    EndSelected(Option<String>),
    /// The FIND PATH button.
    FindPath,
    PathLoaded(FetchResult<PathResult>),
    /// The RESET button.
    Reset,
}

/// Work the shell has to carry out after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchCatalog,
    FetchPath { start: String, end: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub catalog: Option<BuildingCatalog>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub path: Option<PathResult>,
    /// Requests sent and not yet answered.
    pub in_flight: usize,
    /// The building list was requested and has not been answered.
    pub catalog_loading: bool,
    pub alerts: Alerts,
}

impl ViewState {
    pub fn reduce(&mut self, event: Event) -> Option<Effect> {
        match event {
            Event::Started => {
                self.in_flight += 1;
                self.catalog_loading = true;
                return Some(Effect::FetchCatalog);
            }
            Event::CatalogLoaded(result) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.catalog_loading = false;
                match result.into_result() {
                    Ok(catalog) => self.catalog = Some(catalog),
                    Err(e) => self
                        .alerts
                        .push(format!("Could not load the building list: {e}.")),
                }
            }
            Event::StartSelected(name) => self.start = name,
            Event::EndSelected(name) => self.end = name,
            Event::FindPath => match (&self.start, &self.end) {
                (Some(start), Some(end)) => {
                    self.in_flight += 1;
                    return Some(Effect::FetchPath {
                        start: start.clone(),
                        end: end.clone(),
                    });
                }
                _ => self
                    .alerts
                    .push("Please select both a START and an END building."),
            },
            Event::PathLoaded(result) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                match result.into_result() {
                    // Responses are applied in arrival order; the last one wins.
                    Ok(path) => self.path = Some(path),
                    Err(e) => self.alerts.push(format!(
                        "Could not find a path: {e}.\nPlease check you've selected valid START/END buildings."
                    )),
                }
            }
            Event::Reset => {
                self.start = None;
                self.end = None;
                self.path = None;
            }
        }
        None
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Placeholder for the building pickers while there is no catalog.
    pub fn catalog_hint(&self) -> Option<&'static str> {
        match (&self.catalog, self.catalog_loading) {
            (Some(_), _) => None,
            (None, true) => Some("Loading buildings..."),
            (None, false) => Some("Building list unavailable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Point, Segment};

    fn path(to: f64) -> PathResult {
        let start = Point { x: 0.0, y: 0.0 };
        let end = Point { x: to, y: to };
        PathResult {
            start,
            path: vec![Segment {
                start,
                end,
                cost: to,
            }],
        }
    }

    fn selected() -> ViewState {
        let mut state = ViewState::default();
        state.reduce(Event::StartSelected(Some("CSE".into())));
        state.reduce(Event::EndSelected(Some("KNE".into())));
        state
    }

    #[test]
    fn start_requests_catalog() {
        let mut state = ViewState::default();
        assert_eq!(state.reduce(Event::Started), Some(Effect::FetchCatalog));
        assert!(state.is_busy());
        assert_eq!(state.catalog_hint(), Some("Loading buildings..."));
        let catalog: BuildingCatalog = [("CSE".to_string(), "Allen Center".to_string())]
            .into_iter()
            .collect();
        state.reduce(Event::CatalogLoaded(FetchResult::Ok(catalog.clone())));
        assert_eq!(state.catalog, Some(catalog));
        assert!(!state.is_busy());
        assert_eq!(state.catalog_hint(), None);
    }

    #[test]
    fn find_path_needs_both_buildings() {
        let mut state = ViewState::default();
        state.reduce(Event::StartSelected(Some("CSE".into())));
        assert_eq!(state.reduce(Event::FindPath), None);
        assert_eq!(state.alerts.len(), 1);
    }

    #[test]
    fn find_path_issues_request() {
        let mut state = selected();
        assert_eq!(
            state.reduce(Event::FindPath),
            Some(Effect::FetchPath {
                start: "CSE".into(),
                end: "KNE".into()
            })
        );
        state.reduce(Event::PathLoaded(FetchResult::Ok(path(3.0))));
        assert_eq!(state.path, Some(path(3.0)));
        assert!(state.alerts.is_empty());
    }

    #[test]
    fn http_404_keeps_previous_path_and_alerts_once() {
        let mut state = selected();
        state.reduce(Event::PathLoaded(FetchResult::Ok(path(3.0))));
        state.reduce(Event::FindPath);
        state.reduce(Event::PathLoaded(FetchResult::HttpError(404)));
        assert_eq!(state.path, Some(path(3.0)));
        assert_eq!(state.alerts.len(), 1);
        assert!(state.alerts.front().unwrap().contains("404"));
    }

    #[test]
    fn network_failure_leaves_catalog_absent() {
        let mut state = ViewState::default();
        state.reduce(Event::Started);
        state.reduce(Event::CatalogLoaded(FetchResult::NetworkError(
            "connection refused".into(),
        )));
        assert_eq!(state.catalog, None);
        assert_eq!(state.catalog_hint(), Some("Building list unavailable"));
        assert_eq!(state.alerts.len(), 1);
        assert!(state.alerts.front().unwrap().contains("contacting the server"));
    }

    #[test]
    fn last_arriving_response_wins() {
        let mut state = selected();
        state.reduce(Event::FindPath);
        state.reduce(Event::FindPath);
        state.reduce(Event::PathLoaded(FetchResult::Ok(path(2.0))));
        state.reduce(Event::PathLoaded(FetchResult::Ok(path(1.0))));
        assert_eq!(state.path, Some(path(1.0)));
        assert_eq!(state.in_flight, 0);
    }

    #[test]
    fn reset_clears_selection_and_path() {
        let mut state = selected();
        state.reduce(Event::PathLoaded(FetchResult::Ok(path(3.0))));
        state.reduce(Event::Reset);
        assert_eq!(state.start, None);
        assert_eq!(state.end, None);
        assert_eq!(state.path, None);
    }

    #[test]
    fn response_after_reset_still_applies() {
        let mut state = selected();
        state.reduce(Event::FindPath);
        state.reduce(Event::Reset);
        state.reduce(Event::PathLoaded(FetchResult::Ok(path(4.0))));
        assert_eq!(state.path, Some(path(4.0)));
    }
}
