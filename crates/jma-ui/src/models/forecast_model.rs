use std::sync::Arc;

use jma_weather::ForecastResult;

use crate::render::{render_forecast, ForecastPanel};
use crate::services::{ForecastServiceMessage, RequestToken, RequestTracker};

/// What happened to a completed fetch handed to [`ForecastModel::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Result belonged to the newest request and is now displayed.
    Applied,
    /// A newer request was issued after this one; result dropped.
    Stale,
}

/// Holds the forecast panel currently on screen.
///
/// The panel is only ever replaced by the result of the most recently issued
/// request, so a slow response cannot overwrite a newer selection.
#[derive(Debug)]
pub struct ForecastModel {
    tracker: Arc<RequestTracker>,
    pending: Option<RequestToken>,
    panel: Option<ForecastPanel>,
    result: Option<ForecastResult>,
}

impl ForecastModel {
    pub fn new(tracker: Arc<RequestTracker>) -> Self {
        Self {
            tracker,
            pending: None,
            panel: None,
            result: None,
        }
    }

    /// Record that `token` was issued for a new selection.
    pub fn begin(&mut self, token: RequestToken) {
        self.pending = Some(token);
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn panel(&self) -> Option<&ForecastPanel> {
        self.panel.as_ref()
    }

    /// Result behind the current panel.
    pub fn result(&self) -> Option<&ForecastResult> {
        self.result.as_ref()
    }

    pub fn apply(&mut self, message: ForecastServiceMessage) -> ApplyOutcome {
        match message {
            ForecastServiceMessage::FetchDone {
                token,
                region_code,
                result,
            } => {
                if !self.tracker.is_current(token) {
                    tracing::debug!(
                        "Dropping stale forecast for {} (request {})",
                        region_code,
                        token.value()
                    );
                    return ApplyOutcome::Stale;
                }

                self.panel = Some(render_forecast(&region_code, &result));
                self.result = Some(result);
                if self.pending == Some(token) {
                    self.pending = None;
                }
                ApplyOutcome::Applied
            }
        }
    }
}
