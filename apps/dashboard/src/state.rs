//! Dashboard view state and the transitions user actions cause.

use crate::models::{Coordinates, ForecastEntry, ForecastResponse, SearchEvent, Units};
use crate::services::Preferences;

/// Forecast entries shown in the chart
pub const FORECAST_WINDOW: usize = 5;
/// History entries shown before the full list is requested
pub const RECENT_HISTORY: usize = 5;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub city: String,
    pub unit: Units,
    pub dark_mode: bool,
    pub weather: Option<ForecastResponse>,
    pub forecast: Vec<ForecastEntry>,
    pub location: Option<Coordinates>,
    pub history: Vec<SearchEvent>,
    pub show_history: bool,
    pub show_full_history: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    PreferencesLoaded(Preferences),
    CityEntered(String),
    ForecastLoaded(ForecastResponse),
    ForecastCleared,
    UnitChanged(Units),
    DarkModeToggled,
    HistoryLoaded(Vec<SearchEvent>),
    HistoryToggled,
    FullHistoryToggled,
}

impl ViewState {
    pub fn reduce(self, action: Action) -> Self {
        match action {
            Action::PreferencesLoaded(preferences) => Self {
                unit: preferences.unit,
                dark_mode: preferences.dark_mode,
                ..self
            },
            Action::CityEntered(city) => Self { city, ..self },
            Action::ForecastLoaded(response) => {
                // A body that names no city or has no readings is "no data"
                if response.headline().is_none() {
                    return self.reduce(Action::ForecastCleared);
                }
                let location = response.city.as_ref().map(|city| city.coord);
                let forecast = response.list.iter().take(FORECAST_WINDOW).cloned().collect();
                Self {
                    weather: Some(response),
                    forecast,
                    location,
                    ..self
                }
            }
            Action::ForecastCleared => Self {
                weather: None,
                forecast: Vec::new(),
                location: None,
                ..self
            },
            Action::UnitChanged(unit) => Self { unit, ..self },
            Action::DarkModeToggled => Self {
                dark_mode: !self.dark_mode,
                ..self
            },
            Action::HistoryLoaded(history) => Self { history, ..self },
            Action::HistoryToggled => Self {
                show_history: !self.show_history,
                ..self
            },
            Action::FullHistoryToggled => Self {
                show_full_history: !self.show_full_history,
                ..self
            },
        }
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            unit: self.unit,
            dark_mode: self.dark_mode,
        }
    }

    /// History entries currently on screen: the latest few, or all of them
    pub fn visible_history(&self) -> &[SearchEvent] {
        if self.show_full_history {
            &self.history
        } else {
            let start = self.history.len().saturating_sub(RECENT_HISTORY);
            &self.history[start..]
        }
    }
}
