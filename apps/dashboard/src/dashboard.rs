use crate::{
    config::DashboardConfig,
    error::Result,
    models::{Coordinates, Units},
    services::{
        ForecastQuery, HistoryClient, IdentityProvider, PreferencesStore, StaticIdentity,
        WeatherProviderClient,
    },
    state::{Action, ViewState},
};
use std::time::Duration;
use tracing::{error, info, warn};

/// Drives the provider and history calls behind each user action and keeps
/// the resulting [`ViewState`].
///
/// Failures of remote calls are logged and reflected in the view state; they
/// are never returned to the caller. Only preference persistence errors are.
pub struct Dashboard {
    weather: WeatherProviderClient,
    history: HistoryClient,
    identity: Box<dyn IdentityProvider>,
    preferences: PreferencesStore,
    state: ViewState,
}

impl Dashboard {
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);

        Ok(Self::with_parts(
            WeatherProviderClient::new(&config.weather_api_url, &config.weather_api_key, timeout)?,
            HistoryClient::new(&config.history_api_url, timeout)?,
            Box::new(StaticIdentity::new(config.user_id.clone())),
            PreferencesStore::new(config.preferences_file()?),
        ))
    }

    pub fn with_parts(
        weather: WeatherProviderClient,
        history: HistoryClient,
        identity: Box<dyn IdentityProvider>,
        preferences: PreferencesStore,
    ) -> Self {
        Self {
            weather,
            history,
            identity,
            preferences,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }

    /// Restore saved preferences and pull the stored history
    pub async fn load(&mut self) -> Result<()> {
        let preferences = self.preferences.load()?;
        self.dispatch(Action::PreferencesLoaded(preferences));
        self.refresh_history().await;
        Ok(())
    }

    /// Use a unit for this session only, without persisting it
    pub fn override_unit(&mut self, unit: Units) {
        self.dispatch(Action::UnitChanged(unit));
    }

    /// Look up a city's forecast and record the search
    pub async fn search_city(&mut self, city: &str) {
        self.dispatch(Action::CityEntered(city.trim().to_string()));
        self.refresh_forecast().await;
    }

    /// Look up the forecast for a position and record the search under the
    /// city the provider resolves it to
    pub async fn search_location(&mut self, coordinates: Coordinates) {
        self.fetch_and_record(ForecastQuery::Coordinates(coordinates))
            .await;
    }

    async fn refresh_forecast(&mut self) {
        if self.state.city.is_empty() {
            self.dispatch(Action::ForecastCleared);
            return;
        }
        let query = ForecastQuery::City(self.state.city.clone());
        self.fetch_and_record(query).await;
    }

    async fn fetch_and_record(&mut self, query: ForecastQuery) {
        let unit = self.state.unit;

        let forecast = match self.weather.fetch_forecast(&query, unit).await {
            Ok(forecast) => forecast,
            Err(e) => {
                error!("Error fetching weather data: {}", e);
                self.dispatch(Action::ForecastCleared);
                return;
            }
        };

        let headline = forecast
            .headline()
            .map(|(city, temperature)| (city.to_string(), temperature));

        match headline {
            Some((city, temperature)) => {
                info!("Current temperature in {}: {}{}", city, temperature, unit.symbol());
                self.dispatch(Action::ForecastLoaded(forecast));

                let user_id = self.identity.user_id().to_string();
                match self.history.append(&user_id, &city, temperature, unit).await {
                    Ok(()) => self.refresh_history().await,
                    Err(e) => error!("Error saving history: {}", e),
                }
            }
            None => {
                warn!("Forecast response for {:?} carried no city data", query);
                self.dispatch(Action::ForecastCleared);
            }
        }
    }

    /// Re-read the stored history for the current user
    pub async fn refresh_history(&mut self) {
        let user_id = self.identity.user_id().to_string();

        match self.history.fetch(&user_id).await {
            Ok(Some(history)) => self.dispatch(Action::HistoryLoaded(history)),
            Ok(None) => self.dispatch(Action::HistoryLoaded(Vec::new())),
            Err(e) => error!("Error fetching user history: {}", e),
        }
    }

    /// Persist the new unit and re-fetch the current city with it
    pub async fn change_unit(&mut self, unit: Units) -> Result<()> {
        self.dispatch(Action::UnitChanged(unit));
        self.preferences.save(&self.state.preferences())?;
        self.refresh_forecast().await;
        Ok(())
    }

    pub fn toggle_dark_mode(&mut self) -> Result<()> {
        self.dispatch(Action::DarkModeToggled);
        self.preferences.save(&self.state.preferences())
    }

    pub fn toggle_history(&mut self) {
        self.dispatch(Action::HistoryToggled);
    }

    pub fn toggle_full_history(&mut self) {
        self.dispatch(Action::FullHistoryToggled);
    }
}
