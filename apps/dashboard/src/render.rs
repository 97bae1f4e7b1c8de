//! Text rendering of the dashboard: current conditions, the forecast chart
//! series and the map pin. Chart and map widgets consume the structured
//! types; the terminal binary prints [`render`].

use crate::{
    models::{Coordinates, ForecastEntry, Units},
    state::ViewState,
};
use std::fmt::Write;

pub const MAP_ZOOM: u8 = 13;

/// Line chart input: one labelled temperature series
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub unit_symbol: &'static str,
    pub points: Vec<(String, f64)>,
}

impl ChartSeries {
    pub fn from_forecast(entries: &[ForecastEntry], unit: Units) -> Self {
        Self {
            label: format!("Temperature ({})", unit.symbol()),
            unit_symbol: unit.symbol(),
            points: entries
                .iter()
                .map(|entry| (entry.dt_txt.clone(), entry.main.temp))
                .collect(),
        }
    }

    /// Tooltip text for one point
    pub fn tooltip(&self, index: usize) -> Option<String> {
        self.points
            .get(index)
            .map(|(_, value)| format!("{}: {}{}", self.label, value, self.unit_symbol))
    }
}

/// Map marker for the looked-up location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPin {
    pub coordinates: Coordinates,
    pub zoom: u8,
}

impl MapPin {
    /// No pin is placed at a zero latitude or longitude
    pub fn new(coordinates: Coordinates) -> Option<Self> {
        if coordinates.lat == 0.0 || coordinates.lon == 0.0 {
            return None;
        }
        Some(Self {
            coordinates,
            zoom: MAP_ZOOM,
        })
    }

    pub fn popup(&self) -> String {
        let Coordinates { lat, lon } = self.coordinates;
        format!(
            "Location: ({:.4}, {:.4})\nLatitude: {}\nLongitude: {}",
            lat, lon, lat, lon
        )
    }

    pub fn openstreetmap_url(&self) -> String {
        let Coordinates { lat, lon } = self.coordinates;
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map={zoom}/{lat}/{lon}",
            lat = lat,
            lon = lon,
            zoom = self.zoom
        )
    }
}

fn bar(value: f64, min: f64, max: f64) -> String {
    const WIDTH: f64 = 30.0;
    let span = (max - min).max(f64::EPSILON);
    let len = (((value - min) / span) * WIDTH).round() as usize + 1;
    "#".repeat(len)
}

fn render_chart(out: &mut String, series: &ChartSeries) {
    let min = series
        .points
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::INFINITY, f64::min);
    let max = series
        .points
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);

    let _ = writeln!(out, "{}", series.label);
    for (label, value) in &series.points {
        let _ = writeln!(
            out,
            "  {:<19} {:>7.1}{} {}",
            label,
            value,
            series.unit_symbol,
            bar(*value, min, max)
        );
    }
}

/// Render the whole dashboard as plain text
pub fn render(state: &ViewState) -> String {
    let mut out = String::new();
    let theme = if state.dark_mode { "dark" } else { "light" };
    let _ = writeln!(out, "Weather Dashboard  [{} mode, {}]", theme, state.unit);
    let _ = writeln!(out);

    if state.show_history && !state.history.is_empty() {
        let heading = if state.show_full_history {
            "Search history"
        } else {
            "Recent searches"
        };
        let _ = writeln!(out, "{}", heading);
        for event in state.visible_history() {
            let unit = event.unit.unwrap_or(state.unit);
            let _ = writeln!(
                out,
                "  - {}: {}{}  ({})",
                event.city,
                event.temperature,
                unit.symbol(),
                event.timestamp.format("%Y-%m-%d %H:%M")
            );
        }
        let _ = writeln!(out);
    }

    match &state.weather {
        Some(weather) => {
            let name = weather
                .city
                .as_ref()
                .map(|city| city.name.as_str())
                .unwrap_or("City not found");
            let description = weather
                .current()
                .and_then(|entry| entry.description())
                .unwrap_or("No description available");

            let _ = writeln!(out, "{}", name);
            let _ = writeln!(out, "{}", description);
            let _ = writeln!(out);
            render_chart(&mut out, &ChartSeries::from_forecast(&state.forecast, state.unit));

            if let Some(pin) = state.location.and_then(MapPin::new) {
                let _ = writeln!(out);
                let _ = writeln!(out, "{}", pin.popup());
                let _ = writeln!(out, "Map: {}", pin.openstreetmap_url());
            }
        }
        None => {
            let _ = writeln!(out, "Please enter a city to get the weather forecast.");
        }
    }

    out
}
