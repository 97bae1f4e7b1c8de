pub use forecast::{City, Condition, Coordinates, ForecastEntry, ForecastResponse, MainReadings};
pub use history::{AppendHistoryRequest, SearchEvent, Units};

mod forecast;
mod history;
