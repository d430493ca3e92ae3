use crate::aqi::calculator::AqiCalculator;
use crate::aqi::category::Category;
use crate::city::{City, Components, WeatherInfo};
use crate::pollutant;
use crate::units::{concentration, temperature};

const TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Placeholder for a section with nothing to show.
pub const MISSING: &str = "--";

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub label: String,
    pub value: String,
}

impl Row {
    fn new(label: impl Into<String>, value: String) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// AQI rounded to a whole number.
    pub aqi: String,
    pub category: Category,
    /// Display name of the pollutant driving the AQI.
    pub dominant: Option<String>,
}

/// Everything the detail view shows for one city, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct CityDetail {
    pub title: String,
    pub updated: Option<String>,
    pub summary: Summary,
    pub pollutants: Vec<Row>,
    /// Absent when the reading carries no weather.
    pub weather: Option<Vec<Row>>,
}

impl CityDetail {
    pub fn assemble<C: AqiCalculator + ?Sized>(city: &City, calculator: &C) -> Self {
        let reading = city.first_reading();
        if reading.is_none() {
            tracing::info!(city = %city.name, "no air quality samples");
        }

        let empty = Components::new();
        let components = reading.map_or(&empty, |r| &r.components);
        if components.is_empty() {
            tracing::debug!(city = %city.name, "no pollutant concentrations");
        }
        let result = calculator.calculate(components);

        let summary = Summary {
            aqi: format!("{:.0}", result.aqi.round()),
            category: Category::classify(result.aqi),
            dominant: result
                .dominant
                .as_deref()
                .map(|code| pollutant::label(code).to_string()),
        };

        Self {
            title: city.name.clone(),
            updated: reading
                .and_then(|r| r.observed_at())
                .map(|t| t.format(TIME_FORMAT).to_string()),
            summary,
            pollutants: pollutant_rows(components),
            weather: reading.and_then(|r| r.weather.as_ref()).map(weather_rows),
        }
    }
}

fn pollutant_rows(components: &Components) -> Vec<Row> {
    components
        .iter()
        .map(|(code, value)| {
            let value = concentration::hundredths(value);
            Row::new(pollutant::label(code), format!("{value} µg/m³"))
        })
        .collect()
}

fn weather_rows(weather: &WeatherInfo) -> Vec<Row> {
    vec![
        Row::new(
            "Temperature",
            format!("{}°C", temperature::round_degrees(weather.temp)),
        ),
        Row::new(
            "Feels Like",
            format!("{}°C", temperature::round_degrees(weather.feels_like)),
        ),
        Row::new("Humidity", format!("{}%", weather.humidity)),
        Row::new("Wind Speed", format!("{} m/s", weather.wind_speed)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aqi::calculator::{AqiResult, UsEpa};
    use crate::city::AirQualityReading;

    struct Fixed(f64);

    impl AqiCalculator for Fixed {
        fn calculate(&self, _: &Components) -> AqiResult {
            AqiResult {
                aqi: self.0,
                ..AqiResult::default()
            }
        }
    }

    fn city(components: Components, weather: Option<WeatherInfo>) -> City {
        City {
            name: "Krakow".to_string(),
            sample_data: vec![AirQualityReading {
                components,
                weather,
                dt: None,
            }],
        }
    }

    #[test]
    fn test_summary_follows_classifier() {
        let detail = CityDetail::assemble(&city(Components::new(), None), &Fixed(151.6));
        assert_eq!(detail.summary.aqi, "152");
        assert_eq!(detail.summary.category, Category::Unhealthy);
        assert_eq!(detail.title, "Krakow");

        let detail = CityDetail::assemble(&city(Components::new(), None), &Fixed(42.0));
        assert_eq!(detail.summary.category.status(), "Good");
    }

    #[test]
    fn test_pollutant_rows_in_input_order() {
        let components: Components = [("pm10", 21.4), ("xx", 1.0), ("pm2_5", 7.0)]
            .into_iter()
            .collect();
        let detail = CityDetail::assemble(&city(components, None), &UsEpa);
        assert_eq!(
            detail.pollutants,
            vec![
                Row::new("PM10", "21.40 µg/m³".to_string()),
                Row::new("xx", "1.00 µg/m³".to_string()),
                Row::new("PM2.5", "7.00 µg/m³".to_string()),
            ]
        );
        assert_eq!(detail.summary.dominant.as_deref(), Some("PM2.5"));
    }

    #[test]
    fn test_pollutant_ties_round_up() {
        let components: Components = [("pm10", 0.125), ("o3", 2.675), ("co", 1.375)]
            .into_iter()
            .collect();
        let detail = CityDetail::assemble(&city(components, None), &UsEpa);
        let values: Vec<_> = detail.pollutants.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["0.13 µg/m³", "2.67 µg/m³", "1.38 µg/m³"]);
    }

    #[test]
    fn test_empty_components_have_no_rows() {
        let detail = CityDetail::assemble(&city(Components::new(), None), &UsEpa);
        assert!(detail.pollutants.is_empty());
        assert!(detail.summary.dominant.is_none());
    }

    #[test]
    fn test_weather_absent() {
        let detail = CityDetail::assemble(&city(Components::new(), None), &UsEpa);
        assert!(detail.weather.is_none());
    }

    #[test]
    fn test_weather_rows() {
        let weather = WeatherInfo {
            temp: 21.6,
            feels_like: 20.1,
            humidity: 55.0,
            wind_speed: 3.2,
        };
        let detail = CityDetail::assemble(&city(Components::new(), Some(weather)), &UsEpa);
        let rows = detail.weather.unwrap();
        let values: Vec<_> = rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["22°C", "20°C", "55%", "3.2 m/s"]);
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Temperature", "Feels Like", "Humidity", "Wind Speed"]);
    }

    #[test]
    fn test_city_without_samples() {
        let city = City {
            name: "Atlantis".to_string(),
            sample_data: vec![],
        };
        let detail = CityDetail::assemble(&city, &UsEpa);
        assert!(detail.pollutants.is_empty());
        assert!(detail.weather.is_none());
        assert!(detail.updated.is_none());
        assert_eq!(detail.summary.aqi, "0");
        assert_eq!(detail.summary.category, Category::Good);
    }

    #[test]
    fn test_assembly_is_repeatable() {
        let components: Components = [("o3", 120.0)].into_iter().collect();
        let city = city(components, None);
        assert_eq!(
            CityDetail::assemble(&city, &UsEpa),
            CityDetail::assemble(&city, &UsEpa)
        );
    }
}
