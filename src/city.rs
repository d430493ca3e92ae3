use std::fmt;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::error::LoadError;

#[derive(Deserialize, Debug, Default, Clone)]
pub struct City {
    pub name: String,

    #[serde(rename = "sampleData", default)]
    pub sample_data: Vec<AirQualityReading>,
}

impl City {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, path)
    }

    /// Parses a city from any reader. `origin` only names the source in errors.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self, LoadError> {
        let text = std::io::read_to_string(reader).map_err(|source| LoadError::Io {
            path: origin.to_path_buf(),
            source,
        })?;
        let city: City = serde_json::from_str(&text).map_err(|source| LoadError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            city = %city.name,
            readings = city.sample_data.len(),
            "loaded city data"
        );
        Ok(city)
    }

    /// The only reading the detail view consumes.
    pub fn first_reading(&self) -> Option<&AirQualityReading> {
        self.sample_data.first()
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct AirQualityReading {
    #[serde(default, deserialize_with = "nullable_components")]
    pub components: Components,

    pub weather: Option<WeatherInfo>,

    /// Unix timestamp of the sample.
    pub dt: Option<i64>,
}

impl AirQualityReading {
    pub fn observed_at(&self) -> Option<DateTime<Local>> {
        let dt = self.dt?;
        DateTime::from_timestamp(dt, 0).map(|utc| utc.with_timezone(&Local))
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct WeatherInfo {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

/// Pollutant concentrations in µg/m³, kept in the order they were supplied.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Components(Vec<(String, f64)>);

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value in place when `code` is already present.
    pub fn insert(&mut self, code: impl Into<String>, value: f64) {
        let code = code.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == code) {
            Some(entry) => entry.1 = value,
            None => self.0.push((code, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(code, value)| (code.as_str(), *value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Components {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut components = Components::new();
        for (code, value) in iter {
            components.insert(code, value);
        }
        components
    }
}

/// Concentrations show up as numbers, numeric strings, booleans or null in the wild.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawConcentration {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl RawConcentration {
    fn value(raw: Option<Self>) -> f64 {
        match raw {
            None => 0.0,
            Some(RawConcentration::Number(n)) => n,
            Some(RawConcentration::Flag(flag)) => f64::from(u8::from(flag)),
            Some(RawConcentration::Text(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse().unwrap_or(f64::NAN)
                }
            }
        }
    }
}

struct ComponentsVisitor;

impl<'de> Visitor<'de> for ComponentsVisitor {
    type Value = Components;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of pollutant codes to concentrations")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Components, A::Error> {
        let mut components = Components::new();
        while let Some((code, raw)) = access.next_entry::<String, Option<RawConcentration>>()? {
            components.insert(code, RawConcentration::value(raw));
        }
        Ok(components)
    }
}

impl<'de> Deserialize<'de> for Components {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ComponentsVisitor)
    }
}

fn nullable_components<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Components, D::Error> {
    Ok(Option::<Components>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> City {
        City::from_reader(json.as_bytes(), Path::new("test.json")).unwrap()
    }

    #[test]
    fn test_components_keep_input_order() {
        let city = parse(
            r#"{"name": "Oslo", "sampleData": [
                {"components": {"so2": 1.5, "co": 201.9, "pm2_5": 3.1, "nh3": 0.2}}
            ]}"#,
        );
        let codes: Vec<_> = city.sample_data[0].components.iter().map(|(c, _)| c).collect();
        assert_eq!(codes, vec!["so2", "co", "pm2_5", "nh3"]);
    }

    #[test]
    fn test_empty_sample_data() {
        let city = parse(r#"{"name": "Nowhere", "sampleData": []}"#);
        assert!(city.first_reading().is_none());

        let city = parse(r#"{"name": "Nowhere"}"#);
        assert!(city.first_reading().is_none());
    }

    #[test]
    fn test_missing_components_and_weather() {
        let city = parse(r#"{"name": "Lima", "sampleData": [{}, {"components": null}]}"#);
        let first = city.first_reading().unwrap();
        assert!(first.components.is_empty());
        assert!(first.weather.is_none());
        assert!(city.sample_data[1].components.is_empty());
    }

    #[test]
    fn test_concentration_coercion() {
        let city = parse(
            r#"{"name": "Quito", "sampleData": [
                {"components": {"o3": "68.7", "no": null, "pm10": "", "co": "n/a"}}
            ]}"#,
        );
        let values: Vec<_> = city.sample_data[0].components.iter().collect();
        assert_eq!(&values[..3], &[("o3", 68.7), ("no", 0.0), ("pm10", 0.0)]);
        assert_eq!(values[3].0, "co");
        assert!(values[3].1.is_nan());
    }

    #[test]
    fn test_boolean_concentrations() {
        let city = parse(
            r#"{"name": "Hanoi", "sampleData": [
                {"components": {"so2": true, "no2": false, "pm10": 12}}
            ]}"#,
        );
        let values: Vec<_> = city.sample_data[0].components.iter().collect();
        assert_eq!(values, vec![("so2", 1.0), ("no2", 0.0), ("pm10", 12.0)]);
    }

    #[test]
    fn test_duplicate_code_keeps_first_position() {
        let components: Components = [("o3", 1.0), ("co", 2.0), ("o3", 3.0)].into_iter().collect();
        let values: Vec<_> = components.iter().collect();
        assert_eq!(values, vec![("o3", 3.0), ("co", 2.0)]);
    }

    #[test]
    fn test_weather_and_timestamp() {
        let city = parse(
            r#"{"name": "Delhi", "sampleData": [{
                "components": {},
                "weather": {"temp": 21.6, "feels_like": 20.1, "humidity": 55, "wind_speed": 3.2},
                "dt": 1700000000
            }]}"#,
        );
        let reading = city.first_reading().unwrap();
        assert_eq!(
            reading.weather,
            Some(WeatherInfo {
                temp: 21.6,
                feels_like: 20.1,
                humidity: 55.0,
                wind_speed: 3.2,
            })
        );
        assert_eq!(reading.observed_at().map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = City::from_reader("{".as_bytes(), Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
