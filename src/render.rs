use std::fmt;

use crate::screen::{CityDetail, Row, MISSING};

/// Plain-text rendering of a detail, for pipes and non-interactive terminals.
pub struct Plain<'a>(&'a CityDetail);

pub fn plain(detail: &CityDetail) -> Plain<'_> {
    Plain(detail)
}

impl fmt::Display for Plain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = self.0;
        let summary = &detail.summary;

        writeln!(f, "{}", detail.title)?;
        if let Some(ref updated) = detail.updated {
            writeln!(f, "Updated {updated}")?;
        }
        writeln!(f)?;
        writeln!(f, "AQI {} ({})", summary.aqi, summary.category)?;
        if let Some(ref dominant) = summary.dominant {
            writeln!(f, "Dominant pollutant: {dominant}")?;
        }
        writeln!(f, "{}", summary.category.recommendation())?;

        section(f, "Pollutants", &detail.pollutants)?;
        if let Some(ref weather) = detail.weather {
            section(f, "Weather", weather)?;
        }
        Ok(())
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str, rows: &[Row]) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    if rows.is_empty() {
        writeln!(f, "  {MISSING}")?;
    }
    for row in rows {
        writeln!(f, "  {:18}{}", row.label, row.value)?;
    }
    Ok(())
}
