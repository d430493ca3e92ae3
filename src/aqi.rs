pub mod category {
    use std::fmt;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Category {
        Good,
        Moderate,
        UnhealthyForSensitiveGroups,
        Unhealthy,
        VeryUnhealthy,
        Hazardous,
    }

    struct Band {
        upper: f64,
        category: Category,
        status: &'static str,
        color: &'static str,
        recommendation: &'static str,
    }

    /// Ordered by `upper`; indexed by `Category as usize`.
    static BANDS: [Band; 6] = [
        Band {
            upper: 50.0,
            category: Category::Good,
            status: "Good",
            color: "#00ff00",
            recommendation: "Air quality is satisfactory, and air pollution poses little or no risk.",
        },
        Band {
            upper: 100.0,
            category: Category::Moderate,
            status: "Moderate",
            color: "#ffff00",
            recommendation: "Air quality is acceptable. However, there may be a risk for some people, particularly those who are unusually sensitive to air pollution.",
        },
        Band {
            upper: 150.0,
            category: Category::UnhealthyForSensitiveGroups,
            status: "Unhealthy for Sensitive Groups",
            color: "#ff9900",
            recommendation: "Members of sensitive groups may experience health effects. The general public is less likely to be affected.",
        },
        Band {
            upper: 200.0,
            category: Category::Unhealthy,
            status: "Unhealthy",
            color: "#ff0000",
            recommendation: "Some members of the general public may experience health effects; members of sensitive groups may experience more serious health effects.",
        },
        Band {
            upper: 300.0,
            category: Category::VeryUnhealthy,
            status: "Very Unhealthy",
            color: "#990099",
            recommendation: "Health alert: The risk of health effects is increased for everyone.",
        },
        Band {
            upper: f64::INFINITY,
            category: Category::Hazardous,
            status: "Hazardous",
            color: "#660066",
            recommendation: "Health warning of emergency conditions: everyone is more likely to be affected.",
        },
    ];

    impl Category {
        /// First band whose upper bound is not exceeded. NaN and negative values
        /// are outside every band and land on `Hazardous`.
        pub fn classify(aqi: f64) -> Self {
            if !(aqi >= 0.0) {
                return Category::Hazardous;
            }
            BANDS
                .iter()
                .find(|band| aqi <= band.upper)
                .map_or(Category::Hazardous, |band| band.category)
        }

        fn band(self) -> &'static Band {
            &BANDS[self as usize]
        }

        pub fn status(self) -> &'static str {
            self.band().status
        }

        pub fn recommendation(self) -> &'static str {
            self.band().recommendation
        }

        /// Display color as `#rrggbb`.
        pub fn color(self) -> &'static str {
            self.band().color
        }

        pub fn rgb(self) -> (u8, u8, u8) {
            let hex = self.color().trim_start_matches('#');
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
            (channel(0), channel(2), channel(4))
        }
    }

    impl fmt::Display for Category {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.status())
        }
    }

}

pub mod calculator {
    use crate::city::Components;
    use crate::units::concentration;

    /// Aggregates pollutant concentrations into a single AQI.
    pub trait AqiCalculator {
        fn calculate(&self, components: &Components) -> AqiResult;
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct SubIndex {
        pub code: String,
        pub aqi: f64,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct AqiResult {
        pub aqi: f64,
        /// Pollutant whose sub-index is the overall AQI.
        pub dominant: Option<String>,
        pub sub_indices: Vec<SubIndex>,
    }

    enum Unit {
        Ugm3,
        Ppb(f64),
        Ppm(f64),
    }

    /// (C_lo, C_hi, I_lo, I_hi)
    type Segment = (f64, f64, f64, f64);

    struct Scale {
        code: &'static str,
        unit: Unit,
        decimals: i32,
        segments: &'static [Segment],
    }

    const PM2_5: [Segment; 6] = [
        (0.0, 9.0, 0.0, 50.0),
        (9.1, 35.4, 51.0, 100.0),
        (35.5, 55.4, 101.0, 150.0),
        (55.5, 125.4, 151.0, 200.0),
        (125.5, 225.4, 201.0, 300.0),
        (225.5, 325.4, 301.0, 500.0),
    ];

    const PM10: [Segment; 6] = [
        (0.0, 54.0, 0.0, 50.0),
        (55.0, 154.0, 51.0, 100.0),
        (155.0, 254.0, 101.0, 150.0),
        (255.0, 354.0, 151.0, 200.0),
        (355.0, 424.0, 201.0, 300.0),
        (425.0, 604.0, 301.0, 500.0),
    ];

    const O3: [Segment; 6] = [
        (0.0, 54.0, 0.0, 50.0),
        (55.0, 70.0, 51.0, 100.0),
        (71.0, 85.0, 101.0, 150.0),
        (86.0, 105.0, 151.0, 200.0),
        (106.0, 200.0, 201.0, 300.0),
        (201.0, 604.0, 301.0, 500.0),
    ];

    const NO2: [Segment; 6] = [
        (0.0, 53.0, 0.0, 50.0),
        (54.0, 100.0, 51.0, 100.0),
        (101.0, 360.0, 101.0, 150.0),
        (361.0, 649.0, 151.0, 200.0),
        (650.0, 1249.0, 201.0, 300.0),
        (1250.0, 2049.0, 301.0, 500.0),
    ];

    const SO2: [Segment; 6] = [
        (0.0, 35.0, 0.0, 50.0),
        (36.0, 75.0, 51.0, 100.0),
        (76.0, 185.0, 101.0, 150.0),
        (186.0, 304.0, 151.0, 200.0),
        (305.0, 604.0, 201.0, 300.0),
        (605.0, 1004.0, 301.0, 500.0),
    ];

    const CO: [Segment; 6] = [
        (0.0, 4.4, 0.0, 50.0),
        (4.5, 9.4, 51.0, 100.0),
        (9.5, 12.4, 101.0, 150.0),
        (12.5, 15.4, 151.0, 200.0),
        (15.5, 30.4, 201.0, 300.0),
        (30.5, 50.4, 301.0, 500.0),
    ];

    static SCALES: [Scale; 6] = [
        Scale { code: "pm2_5", unit: Unit::Ugm3, decimals: 1, segments: &PM2_5 },
        Scale { code: "pm10", unit: Unit::Ugm3, decimals: 0, segments: &PM10 },
        Scale { code: "o3", unit: Unit::Ppb(48.00), decimals: 0, segments: &O3 },
        Scale { code: "no2", unit: Unit::Ppb(46.01), decimals: 0, segments: &NO2 },
        Scale { code: "so2", unit: Unit::Ppb(64.07), decimals: 0, segments: &SO2 },
        Scale { code: "co", unit: Unit::Ppm(28.01), decimals: 1, segments: &CO },
    ];

    impl Scale {
        fn find(code: &str) -> Option<&'static Scale> {
            SCALES.iter().find(|scale| scale.code == code)
        }

        fn sub_index(&self, ugm3: f64) -> f64 {
            let ugm3 = ugm3.max(0.0);
            let converted = match self.unit {
                Unit::Ugm3 => ugm3,
                Unit::Ppb(molar_mass) => concentration::ugm3_to_ppb(ugm3, molar_mass),
                Unit::Ppm(molar_mass) => concentration::ugm3_to_ppm(ugm3, molar_mass),
            };
            let c = concentration::truncate(converted, self.decimals);

            // past the table the last segment keeps its slope
            let &(c_lo, c_hi, i_lo, i_hi) = self
                .segments
                .iter()
                .find(|(_, c_hi, _, _)| c <= *c_hi)
                .unwrap_or(&self.segments[self.segments.len() - 1]);

            ((i_hi - i_lo) / (c_hi - c_lo) * (c - c_lo) + i_lo).round()
        }
    }

    /// US EPA sub-index method: the worst pollutant sets the AQI.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct UsEpa;

    impl AqiCalculator for UsEpa {
        fn calculate(&self, components: &Components) -> AqiResult {
            let sub_indices: Vec<SubIndex> = components
                .iter()
                .filter_map(|(code, value)| {
                    let scale = Scale::find(code)?;
                    if !value.is_finite() {
                        tracing::warn!(code, value, "skipping non-finite concentration");
                        return None;
                    }
                    Some(SubIndex {
                        code: code.to_string(),
                        aqi: scale.sub_index(value),
                    })
                })
                .collect();

            // ties go to the pollutant listed first
            let worst = sub_indices.iter().fold(None, |worst: Option<&SubIndex>, sub| match worst {
                Some(w) if w.aqi >= sub.aqi => Some(w),
                _ => Some(sub),
            });

            let result = AqiResult {
                aqi: worst.map_or(0.0, |sub| sub.aqi),
                dominant: worst.map(|sub| sub.code.clone()),
                sub_indices,
            };
            tracing::debug!(
                aqi = result.aqi,
                dominant = ?result.dominant,
                pollutants = result.sub_indices.len(),
                "computed overall aqi"
            );
            result
        }
    }

}
