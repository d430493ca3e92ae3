const NAMES: [(&str, &str); 8] = [
    ("co", "Carbon Monoxide"),
    ("no", "Nitric Oxide"),
    ("no2", "Nitrogen Dioxide"),
    ("o3", "Ozone"),
    ("so2", "Sulfur Dioxide"),
    ("pm2_5", "PM2.5"),
    ("pm10", "PM10"),
    ("nh3", "Ammonia"),
];

/// Display name for a pollutant code; unknown codes are returned as given.
pub fn label(code: &str) -> &str {
    NAMES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(code, |&(_, name)| name)
}

#[test]
fn test_label() {
    assert_eq!(label("pm2_5"), "PM2.5");
    assert_eq!(label("co"), "Carbon Monoxide");
    assert_eq!(label("nh3"), "Ammonia");
    assert_eq!(label("xx"), "xx");
    assert_eq!(label("PM2_5"), "PM2_5");
    assert_eq!(label(""), "");
}
