pub mod temperature {
    /// Nearest whole degree, halves rounded toward positive infinity.
    pub fn round_degrees(temp: f64) -> f64 {
        let rounded = (temp + 0.5).floor();
        // keep "-0" out of the display
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }

    #[test]
    fn test_round_degrees() {
        assert_eq!(round_degrees(21.6), 22.0);
        assert_eq!(round_degrees(20.1), 20.0);
        assert_eq!(round_degrees(20.5), 21.0);
        assert_eq!(round_degrees(-20.5), -20.0);
        assert_eq!(round_degrees(-0.4).to_string(), "0");
        assert_eq!(round_degrees(-0.6), -1.0);
    }
}

pub mod concentration {
    /// Litres per mole of an ideal gas at 25 °C and 1 atm.
    const MOLAR_VOLUME: f64 = 24.45;

    pub fn ugm3_to_ppb(ugm3: f64, molar_mass: f64) -> f64 {
        ugm3 * MOLAR_VOLUME / molar_mass
    }

    pub fn ugm3_to_ppm(ugm3: f64, molar_mass: f64) -> f64 {
        ugm3_to_ppb(ugm3, molar_mass) / 1000.0
    }

    /// Drops digits past `decimals`, the way breakpoint tables are read.
    pub fn truncate(value: f64, decimals: i32) -> f64 {
        let scale = 10f64.powi(decimals);
        (value * scale + 1e-9).floor() / scale
    }

    /// Two decimals, exact binary ties rounded away from zero.
    pub fn hundredths(value: f64) -> String {
        // only multiples of 1/8 with an odd numerator land exactly on a tie
        let eighths = value * 8.0;
        if eighths.is_finite() && eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
            return format!("{:.2}", (value * 100.0).round() / 100.0);
        }
        format!("{value:.2}")
    }

    #[test]
    fn test_hundredths() {
        assert_eq!(hundredths(0.125), "0.13");
        assert_eq!(hundredths(1.375), "1.38");
        assert_eq!(hundredths(-0.125), "-0.13");
        assert_eq!(hundredths(2.675), "2.67");
        assert_eq!(hundredths(0.25), "0.25");
        assert_eq!(hundredths(41.8), "41.80");
        assert_eq!(hundredths(f64::NAN), "NaN");
    }

    #[test]
    fn test_ugm3_to_ppb() {
        // 1 ppb of ozone is about 1.96 µg/m³
        let ppb = ugm3_to_ppb(48.0, 48.0);
        assert!((ppb - 24.45).abs() < 1e-9);
        assert!((ugm3_to_ppm(28010.0, 28.01) - 24.45).abs() < 1e-9);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate(35.4, 1), 35.4);
        assert_eq!(truncate(35.49, 1), 35.4);
        assert_eq!(truncate(54.9, 0), 54.0);
        assert_eq!(truncate(0.0, 1), 0.0);
    }
}
