use serde::Serialize;
use std::fmt;

/// Air-quality grade for a single concentration reading.
///
/// Variant order is the display order used by aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    Good,
    Moderate,
    Poor,
    Unknown,
}

impl Grade {
    pub fn label(self) -> &'static str {
        match self {
            Grade::Good => "Good",
            Grade::Moderate => "Moderate",
            Grade::Poor => "Poor",
            Grade::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Particulate matter kinds reported by a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm10,
    Pm25,
}

impl Pollutant {
    pub const ALL: [Pollutant; 2] = [Pollutant::Pm10, Pollutant::Pm25];

    /// Field carrying this pollutant in a raw station record.
    pub fn field_name(self) -> &'static str {
        match self {
            Pollutant::Pm10 => "pm10Value",
            Pollutant::Pm25 => "pm25Value",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Pm10 => "PM10",
            Pollutant::Pm25 => "PM2.5",
        }
    }

    /// Grade bands as `(inclusive upper bound, grade)`, ascending.
    pub fn bands(self) -> &'static [(f64, Grade)] {
        match self {
            Pollutant::Pm10 => PM10_BANDS,
            Pollutant::Pm25 => PM25_BANDS,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// PM10 bands in µg/m³.
///
/// | Range         | Grade    |
/// |---------------|----------|
/// | <= 30         | Good     |
/// | <= 80         | Moderate |
/// | > 80          | Poor     |
static PM10_BANDS: &[(f64, Grade)] = &[
    (30.0, Grade::Good),
    (80.0, Grade::Moderate),
    (f64::INFINITY, Grade::Poor),
];

/// PM2.5 bands in µg/m³.
///
/// | Range         | Grade    |
/// |---------------|----------|
/// | <= 15         | Good     |
/// | <= 35         | Moderate |
/// | > 35          | Poor     |
static PM25_BANDS: &[(f64, Grade)] = &[
    (15.0, Grade::Good),
    (35.0, Grade::Moderate),
    (f64::INFINITY, Grade::Poor),
];

/// Classifies a concentration for the given pollutant.
///
/// An absent value (or NaN) is `Unknown`. Each boundary belongs to the
/// lower grade, so exactly 30 µg/m³ of PM10 is `Good`.
pub fn classify(value: Option<f64>, pollutant: Pollutant) -> Grade {
    let Some(v) = value.filter(|v| !v.is_nan()) else {
        return Grade::Unknown;
    };

    pollutant
        .bands()
        .iter()
        .find(|(upper, _)| v <= *upper)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::Poor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pm10_boundaries() {
        let p = Pollutant::Pm10;
        assert_eq!(classify(Some(0.0), p), Grade::Good);
        assert_eq!(classify(Some(30.0), p), Grade::Good);
        assert_eq!(classify(Some(30.1), p), Grade::Moderate);
        assert_eq!(classify(Some(80.0), p), Grade::Moderate);
        assert_eq!(classify(Some(80.5), p), Grade::Poor);
        assert_eq!(classify(Some(400.0), p), Grade::Poor);
    }

    #[test]
    fn test_pm25_boundaries() {
        let p = Pollutant::Pm25;
        assert_eq!(classify(Some(15.0), p), Grade::Good);
        assert_eq!(classify(Some(15.01), p), Grade::Moderate);
        assert_eq!(classify(Some(35.0), p), Grade::Moderate);
        assert_eq!(classify(Some(35.2), p), Grade::Poor);
    }

    #[test]
    fn test_absent_is_unknown() {
        for p in Pollutant::ALL {
            assert_eq!(classify(None, p), Grade::Unknown);
            assert_eq!(classify(Some(f64::NAN), p), Grade::Unknown);
        }
    }

    #[test]
    fn test_infinite_value_is_poor() {
        assert_eq!(classify(Some(f64::INFINITY), Pollutant::Pm10), Grade::Poor);
    }

    #[test]
    fn test_integer_sweep_matches_bands() {
        for v in 0..=200 {
            let v = v as f64;
            let expected = if v <= 30.0 {
                Grade::Good
            } else if v <= 80.0 {
                Grade::Moderate
            } else {
                Grade::Poor
            };
            assert_eq!(classify(Some(v), Pollutant::Pm10), expected, "pm10 {v}");

            let expected = if v <= 15.0 {
                Grade::Good
            } else if v <= 35.0 {
                Grade::Moderate
            } else {
                Grade::Poor
            };
            assert_eq!(classify(Some(v), Pollutant::Pm25), expected, "pm25 {v}");
        }
    }

    #[test]
    fn test_grades_order_for_display() {
        assert!(Grade::Good < Grade::Moderate);
        assert!(Grade::Poor < Grade::Unknown);
        assert_eq!(Grade::Moderate.to_string(), "Moderate");
    }
}
