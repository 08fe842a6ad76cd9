//! Defines the `Pollutant` enum, mapping the PRSA pollutant columns to
//! display metadata used by the renderers.

use plotters::style::RGBColor;
use serde::Serialize;
use std::fmt;

/// One of the six pollutant concentration columns of a PRSA measurement file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Pollutant {
    /// Fine particulate matter, µg/m³.
    Pm25,
    /// Coarse particulate matter, µg/m³.
    Pm10,
    /// Sulphur dioxide.
    So2,
    /// Nitrogen dioxide.
    No2,
    /// Carbon monoxide.
    Co,
    /// Ozone.
    O3,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::So2,
        Pollutant::No2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    /// Column name as it appears in the CSV header.
    pub fn column(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::So2 => "SO2",
            Pollutant::No2 => "NO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 | Pollutant::So2 | Pollutant::O3 => "µg/m³",
            Pollutant::Co => "ppm",
            Pollutant::No2 => "ppb",
        }
    }

    pub(crate) fn color(&self) -> RGBColor {
        match self {
            Pollutant::Pm25 => RGBColor(31, 119, 180),
            Pollutant::Pm10 => RGBColor(255, 127, 14),
            Pollutant::Co => RGBColor(44, 160, 44),
            Pollutant::No2 => RGBColor(214, 39, 40),
            Pollutant::So2 => RGBColor(148, 103, 189),
            Pollutant::O3 => RGBColor(140, 86, 75),
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
