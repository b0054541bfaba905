// src/specs/variables.rs

/// One known climate variable of the capitals table.
pub struct VariableSpec {
    /// Canonical column name.
    pub name: &'static str,
    pub unit: &'static str,
    /// Signed variables can dip below zero; magnitude displays need shifting.
    pub signed: bool,
    pub description: &'static str,
}

/// Monthly aggregates as published in the source table.
pub const VARIABLES: &[VariableSpec] = &[
    VariableSpec {
        name: "temperature_2m_max",
        unit: "°C",
        signed: true,
        description: "Daily maximum air temperature at 2 m above ground.",
    },
    VariableSpec {
        name: "temperature_2m_min",
        unit: "°C",
        signed: true,
        description: "Daily minimum air temperature at 2 m above ground.",
    },
    VariableSpec {
        name: "temperature_2m_mean",
        unit: "°C",
        signed: true,
        description: "Daily mean air temperature at 2 m above ground.",
    },
    VariableSpec {
        name: "apparent_temperature_max",
        unit: "°C",
        signed: true,
        description: "Daily maximum feels-like temperature (wind, humidity, radiation).",
    },
    VariableSpec {
        name: "apparent_temperature_min",
        unit: "°C",
        signed: true,
        description: "Daily minimum feels-like temperature (wind, humidity, radiation).",
    },
    VariableSpec {
        name: "apparent_temperature_mean",
        unit: "°C",
        signed: true,
        description: "Daily mean feels-like temperature (wind, humidity, radiation).",
    },
    VariableSpec {
        name: "daylight_duration",
        unit: "s",
        signed: false,
        description: "Daylight duration between sunrise and sunset.",
    },
    VariableSpec {
        name: "sunshine_duration",
        unit: "s",
        signed: false,
        description: "Direct sunshine duration (irradiance above 120 W/m²).",
    },
    VariableSpec {
        name: "precipitation_sum",
        unit: "mm",
        signed: false,
        description: "Total precipitation (rain + snow).",
    },
    VariableSpec {
        name: "rain_sum",
        unit: "mm",
        signed: false,
        description: "Total rain, excluding snowfall.",
    },
    VariableSpec {
        name: "snowfall_sum",
        unit: "cm",
        signed: false,
        description: "Total snowfall.",
    },
    VariableSpec {
        name: "precipitation_hours",
        unit: "h",
        signed: false,
        description: "Hours with measurable precipitation.",
    },
    VariableSpec {
        name: "wind_speed_10m_max",
        unit: "km/h",
        signed: false,
        description: "Maximum wind speed at 10 m.",
    },
    VariableSpec {
        name: "wind_gusts_10m_max",
        unit: "km/h",
        signed: false,
        description: "Maximum wind gusts at 10 m.",
    },
    VariableSpec {
        name: "shortwave_radiation_sum",
        unit: "MJ/m²",
        signed: false,
        description: "Total shortwave solar radiation.",
    },
    VariableSpec {
        name: "et0_fao_evapotranspiration",
        unit: "mm",
        signed: false,
        description: "Reference evapotranspiration (FAO Penman-Monteith).",
    },
];

pub fn find(name: &str) -> Option<&'static VariableSpec> {
    VARIABLES.iter().find(|v| v.name.eq_ignore_ascii_case(name))
}

/// Whether a variable needs the shifted-size derivation. Unknown variables
/// default to unsigned (no shift).
pub fn is_signed(name: &str) -> bool {
    find(name).map(|v| v.signed).unwrap_or(false)
}
