use serde::{Deserialize, Serialize};

/// One of the six meteorological variables a DAT file can carry.
///
/// Declaration order is the canonical table order: it drives filename
/// scanning, per-year file ordering and CSV column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VariableKey {
    Precipitation,    // PR
    SunshineDuration, // SD
    SolarRadiation,   // SR
    MeanTemperature,  // TM
    MinTemperature,   // TN
    MaxTemperature,   // TX
}

/// Language used for CSV column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderLanguage {
    #[default]
    Japanese,
    English,
}

impl HeaderLanguage {
    pub fn date_column(&self) -> &'static str {
        match self {
            HeaderLanguage::Japanese => "年月日",
            HeaderLanguage::English => "date",
        }
    }
}

impl VariableKey {
    pub const ALL: [VariableKey; 6] = [
        VariableKey::Precipitation,
        VariableKey::SunshineDuration,
        VariableKey::SolarRadiation,
        VariableKey::MeanTemperature,
        VariableKey::MinTemperature,
        VariableKey::MaxTemperature,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PR" => Some(VariableKey::Precipitation),
            "SD" => Some(VariableKey::SunshineDuration),
            "SR" => Some(VariableKey::SolarRadiation),
            "TM" => Some(VariableKey::MeanTemperature),
            "TN" => Some(VariableKey::MinTemperature),
            "TX" => Some(VariableKey::MaxTemperature),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            VariableKey::Precipitation => "PR",
            VariableKey::SunshineDuration => "SD",
            VariableKey::SolarRadiation => "SR",
            VariableKey::MeanTemperature => "TM",
            VariableKey::MinTemperature => "TN",
            VariableKey::MaxTemperature => "TX",
        }
    }

    pub fn display_name(&self, language: HeaderLanguage) -> &'static str {
        match language {
            HeaderLanguage::Japanese => match self {
                VariableKey::Precipitation => "日降水量",
                VariableKey::SunshineDuration => "日照時間",
                VariableKey::SolarRadiation => "日積算日射量",
                VariableKey::MeanTemperature => "日平均気温",
                VariableKey::MinTemperature => "日最低気温",
                VariableKey::MaxTemperature => "日最高気温",
            },
            HeaderLanguage::English => match self {
                VariableKey::Precipitation => "precipitation",
                VariableKey::SunshineDuration => "sunshine duration",
                VariableKey::SolarRadiation => "solar radiation",
                VariableKey::MeanTemperature => "mean temp",
                VariableKey::MinTemperature => "min temp",
                VariableKey::MaxTemperature => "max temp",
            },
        }
    }

    /// Temperature-class variables are stored in tenths of a degree with a sign offset.
    pub fn is_temperature(&self) -> bool {
        matches!(
            self,
            VariableKey::MeanTemperature | VariableKey::MinTemperature | VariableKey::MaxTemperature
        )
    }
}

impl std::fmt::Display for VariableKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name(HeaderLanguage::English))
    }
}
