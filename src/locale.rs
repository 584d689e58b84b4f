use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const SPANISH_MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Language used for bucket labels and generated summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    fn months(self) -> &'static [&'static str; 12] {
        match self {
            Locale::Es => &SPANISH_MONTHS,
            Locale::En => &ENGLISH_MONTHS,
        }
    }

    pub fn month_name(self, date: NaiveDate) -> &'static str {
        self.months()[date.month0() as usize]
    }

    /// "Ene. 05"
    pub fn day_label(self, date: NaiveDate) -> String {
        let abbreviation: String = self.month_name(date).chars().take(3).collect();
        format!("{}. {:02}", abbreviation, date.day())
    }

    /// "Enero 2024"
    pub fn month_label(self, date: NaiveDate) -> String {
        format!("{} {:04}", self.month_name(date), date.year())
    }

    pub fn simulation_summary(self, periods: usize) -> String {
        match self {
            Locale::Es => format!(
                "Proyección generada considerando los parámetros proporcionados. \
                 Se estiman {} periodos futuros.",
                periods
            ),
            Locale::En => format!(
                "Projection generated using the supplied parameters. \
                 {} future periods were estimated.",
                periods
            ),
        }
    }
}
