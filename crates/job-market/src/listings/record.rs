use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Company label used when a listing carries no employer name.
pub const UNKNOWN_COMPANY: &str = "Unknown";

/// Pay period attached to structured salary fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SalaryPeriod {
    Yearly,
    Monthly,
    Daily,
    Hourly,
}

impl SalaryPeriod {
    /// Maps a provider code onto a period. Unrecognized or blank codes are
    /// read as yearly figures.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "M" => Self::Monthly,
            "D" => Self::Daily,
            "H" => Self::Hourly,
            _ => Self::Yearly,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Yearly => "Y",
            Self::Monthly => "M",
            Self::Daily => "D",
            Self::Hourly => "H",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yearly => "per year",
            Self::Monthly => "per month",
            Self::Daily => "per day",
            Self::Hourly => "per hour",
        }
    }

    /// Multiplier that turns one unit of this period into a yearly figure:
    /// 260 working days, 12 months, 40h x 52 weeks.
    pub fn annual_factor(self) -> Decimal {
        match self {
            Self::Yearly => Decimal::ONE,
            Self::Monthly => Decimal::from(12),
            Self::Daily => Decimal::from(260),
            Self::Hourly => Decimal::from(2080),
        }
    }
}

impl Serialize for SalaryPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for SalaryPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from_code(&code))
    }
}

/// A single job listing as supplied by the listing source or the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location_text: String,
    pub posting_date: NaiveDate,
    #[serde(default)]
    pub salary_text: Option<String>,
    #[serde(default)]
    pub salary_min: Option<Decimal>,
    #[serde(default)]
    pub salary_max: Option<Decimal>,
    #[serde(default)]
    pub salary_period: Option<SalaryPeriod>,
    #[serde(default)]
    pub salary_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ListingRecord {
    pub fn new(title: impl Into<String>, posting_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            company: None,
            location_text: String::new(),
            posting_date,
            salary_text: None,
            salary_min: None,
            salary_max: None,
            salary_period: None,
            salary_currency: None,
            url: None,
        }
    }

    /// Employer name, falling back to [`UNKNOWN_COMPANY`] when blank.
    pub fn company_name(&self) -> &str {
        self.company
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_COMPANY)
    }

    pub fn salary_text(&self) -> &str {
        self.salary_text.as_deref().unwrap_or("")
    }

    /// Currency code, upper-cased; `None` means the reference currency.
    pub fn currency_code(&self) -> Option<String> {
        self.salary_currency
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_ascii_uppercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posted() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 18).expect("valid date")
    }

    #[test]
    fn blank_company_uses_sentinel() {
        let mut listing = ListingRecord::new("Developer", posted());
        assert_eq!(listing.company_name(), UNKNOWN_COMPANY);

        listing.company = Some("   ".to_string());
        assert_eq!(listing.company_name(), UNKNOWN_COMPANY);

        listing.company = Some(" Acme Ltd ".to_string());
        assert_eq!(listing.company_name(), "Acme Ltd");
    }

    #[test]
    fn unknown_period_codes_read_as_yearly() {
        assert_eq!(SalaryPeriod::from_code("d"), SalaryPeriod::Daily);
        assert_eq!(SalaryPeriod::from_code("W"), SalaryPeriod::Yearly);
        assert_eq!(SalaryPeriod::from_code(""), SalaryPeriod::Yearly);
    }

    #[test]
    fn deserializes_from_json_with_missing_optionals() {
        let listing: ListingRecord = serde_json::from_str(
            r#"{"title":"Data Engineer","posting_date":"2025-02-18","salary_min":450,"salary_period":"D","salary_currency":"eur"}"#,
        )
        .expect("listing parses");

        assert_eq!(listing.salary_period, Some(SalaryPeriod::Daily));
        assert_eq!(listing.salary_min, Some(Decimal::from(450)));
        assert!(listing.salary_max.is_none());
        assert!(listing.description.is_empty());
        assert_eq!(listing.currency_code().as_deref(), Some("EUR"));
    }
}
