use serde::{Deserialize, Serialize};

/// Placeholder used when the upstream record carries no capital.
pub const NO_CAPITAL: &str = "N/A";

/// One element of the upstream country array.
/// Only the fields this service consumes are modelled; the rest are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCountryRecord {
    pub name: RawCountryName,
    pub population: u64,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    #[serde(default)]
    pub flags: RawCountryFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCountryFlags {
    #[serde(default)]
    pub svg: Option<String>,
    #[serde(default)]
    pub png: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Normalized country as held in the cache and returned by name lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDetails {
    pub name: String,
    pub flag: String,
    pub population: u64,
    pub capital: String,
}

impl CountryDetails {
    pub fn summary(&self) -> CountrySummary {
        CountrySummary {
            name: self.name.clone(),
            flag: self.flag.clone(),
        }
    }
}

/// Name and flag only; the shape returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub name: String,
    pub flag: String,
}

/// Convert an upstream record into the cached shape.
///
/// The flag prefers SVG, then PNG, then `fallback_flag_url`. The capital is
/// the first listed capital, or [`NO_CAPITAL`]. Empty strings upstream are
/// treated the same as missing values.
pub fn normalize(raw: &RawCountryRecord, fallback_flag_url: &str) -> CountryDetails {
    let flag = non_empty(raw.flags.svg.as_deref())
        .or_else(|| non_empty(raw.flags.png.as_deref()))
        .unwrap_or(fallback_flag_url);

    let capital = raw
        .capital
        .as_deref()
        .and_then(|capitals| non_empty(capitals.first().map(String::as_str)))
        .unwrap_or(NO_CAPITAL);

    CountryDetails {
        name: raw.name.common.clone(),
        flag: flag.to_owned(),
        population: raw.population,
        capital: capital.to_owned(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "https://placehold.co/60x40?text=No+Flag";

    fn raw(svg: Option<&str>, png: Option<&str>, capital: Option<Vec<&str>>) -> RawCountryRecord {
        RawCountryRecord {
            name: RawCountryName {
                common: "South Africa".to_owned(),
                official: "Republic of South Africa".to_owned(),
            },
            population: 60_000_000,
            capital: capital.map(|c| c.into_iter().map(str::to_owned).collect()),
            flags: RawCountryFlags {
                svg: svg.map(str::to_owned),
                png: png.map(str::to_owned),
                alt: None,
            },
        }
    }

    #[test]
    fn flag_prefers_svg() {
        let details = normalize(&raw(Some("za.svg"), Some("za.png"), None), FALLBACK);
        assert_eq!(details.flag, "za.svg");
    }

    #[test]
    fn flag_falls_back_to_png() {
        let details = normalize(&raw(None, Some("za.png"), None), FALLBACK);
        assert_eq!(details.flag, "za.png");
    }

    #[test]
    fn flag_falls_back_to_placeholder() {
        let details = normalize(&raw(None, None, None), FALLBACK);
        assert_eq!(details.flag, FALLBACK);
    }

    #[test]
    fn empty_svg_is_treated_as_missing() {
        let details = normalize(&raw(Some(""), Some("za.png"), None), FALLBACK);
        assert_eq!(details.flag, "za.png");
    }

    #[test]
    fn capital_takes_first_entry() {
        let details = normalize(
            &raw(None, None, Some(vec!["Pretoria", "Cape Town", "Bloemfontein"])),
            FALLBACK,
        );
        assert_eq!(details.capital, "Pretoria");
    }

    #[test]
    fn missing_or_empty_capital_is_not_available() {
        assert_eq!(normalize(&raw(None, None, None), FALLBACK).capital, "N/A");
        assert_eq!(
            normalize(&raw(None, None, Some(vec![])), FALLBACK).capital,
            "N/A"
        );
        assert_eq!(
            normalize(&raw(None, None, Some(vec![""])), FALLBACK).capital,
            "N/A"
        );
    }

    #[test]
    fn normalize_keeps_common_name_and_population() {
        let details = normalize(&raw(Some("za.svg"), None, Some(vec!["Pretoria"])), FALLBACK);
        assert_eq!(
            details,
            CountryDetails {
                name: "South Africa".to_owned(),
                flag: "za.svg".to_owned(),
                population: 60_000_000,
                capital: "Pretoria".to_owned(),
            }
        );
        assert_eq!(
            details.summary(),
            CountrySummary {
                name: "South Africa".to_owned(),
                flag: "za.svg".to_owned(),
            }
        );
    }

    #[test]
    fn deserializes_upstream_shape() {
        let json = r#"[
            {"name":{"common":"Zeta","official":"Republic of Zeta"},"population":5,"capital":["Z City"],"flags":{"svg":"z.svg","alt":"A flag"}},
            {"name":{"common":"Alpha"},"population":3,"flags":{"png":"a.png"}},
            {"name":{"common":"Bare"},"population":0}
        ]"#;
        let records: Vec<RawCountryRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].capital.as_deref(), Some(&["Z City".to_owned()][..]));
        assert_eq!(records[1].name.official, "");
        assert!(records[1].capital.is_none());
        assert_eq!(records[2].flags, RawCountryFlags::default());
    }
}
