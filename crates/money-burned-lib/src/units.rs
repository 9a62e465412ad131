use crate::error::CostError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A billing interval together with its fixed hours-per-unit multiplier.
///
/// Calendar units cover the full 24-hour day; labor-based units follow the
/// 8h/day, 5d/week, 4.35w/month convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
    WorkDay,
    WorkWeek,
    WorkMonth,
    WorkYear,
}

impl CostUnit {
    pub const ALL: [CostUnit; 10] = [
        CostUnit::Minute,
        CostUnit::Hour,
        CostUnit::Day,
        CostUnit::Week,
        CostUnit::Month,
        CostUnit::Year,
        CostUnit::WorkDay,
        CostUnit::WorkWeek,
        CostUnit::WorkMonth,
        CostUnit::WorkYear,
    ];

    /// Hours covered by one unit. Strictly positive for every variant.
    pub fn hours(&self) -> f64 {
        match self {
            CostUnit::Minute => 1.0 / 60.0,
            CostUnit::Hour => 1.0,
            CostUnit::Day => 24.0,
            CostUnit::Week => 168.0,    // 24h * 7d
            CostUnit::Month => 730.56,  // 24h * 30.44d average calendar month
            CostUnit::Year => 8766.0,   // 24h * 365.25d average calendar year
            CostUnit::WorkDay => 8.0,
            CostUnit::WorkWeek => 40.0,   // 8h * 5d
            CostUnit::WorkMonth => 174.0, // 8h * 5d * 4.35w
            CostUnit::WorkYear => 2088.0, // 8h * 5d * 4.35w * 12m
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CostUnit::Minute => "Minute",
            CostUnit::Hour => "Hour",
            CostUnit::Day => "Day",
            CostUnit::Week => "Week",
            CostUnit::Month => "Month",
            CostUnit::Year => "Year",
            CostUnit::WorkDay => "Work Day",
            CostUnit::WorkWeek => "Work Week",
            CostUnit::WorkMonth => "Work Month",
            CostUnit::WorkYear => "Work Year",
        }
    }

    /// Tokens accepted for this unit in cost expressions, matched
    /// case-insensitively. German aliases are kept for compatibility with
    /// the original tool.
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            CostUnit::Minute => &["m", "min", "minute"],
            CostUnit::Hour => &["h", "hr", "hour", "Stunde"],
            CostUnit::Day => &["d", "day", "Tag"],
            CostUnit::Week => &["w", "wk", "week", "Woche"],
            CostUnit::Month => &["mth", "month", "mo", "mon", "Monat"],
            CostUnit::Year => &["y", "yr", "year", "j", "Jahr"],
            CostUnit::WorkDay => &["MD", "PD", "PT", "Arbeitstag", "workday"],
            CostUnit::WorkWeek => &["ww", "wwk", "MW", "PW", "AW", "workweek"],
            CostUnit::WorkMonth => &["wmth", "workmonth", "MM", "PM", "Arbeitsmonat"],
            CostUnit::WorkYear => &["wy", "MY", "PY", "AJ", "PJ", "workyear"],
        }
    }

    /// Whether the unit derives from a working-hours convention rather than
    /// calendar time.
    pub fn is_labor_based(&self) -> bool {
        matches!(
            self,
            CostUnit::WorkDay | CostUnit::WorkWeek | CostUnit::WorkMonth | CostUnit::WorkYear
        )
    }
}

impl fmt::Display for CostUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive registry of unit tokens.
#[derive(Debug, Clone)]
pub struct UnitTable {
    lookup_cache: HashMap<String, CostUnit>,
}

impl UnitTable {
    pub fn new() -> Self {
        let mut lookup_cache = HashMap::new();

        for unit in CostUnit::ALL {
            for token in unit.synonyms() {
                lookup_cache.insert(token.to_lowercase(), unit);
            }
        }

        Self { lookup_cache }
    }

    /// Resolves a unit token, ignoring case.
    pub fn lookup(&self, token: &str) -> Option<CostUnit> {
        self.lookup_cache.get(&token.trim().to_lowercase()).copied()
    }

    /// Like [`lookup`](Self::lookup), but unknown tokens become a typed
    /// error instead of being defaulted.
    pub fn resolve(&self, token: &str) -> Result<CostUnit, CostError> {
        self.lookup(token)
            .ok_or_else(|| CostError::UnknownUnit(token.trim().to_string()))
    }

    /// All known units in declaration order, for listings.
    pub fn units(&self) -> &'static [CostUnit] {
        &CostUnit::ALL
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = UnitTable::new();
        assert_eq!(table.lookup("MD"), Some(CostUnit::WorkDay));
        assert_eq!(table.lookup("md"), Some(CostUnit::WorkDay));
        assert_eq!(table.lookup("Md"), Some(CostUnit::WorkDay));
        assert_eq!(table.lookup("ARBEITSTAG"), Some(CostUnit::WorkDay));
    }

    #[test]
    fn test_all_synonyms_resolve_to_their_unit() {
        let table = UnitTable::new();
        for unit in CostUnit::ALL {
            for token in unit.synonyms() {
                assert_eq!(table.lookup(token), Some(unit), "token '{}'", token);
            }
        }
    }

    #[test]
    fn test_unknown_token_is_a_typed_error() {
        let table = UnitTable::new();
        assert_eq!(table.lookup("xyz"), None);
        assert_eq!(
            table.resolve("xyz"),
            Err(CostError::UnknownUnit("xyz".to_string()))
        );
    }

    #[test]
    fn test_lookup_trims_whitespace() {
        let table = UnitTable::new();
        assert_eq!(table.lookup(" wy "), Some(CostUnit::WorkYear));
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(CostUnit::Minute.hours(), 1.0 / 60.0);
        assert_eq!(CostUnit::Hour.hours(), 1.0);
        assert_eq!(CostUnit::Day.hours(), 24.0);
        assert_eq!(CostUnit::Week.hours(), 168.0);
        assert_eq!(CostUnit::WorkDay.hours(), 8.0);
        assert_eq!(CostUnit::WorkWeek.hours(), 40.0);
        assert_eq!(CostUnit::WorkMonth.hours(), 174.0);
        assert_eq!(CostUnit::WorkYear.hours(), 2088.0);
    }

    #[test]
    fn test_multipliers_are_strictly_positive() {
        for unit in CostUnit::ALL {
            assert!(unit.hours() > 0.0, "{} has non-positive hours", unit);
        }
    }

    #[test]
    fn test_labor_based_classification() {
        assert!(CostUnit::WorkDay.is_labor_based());
        assert!(CostUnit::WorkYear.is_labor_based());
        assert!(!CostUnit::Day.is_labor_based());
        assert!(!CostUnit::Hour.is_labor_based());
    }
}
