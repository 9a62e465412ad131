use crate::data_structures::{Cost, Resource};
use crate::error::{CostError, InvalidCostExpression};
use crate::units::{CostUnit, UnitTable};

/// Parses raw cost expressions like `1100 per MD`, `92/d` or `35` into
/// normalized [`Cost`] values.
#[derive(Debug, Clone)]
pub struct CostParser {
    unit_table: UnitTable,
}

impl CostParser {
    pub fn new() -> Self {
        Self {
            unit_table: UnitTable::new(),
        }
    }

    /// Parses a single cost expression.
    ///
    /// The amount may carry a per-unit suffix introduced by `/`, the word
    /// `per` or `à`; without one the cost is taken as hourly. The amount is
    /// locale-tolerant: a comma is accepted as decimal separator when no
    /// dot is present (`24,99`).
    pub fn parse(&self, expression: &str) -> Result<Cost, InvalidCostExpression> {
        let trimmed = expression.trim();
        let (amount_part, unit_part) = split_per_unit(trimmed);

        let amount =
            parse_amount(amount_part).map_err(|reason| InvalidCostExpression::new(trimmed, reason))?;

        let unit = match unit_part {
            Some(token) => self
                .unit_table
                .resolve(token)
                .map_err(|reason| InvalidCostExpression::new(trimmed, reason))?,
            None => CostUnit::Hour,
        };

        Ok(Cost::new(amount, unit))
    }

    /// Parses a whole resource list, e.g.
    /// `Consultant:1100 per MD; Rental:92/d; 35`.
    ///
    /// Entries are separated by `;` or `+` and may carry a `name:` prefix.
    /// Malformed entries are collected as errors and do not abort the rest;
    /// partial success is the norm here.
    pub fn parse_resource_list(&self, input: &str) -> ResourceListOutcome {
        let mut resources = Vec::new();
        let mut errors = Vec::new();

        for entry in input.split([';', '+']) {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let (name, cost_expression) = match entry.split_once(':') {
                Some((name, cost)) => (name.trim(), cost.trim()),
                None => ("", entry),
            };

            match self.parse(cost_expression) {
                Ok(cost) => resources.push(Resource::new(name, cost)),
                Err(error) => {
                    // Re-wrap with the full entry so the report names what
                    // the user actually typed.
                    errors.push(InvalidCostExpression::new(entry, error.reason().clone()));
                }
            }
        }

        ResourceListOutcome { resources, errors }
    }

    pub fn unit_table(&self) -> &UnitTable {
        &self.unit_table
    }
}

impl Default for CostParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a resource list: the entries that parsed plus the
/// errors for those that did not.
#[derive(Debug, Clone, Default)]
pub struct ResourceListOutcome {
    resources: Vec<Resource>,
    errors: Vec<InvalidCostExpression>,
}

impl ResourceListOutcome {
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn errors(&self) -> &[InvalidCostExpression] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_resources(self) -> Vec<Resource> {
        self.resources
    }

    pub fn into_parts(self) -> (Vec<Resource>, Vec<InvalidCostExpression>) {
        (self.resources, self.errors)
    }
}

fn split_per_unit(expression: &str) -> (&str, Option<&str>) {
    for separator in ['/', 'à'] {
        if let Some((amount, unit)) = expression.split_once(separator) {
            return (amount.trim(), Some(unit.trim()));
        }
    }

    if let Some((start, end)) = find_per_keyword(expression) {
        return (expression[..start].trim(), Some(expression[end..].trim()));
    }

    (expression, None)
}

/// Finds a standalone `per` keyword (any case) with an amount before it.
/// Returns the byte range of the keyword.
fn find_per_keyword(expression: &str) -> Option<(usize, usize)> {
    // ASCII lowercasing keeps byte offsets stable.
    let lowered = expression.to_ascii_lowercase();
    let mut search_from = 0;

    while let Some(relative) = lowered[search_from..].find("per") {
        let start = search_from + relative;
        let end = start + 3;

        let standalone_before = lowered[..start].ends_with(|c: char| c.is_whitespace());
        let standalone_after =
            end == lowered.len() || lowered[end..].starts_with(|c: char| c.is_whitespace());

        if standalone_before && standalone_after {
            return Some((start, end));
        }

        search_from = end;
    }

    None
}

fn parse_amount(raw: &str) -> Result<f64, CostError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CostError::InvalidNumber(raw.to_string()));
    }

    // Comma as decimal separator, but only when it cannot clash with a dot.
    let normalized = if raw.contains(',') && !raw.contains('.') {
        raw.replacen(',', ".", 1)
    } else {
        raw.to_string()
    };

    match normalized.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(CostError::InvalidNumber(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rate(expression: &str, expected: f64) {
        let cost = CostParser::new().parse(expression).unwrap();
        let difference = cost.hourly_rate() - expected;
        assert!(
            difference.abs() < 1e-9,
            "'{}' gave {} instead of {}",
            expression,
            cost.hourly_rate(),
            expected
        );
    }

    #[test]
    fn test_plain_amount_defaults_to_hourly() {
        let cost = CostParser::new().parse("35").unwrap();
        assert_eq!(cost.unit(), CostUnit::Hour);
        assert_eq!(cost.hourly_rate(), 35.0);
    }

    #[test]
    fn test_slash_separator() {
        assert_rate("92/d", 92.0 / 24.0);
        assert_rate("63500/wy", 63500.0 / 2088.0);
        assert_rate("55200/wy", 55200.0 / 2088.0);
    }

    #[test]
    fn test_per_separator() {
        assert_rate("1100 per MD", 137.5);
        assert_rate("1100 PER md", 137.5);
    }

    #[test]
    fn test_a_grave_separator() {
        assert_rate("12 à MD", 1.5);
        assert_rate("12à MD", 1.5);
    }

    #[test]
    fn test_comma_decimal_separator() {
        assert_rate("24,99", 24.99);
        assert_rate("0,5 per h", 0.5);
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        assert_rate("  1100 per MD  ", 137.5);
        assert_rate("92 / d", 92.0 / 24.0);
    }

    #[test]
    fn test_empty_expression_is_invalid_number() {
        let error = CostParser::new().parse("").unwrap_err();
        assert!(matches!(error.reason(), CostError::InvalidNumber(_)));
    }

    #[test]
    fn test_garbage_amount_is_invalid_number() {
        let error = CostParser::new().parse("abc").unwrap_err();
        assert_eq!(error.reason(), &CostError::InvalidNumber("abc".to_string()));
    }

    #[test]
    fn test_negative_amount_is_invalid_number() {
        let error = CostParser::new().parse("-5").unwrap_err();
        assert!(matches!(error.reason(), CostError::InvalidNumber(_)));
    }

    #[test]
    fn test_unknown_unit_is_reported_as_such() {
        let error = CostParser::new().parse("10/xyz").unwrap_err();
        assert_eq!(error.expression(), "10/xyz");
        assert_eq!(error.reason(), &CostError::UnknownUnit("xyz".to_string()));
    }

    #[test]
    fn test_reference_resource_list() {
        let parser = CostParser::new();
        let outcome = parser.parse_resource_list(
            "Consultant:1100 per MD; Rental:92/d; Dev:63500/wy; Junior-Dev:55200/wy; Co-Working-Space:35",
        );

        assert!(!outcome.has_errors());
        let resources = outcome.resources();
        assert_eq!(resources.len(), 5);

        let expected = [
            ("Consultant", 137.5),
            ("Rental", 92.0 / 24.0),
            ("Dev", 63500.0 / 2088.0),
            ("Junior-Dev", 55200.0 / 2088.0),
            ("Co-Working-Space", 35.0),
        ];
        for (resource, (name, rate)) in resources.iter().zip(expected) {
            assert_eq!(resource.name(), name);
            assert!((resource.cost().hourly_rate() - rate).abs() < 1e-9);
        }
    }

    #[test]
    fn test_plus_separator_and_generic_names() {
        let outcome = CostParser::new().parse_resource_list("24,99+Manager:89+11");
        let resources = outcome.resources();

        assert_eq!(resources.len(), 3);
        assert_eq!(resources[0].name(), "Generic");
        assert_eq!(resources[1].name(), "Manager");
        assert_eq!(resources[2].name(), "Generic");
        assert_eq!(resources[0].cost().hourly_rate(), 24.99);
    }

    #[test]
    fn test_malformed_entries_do_not_abort_the_rest() {
        let outcome =
            CostParser::new().parse_resource_list("Broken:10/xyz; Rental:92/d; nonsense; 35");

        assert_eq!(outcome.resources().len(), 2);
        assert_eq!(outcome.errors().len(), 2);
        assert_eq!(outcome.errors()[0].expression(), "Broken:10/xyz");
        assert_eq!(
            outcome.errors()[0].reason(),
            &CostError::UnknownUnit("xyz".to_string())
        );
        assert_eq!(outcome.errors()[1].expression(), "nonsense");
    }

    #[test]
    fn test_blank_entries_are_skipped() {
        let outcome = CostParser::new().parse_resource_list("10; ;;20");
        assert_eq!(outcome.resources().len(), 2);
        assert!(!outcome.has_errors());
    }
}
