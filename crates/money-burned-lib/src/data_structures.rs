use crate::error::InvalidCostExpression;
use crate::parser::CostParser;
use crate::units::CostUnit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name substituted for resources added without one.
pub const GENERIC_RESOURCE_NAME: &str = "Generic";

/// An amount of money bound to a billing interval, normalized to the
/// canonical hourly rate all arithmetic operates on.
///
/// The rate is stored at full precision; rounding to currency precision
/// happens only in `Display`, so repeated polling never compounds rounding
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    raw_amount: f64,
    unit: CostUnit,
    hourly_rate: f64,
}

impl Cost {
    pub fn new(raw_amount: f64, unit: CostUnit) -> Self {
        Self {
            raw_amount,
            unit,
            hourly_rate: raw_amount / unit.hours(),
        }
    }

    pub fn raw_amount(&self) -> f64 {
        self.raw_amount
    }

    pub fn unit(&self) -> CostUnit {
        self.unit
    }

    pub fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}/h", self.hourly_rate)
    }
}

/// A named cost source contributing to the total burn rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    name: String,
    cost: Cost,
}

impl Resource {
    /// Blank names fall back to [`GENERIC_RESOURCE_NAME`].
    pub fn new(name: impl Into<String>, cost: Cost) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            GENERIC_RESOURCE_NAME.to_string()
        } else {
            name.trim().to_string()
        };

        Self { name, cost }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> &Cost {
        &self.cost
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.name, self.cost)
    }
}

/// Insertion-ordered, append-only collection of resources. Not touched
/// again once a recording session has snapshotted it.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: Vec<Resource>,
    parser: CostParser,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            resources: Vec::new(),
            parser: CostParser::new(),
        }
    }

    pub fn add(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    /// Parses a raw cost expression and appends the resulting resource.
    /// A missing or blank name becomes [`GENERIC_RESOURCE_NAME`].
    pub fn add_parsed(
        &mut self,
        name: Option<&str>,
        raw_cost: &str,
    ) -> Result<&Resource, InvalidCostExpression> {
        let cost = self.parser.parse(raw_cost)?;
        self.resources
            .push(Resource::new(name.unwrap_or_default(), cost));

        Ok(self.resources.last().expect("resource was just pushed"))
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Sum of all contained hourly rates; independent of insertion order.
    pub fn total_hourly_rate(&self) -> f64 {
        self.resources
            .iter()
            .map(|resource| resource.cost().hourly_rate())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_normalizes_to_hourly_rate() {
        let cost = Cost::new(1100.0, CostUnit::WorkDay);
        assert_eq!(cost.raw_amount(), 1100.0);
        assert_eq!(cost.unit(), CostUnit::WorkDay);
        assert_eq!(cost.hourly_rate(), 137.5);
    }

    #[test]
    fn test_cost_display_rounds_to_currency_precision() {
        let cost = Cost::new(92.0, CostUnit::Day);
        assert!(cost.hourly_rate() > 3.833 && cost.hourly_rate() < 3.834);
        assert_eq!(cost.to_string(), "$3.83/h");
    }

    #[test]
    fn test_blank_resource_name_becomes_generic() {
        let cost = Cost::new(35.0, CostUnit::Hour);
        assert_eq!(Resource::new("", cost).name(), "Generic");
        assert_eq!(Resource::new("   ", cost).name(), "Generic");
        assert_eq!(Resource::new(" Consultant ", cost).name(), "Consultant");
    }

    #[test]
    fn test_resource_display() {
        let resource = Resource::new("Consultant", Cost::new(1100.0, CostUnit::WorkDay));
        assert_eq!(resource.to_string(), "Consultant at $137.50/h");
    }

    #[test]
    fn test_registry_total_is_order_independent() {
        let rental = Resource::new("Rental", Cost::new(92.0, CostUnit::Day));
        let space = Resource::new("Space", Cost::new(35.0, CostUnit::Hour));
        let dev = Resource::new("Dev", Cost::new(63500.0, CostUnit::WorkYear));

        let mut forward = ResourceRegistry::new();
        forward.add(rental.clone());
        forward.add(space.clone());
        forward.add(dev.clone());

        let mut backward = ResourceRegistry::new();
        backward.add(dev);
        backward.add(space);
        backward.add(rental);

        let difference = forward.total_hourly_rate() - backward.total_hourly_rate();
        assert!(difference.abs() < 1e-9);
    }

    #[test]
    fn test_registry_preserves_insertion_order() {
        let mut registry = ResourceRegistry::new();
        registry.add_parsed(Some("Consultant"), "1100 per MD").unwrap();
        registry.add_parsed(None, "35").unwrap();

        let names: Vec<&str> = registry.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Consultant", "Generic"]);
    }

    #[test]
    fn test_add_parsed_propagates_parse_failure() {
        let mut registry = ResourceRegistry::new();
        assert!(registry.add_parsed(Some("Broken"), "10/xyz").is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_empty_registry_has_zero_rate() {
        assert_eq!(ResourceRegistry::new().total_hourly_rate(), 0.0);
    }
}
