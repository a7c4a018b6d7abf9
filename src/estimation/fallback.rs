//! Synthetic defaults for categories whose catalog returned nothing.
//!
//! Bounds are fixed placeholders, independent of area and location:
//!
//! | category  | min  | max  |
//! |-----------|------|------|
//! | materials |  800 | 1200 |
//! | labour    | 1200 | 1800 |
//! | tools     |  150 |  300 |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::estimation::cost::{CategoryBreakdown, ItemSource, LineItem};
use crate::templates::Range;

/// Categories that can fall back to a synthetic item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackCategory {
    Materials,
    Labor,
    Tools,
}

impl FallbackCategory {
    pub fn bounds(&self) -> Range {
        match self {
            FallbackCategory::Materials => Range::new(dec!(800), dec!(1200)),
            FallbackCategory::Labor => Range::new(dec!(1200), dec!(1800)),
            FallbackCategory::Tools => Range::new(dec!(150), dec!(300)),
        }
    }

    fn line(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            FallbackCategory::Materials => (
                "default-materials",
                "General materials allowance",
                "project",
            ),
            FallbackCategory::Labor => ("default-labor", "General trade labour allowance", "project"),
            FallbackCategory::Tools => ("default-tools", "General tool hire allowance", "project"),
        }
    }
}

/// Category breakdown holding just the synthetic item.
pub fn synthetic(category: FallbackCategory) -> CategoryBreakdown {
    let bounds = category.bounds();
    let (id, name, unit) = category.line();
    let midpoint = bounds.midpoint();
    let item = LineItem {
        id: id.to_string(),
        name: name.to_string(),
        source: ItemSource::Synthetic,
        unit: unit.to_string(),
        unit_rate: midpoint,
        quantity: Decimal::ONE,
        adjustment: Decimal::ONE,
        cost: midpoint,
        deposit: None,
        bulk_discount_available: None,
        notes: vec!["placeholder: no catalog data available".to_string()],
    };
    CategoryBreakdown::fixed(bounds, vec![item])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_bounds() {
        let labor = synthetic(FallbackCategory::Labor);
        assert_eq!(labor.range(), Range::new(dec!(1200), dec!(1800)));
        assert_eq!(labor.items.len(), 1);
        assert_eq!(labor.items[0].source, ItemSource::Synthetic);
        assert_eq!(labor.items[0].cost, dec!(1500));

        assert_eq!(
            synthetic(FallbackCategory::Tools).range(),
            Range::new(dec!(150), dec!(300))
        );
    }
}
