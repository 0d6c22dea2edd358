//! Category aggregation and proportional pie-chart layout.
//!
//! Pure arithmetic over in-memory records: no drawing happens here, the
//! TUI and the plain-text chart both consume the sectors produced below.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::expenses::Expense;

/// Sectors start at the top of the circle, angles grow clockwise.
pub const START_ANGLE: f64 = -90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const FALLBACK_COLOR: Rgb = Rgb(0x80, 0x80, 0x80);

/// Fixed per-category palette; anything outside the closed set is gray.
pub fn category_color(label: &str) -> Rgb {
    match label {
        "Food" => Rgb(0xE5, 0x73, 0x73),
        "Transport" => Rgb(0x81, 0xC7, 0x84),
        "Shopping" => Rgb(0x64, 0xB5, 0xF6),
        "Entertainment" => Rgb(0xFF, 0xB7, 0x4D),
        "Utilities" => Rgb(0xBA, 0x68, 0xC8),
        _ => FALLBACK_COLOR,
    }
}

/// Groups expenses by category label (exact, case-sensitive match) and sums
/// the amounts. Categories without records are absent from the result.
pub fn aggregate(expenses: &[Expense]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals
            .entry(expense.category.label().to_string())
            .or_insert(Decimal::ZERO) += expense.amount;
    }
    totals
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub label: String,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub color: Rgb,
}

/// Converts per-category totals into contiguous angular sectors summing to
/// 360 degrees. A non-positive grand total yields no sectors at all, and
/// individual non-positive entries are skipped. The total only counts the
/// entries that become sectors, so a stray negative amount in a hand-edited
/// file cannot inflate the remaining sweeps past a full circle.
pub fn layout(totals: &BTreeMap<String, Decimal>) -> Vec<Sector> {
    let total = totals
        .values()
        .filter(|amount| **amount > Decimal::ZERO)
        .sum::<Decimal>()
        .to_f64()
        .unwrap_or_default();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start_angle = START_ANGLE;
    let mut sectors = Vec::new();
    for (label, amount) in totals {
        let amount = amount.to_f64().unwrap_or_default();
        if amount <= 0.0 {
            continue;
        }
        let sweep_angle = amount / total * 360.0;
        sectors.push(Sector {
            label: label.clone(),
            start_angle,
            sweep_angle,
            color: category_color(label),
        });
        start_angle += sweep_angle;
    }
    sectors
}

/// Legend entries, only for categories that actually hold spending.
pub fn legend(totals: &BTreeMap<String, Decimal>) -> Vec<(String, Rgb)> {
    totals
        .iter()
        .filter(|(_, amount)| **amount > Decimal::ZERO)
        .map(|(label, _)| (label.clone(), category_color(label)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expenses::Category;

    fn expense(category: &str, amount: &str) -> Expense {
        Expense::new(
            Category::from(category.to_string()),
            amount.parse().unwrap(),
            None,
            None,
        )
    }

    fn totals(entries: &[(&str, &str)]) -> BTreeMap<String, Decimal> {
        entries
            .iter()
            .map(|(label, amount)| (label.to_string(), amount.parse().unwrap()))
            .collect()
    }

    #[test]
    fn aggregation_preserves_the_grand_total() {
        let expenses = vec![
            expense("Food", "12.50"),
            expense("Food", "7.50"),
            expense("Transport", "2.80"),
            expense("Concert tickets", "45.00"),
        ];
        let totals = aggregate(&expenses);
        let aggregated: Decimal = totals.values().sum();
        let direct: Decimal = expenses.iter().map(|e| e.amount).sum();
        assert_eq!(aggregated, direct);
        assert_eq!(totals["Food"], "20.00".parse().unwrap());
    }

    #[test]
    fn aggregation_is_case_sensitive() {
        let expenses = vec![expense("Food", "1"), expense("food", "1")];
        let totals = aggregate(&expenses);
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn sectors_are_contiguous_and_sum_to_a_full_circle() {
        let totals = totals(&[("Food", "30"), ("Shopping", "12.5"), ("Transport", "7.5")]);
        let sectors = layout(&totals);
        assert_eq!(sectors.len(), 3);
        assert_eq!(sectors[0].start_angle, START_ANGLE);
        for pair in sectors.windows(2) {
            assert!(
                (pair[1].start_angle - (pair[0].start_angle + pair[0].sweep_angle)).abs() < 1e-9
            );
        }
        let sweep_sum: f64 = sectors.iter().map(|sector| sector.sweep_angle).sum();
        assert!((sweep_sum - 360.0).abs() < 1e-9);
    }

    #[test]
    fn empty_and_zero_totals_produce_no_sectors() {
        assert!(layout(&BTreeMap::new()).is_empty());
        assert!(layout(&totals(&[("X", "0")])).is_empty());
    }

    #[test]
    fn food_and_transport_split_270_to_90() {
        let totals = totals(&[("Food", "30.0"), ("Transport", "10.0")]);
        let sectors = layout(&totals);
        assert_eq!(sectors.len(), 2);
        assert_eq!(sectors[0].label, "Food");
        assert_eq!(sectors[0].start_angle, -90.0);
        assert_eq!(sectors[0].sweep_angle, 270.0);
        assert_eq!(sectors[1].label, "Transport");
        assert_eq!(sectors[1].start_angle, 180.0);
        assert_eq!(sectors[1].sweep_angle, 90.0);
    }

    #[test]
    fn zero_amount_categories_are_skipped() {
        let totals = totals(&[("Food", "30"), ("Transport", "0")]);
        let sectors = layout(&totals);
        assert_eq!(sectors.len(), 1);
        assert_eq!(sectors[0].label, "Food");
        assert_eq!(sectors[0].sweep_angle, 360.0);

        let legend = legend(&totals);
        assert_eq!(legend.len(), 1);
        assert_eq!(legend[0].0, "Food");
    }

    #[test]
    fn negative_entries_do_not_inflate_the_circle() {
        let totals = totals(&[("Food", "30"), ("Refund", "-10")]);
        let sectors = layout(&totals);
        assert_eq!(sectors.len(), 1);
        assert_eq!(sectors[0].label, "Food");
        assert_eq!(sectors[0].sweep_angle, 360.0);

        let totals = self::totals(&[("Food", "30"), ("Refund", "-10"), ("Transport", "10")]);
        let sweep_sum: f64 = layout(&totals).iter().map(|sector| sector.sweep_angle).sum();
        assert!((sweep_sum - 360.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_categories_fall_back_to_gray() {
        assert_eq!(category_color("Food"), Rgb(0xE5, 0x73, 0x73));
        assert_eq!(category_color("Concert tickets"), FALLBACK_COLOR);
    }
}
