use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::pricing;

use super::Order;

/// One receipt line: every entry sharing a name, collapsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub name: String,
    pub count: usize,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub lines: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total_with_tax: Decimal,
}

/// Receipt for a placed order: groups alphabetically, lines by item name,
/// and a grand total made of the per-group taxed totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub order_id: u64,
    pub groups: Vec<GroupSummary>,
    pub order_total: Decimal,
}

impl OrderSummary {
    pub fn from_order(order: &Order, tax_rate: Decimal) -> Self {
        let mut names: Vec<&String> = order.groups().keys().collect();
        names.sort();

        let groups: Vec<GroupSummary> = names
            .into_iter()
            .map(|name| {
                let items = &order.groups()[name];
                // keyed by name, unit price taken from the first occurrence
                let mut by_name: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
                for item in items {
                    by_name.entry(item.name.as_str()).or_insert((0, item.price)).0 += 1;
                }
                let lines = by_name
                    .into_iter()
                    .map(|(name, (count, price))| LineItem {
                        name: name.to_string(),
                        count,
                        line_total: price * Decimal::from(count),
                    })
                    .collect();
                let subtotal = pricing::subtotal(items);
                GroupSummary {
                    name: name.clone(),
                    lines,
                    subtotal,
                    tax: pricing::tax_amount(subtotal, tax_rate),
                    total_with_tax: pricing::total_with_tax(subtotal, tax_rate),
                }
            })
            .collect();

        let order_total = groups.iter().map(|g| g.total_with_tax).sum();
        Self {
            order_id: order.id,
            groups,
            order_total,
        }
    }
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order #{} Details", self.order_id)?;
        for group in &self.groups {
            writeln!(f, "Group: {}", group.name)?;
            for line in &group.lines {
                writeln!(
                    f,
                    "• {}x {} - ${}",
                    line.count,
                    line.name,
                    pricing::to_cents(line.line_total)
                )?;
            }
            writeln!(f, "Subtotal: ${}", pricing::to_cents(group.subtotal))?;
            writeln!(f, "Total with Tax: ${}", pricing::to_cents(group.total_with_tax))?;
            writeln!(f)?;
        }
        write!(f, "Order Total: ${}", pricing::to_cents(self.order_total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FoodItem;
    use crate::groups::GroupMap;
    use crate::pricing::TAX_RATE;
    use rust_decimal_macros::dec;

    fn sample_order() -> Order {
        let pizza = FoodItem::new(1, "Pizza", dec!(12.99));
        let taco = FoodItem::new(8, "Taco", dec!(3.99));
        let mut groups = GroupMap::new();
        groups.insert("Lunch".into(), vec![pizza.clone(), taco.clone(), pizza]);
        groups.insert("Dinner".into(), vec![taco]);
        Order::new(4, groups)
    }

    #[test]
    fn groups_sorted_and_lines_collapsed() {
        let summary = OrderSummary::from_order(&sample_order(), TAX_RATE);
        let names: Vec<&str> = summary.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Dinner", "Lunch"]);

        let lunch = &summary.groups[1];
        assert_eq!(
            lunch.lines,
            vec![
                LineItem { name: "Pizza".into(), count: 2, line_total: dec!(25.98) },
                LineItem { name: "Taco".into(), count: 1, line_total: dec!(3.99) },
            ]
        );
        assert_eq!(lunch.subtotal, dec!(29.97));
        assert_eq!(lunch.tax, dec!(3.8961));
        assert_eq!(lunch.subtotal + lunch.tax, lunch.total_with_tax);
    }

    #[test]
    fn order_total_sums_taxed_group_totals() {
        let summary = OrderSummary::from_order(&sample_order(), TAX_RATE);
        // (29.97 + 3.99) * 1.13
        assert_eq!(summary.order_total, dec!(38.3748));
    }

    #[test]
    fn renders_receipt_text() {
        let text = OrderSummary::from_order(&sample_order(), TAX_RATE).to_string();
        assert!(text.starts_with("Order #4 Details\n"));
        assert!(text.contains("Group: Lunch\n• 2x Pizza - $25.98\n• 1x Taco - $3.99\n"));
        assert!(text.contains("Subtotal: $29.97\nTotal with Tax: $33.87\n"));
        assert!(text.ends_with("Order Total: $38.37"));
    }
}
