use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::catalog::FoodItem;
use crate::error::{Missing, StoreError};
use crate::groups::FAVORITES_GROUP;
use crate::manager::DataManager;
use crate::pricing::{tax_amount, to_cents};

use super::dto::{Command, HELP};

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Quit,
}

/// Run one command against the store and render the result.
pub fn handle(store: &mut DataManager, cmd: Command) -> Outcome {
    match execute(store, cmd) {
        Ok(outcome) => outcome,
        Err(e) => Outcome::Print(format!("error: {e}")),
    }
}

fn execute(store: &mut DataManager, cmd: Command) -> Result<Outcome, StoreError> {
    let text = match cmd {
        Command::Menu => render_menu(store.food_items()),
        Command::Groups => render_groups(store),
        Command::Show(group) => {
            if !store.groups().contains(&group) {
                return Err(StoreError::NotFound(Missing::Group(group)));
            }
            render_group(store, &group)
        }
        Command::Create(group) => {
            store.create_empty_group(&group)?;
            format!("created '{group}'")
        }
        Command::Add { item_id, group, quantity } => {
            let item = lookup(store, item_id)?;
            let group = group.unwrap_or_else(|| FAVORITES_GROUP.to_string());
            store.add_to_group(&item, &group, quantity)?;
            format!("added {quantity}x {} to '{group}'", item.name)
        }
        Command::Remove { item_id, group } => {
            let item = lookup(store, item_id)?;
            store.remove_from_group(&item, &group)?;
            format!("removed {} from '{group}'", item.name)
        }
        Command::Drop(group) => {
            store.remove_group(&group)?;
            format!("deleted '{group}'")
        }
        Command::Rename { from, to } => {
            store.rename_group(&from, &to)?;
            format!("renamed '{from}' to '{to}'")
        }
        Command::Fav(item_id) => {
            let now = store.toggle_favorite(item_id)?;
            let name = store.food_item(item_id).map(|i| i.name.as_str()).unwrap_or("?");
            if now {
                format!("{name} is now a favorite")
            } else {
                format!("{name} is no longer a favorite")
            }
        }
        Command::Favorites => {
            let favorites = store.favorite_items();
            if favorites.is_empty() {
                "no favorites yet".to_string()
            } else {
                render_menu(&favorites)
            }
        }
        Command::Order => {
            let before = store.order_history().len();
            let id = store.place_order();
            if store.order_history().len() > before {
                format!("order #{id} placed")
            } else {
                "nothing to order".to_string()
            }
        }
        Command::History { json } => render_history(store, json),
        Command::Receipt(id) => store.order_summary(id)?.to_string(),
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Print(text))
}

fn lookup(store: &DataManager, item_id: u32) -> Result<FoodItem, StoreError> {
    store
        .food_item(item_id)
        .cloned()
        .ok_or(StoreError::NotFound(Missing::Item(item_id)))
}

fn render_menu(items: &[FoodItem]) -> String {
    let mut out = String::new();
    for item in items {
        let star = if item.is_favorite { " *" } else { "" };
        let _ = writeln!(out, "{:>3}  {:<12} ${}{star}", item.id, item.name, item.price);
    }
    out.trim_end().to_string()
}

fn render_group(store: &DataManager, group: &str) -> String {
    let subtotal = store.calculate_subtotal(group);
    let mut out = format!("{group}\n");
    for (item, count) in store.item_counts(group) {
        let line_total = item.price * Decimal::from(count);
        let _ = writeln!(out, "  {count}x {} - ${}", item.name, to_cents(line_total));
    }
    let _ = write!(
        out,
        "  Subtotal: ${}  Tax: ${}  Total with Tax: ${}",
        to_cents(subtotal),
        to_cents(tax_amount(subtotal, store.tax_rate())),
        to_cents(store.calculate_total_with_tax(group))
    );
    out
}

fn render_groups(store: &DataManager) -> String {
    store
        .groups()
        .iter()
        .map(|g| render_group(store, g))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_history(store: &DataManager, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(store.order_history())
            .unwrap_or_else(|e| format!("error: {e}"));
    }
    let ids = store.order_ids_newest_first();
    if ids.is_empty() {
        return "no orders yet".to_string();
    }
    let mut out = String::new();
    for id in ids {
        if let Ok(summary) = store.order_summary(id) {
            let groups: Vec<&str> = summary.groups.iter().map(|g| g.name.as_str()).collect();
            let _ = writeln!(
                out,
                "#{id}  {}  ${}",
                groups.join(", "),
                to_cents(summary.order_total)
            );
        }
    }
    out.trim_end().to_string()
}
