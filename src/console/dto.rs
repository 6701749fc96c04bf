use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Menu,
    Groups,
    Show(String),
    Create(String),
    Add {
        item_id: u32,
        group: Option<String>, // None = Favorites
        quantity: usize,
    },
    Remove { item_id: u32, group: String },
    Drop(String),
    Rename { from: String, to: String },
    Fav(u32),
    Favorites,
    Order,
    History { json: bool },
    Receipt(u64),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
menu                              list the menu
groups                            list groups with totals
show <group>                      items of one group
create <group>                    create an empty group
add <item-id> [to <group>] [x<n>] add to a group (default Favorites)
remove <item-id> from <group>     remove every copy of an item
drop <group>                      delete a group
rename <old> to <new>             rename a group
fav <item-id>                     toggle favorite
favorites                         list favorite items
order                             place an order
history [--json]                  order history, newest first
receipt <order-id>                order details
quit";

/// Split on whitespace; double quotes keep spaces inside one word.
fn tokenize(line: &str) -> Vec<String> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(r#""([^"]*)"|(\S+)"#).unwrap();
    }
    TOKEN_RE
        .captures_iter(line)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn parse_id<T: FromStr>(raw: &str, usage: &'static str) -> Result<T, ParseError> {
    raw.parse().map_err(|_| ParseError::Usage(usage))
}

fn parse_quantity(raw: &str) -> Result<usize, ParseError> {
    const USAGE: &str = "add <item-id> [to <group>] [x<n>]";
    parse_id(raw.strip_prefix('x').unwrap_or(raw), USAGE)
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(line);
        let words: Vec<&str> = tokens.iter().map(String::as_str).collect();
        let Some(head) = words.first() else {
            return Err(ParseError::Empty);
        };
        let head = head.to_ascii_lowercase();

        let cmd = match (head.as_str(), &words[1..]) {
            ("menu", []) => Command::Menu,
            ("groups", []) => Command::Groups,
            ("show", [group]) => Command::Show(group.to_string()),
            ("show", _) => return Err(ParseError::Usage("show <group>")),
            ("create", [group]) => Command::Create(group.to_string()),
            ("create", _) => return Err(ParseError::Usage("create <group>")),
            ("add", [id, rest @ ..]) => {
                const USAGE: &str = "add <item-id> [to <group>] [x<n>]";
                let item_id = parse_id(id, USAGE)?;
                let (group, quantity) = match rest {
                    [] => (None, 1),
                    [qty] => (None, parse_quantity(qty)?),
                    ["to", group] => (Some(group.to_string()), 1),
                    ["to", group, qty] => (Some(group.to_string()), parse_quantity(qty)?),
                    _ => return Err(ParseError::Usage(USAGE)),
                };
                Command::Add { item_id, group, quantity }
            }
            ("remove", [id, "from", group]) => Command::Remove {
                item_id: parse_id(id, "remove <item-id> from <group>")?,
                group: group.to_string(),
            },
            ("remove", _) => return Err(ParseError::Usage("remove <item-id> from <group>")),
            ("drop", [group]) => Command::Drop(group.to_string()),
            ("drop", _) => return Err(ParseError::Usage("drop <group>")),
            ("rename", [from, "to", to]) => Command::Rename {
                from: from.to_string(),
                to: to.to_string(),
            },
            ("rename", _) => return Err(ParseError::Usage("rename <old> to <new>")),
            ("fav", [id]) => Command::Fav(parse_id(id, "fav <item-id>")?),
            ("fav", _) => return Err(ParseError::Usage("fav <item-id>")),
            ("favorites", []) => Command::Favorites,
            ("order", []) => Command::Order,
            ("history", []) => Command::History { json: false },
            ("history", ["--json"]) => Command::History { json: true },
            ("receipt", [id]) => Command::Receipt(parse_id(id, "receipt <order-id>")?),
            ("receipt", _) => return Err(ParseError::Usage("receipt <order-id>")),
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            (other, _) => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(cmd)
    }
}
