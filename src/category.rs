//! The fixed set of categories a transaction can belong to.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// The category of a transaction.
///
/// The variants are declared in display order, and the derived [Ord] follows
/// that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Groceries, takeaways, eating out.
    Food,
    /// Public transport, fuel, parking.
    Transport,
    /// Entertainment and hobbies.
    Fun,
    /// Power, water, internet, phone.
    Utilities,
    /// Anything else.
    Misc,
    /// Legacy category for income recorded as a transaction.
    ///
    /// Income is now recorded with [crate::Income], this variant only exists
    /// so that older rows can still be read.
    Income,
}

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Fun,
        Category::Utilities,
        Category::Misc,
        Category::Income,
    ];

    /// The categories that new transactions may use.
    pub const EXPENSES: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Fun,
        Category::Utilities,
        Category::Misc,
    ];

    /// The canonical name, e.g. "FOOD". This is what gets stored and serialized.
    pub fn name(self) -> &'static str {
        match self {
            Category::Food => "FOOD",
            Category::Transport => "TRANSPORT",
            Category::Fun => "FUN",
            Category::Utilities => "UTILITIES",
            Category::Misc => "MISC",
            Category::Income => "INCOME",
        }
    }

    /// The human friendly label, e.g. "Food".
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Fun => "Fun",
            Category::Utilities => "Utilities",
            Category::Misc => "Misc",
            Category::Income => "Income",
        }
    }

    /// Whether new transactions may be recorded with this category.
    pub fn is_expense(self) -> bool {
        self != Category::Income
    }
}

/// The names of all categories in declaration order.
pub fn category_names() -> Vec<&'static str> {
    Category::ALL.iter().map(|category| category.name()).collect()
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parse either the name ("FOOD") or the label ("Food"), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        Category::ALL
            .into_iter()
            .find(|category| {
                category.name().eq_ignore_ascii_case(trimmed)
                    || category.label().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| Error::InvalidCategory(s.to_owned()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.name()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
