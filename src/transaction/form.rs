//! The request data for creating a transaction and the HTML form fields for it.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    category::Category,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    transaction::core::NewTransaction,
};

/// The data submitted to create a transaction, either as a form or as JSON.
///
/// All fields are optional so that a missing field is reported as
/// [Error::MissingField] rather than a generic deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionForm {
    /// What the money was spent on.
    #[serde(default)]
    pub name: Option<String>,
    /// The amount spent in dollars.
    #[serde(default)]
    pub amount: Option<f64>,
    /// The category name or label, e.g. "FOOD" or "Food".
    #[serde(default)]
    pub category: Option<String>,
    /// When the money was spent.
    #[serde(default)]
    pub date: Option<Date>,
}

impl TransactionForm {
    /// Check the submitted fields and convert them into a [NewTransaction].
    ///
    /// # Errors
    /// Returns:
    /// - [Error::MissingField] if a field is missing or the name is blank,
    /// - [Error::InvalidAmount] if the amount is NaN or infinite,
    /// - [Error::NegativeAmount] if the amount is below zero,
    /// - [Error::InvalidCategory] if the category is not a known category,
    /// - [Error::IncomeCategory] if the category is [Category::Income].
    pub fn validate(self) -> Result<NewTransaction, Error> {
        let name = self
            .name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .ok_or(Error::MissingField("name"))?;
        let amount = validate_amount(self.amount, "amount")?;
        let category = self
            .category
            .filter(|category| !category.trim().is_empty())
            .ok_or(Error::MissingField("category"))?
            .parse::<Category>()?;

        if !category.is_expense() {
            return Err(Error::IncomeCategory);
        }

        let date = self.date.ok_or(Error::MissingField("date"))?;

        Ok(NewTransaction {
            name,
            amount,
            category,
            date,
        })
    }
}

/// Check that a submitted dollar amount is present, finite and not negative.
///
/// `field` is the name of the form field reported when the amount is missing.
pub(crate) fn validate_amount(amount: Option<f64>, field: &'static str) -> Result<f64, Error> {
    let amount = amount.ok_or(Error::MissingField(field))?;

    if !amount.is_finite() {
        Err(Error::InvalidAmount(amount))
    } else if amount < 0.0 {
        Err(Error::NegativeAmount(amount))
    } else {
        Ok(amount)
    }
}

/// A `select` input listing `categories`, with `selected` pre-selected.
pub(crate) fn category_select(categories: &[Category], selected: Option<Category>) -> Markup {
    html! {
        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in categories {
                    @if Some(*category) == selected {
                        option value=(category.name()) selected { (category.label()) }
                    } @else {
                        option value=(category.name()) { (category.label()) }
                    }
                }
            }
        }
    }
}

/// The inputs for the new transaction form.
pub(crate) fn transaction_form_fields(today: Date) -> Markup {
    html! {
        div
        {
            label
                for="name"
                class=(FORM_LABEL_STYLE)
            {
                "Name"
            }

            input
                name="name"
                id="name"
                type="text"
                placeholder="Groceries"
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0"
                    placeholder="0.00"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        (category_select(&Category::EXPENSES, Some(Category::Food)))

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(today)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
