//! The form fields and form data shared by the new and edit transaction pages.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::{Transaction, TransactionBuilder, TransactionType},
};

/// The form data for creating or editing a transaction.
///
/// The amount and type are kept as the raw text that was submitted so that a
/// blank or malformed value is reported by [TransactionForm::validate] as an
/// alert instead of being rejected by the form extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionForm {
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
    /// The value of the transaction in dollars.
    #[serde(default)]
    pub amount: Option<String>,
    /// Whether the money came in or went out, either "credit" or "debit".
    #[serde(default, rename = "type")]
    pub type_: Option<String>,
}

fn parse_type(value: &str) -> Option<TransactionType> {
    match value {
        "credit" => Some(TransactionType::Credit),
        "debit" => Some(TransactionType::Debit),
        _ => None,
    }
}

impl TransactionForm {
    /// Check the form values and convert them into a [TransactionBuilder].
    ///
    /// The description is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingField] if the amount or type is blank or the
    /// type is not recognised, [Error::EmptyDescription] if the description is
    /// blank and [Error::InvalidAmount] if the amount is not a number greater
    /// than zero.
    pub fn validate(self) -> Result<TransactionBuilder, Error> {
        let amount_text = self.amount.as_deref().map(str::trim).unwrap_or_default();
        let type_ = self.type_.as_deref().map(str::trim).and_then(parse_type);

        if amount_text.is_empty() {
            return Err(Error::MissingField);
        }

        let Some(type_) = type_ else {
            return Err(Error::MissingField);
        };

        let description = self.description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        let amount = match amount_text.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => amount,
            _ => return Err(Error::InvalidAmount(amount_text.to_owned())),
        };

        Ok(Transaction::build(amount, type_, description))
    }
}

/// The values to prefill the transaction form fields with.
#[derive(Debug, Default)]
pub struct TransactionFormDefaults<'a> {
    pub description: Option<&'a str>,
    pub amount: Option<f64>,
    pub type_: Option<TransactionType>,
}

impl<'a> From<&'a Transaction> for TransactionFormDefaults<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        Self {
            description: Some(&transaction.description),
            amount: Some(transaction.amount),
            type_: Some(transaction.type_),
        }
    }
}

fn type_radio(type_: TransactionType, checked: bool) -> Markup {
    let id = format!("transaction-type-{}", type_.as_str());

    html! {
        div class="flex items-center gap-3"
        {
            input
                name="type"
                id=(id)
                type="radio"
                value=(type_.as_str())
                checked[checked]
                required
                tabindex="0"
                class=(FORM_RADIO_INPUT_STYLE);

            label
                for=(id)
                class=(FORM_RADIO_LABEL_STYLE)
            {
                (type_.label())
            }
        }
    }
}

pub fn transaction_form_fields(defaults: &TransactionFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));
    let type_ = defaults.type_.unwrap_or(TransactionType::Debit);

    html! {
        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                value=[defaults.description]
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
                    placeholder="0.00"
                    min="0.01"
                    required
                    value=[amount_str.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Transaction type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                (type_radio(TransactionType::Credit, type_ == TransactionType::Credit))
                (type_radio(TransactionType::Debit, type_ == TransactionType::Debit))
            }
        }
    }
}
