use std::fmt::{self, Display};

use chrono::{DateTime, Local};
use inquire::validator::Validation;
use inquire::{required, Confirm, CustomType, DateSelect, Select, Text};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SpesaConfig;
use crate::errors::SpesaError;
use crate::receipt::RecognitionHandle;

/// Closed category set plus a free-text escape hatch. Persisted as a plain
/// string so the stored file stays a flat array of simple objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Utilities,
    Other(String),
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Food" => Self::Food,
            "Transport" => Self::Transport,
            "Shopping" => Self::Shopping,
            "Entertainment" => Self::Entertainment,
            "Utilities" => Self::Utilities,
            _ => Self::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.label().to_string()
    }
}

impl Category {
    pub fn label(&self) -> &str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Other(label) => label,
        }
    }

    fn options() -> Vec<&'static str> {
        vec![
            "Food",
            "Transport",
            "Shopping",
            "Entertainment",
            "Utilities",
            "Other",
        ]
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One spending event. Field names follow the persisted JSON format
/// (`imageUri`, `dateTime`); records written by older versions may lack
/// an `id` and get a fresh one on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub category: Category,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "imageUri", default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(rename = "dateTime", default = "now_rfc3339")]
    pub date_time: String,
}

pub fn now_rfc3339() -> String {
    Local::now().to_rfc3339()
}

impl Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:<13} {:>10.2}  {}",
            self.date_display(),
            self.category,
            self.amount,
            self.description.as_deref().unwrap_or("")
        )
    }
}

impl Expense {
    pub fn new(
        category: Category,
        amount: Decimal,
        description: Option<String>,
        image_uri: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            amount,
            description,
            image_uri,
            date_time: now_rfc3339(),
        }
    }

    /// The record's timestamp, if it is stored in the canonical RFC 3339
    /// format. Legacy values are opaque and yield `None`.
    pub fn timestamp(&self) -> Option<DateTime<Local>> {
        DateTime::parse_from_rfc3339(&self.date_time)
            .ok()
            .map(|timestamp| timestamp.with_timezone(&Local))
    }

    pub fn date_display(&self) -> String {
        match self.timestamp() {
            Some(timestamp) => timestamp.format("%Y-%m-%d %H:%M").to_string(),
            None => self.date_time.clone(),
        }
    }

    /// Interactive creation. Category and amount are prompted first so a
    /// pending receipt recognition can finish in the background; its text
    /// only seeds the description prompt, anything the user types wins.
    pub fn prompt_new(
        config: &SpesaConfig,
        image_uri: Option<String>,
        recognition: Option<RecognitionHandle>,
    ) -> Result<Self, SpesaError> {
        let category = prompt_category(None)?;
        let amount = money_amount(config, None)?;
        let recognized = recognition.and_then(RecognitionHandle::try_text);
        let description = Text::new("Description:")
            .with_initial_value(recognized.as_deref().unwrap_or(""))
            .prompt()?;
        let description = (!description.is_empty()).then_some(description);

        let expense = Self::new(category, amount, description, image_uri);
        if Confirm::new("Save this expense?")
            .with_default(true)
            .prompt()?
        {
            Ok(expense)
        } else {
            Err(SpesaError::Aborted)
        }
    }

    /// Interactive edit: every prompt starts from the current value.
    /// The id and the receipt image are kept, the timestamp keeps its
    /// time of day when only the date changes.
    pub fn prompt_edit(&self, config: &SpesaConfig) -> Result<Self, SpesaError> {
        let category = prompt_category(Some(&self.category))?;
        let amount = money_amount(config, Some(self.amount))?;
        let current_date = self
            .timestamp()
            .map(|timestamp| timestamp.date_naive())
            .unwrap_or_else(|| Local::now().date_naive());
        let date = DateSelect::new("Date:").with_default(current_date).prompt()?;
        let description = Text::new("Description:")
            .with_initial_value(self.description.as_deref().unwrap_or(""))
            .prompt()?;
        let description = (!description.is_empty()).then_some(description);

        let time = self
            .timestamp()
            .map(|timestamp| timestamp.time())
            .unwrap_or_else(|| Local::now().time());
        let date_time = date
            .and_time(time)
            .and_local_timezone(Local)
            .earliest()
            .map(|timestamp| timestamp.to_rfc3339())
            .unwrap_or_else(now_rfc3339);

        let edited = Self {
            id: self.id,
            category,
            amount,
            description,
            image_uri: self.image_uri.clone(),
            date_time,
        };
        if Confirm::new("Save these changes?")
            .with_default(true)
            .prompt()?
        {
            Ok(edited)
        } else {
            Err(SpesaError::Aborted)
        }
    }
}

fn prompt_category(current: Option<&Category>) -> Result<Category, SpesaError> {
    let options = Category::options();
    let start = current
        .and_then(|category| options.iter().position(|option| *option == category.label()))
        .unwrap_or(0);
    let choice = Select::new("Category:", options)
        .with_starting_cursor(start)
        .prompt()?;
    let label = if choice == "Other" {
        Text::new("Other category:")
            .with_validator(required!("Require non-empty category"))
            .prompt()?
    } else {
        choice.to_string()
    };
    Ok(Category::from(label))
}

pub fn money_amount(
    config: &SpesaConfig,
    default: Option<Decimal>,
) -> Result<Decimal, SpesaError> {
    let currency = config.currency;
    let formatter = move |decimal: Decimal| format!("{:.2}{}", decimal, currency);
    let help = format!("Type the amount in {currency} using a decimal point as a separator");
    let mut prompt = CustomType::new("Amount:")
        .with_formatter(&formatter)
        .with_error_message("Please type a valid number")
        .with_help_message(&help)
        .with_validator(|value: &Decimal| {
            if *value > Decimal::ZERO {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("The amount must be positive".into()))
            }
        });
    if let Some(default) = default {
        prompt = prompt.with_default(default);
    }
    Ok(prompt.prompt()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_the_closed_set() {
        assert_eq!(Category::from("Food".to_string()), Category::Food);
        assert_eq!(
            Category::from("Snacks".to_string()),
            Category::Other("Snacks".to_string())
        );
        // exact string match, case-sensitive
        assert_eq!(
            Category::from("food".to_string()),
            Category::Other("food".to_string())
        );
    }

    #[test]
    fn persisted_format_uses_the_original_field_names() {
        let expense = Expense::new(
            Category::Food,
            Decimal::new(1250, 2),
            Some("lunch".to_string()),
            Some("receipts/lunch.jpg".to_string()),
        );
        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(value["category"], "Food");
        assert!(value["amount"].is_number());
        assert_eq!(value["imageUri"], "receipts/lunch.jpg");
        assert!(value["dateTime"].is_string());
    }

    #[test]
    fn optional_fields_are_absent_when_unset() {
        let expense = Expense::new(Category::Transport, Decimal::ONE, None, None);
        let value = serde_json::to_value(&expense).unwrap();
        assert!(value.get("description").is_none());
        assert!(value.get("imageUri").is_none());
    }

    #[test]
    fn records_without_an_id_get_one_on_load() {
        let raw = r#"{"category": "Food", "amount": 3.5, "dateTime": "2025-03-14T12:30:00+01:00"}"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert!(!expense.id.is_nil());
        assert!(expense.timestamp().is_some());
    }

    #[test]
    fn legacy_date_strings_stay_opaque() {
        let mut expense = Expense::new(Category::Food, Decimal::ONE, None, None);
        expense.date_time = "2025-03-14 (Friday) 02:30 PM".to_string();
        assert!(expense.timestamp().is_none());
        assert_eq!(expense.date_display(), "2025-03-14 (Friday) 02:30 PM");
    }
}
