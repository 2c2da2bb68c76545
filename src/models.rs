use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored contact row, as returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birthday: NaiveDate,
    pub additional_data: Option<String>,
}

/// Body of `POST /contacts/`.
///
/// Email and phone number are opaque text; only the birthday is parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birthday: NaiveDate,
    #[serde(default)]
    pub additional_data: Option<String>,
}

/// Body of `PUT /contacts/{id}`. Only fields the caller supplied are written.
///
/// `additional_data` distinguishes "omitted" (`None`) from an explicit
/// `null` (`Some(None)`), which clears the column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContact {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub additional_data: Option<Option<String>>,
}

impl UpdateContact {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.birthday.is_none()
            && self.additional_data.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}
