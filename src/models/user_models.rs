use diesel::prelude::*;
use serde::Serialize;

use crate::schema::users;

/// Value stored in `IsAccepted` when a new user does not supply one.
pub const DEFAULT_IS_ACCEPTED: &str = "false";
/// Value stored in `CommuintyID` when a new user does not supply one.
pub const DEFAULT_COMMUINTY_ID: &str = "None";
/// Stand-in for a missing phone number when building the WhatsApp link.
const MISSING_PHONE_NUMBER: &str = "None";

/// One row of the `users` table, serialized with the table's column names.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i64,
    #[serde(rename = "StudentName")]
    pub student_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Committee")]
    pub committee: String,
    #[serde(rename = "PhoneNumber")]
    pub phone_number: Option<String>,
    #[serde(rename = "IsAccepted")]
    pub is_accepted: Option<String>,
    #[serde(rename = "CommuintyID")]
    pub commuinty_id: Option<String>,
    pub whatspplink: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub student_name: String,
    pub email: String,
    pub committee: String,
    pub phone_number: Option<String>,
    pub is_accepted: String,
    pub commuinty_id: String,
    pub whatspplink: String,
}

impl NewUser {
    /// Builds the row to insert, filling in the stored defaults.
    ///
    /// An empty `is_accepted` counts as absent; an empty `commuinty_id` is
    /// kept. The WhatsApp link is derived once here and never recomputed.
    pub fn new(
        student_name: String,
        email: String,
        committee: String,
        phone_number: Option<String>,
        is_accepted: Option<String>,
        commuinty_id: Option<String>,
    ) -> Self {
        let whatspplink = whatsapp_link(phone_number.as_deref());
        Self {
            student_name,
            email,
            committee,
            phone_number,
            is_accepted: is_accepted
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_IS_ACCEPTED.to_string()),
            commuinty_id: commuinty_id.unwrap_or_else(|| DEFAULT_COMMUINTY_ID.to_string()),
            whatspplink,
        }
    }
}

pub fn whatsapp_link(phone_number: Option<&str>) -> String {
    format!(
        "https://wa.me/{}",
        phone_number.unwrap_or(MISSING_PHONE_NUMBER)
    )
}

/// Partial update of a user row.
///
/// Only the columns listed here can ever appear in the `SET` clause. `None`
/// fields are left out of the statement entirely, so the builder drops empty
/// strings instead of writing them.
#[derive(Debug, Default, Clone, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChangeset {
    pub email: Option<String>,
    pub committee: Option<String>,
    pub phone_number: Option<String>,
    pub is_accepted: Option<String>,
    pub commuinty_id: Option<String>,
}

impl UserChangeset {
    pub fn email(mut self, value: Option<String>) -> Self {
        self.email = non_empty(value);
        self
    }

    pub fn committee(mut self, value: Option<String>) -> Self {
        self.committee = non_empty(value);
        self
    }

    pub fn phone_number(mut self, value: Option<String>) -> Self {
        self.phone_number = non_empty(value);
        self
    }

    pub fn is_accepted(mut self, value: Option<String>) -> Self {
        self.is_accepted = non_empty(value);
        self
    }

    pub fn commuinty_id(mut self, value: Option<String>) -> Self {
        self.commuinty_id = non_empty(value);
        self
    }

    /// True when no column would be written.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.committee.is_none()
            && self.phone_number.is_none()
            && self.is_accepted.is_none()
            && self.commuinty_id.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(phone: Option<&str>, accepted: Option<&str>, community: Option<&str>) -> NewUser {
        NewUser::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "Media".to_string(),
            phone.map(str::to_string),
            accepted.map(str::to_string),
            community.map(str::to_string),
        )
    }

    #[test]
    fn new_user_fills_defaults() {
        let user = new_user(Some("201234567"), None, None);

        assert_eq!(user.is_accepted, "false");
        assert_eq!(user.commuinty_id, "None");
        assert_eq!(user.whatspplink, "https://wa.me/201234567");
    }

    #[test]
    fn new_user_keeps_supplied_values() {
        let user = new_user(Some("1"), Some("true"), Some("c-42"));

        assert_eq!(user.is_accepted, "true");
        assert_eq!(user.commuinty_id, "c-42");
    }

    #[test]
    fn empty_is_accepted_falls_back_but_empty_community_is_kept() {
        let user = new_user(None, Some(""), Some(""));

        assert_eq!(user.is_accepted, "false");
        assert_eq!(user.commuinty_id, "");
    }

    #[test]
    fn missing_phone_gives_placeholder_link() {
        let user = new_user(None, None, None);

        assert_eq!(user.phone_number, None);
        assert_eq!(user.whatspplink, "https://wa.me/None");
    }

    #[test]
    fn changeset_drops_empty_values() {
        let changeset = UserChangeset::default()
            .email(Some(String::new()))
            .committee(Some("Events".to_string()))
            .phone_number(None);

        assert_eq!(changeset.email, None);
        assert_eq!(changeset.committee.as_deref(), Some("Events"));
        assert!(!changeset.is_empty());
    }

    #[test]
    fn changeset_with_only_empty_values_is_empty() {
        let changeset = UserChangeset::default()
            .email(Some(String::new()))
            .is_accepted(Some(String::new()))
            .commuinty_id(None);

        assert!(changeset.is_empty());
    }

    #[test]
    fn user_serializes_with_column_names() {
        let user = User {
            id: 7,
            student_name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            committee: "Media".to_string(),
            phone_number: None,
            is_accepted: Some("false".to_string()),
            commuinty_id: Some("None".to_string()),
            whatspplink: Some("https://wa.me/None".to_string()),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 7,
                "StudentName": "Alice",
                "Email": "alice@example.com",
                "Committee": "Media",
                "PhoneNumber": null,
                "IsAccepted": "false",
                "CommuintyID": "None",
                "whatspplink": "https://wa.me/None",
            })
        );
    }
}
