use axum::Json;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{ApiError, ApiResult},
    models::user_models::{NewUser, UserChangeset},
};

/// Decodes a request body that must be a non-empty JSON object.
pub fn parse_body<T: DeserializeOwned>(payload: Option<Json<Value>>) -> ApiResult<T> {
    match payload {
        Some(Json(Value::Object(fields))) if !fields.is_empty() => {
            serde_json::from_value(Value::Object(fields)).map_err(|_| ApiError::InvalidJson)
        }
        _ => Err(ApiError::InvalidJson),
    }
}

/// Stored text for a JSON value. Strings are kept verbatim, other values use
/// their JSON rendering (`true`, `42`).
fn text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Text of a value that counts as provided; falsy values count as absent.
fn truthy_text(value: Option<Value>) -> Option<String> {
    value.filter(|v| !is_falsy(v)).and_then(text)
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(rename = "StudentName")]
    pub student_name: Option<Value>,
    #[serde(rename = "Email")]
    pub email: Option<Value>,
    #[serde(rename = "Committee")]
    pub committee: Option<Value>,
    #[serde(rename = "PhoneNumber")]
    pub phone_number: Option<Value>,
    #[serde(rename = "IsAccepted")]
    pub is_accepted: Option<Value>,
    #[serde(rename = "CommuintyID")]
    pub commuinty_id: Option<Value>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = ApiError;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        match (
            truthy_text(req.student_name),
            truthy_text(req.email),
            truthy_text(req.committee),
        ) {
            (Some(student_name), Some(email), Some(committee)) => Ok(NewUser::new(
                student_name,
                email,
                committee,
                req.phone_number.and_then(text),
                truthy_text(req.is_accepted),
                req.commuinty_id.and_then(text),
            )),
            _ => Err(ApiError::Validation(
                "StudentName, Email, and Committee are required",
            )),
        }
    }
}

/// Body of a partial update. Any other key in the JSON object is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(rename = "Email")]
    pub email: Option<Value>,
    #[serde(rename = "Committee")]
    pub committee: Option<Value>,
    #[serde(rename = "PhoneNumber")]
    pub phone_number: Option<Value>,
    #[serde(rename = "IsAccepted")]
    pub is_accepted: Option<Value>,
    #[serde(rename = "CommuintyID")]
    pub commuinty_id: Option<Value>,
}

impl TryFrom<UpdateUserRequest> for UserChangeset {
    type Error = ApiError;

    fn try_from(req: UpdateUserRequest) -> Result<Self, Self::Error> {
        let changes = UserChangeset::default()
            .email(truthy_text(req.email))
            .committee(truthy_text(req.committee))
            .phone_number(truthy_text(req.phone_number))
            .is_accepted(truthy_text(req.is_accepted))
            .commuinty_id(truthy_text(req.commuinty_id));

        if changes.is_empty() {
            return Err(ApiError::Validation("At least one field is required"));
        }
        Ok(changes)
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ConnectionCheckResponse {
    pub message: &'static str,
    pub result: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_all_three_fields() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"StudentName": "Alice", "Email": "a@b.c"}"#).unwrap();
        let err = NewUser::try_from(req).unwrap_err();
        assert_eq!(
            err.to_string(),
            "StudentName, Email, and Committee are required"
        );
    }

    #[test]
    fn create_treats_empty_required_field_as_missing() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"StudentName": "", "Email": "a@b.c", "Committee": "Media"}"#,
        )
        .unwrap();
        assert!(NewUser::try_from(req).is_err());
    }

    #[test]
    fn create_builds_row_from_body() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"StudentName": "Alice", "Email": "a@b.c", "Committee": "Media", "PhoneNumber": "2010"}"#,
        )
        .unwrap();
        let user = NewUser::try_from(req).unwrap();
        assert_eq!(user.student_name, "Alice");
        assert_eq!(user.whatspplink, "https://wa.me/2010");
        assert_eq!(user.is_accepted, "false");
        assert_eq!(user.commuinty_id, "None");
    }

    #[test]
    fn update_ignores_unknown_and_identity_columns() {
        let req: UpdateUserRequest = serde_json::from_str(
            r#"{"id": 99, "StudentName": "Mallory", "whatspplink": "x", "Committee": "HR"}"#,
        )
        .unwrap();
        let changes = UserChangeset::try_from(req).unwrap();
        assert_eq!(
            changes,
            UserChangeset {
                committee: Some("HR".to_string()),
                ..UserChangeset::default()
            }
        );
    }

    #[test]
    fn update_without_usable_fields_is_rejected() {
        let req: UpdateUserRequest =
            serde_json::from_str(r#"{"Email": "", "StudentName": "Bob"}"#).unwrap();
        let err = UserChangeset::try_from(req).unwrap_err();
        assert_eq!(err.to_string(), "At least one field is required");
    }

    #[test]
    fn update_skips_falsy_values_and_stringifies_the_rest() {
        let req: UpdateUserRequest = serde_json::from_str(
            r#"{"Committee": "Ops", "IsAccepted": false, "Email": 0, "PhoneNumber": 2010, "CommuintyID": true}"#,
        )
        .unwrap();
        let changes = UserChangeset::try_from(req).unwrap();
        assert_eq!(
            changes,
            UserChangeset {
                committee: Some("Ops".to_string()),
                phone_number: Some("2010".to_string()),
                commuinty_id: Some("true".to_string()),
                ..UserChangeset::default()
            }
        );
    }

    #[test]
    fn create_accepts_non_string_values() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"StudentName": "Alice", "Email": "a@b.c", "Committee": "Media", "PhoneNumber": 201001234567, "IsAccepted": false, "CommuintyID": null}"#,
        )
        .unwrap();
        let user = NewUser::try_from(req).unwrap();
        assert_eq!(user.phone_number.as_deref(), Some("201001234567"));
        assert_eq!(user.whatspplink, "https://wa.me/201001234567");
        assert_eq!(user.is_accepted, "false");
        assert_eq!(user.commuinty_id, "None");
    }

    #[test]
    fn body_must_be_a_non_empty_object() {
        let parse = |value: Option<Value>| parse_body::<UpdateUserRequest>(value.map(Json));

        assert!(matches!(parse(None), Err(ApiError::InvalidJson)));
        assert!(matches!(parse(Some(serde_json::json!({}))), Err(ApiError::InvalidJson)));
        assert!(matches!(parse(Some(serde_json::json!([1]))), Err(ApiError::InvalidJson)));
        assert!(parse(Some(serde_json::json!({"Email": "x"}))).is_ok());
    }
}
