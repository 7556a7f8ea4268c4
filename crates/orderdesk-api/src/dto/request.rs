//! Request DTOs with validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use orderdesk_core::error::AppError;
use orderdesk_entity::item::NewItem;
use orderdesk_service::SignupRequest;

/// Runs derive-based validation and folds the failures into one message.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value for {field}"),
                })
            })
            .collect();
        messages.sort();
        AppError::validation(messages.join("; "))
    })
}

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupBody {
    /// Display name.
    #[validate(length(min = 3, message = "Name must be at least 3 characters long"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl From<SignupBody> for SignupRequest {
    fn from(body: SignupBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            password: body.password,
        }
    }
}

/// OAuth2-style password form for `POST /auth/token`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SigninForm {
    /// The user's email.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create order request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderBody {
    /// Owner of the new order.
    #[serde(alias = "user_id")]
    pub user_uid: Uuid,
}

/// Add item request body. Omitted fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddItemBody {
    /// Item name.
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    /// Quantity.
    #[serde(default)]
    #[validate(range(min = 0, message = "Item quantity cannot be negative"))]
    pub quantity: i32,
    /// Flavor.
    #[serde(default)]
    pub flavor: String,
    /// Size.
    #[serde(default)]
    pub size: String,
    /// Price of one unit.
    #[serde(default)]
    pub unit_price: Decimal,
}

impl From<AddItemBody> for NewItem {
    fn from(body: AddItemBody) -> Self {
        Self {
            name: body.name,
            quantity: body.quantity,
            flavor: body.flavor,
            size: body.size,
            unit_price: body.unit_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_body_validation() {
        let ok = SignupBody {
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            password: "abcd1234".to_string(),
        };
        assert!(validate_body(&ok).is_ok());

        let bad = SignupBody {
            name: "An".to_string(),
            email: "nope".to_string(),
            password: "abcd1234".to_string(),
        };
        let err = validate_body(&bad).unwrap_err();
        assert!(err.message.contains("Invalid email format"));
        assert!(err.message.contains("at least 3 characters"));
    }

    #[test]
    fn test_add_item_defaults() {
        let body: AddItemBody = serde_json::from_str(r#"{"name":"cola"}"#).unwrap();
        assert_eq!(body.quantity, 0);
        assert_eq!(body.flavor, "");
        assert_eq!(body.unit_price, Decimal::ZERO);

        let body: AddItemBody =
            serde_json::from_str(r#"{"name":"cola","quantity":2,"unit_price":1.5}"#).unwrap();
        let item = NewItem::from(body);
        assert_eq!(item.line_total().unwrap(), "3.0".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_create_order_accepts_both_names() {
        let id = Uuid::new_v4();
        let a: CreateOrderBody =
            serde_json::from_str(&format!(r#"{{"user_uid":"{id}"}}"#)).unwrap();
        let b: CreateOrderBody =
            serde_json::from_str(&format!(r#"{{"user_id":"{id}"}}"#)).unwrap();
        assert_eq!(a.user_uid, id);
        assert_eq!(b.user_uid, id);
    }
}
