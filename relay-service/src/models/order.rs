use crate::services::schema::{Schema, StringFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One cart line as the client sent it. Fields are kept loose and only ever
/// rendered into the order prompt.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
}

impl CartItem {
    pub fn new(name: impl Into<Value>, quantity: impl Into<Value>) -> Self {
        Self {
            name: Some(name.into()),
            quantity: Some(quantity.into()),
        }
    }
}

/// Text form used inside prompts: strings unquoted, absent fields as `undefined`.
fn prompt_text(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// `null`, `false`, `0` and `""` count as not provided.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Raw POST body; either field may be absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequestBody {
    #[serde(default)]
    pub order_details: Option<Value>,
    #[serde(default)]
    pub cart: Option<Vec<CartItem>>,
}

impl OrderRequestBody {
    /// Both fields present; blank details count as absent.
    pub fn into_request(self) -> Option<OrderRequest> {
        match (self.order_details, self.cart) {
            (Some(details), Some(cart)) if !is_blank(&details) => Some(OrderRequest {
                order_details: details,
                cart,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    /// Opaque customer data, passed through to the prompt.
    pub order_details: Value,
    pub cart: Vec<CartItem>,
}

impl OrderRequest {
    /// `name xQty` per line item, joined with `, `.
    pub fn cart_summary(&self) -> String {
        self.cart
            .iter()
            .map(|item| {
                format!(
                    "{} x{}",
                    prompt_text(item.name.as_ref()),
                    prompt_text(item.quantity.as_ref())
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_number: String,
    pub estimated_delivery_time: String,
}

impl OrderConfirmation {
    pub fn schema() -> Schema {
        Schema::object(vec![
            (
                "orderNumber",
                Schema::string().with_format(StringFormat::OrderNumber),
            ),
            ("estimatedDeliveryTime", Schema::string()),
        ])
    }
}
