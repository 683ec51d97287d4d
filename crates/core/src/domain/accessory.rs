use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque key assigned by the recommendation service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessoryId(pub String);

impl std::fmt::Display for AccessoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccessoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A recommendation item as produced by the scoring service.
///
/// This codebase never mutates an accessory; it is carried by reference
/// through cart and wishlist state. Scoring fields are nominally in [0, 1]
/// and are treated as read-only display data. Fields the service omits
/// deserialize to their defaults so older payloads remain readable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Accessory {
    pub accessory_id: AccessoryId,
    pub accessory_name: String,
    #[serde(default)]
    pub car_brand: String,
    #[serde(default)]
    pub car_model: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sentiment_score: f64,
    #[serde(default)]
    pub sentiment_label: String,
    #[serde(default)]
    pub quality_score: f64,
    #[serde(default)]
    pub dominant_emotion: String,
    #[serde(default)]
    pub final_score: f64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub compatible_cars: String,
    #[serde(default)]
    pub is_cross_compatible: Option<bool>,
    #[serde(default)]
    pub compatibility_note: Option<String>,
    #[serde(default)]
    pub top_reviews: Option<String>,
    #[serde(default)]
    pub key_strengths: Option<String>,
    #[serde(default)]
    pub key_weaknesses: Option<String>,
}

impl Accessory {
    /// Builds an accessory carrying only the fields a client can know
    /// up front. Authenticated sessions get the remaining fields filled in
    /// by the server-wins resync after the first remote write.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            accessory_id: AccessoryId(id.into()),
            accessory_name: name.into(),
            price,
            ..Self::default()
        }
    }
}

/// One cart entry. At most one line exists per distinct accessory id and a
/// persisted quantity is always at least 1; updates to zero remove the line.
///
/// The accessory fields are flattened on the wire and in durable storage, so
/// a serialized line is the accessory object plus a `quantity` field, the
/// shape the remote store uses for `GET /cart`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub accessory: Accessory,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.accessory.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Accessory, CartLine};

    #[test]
    fn cart_line_flattens_accessory_fields() {
        let line = CartLine {
            accessory: Accessory::new("ACC-1", "Seat Cover", Decimal::from(1200)),
            quantity: 2,
        };

        let json = serde_json::to_value(&line).expect("serialize");
        assert_eq!(json["accessory_id"], "ACC-1");
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn deserializes_service_payload_with_missing_optional_fields() {
        let raw = r#"{
            "accessory_id": "ACC-9",
            "accessory_name": "Floor Mats",
            "price": 899.5,
            "final_score": 0.82,
            "quantity": 3
        }"#;

        let line: CartLine = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(line.quantity, 3);
        assert_eq!(line.accessory.accessory_id.0, "ACC-9");
        assert_eq!(line.subtotal(), Decimal::new(26985, 1));
        assert!(line.accessory.compatibility_note.is_none());
    }
}
