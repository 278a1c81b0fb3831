//! Frontend Models
//!
//! Data structures matching the backend's JSON, plus the persisted cart entry.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Donation listed by a seller (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Offered amount (kg)
    #[serde(default, deserialize_with = "null_as_default")]
    pub cost: f64,
    /// Minutes until the donation expires, counted from `created_at`
    #[serde(default)]
    pub timer: Option<i64>,
    #[serde(default, with = "local_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    pub fn expires_at(&self) -> Option<NaiveDateTime> {
        match (self.timer, self.created_at) {
            // Out-of-range timers never expire
            (Some(timer), Some(created)) if timer != 0 => {
                TimeDelta::try_minutes(timer).and_then(|delta| created.checked_add_signed(delta))
            }
            _ => None,
        }
    }

    /// Products without a timer or creation time never expire
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expires_at().is_some_and(|expires| now > expires)
    }
}

/// Entry persisted in the cart or the collection list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredEntry")]
pub struct SelectionEntry {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: u32,
    pub added_at: Option<DateTime<Utc>>,
}

/// Entry as found in storage, including older collection entries that kept
/// the offered amount in `quantity` and had no `cost`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    id: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    cost: Option<f64>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    quantity: Option<f64>,
    #[serde(default)]
    added_at: Option<DateTime<Utc>>,
}

impl From<StoredEntry> for SelectionEntry {
    fn from(raw: StoredEntry) -> Self {
        let (cost, quantity) = match (raw.cost, raw.quantity) {
            (None, Some(amount)) => (amount, 1),
            (cost, quantity) => (cost.unwrap_or_default(), whole_quantity(quantity)),
        };
        Self {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            category: raw.category.unwrap_or_default(),
            description: raw.description,
            cost,
            image: raw.image,
            quantity,
            added_at: raw.added_at,
        }
    }
}

impl SelectionEntry {
    /// Snapshot of a product's display fields, quantity 1
    pub fn from_product(product: &Product, added_at: DateTime<Utc>) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            cost: product.cost,
            image: product.image.clone(),
            quantity: 1,
            added_at: Some(added_at),
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.cost * f64::from(self.quantity)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Seller,
    Buyer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Seller, Role::Buyer];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Seller => "SELLER",
            Role::Buyer => "BUYER",
        }
    }

    pub fn parse(raw: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    /// Name shown in the UI
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Seller => "Donor",
            Role::Buyer => "Recipient",
        }
    }

    pub fn login_path(self) -> &'static str {
        match self {
            Role::Admin => "admin/checkadminlogin",
            Role::Seller => "seller/checksellerlogin",
            Role::Buyer => "buyer/checkbuyerlogin",
        }
    }
}

/// Body returned by every login endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub admin: Option<Value>,
    #[serde(default)]
    pub seller: Option<Value>,
    #[serde(default)]
    pub buyer: Option<Value>,
}

impl LoginResponse {
    /// The profile matching the declared role, if both are present
    pub fn profile_for_role(&self) -> Option<(Role, &Value)> {
        let role = Role::parse(&self.role)?;
        let profile = match role {
            Role::Admin => self.admin.as_ref(),
            Role::Seller => self.seller.as_ref(),
            Role::Buyer => self.buyer.as_ref(),
        }?;
        (!profile.is_null()).then_some((role, profile))
    }
}

/// Login form body. Buyers log in by email, everyone else by username.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

impl Credentials {
    pub fn for_role(role: Role, identifier: &str, password: &str) -> Self {
        let identifier = identifier.trim().to_string();
        let (username, email) = match role {
            Role::Buyer => (None, Some(identifier)),
            Role::Admin | Role::Seller => (Some(identifier), None),
        };
        Self { username, email, password: password.to_string() }
    }
}

/// First of `username`, `name`, `email` found on a profile object
pub fn profile_display_name(profile: &Value) -> Option<String> {
    ["username", "name", "email"]
        .iter()
        .find_map(|field| profile.get(field).and_then(Value::as_str))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Stored quantities may be fractional or missing; anything below 1 reads as 1
fn whole_quantity(raw: Option<f64>) -> u32 {
    match raw {
        Some(q) if q.is_finite() && q >= 1.0 => q.round().min(f64::from(u32::MAX)) as u32,
        _ => 1,
    }
}

/// Backend timestamps: naive ISO strings (local time), RFC 3339 strings or
/// `[y, m, d, h, min, s, nanos]` arrays
mod local_timestamp {
    use super::*;
    use serde::Serializer;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(parse_timestamp_value))
    }

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value
            .map(|v| v.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            .serialize(serializer)
    }
}

fn parse_timestamp_value(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(raw) => parse_timestamp(raw),
        Value::Array(parts) => {
            let nums: Vec<i64> = parts.iter().filter_map(Value::as_i64).collect();
            let part = |i: usize| nums.get(i).copied().unwrap_or(0);
            if nums.len() < 3 {
                return None;
            }
            NaiveDate::from_ymd_opt(part(0) as i32, part(1) as u32, part(2) as u32)?
                .and_hms_nano_opt(part(3) as u32, part(4) as u32, part(5) as u32, part(6) as u32)
        }
        _ => None,
    }
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }
    raw.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_product_from_backend_json() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "name": "Rice",
            "category": null,
            "description": "Cooked rice",
            "cost": 2.5,
            "timer": 60,
            "createdAt": "2025-03-01T10:00:00",
            "sellerId": 3
        }))
        .unwrap();
        assert_eq!(product.category, "");
        assert_eq!(product.created_at, Some(at(10, 0)));
        assert_eq!(product.expires_at(), Some(at(11, 0)));
    }

    #[test]
    fn test_created_at_array_form() {
        let product: Product = serde_json::from_value(json!({
            "id": 1, "name": "Bread", "cost": 1, "createdAt": [2025, 3, 1, 9, 30, 0]
        }))
        .unwrap();
        assert_eq!(product.created_at, Some(at(9, 30)));
    }

    #[test]
    fn test_zero_timer_never_expires() {
        let product = Product {
            id: 1,
            name: "Soup".into(),
            category: "Others".into(),
            description: None,
            cost: 1.0,
            timer: Some(0),
            created_at: Some(at(0, 0)),
            image: None,
        };
        assert!(!product.is_expired(at(23, 59)));
    }

    #[test]
    fn test_out_of_range_timer_never_expires() {
        for timer in [200_000_000_000, i64::MAX, i64::MIN] {
            let product = Product {
                id: 1,
                name: "Soup".into(),
                category: "Others".into(),
                description: None,
                cost: 1.0,
                timer: Some(timer),
                created_at: Some(at(10, 0)),
                image: None,
            };
            assert_eq!(product.expires_at(), None);
            assert!(!product.is_expired(at(23, 59)));
        }
    }

    #[test]
    fn test_older_collection_entry_keeps_amount() {
        let entry: SelectionEntry = serde_json::from_value(json!({
            "id": 4, "name": "Milk", "category": "Dairy", "quantity": 2.5, "addedAt": "2025-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(entry.cost, 2.5);
        assert_eq!(entry.quantity, 1);
        assert_eq!(crate::listing::format_amount(entry.cost), "2.5 kg");
    }

    #[test]
    fn test_selection_entry_quantity_rounding() {
        let entry: SelectionEntry =
            serde_json::from_value(json!({ "id": 4, "name": "Milk", "cost": 2.0, "quantity": 2.6 })).unwrap();
        assert_eq!(entry.quantity, 3);
        assert_eq!(entry.cost, 2.0);

        let entry: SelectionEntry =
            serde_json::from_value(json!({ "id": 5, "name": null, "cost": 1.0, "quantity": 0 })).unwrap();
        assert_eq!(entry.quantity, 1);
        assert_eq!(entry.name, "");

        let entry: SelectionEntry = serde_json::from_value(json!({ "id": 6, "cost": 1.0 })).unwrap();
        assert_eq!(entry.quantity, 1);
    }

    #[test]
    fn test_selection_entry_serializes_camel_case() {
        let added = DateTime::parse_from_rfc3339("2025-03-01T10:00:00Z").unwrap().with_timezone(&Utc);
        let product = Product {
            id: 9,
            name: "Apples".into(),
            category: "Fruits".into(),
            description: None,
            cost: 3.0,
            timer: None,
            created_at: None,
            image: None,
        };
        let value = serde_json::to_value(SelectionEntry::from_product(&product, added)).unwrap();
        assert_eq!(value["addedAt"], json!("2025-03-01T10:00:00Z"));
        assert_eq!(value["quantity"], json!(1));
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("BUYER"), Some(Role::Buyer));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("courier"), None);
    }

    #[test]
    fn test_profile_for_role_requires_matching_payload() {
        let response = LoginResponse {
            token: "t".into(),
            role: "ADMIN".into(),
            buyer: Some(json!({ "email": "b@example.org" })),
            ..Default::default()
        };
        assert!(response.profile_for_role().is_none());

        let response = LoginResponse {
            role: "SELLER".into(),
            seller: Some(json!({ "username": "bakery" })),
            ..Default::default()
        };
        let (role, profile) = response.profile_for_role().unwrap();
        assert_eq!(role, Role::Seller);
        assert_eq!(profile_display_name(profile).as_deref(), Some("bakery"));
    }

    #[test]
    fn test_credentials_shape() {
        let buyer = serde_json::to_value(Credentials::for_role(Role::Buyer, " b@example.org ", "pw")).unwrap();
        assert_eq!(buyer, json!({ "email": "b@example.org", "password": "pw" }));
        let admin = serde_json::to_value(Credentials::for_role(Role::Admin, "root", "pw")).unwrap();
        assert_eq!(admin, json!({ "username": "root", "password": "pw" }));
    }
}
