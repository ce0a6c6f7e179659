//! Cart ingestion: turns a list of loosely-typed cart items into order rows.
//!
//! Both the payment endpoint and the factory endpoint go through
//! [`ingest_cart_orders`]; they differ only in [`IngestSource`].

use chrono::Local;
use models::{order, user};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use super::log::{OrderLog, OrderLogEntry};
use crate::errors::ServiceError;

pub const ORDER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const GUEST_USER: &str = "Guest";
pub const DEFAULT_BRAND: &str = "MobleStore";
pub const UNNAMED_ITEM: &str = "no name";
pub const FACTORY_NOTE: &str = "website order";

/// A brand the store prices itself and signals to the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownBrand {
    pub name: &'static str,
    pub code: char,
    pub price: i64,
}

pub const KNOWN_BRANDS: [KnownBrand; 4] = [
    KnownBrand { name: "Descente", code: 'D', price: 89_000 },
    KnownBrand { name: "Beanpole", code: 'B', price: 129_000 },
    KnownBrand { name: "Umbro", code: 'U', price: 55_000 },
    KnownBrand { name: "Puma", code: 'P', price: 49_000 },
];

/// Case-insensitive lookup by brand name.
pub fn known_brand(name: &str) -> Option<&'static KnownBrand> {
    let name = name.trim();
    KNOWN_BRANDS.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestSource {
    /// Web checkout; rows are recorded as paid.
    Payment,
    /// Factory intake; rows wait for approval.
    Factory,
}

impl IngestSource {
    pub fn status(&self) -> &'static str {
        match self {
            IngestSource::Payment => order::status::PAYMENT_COMPLETE,
            IngestSource::Factory => order::status::PENDING,
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            IngestSource::Payment => "",
            IngestSource::Factory => FACTORY_NOTE,
        }
    }
}

/// Cart item as clients send it. Any field may be missing; numbers may arrive as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CartItem {
    pub product_name: Option<String>,
    pub name: Option<String>,
    pub item_name: Option<String>,
    pub brand: Option<String>,
    pub quantity: Option<Value>,
    pub price: Option<Value>,
}

/// A cart item after field resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub brand: String,
    pub quantity: i32,
    pub price: i64,
}

#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub orders: Vec<order::Model>,
    pub order_time: String,
    pub command: String,
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn float_to_int(f: f64) -> Option<i64> {
    (f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64).then(|| f.trunc() as i64)
}

/// Integer from a JSON number or numeric string; fractions truncate.
/// Non-finite or out-of-range values yield `None`.
pub fn coerce_int(v: &Option<Value>) -> Option<i64> {
    match v.as_ref()? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(float_to_int)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().and_then(float_to_int))
        }
        _ => None,
    }
}

/// Optional `i32` body field. Absent or null is `None`; anything else must
/// coerce, or the request is rejected.
pub fn optional_i32(v: &Option<Value>, field: &str) -> Result<Option<i32>, ServiceError> {
    match v {
        None | Some(Value::Null) => Ok(None),
        Some(_) => coerce_int(v)
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| ServiceError::Validation(format!("{field} must be an integer"))),
    }
}

pub fn resolve_line(item: &CartItem) -> OrderLine {
    let name = non_blank(&item.product_name)
        .or_else(|| non_blank(&item.name))
        .or_else(|| non_blank(&item.item_name))
        .unwrap_or(UNNAMED_ITEM)
        .to_string();

    let brand = match non_blank(&item.brand) {
        Some(b) => b.to_string(),
        None => known_brand(&name).map(|b| b.name).unwrap_or(DEFAULT_BRAND).to_string(),
    };

    // Non-positive quantities and negative prices are treated as missing.
    let quantity = coerce_int(&item.quantity)
        .and_then(|q| i32::try_from(q).ok())
        .filter(|q| *q > 0)
        .unwrap_or(1);
    let price = coerce_int(&item.price)
        .filter(|p| *p >= 0)
        .or_else(|| known_brand(&brand).map(|b| b.price))
        .unwrap_or(0);

    OrderLine { name, brand, quantity, price }
}

/// `<` + brand code and quantity per recognized line + `>`.
pub fn factory_command(lines: &[OrderLine]) -> String {
    let body: String = lines
        .iter()
        .filter_map(|l| known_brand(&l.brand).map(|b| format!("{}{}", b.code, l.quantity)))
        .collect();
    format!("<{body}>")
}

/// Persist one order per cart item in a single transaction, then record
/// the cart in `log`. The log step cannot fail and never undoes the insert.
#[instrument(skip(db, log, items), fields(items = items.len(), source = ?source))]
pub async fn ingest_cart_orders(
    db: &DatabaseConnection,
    log: &OrderLog,
    user_id: Option<&str>,
    items: &[CartItem],
    source: IngestSource,
) -> Result<IngestOutcome, ServiceError> {
    if items.is_empty() {
        return Err(ServiceError::Validation("cart is empty".into()));
    }
    let user_id = user_id.map(str::trim).filter(|u| !u.is_empty()).unwrap_or(GUEST_USER);
    let contact = user::find_phone(db, user_id)
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))?
        .unwrap_or_else(|| user_id.to_string());
    let order_time = Local::now().format(ORDER_TIME_FORMAT).to_string();
    let lines: Vec<OrderLine> = items.iter().map(resolve_line).collect();

    let txn = db.begin().await.map_err(|e| ServiceError::Internal(e.to_string()))?;
    let mut orders = Vec::with_capacity(lines.len());
    for line in &lines {
        let row = order::create(
            &txn,
            order::NewOrder {
                company: line.brand.clone(),
                item_name: line.name.clone(),
                quantity: line.quantity,
                price: line.price,
                order_date: order_time.clone(),
                status: source.status().to_string(),
                contact: contact.clone(),
                note: source.note().to_string(),
                ..Default::default()
            },
        )
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
        orders.push(row);
    }
    txn.commit().await.map_err(|e| ServiceError::Internal(e.to_string()))?;

    let command = factory_command(&lines);
    log.append(OrderLogEntry {
        user: user_id.to_string(),
        time: order_time.clone(),
        details: lines,
        command: command.clone(),
    })
    .await;
    info!(
        event = "mock_process_start",
        %command,
        user_id,
        rows = orders.len(),
        "factory process start"
    );

    Ok(IngestOutcome { orders, order_time, command })
}
