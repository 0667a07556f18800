//! Income (Ingresos) models

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A delivered and paid order, as listed in the income screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletedOrder {
    pub id: Uuid,
    pub client: String,
    pub bird_type: String,
    pub presentation: String,
    pub quantity: u32,
    pub total_weight_kg: Decimal,
    pub total_amount: Decimal,
    /// Collector who received the payment
    pub collector: String,
    pub paid_at: NaiveDateTime,
    pub payment: PaymentChannel,
    pub ordered_on: NaiveDate,
    /// Employee who recorded the original order
    pub recorded_by: String,
}

/// How an order was paid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "channel", rename_all = "snake_case")]
pub enum PaymentChannel {
    Digital {
        operation_number: String,
        /// Opaque reference to the receipt photo
        receipt_photo: Option<String>,
    },
    Physical {
        receipt_number: String,
    },
}

impl PaymentChannel {
    pub fn kind(&self) -> ChannelKind {
        match self {
            PaymentChannel::Digital { .. } => ChannelKind::Digital,
            PaymentChannel::Physical { .. } => ChannelKind::Physical,
        }
    }

    /// Operation number or receipt number
    pub fn reference(&self) -> &str {
        match self {
            PaymentChannel::Digital {
                operation_number, ..
            } => operation_number,
            PaymentChannel::Physical { receipt_number } => receipt_number,
        }
    }
}

/// Payment channel without its details, for filtering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Digital,
    Physical,
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelKind::Digital => write!(f, "Digital"),
            ChannelKind::Physical => write!(f, "Physical"),
        }
    }
}
