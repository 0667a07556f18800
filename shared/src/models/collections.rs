//! Collections (Cobranzas) models: field collectors and payment QR codes

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A field worker who collects payments from clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collector {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub zone: String,
    pub active: bool,
}

/// A digital-wallet QR code clients can pay into
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentQrCode {
    pub id: Uuid,
    /// Account holder shown under the code
    pub holder: String,
    pub wallet: WalletProvider,
    pub phone: String,
    /// Opaque reference to the QR image
    pub image_ref: Option<String>,
    pub active: bool,
}

/// Digital wallet behind a QR code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WalletProvider {
    Yape,
    Plin,
    Other(String),
}

impl std::fmt::Display for WalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletProvider::Yape => write!(f, "Yape"),
            WalletProvider::Plin => write!(f, "Plin"),
            WalletProvider::Other(name) => write!(f, "{}", name),
        }
    }
}

impl WalletProvider {
    /// Same provider, comparing custom names case-insensitively
    pub fn same_as(&self, other: &WalletProvider) -> bool {
        match (self, other) {
            (WalletProvider::Other(a), WalletProvider::Other(b)) => {
                crate::calculators::normalize_name(a) == crate::calculators::normalize_name(b)
            }
            _ => self == other,
        }
    }
}
