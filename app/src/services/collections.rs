//! Collections service: field collectors and payment QR codes (Cobranzas)

use serde::Deserialize;
use shared::models::{Collector, PaymentQrCode, WalletProvider};
use shared::validation;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::{self, Store};

/// Collections service for the collector roster and the QR code registry
#[derive(Clone)]
pub struct CollectionsService {
    store: Store,
}

fn default_active() -> bool {
    true
}

/// Input for creating or editing a collector
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CollectorInput {
    #[validate(length(min = 1, max = 80, message = "Name is required"))]
    pub name: String,
    pub phone: String,
    #[validate(length(min = 1, message = "Zone is required"))]
    pub zone: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Input for registering or editing a QR code
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QrCodeInput {
    #[validate(length(min = 1, max = 80, message = "Holder is required"))]
    pub holder: String,
    pub wallet: WalletProvider,
    pub phone: String,
    pub image_ref: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn phone_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn check_phone(phone: &str) -> AppResult<String> {
    validation::validate_phone(phone).map_err(|e| AppError::validation("phone", e))?;
    Ok(phone.trim().to_string())
}

fn is_duplicate_qr(codes: &[PaymentQrCode], wallet: &WalletProvider, phone: &str, exclude: Option<Uuid>) -> bool {
    let digits = phone_digits(phone);
    codes
        .iter()
        .filter(|c| Some(c.id) != exclude)
        .any(|c| c.wallet.same_as(wallet) && phone_digits(&c.phone) == digits)
}

impl CollectionsService {
    /// Create a new CollectionsService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    // ========================================================================
    // Collectors
    // ========================================================================

    /// List collectors in registration order
    pub fn list_collectors(&self) -> AppResult<Vec<Collector>> {
        self.store.read(|data| data.collectors.clone())
    }

    /// Register a collector
    pub fn create_collector(&self, input: CollectorInput) -> AppResult<Collector> {
        input.validate()?;
        validation::validate_required(&input.name).map_err(|e| AppError::validation("name", e))?;
        let phone = check_phone(&input.phone)?;

        let collector = Collector {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            phone,
            zone: input.zone.trim().to_string(),
            active: input.active,
        };
        self.store.write(|data| {
            data.collectors.push(collector.clone());
            Ok(())
        })?;

        tracing::info!(id = %collector.id, name = %collector.name, "Registered collector");
        Ok(collector)
    }

    /// Edit a collector in place
    pub fn update_collector(&self, id: Uuid, input: CollectorInput) -> AppResult<Collector> {
        input.validate()?;
        validation::validate_required(&input.name).map_err(|e| AppError::validation("name", e))?;
        let phone = check_phone(&input.phone)?;

        let collector = self.store.write(|data| {
            let existing = store::find_mut(&mut data.collectors, id, "Collector")?;
            existing.name = input.name.trim().to_string();
            existing.phone = phone;
            existing.zone = input.zone.trim().to_string();
            existing.active = input.active;
            Ok(existing.clone())
        })?;

        tracing::info!(id = %id, "Updated collector");
        Ok(collector)
    }

    /// Enable or disable a collector without deleting it
    pub fn set_collector_active(&self, id: Uuid, active: bool) -> AppResult<Collector> {
        let collector = self.store.write(|data| {
            let existing = store::find_mut(&mut data.collectors, id, "Collector")?;
            existing.active = active;
            Ok(existing.clone())
        })?;
        tracing::info!(id = %id, active, "Changed collector status");
        Ok(collector)
    }

    /// Delete a collector
    pub fn delete_collector(&self, id: Uuid) -> AppResult<()> {
        self.store
            .write(|data| store::remove(&mut data.collectors, id, "Collector"))?;
        tracing::info!(id = %id, "Deleted collector");
        Ok(())
    }

    // ========================================================================
    // QR codes
    // ========================================================================

    /// List QR codes in registration order
    pub fn list_qr_codes(&self) -> AppResult<Vec<PaymentQrCode>> {
        self.store.read(|data| data.qr_codes.clone())
    }

    /// QR codes currently offered to clients
    pub fn active_qr_codes(&self) -> AppResult<Vec<PaymentQrCode>> {
        self.store
            .read(|data| data.qr_codes.iter().filter(|c| c.active).cloned().collect())
    }

    /// Register a QR code; a phone number can appear once per wallet
    pub fn create_qr_code(&self, input: QrCodeInput) -> AppResult<PaymentQrCode> {
        input.validate()?;
        let phone = check_phone(&input.phone)?;

        let code = self.store.write(|data| {
            if is_duplicate_qr(&data.qr_codes, &input.wallet, &phone, None) {
                tracing::warn!(wallet = %input.wallet, "Rejected duplicate QR code");
                return Err(AppError::DuplicateEntry("QR code".to_string()));
            }

            let code = PaymentQrCode {
                id: Uuid::new_v4(),
                holder: input.holder.trim().to_string(),
                wallet: input.wallet.clone(),
                phone,
                image_ref: input.image_ref.clone(),
                active: input.active,
            };
            data.qr_codes.push(code.clone());
            Ok(code)
        })?;

        tracing::info!(id = %code.id, wallet = %code.wallet, "Registered QR code");
        Ok(code)
    }

    /// Edit a QR code in place
    pub fn update_qr_code(&self, id: Uuid, input: QrCodeInput) -> AppResult<PaymentQrCode> {
        input.validate()?;
        let phone = check_phone(&input.phone)?;

        let code = self.store.write(|data| {
            if is_duplicate_qr(&data.qr_codes, &input.wallet, &phone, Some(id)) {
                tracing::warn!(wallet = %input.wallet, "Rejected duplicate QR code");
                return Err(AppError::DuplicateEntry("QR code".to_string()));
            }

            let existing = store::find_mut(&mut data.qr_codes, id, "QR code")?;
            existing.holder = input.holder.trim().to_string();
            existing.wallet = input.wallet.clone();
            existing.phone = phone;
            existing.image_ref = input.image_ref.clone();
            existing.active = input.active;
            Ok(existing.clone())
        })?;

        tracing::info!(id = %id, "Updated QR code");
        Ok(code)
    }

    /// Show or hide a QR code without deleting it
    pub fn set_qr_code_active(&self, id: Uuid, active: bool) -> AppResult<PaymentQrCode> {
        let code = self.store.write(|data| {
            let existing = store::find_mut(&mut data.qr_codes, id, "QR code")?;
            existing.active = active;
            Ok(existing.clone())
        })?;
        tracing::info!(id = %id, active, "Changed QR code status");
        Ok(code)
    }

    /// Delete a QR code
    pub fn delete_qr_code(&self, id: Uuid) -> AppResult<()> {
        self.store
            .write(|data| store::remove(&mut data.qr_codes, id, "QR code"))?;
        tracing::info!(id = %id, "Deleted QR code");
        Ok(())
    }
}
