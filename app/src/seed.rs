//! Example records loaded into an empty store

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use shared::models::{CompletedOrder, PaymentChannel, WalletProvider};
use shared::types::ColorToken;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::batch::BatchForm;
use crate::services::catalog::{BirdTypeInput, PresentationInput};
use crate::services::collections::{CollectorInput, QrCodeInput};
use crate::services::{BatchService, CatalogService, CollectionsService, FinanceService};
use crate::store::Store;

fn date(y: i32, m: u32, d: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| AppError::Internal(format!("invalid seed date {}-{}-{}", y, m, d)))
}

fn time(h: u32, m: u32) -> AppResult<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0).ok_or_else(|| AppError::Internal(format!("invalid seed time {}:{}", h, m)))
}

fn at(day: NaiveDate, h: u32, m: u32) -> AppResult<NaiveDateTime> {
    Ok(day.and_time(time(h, m)?))
}

fn kg(s: &str) -> AppResult<Decimal> {
    Decimal::from_str(s).map_err(|e| AppError::Internal(format!("invalid seed amount {}: {}", s, e)))
}

fn bird_type(name: &str, color: ColorToken) -> BirdTypeInput {
    BirdTypeInput {
        name: name.to_string(),
        color,
        ..Default::default()
    }
}

fn presentation(bird_type: &str, name: &str, shrinkage_kg: &str, variable: bool) -> PresentationInput {
    PresentationInput {
        bird_type: bird_type.to_string(),
        name: name.to_string(),
        shrinkage_kg: shrinkage_kg.to_string(),
        variable,
    }
}

/// Load the example catalog, inventory, income and collections records
pub fn seed_store(store: &Store) -> AppResult<()> {
    let catalog = CatalogService::new(store.clone());
    catalog.create_bird_type(BirdTypeInput {
        has_sex: true,
        ..bird_type("Pollo", ColorToken::Yellow)
    })?;
    catalog.create_bird_type(BirdTypeInput {
        has_variety: true,
        varieties: vec!["Roja".to_string(), "Negra".to_string(), "Doble pechuga".to_string()],
        ..bird_type("Gallina", ColorToken::Orange)
    })?;
    catalog.create_bird_type(bird_type("Pato", ColorToken::Green))?;

    for input in [
        presentation("Pollo", "Vivo", "0", true),
        presentation("Pollo", "Pelado", "0.15", false),
        presentation("Pollo", "Eviscerado", "0.28", false),
        presentation("Gallina", "Viva", "0", true),
        presentation("Gallina", "Pelada", "0.18", false),
        presentation("Pato", "Pelado", "0.20", false),
    ] {
        catalog.create_presentation(input)?;
    }

    let batches = BatchService::new(store.clone());
    let monday = date(2024, 3, 11)?;
    batches.register(BatchForm {
        supplier: "Granja San Martín".to_string(),
        bird_type: "Pollo".to_string(),
        crates: "3".to_string(),
        birds_per_crate: "50".to_string(),
        males: Some("80".to_string()),
        entry_date: Some(monday),
        entry_time: Some(time(6, 30)?),
        ..Default::default()
    })?;
    batches.register(BatchForm {
        supplier: "Avícola El Porvenir".to_string(),
        bird_type: "Gallina".to_string(),
        variety: Some("Roja".to_string()),
        crates: "4".to_string(),
        birds_per_crate: "12".to_string(),
        entry_date: Some(monday),
        entry_time: Some(time(7, 15)?),
        ..Default::default()
    })?;
    batches.register(BatchForm {
        supplier: "Granja San Martín".to_string(),
        bird_type: "Pato".to_string(),
        crates: "2".to_string(),
        birds_per_crate: "20".to_string(),
        entry_date: Some(date(2024, 3, 12)?),
        entry_time: Some(time(6, 45)?),
        ..Default::default()
    })?;

    let collections = CollectionsService::new(store.clone());
    collections.create_collector(CollectorInput {
        name: "Carlos Quispe".to_string(),
        phone: "987 654 321".to_string(),
        zone: "Mercado Central".to_string(),
        active: true,
    })?;
    collections.create_collector(CollectorInput {
        name: "María Huamán".to_string(),
        phone: "912 345 678".to_string(),
        zone: "Zona Norte".to_string(),
        active: true,
    })?;
    collections.create_qr_code(QrCodeInput {
        holder: "Distribuidora Avícola".to_string(),
        wallet: WalletProvider::Yape,
        phone: "987 000 111".to_string(),
        image_ref: None,
        active: true,
    })?;
    collections.create_qr_code(QrCodeInput {
        holder: "Distribuidora Avícola".to_string(),
        wallet: WalletProvider::Plin,
        phone: "987 000 111".to_string(),
        image_ref: None,
        active: false,
    })?;

    let finance = FinanceService::new(store.clone());
    finance.record(CompletedOrder {
        id: Uuid::new_v4(),
        client: "Pollería Don Lucho".to_string(),
        bird_type: "Pollo".to_string(),
        presentation: "Pelado".to_string(),
        quantity: 40,
        total_weight_kg: kg("96.40")?,
        total_amount: kg("867.60")?,
        collector: "Carlos Quispe".to_string(),
        paid_at: at(date(2024, 3, 12)?, 16, 20)?,
        payment: PaymentChannel::Digital {
            operation_number: "OP-20240312-0087".to_string(),
            receipt_photo: None,
        },
        ordered_on: monday,
        recorded_by: "Ana Torres".to_string(),
    })?;
    finance.record(CompletedOrder {
        id: Uuid::new_v4(),
        client: "Restaurante La Granja".to_string(),
        bird_type: "Gallina".to_string(),
        presentation: "Pelada".to_string(),
        quantity: 12,
        total_weight_kg: kg("30.00")?,
        total_amount: kg("330.00")?,
        collector: "María Huamán".to_string(),
        paid_at: at(date(2024, 3, 13)?, 10, 5)?,
        payment: PaymentChannel::Physical {
            receipt_number: "B001-000154".to_string(),
        },
        ordered_on: date(2024, 3, 12)?,
        recorded_by: "Ana Torres".to_string(),
    })?;

    tracing::info!("Loaded example records");
    Ok(())
}
