//! Income service for completed orders (Ingresos)

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::calculators::normalize_name;
use shared::models::{ChannelKind, CompletedOrder};
use shared::types::DateRange;
use shared::validation;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::{self, Store};

/// Income service for browsing and totalling paid orders
#[derive(Clone)]
pub struct FinanceService {
    store: Store,
    currency: String,
}

/// Filter applied to the income table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFilter {
    pub channel: Option<ChannelKind>,
    /// Collector name, exact match ignoring case
    pub collector: Option<String>,
    /// Payment date range
    pub period: Option<DateRange>,
    /// Matches client, bird type, presentation or payment reference
    pub text: Option<String>,
}

impl OrderFilter {
    pub fn matches(&self, order: &CompletedOrder) -> bool {
        if let Some(channel) = self.channel {
            if order.payment.kind() != channel {
                return false;
            }
        }
        if let Some(collector) = &self.collector {
            if normalize_name(&order.collector) != normalize_name(collector) {
                return false;
            }
        }
        if let Some(period) = &self.period {
            if !period.contains(order.paid_at.date()) {
                return false;
            }
        }
        match self.text.as_deref().map(|t| t.trim().to_lowercase()) {
            Some(needle) if !needle.is_empty() => [
                order.client.as_str(),
                order.bird_type.as_str(),
                order.presentation.as_str(),
                order.payment.reference(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle)),
            _ => true,
        }
    }
}

/// Amount collected by one collector
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CollectorTotal {
    pub collector: String,
    pub orders: usize,
    pub amount: Decimal,
}

/// Totals shown above the income table
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IncomeSummary {
    pub currency: String,
    pub orders: usize,
    pub birds: u64,
    pub total_weight_kg: Decimal,
    pub total_amount: Decimal,
    pub digital_amount: Decimal,
    pub physical_amount: Decimal,
    pub by_collector: Vec<CollectorTotal>,
}

impl FinanceService {
    /// Create a new FinanceService instance
    pub fn new(store: Store) -> Self {
        Self {
            store,
            currency: "PEN".to_string(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Add a paid order to the income records
    pub fn record(&self, order: CompletedOrder) -> AppResult<CompletedOrder> {
        validation::validate_required(&order.client).map_err(|e| AppError::validation("client", e))?;
        validation::validate_required(&order.collector)
            .map_err(|e| AppError::validation("collector", e))?;
        validation::validate_positive_count(order.quantity)
            .map_err(|e| AppError::validation("quantity", e))?;
        if order.total_amount < Decimal::ZERO {
            return Err(AppError::validation("total_amount", "Amount cannot be negative"));
        }
        if order.total_weight_kg < Decimal::ZERO {
            return Err(AppError::validation("total_weight_kg", "Weight cannot be negative"));
        }
        validation::validate_required(order.payment.reference())
            .map_err(|e| AppError::validation("payment", e))?;

        self.store.write(|data| {
            if data.orders.iter().any(|o| o.id == order.id) {
                return Err(AppError::DuplicateEntry("order".to_string()));
            }
            data.orders.push(order.clone());
            Ok(())
        })?;

        tracing::info!(
            id = %order.id,
            client = %order.client,
            amount = %order.total_amount,
            channel = %order.payment.kind(),
            "Recorded completed order"
        );
        Ok(order)
    }

    /// Get an order by id
    pub fn get(&self, id: Uuid) -> AppResult<CompletedOrder> {
        self.store
            .read(|data| store::find(&data.orders, id, "Order").cloned())?
    }

    /// Orders, most recent payment first
    pub fn list(&self) -> AppResult<Vec<CompletedOrder>> {
        self.filter(&OrderFilter::default())
    }

    /// Orders matching `filter`, most recent payment first
    pub fn filter(&self, filter: &OrderFilter) -> AppResult<Vec<CompletedOrder>> {
        let mut orders: Vec<CompletedOrder> = self.store.read(|data| {
            data.orders
                .iter()
                .filter(|o| filter.matches(o))
                .cloned()
                .collect()
        })?;
        orders.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
        Ok(orders)
    }

    /// Totals over the orders matching `filter`
    pub fn summary(&self, filter: &OrderFilter) -> AppResult<IncomeSummary> {
        let orders = self.filter(filter)?;

        let mut summary = IncomeSummary {
            currency: self.currency.clone(),
            orders: orders.len(),
            birds: 0,
            total_weight_kg: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            digital_amount: Decimal::ZERO,
            physical_amount: Decimal::ZERO,
            by_collector: Vec::new(),
        };
        let mut by_collector: BTreeMap<String, CollectorTotal> = BTreeMap::new();

        for order in &orders {
            summary.birds += u64::from(order.quantity);
            summary.total_weight_kg += order.total_weight_kg;
            summary.total_amount += order.total_amount;
            match order.payment.kind() {
                ChannelKind::Digital => summary.digital_amount += order.total_amount,
                ChannelKind::Physical => summary.physical_amount += order.total_amount,
            }

            let entry = by_collector
                .entry(order.collector.clone())
                .or_insert_with(|| CollectorTotal {
                    collector: order.collector.clone(),
                    orders: 0,
                    amount: Decimal::ZERO,
                });
            entry.orders += 1;
            entry.amount += order.total_amount;
        }
        summary.by_collector = by_collector.into_values().collect();

        tracing::debug!(orders = summary.orders, total = %summary.total_amount, "Computed income summary");
        Ok(summary)
    }
}
