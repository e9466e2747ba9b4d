use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub documents_assembled: u64,
    pub augmentation_success: u64,
    pub augmentation_fallback: u64,
    pub validations_passed: u64,
    pub validations_failed: u64,
}

pub trait Metrics: Send + Sync {
    fn inc_documents_assembled(&self);
    fn record_augmentation_success(&self);
    fn record_augmentation_fallback(&self);
    fn record_validation(&self, is_valid: bool);
    fn snapshot(&self) -> MetricsSnapshot;
}

pub type SharedMetrics = Arc<dyn Metrics>;

pub struct InMemoryMetrics {
    documents_assembled: AtomicU64,
    augmentation_success: AtomicU64,
    augmentation_fallback: AtomicU64,
    validations_passed: AtomicU64,
    validations_failed: AtomicU64,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self {
            documents_assembled: AtomicU64::new(0),
            augmentation_success: AtomicU64::new(0),
            augmentation_fallback: AtomicU64::new(0),
            validations_passed: AtomicU64::new(0),
            validations_failed: AtomicU64::new(0),
        }
    }
}

impl Default for InMemoryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics for InMemoryMetrics {
    fn inc_documents_assembled(&self) {
        self.documents_assembled.fetch_add(1, Ordering::Relaxed);
    }
    fn record_augmentation_success(&self) {
        self.augmentation_success.fetch_add(1, Ordering::Relaxed);
    }
    fn record_augmentation_fallback(&self) {
        self.augmentation_fallback.fetch_add(1, Ordering::Relaxed);
    }
    fn record_validation(&self, is_valid: bool) {
        if is_valid {
            self.validations_passed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.validations_failed.fetch_add(1, Ordering::Relaxed);
        }
    }
    fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_assembled: self.documents_assembled.load(Ordering::Relaxed),
            augmentation_success: self.augmentation_success.load(Ordering::Relaxed),
            augmentation_fallback: self.augmentation_fallback.load(Ordering::Relaxed),
            validations_passed: self.validations_passed.load(Ordering::Relaxed),
            validations_failed: self.validations_failed.load(Ordering::Relaxed),
        }
    }
}
