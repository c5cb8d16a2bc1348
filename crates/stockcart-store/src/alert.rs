//! User-facing failure notifications.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// A user-facing failure category with a fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alert {
    /// Requested or incremented amount would exceed availability.
    OutOfStock,
    /// Adding a product failed.
    AddFailure,
    /// Removing a product failed.
    RemoveFailure,
    /// Changing a product amount failed.
    AmountChangeFailure,
}

impl Alert {
    /// The message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Alert::OutOfStock => "Requested quantity is out of stock",
            Alert::AddFailure => "Failed to add product",
            Alert::RemoveFailure => "Failed to remove product",
            Alert::AmountChangeFailure => "Failed to change product amount",
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Receives user-facing failure notifications.
///
/// Fire-and-forget: implementations must not block, and nothing the sink
/// does can change the outcome of the operation that raised the alert.
pub trait AlertSink: Send + Sync {
    fn notify(&self, alert: &Alert);
}

impl<T: AlertSink + ?Sized> AlertSink for Arc<T> {
    fn notify(&self, alert: &Alert) {
        (**self).notify(alert)
    }
}

/// Sink that writes alerts to the `tracing` log at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn notify(&self, alert: &Alert) {
        tracing::warn!(?alert, "{}", alert.message());
    }
}

/// Sink that records alerts in order.
#[derive(Debug, Default)]
pub struct MemoryAlertSink {
    alerts: Mutex<Vec<Alert>>,
}

impl MemoryAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts received so far.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget recorded alerts.
    pub fn clear(&self) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl AlertSink for MemoryAlertSink {
    fn notify(&self, alert: &Alert) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*alert);
    }
}
