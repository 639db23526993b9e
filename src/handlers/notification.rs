use std::sync::Mutex;
use tracing::{error, warn};

use crate::models::{CartError, FailureCause};

/// One-line message shown to the shopper after a failed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: &'static str,
}

pub const ADD_FAILED_MESSAGE: &str = "Erro na adição do produto";
pub const REMOVE_FAILED_MESSAGE: &str = "Erro na remoção do produto";
pub const UPDATE_FAILED_MESSAGE: &str = "Erro na alteração de quantidade do produto";
pub const INVALID_AMOUNT_MESSAGE: &str = "Não é permitido valor inferior a 1.";
pub const OUT_OF_STOCK_MESSAGE: &str = "Quantidade solicitada fora de estoque";

/// Map a cart error to the notification the shopper sees.
///
/// Add and remove failures collapse to one generic message whatever the
/// cause; the update path distinguishes invalid amounts from missing stock.
pub fn notification_for(err: &CartError) -> Notification {
    let message = match err {
        CartError::AddFailed { .. } => ADD_FAILED_MESSAGE,
        CartError::RemoveFailed { .. } => REMOVE_FAILED_MESSAGE,
        CartError::UpdateFailed { .. } => UPDATE_FAILED_MESSAGE,
        CartError::InvalidAmount { .. } => INVALID_AMOUNT_MESSAGE,
        CartError::OutOfStock { .. } => OUT_OF_STOCK_MESSAGE,
    };
    Notification { message }
}

/// Sink for user-facing notifications (a toast in a UI, stderr in the CLI)
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Notifier that emits notifications as log events, for structured-log output
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        warn!(notification = notification.message, "User notification");
    }
}

/// Notifier that keeps every notification, for embedders that render them later
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first
    pub fn received(&self) -> Vec<Notification> {
        match self.received.lock() {
            Ok(received) => received.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        match self.received.lock() {
            Ok(mut received) => received.push(notification.clone()),
            Err(poisoned) => poisoned.into_inner().push(notification.clone()),
        }
    }
}

/// Log the failure with its cause, then hand the user-facing message to `notifier`
pub fn report(err: &CartError, notifier: &dyn Notifier) -> Notification {
    match err {
        CartError::AddFailed { cause, .. }
        | CartError::RemoveFailed { cause, .. }
        | CartError::UpdateFailed { cause, .. } => match cause {
            FailureCause::Client(_) | FailureCause::Repository(_) => {
                error!(product_id = err.product_id(), error = %err, "Cart operation failed")
            }
            FailureCause::NotInCart | FailureCause::ProductNotFound => {
                warn!(product_id = err.product_id(), error = %err, "Cart operation rejected")
            }
        },
        CartError::InvalidAmount { .. } | CartError::OutOfStock { .. } => {
            warn!(product_id = err.product_id(), error = %err, "Cart operation rejected")
        }
    }

    let notification = notification_for(err);
    notifier.notify(&notification);
    notification
}
