//! Notification dispatcher
//!
//! Renders and sends customer emails. Runs after the primary write has
//! committed; a failed send is logged and never reaches the caller.

use std::sync::Arc;

use crate::email::templates::{render_inquiry_confirmation, render_order_update};
use crate::email::{InquiryConfirmation, MailError, Mailer, OrderUpdateNotice};

#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    track_order_url: Arc<str>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>, track_order_url: &str) -> Self {
        Self {
            mailer,
            track_order_url: Arc::from(track_order_url),
        }
    }

    pub async fn send_order_update(&self, notice: &OrderUpdateNotice) -> Result<(), MailError> {
        let email = render_order_update(notice, &self.track_order_url);
        self.mailer.send(&email).await
    }

    pub async fn send_inquiry_confirmation(
        &self,
        confirmation: &InquiryConfirmation,
    ) -> Result<(), MailError> {
        let email = render_inquiry_confirmation(confirmation, &self.track_order_url);
        self.mailer.send(&email).await
    }

    /// Fire-and-forget order update email
    pub fn dispatch_order_update(&self, notice: OrderUpdateNotice) {
        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.send_order_update(&notice).await {
                tracing::warn!(
                    order_number = %notice.order_number,
                    "Order update email failed: {e}"
                );
            }
        });
    }

    /// Fire-and-forget inquiry confirmation email
    pub fn dispatch_inquiry_confirmation(&self, confirmation: InquiryConfirmation) {
        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.send_inquiry_confirmation(&confirmation).await {
                tracing::warn!(
                    order_number = %confirmation.order_number,
                    "Inquiry confirmation email failed: {e}"
                );
            }
        });
    }
}
