//! Business operations behind the HTTP handlers
//!
//! Handlers parse and validate the wire format; the functions here talk to
//! storage and the notifier.

pub mod inquiries;
pub mod lookup;
pub mod notify;
pub mod order_update;
