//! Data models shared by the service and its clients

pub mod inquiry;
pub mod tracking;
pub mod user;

pub use inquiry::{Inquiry, InquiryUpdate, NewInquiry, OrderProjection};
pub use tracking::{NewTrackingEvent, TrackingEntry, TrackingEvent};
pub use user::{AppRole, User};
