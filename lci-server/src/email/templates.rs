//! Transactional email bodies
//!
//! Every caller-supplied string is HTML-escaped before it is interpolated.
//! Names and messages come from public forms and admin free text alike.

use chrono::NaiveDate;
use shared::order::OrderStatus;

use super::OutgoingEmail;

const BRAND: &str = "Lecrafto International";
const FOOTER_HTML: &str = "Lecrafto International<br>\
    1175 E Prashik Chowk, Haripur Road, Goanbhag, Sangli - 416416<br>\
    Email: lecraftointernational2@gmail.com";

/// Escape the five HTML-significant characters
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// "Wednesday, January 1, 2025"
pub fn format_delivery_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// State of an order after an admin update, as told to the customer
#[derive(Debug, Clone)]
pub struct OrderUpdateNotice {
    pub to: String,
    pub name: String,
    pub order_number: String,
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
    pub message: Option<String>,
}

/// Acknowledgement sent when the contact form creates an inquiry
#[derive(Debug, Clone)]
pub struct InquiryConfirmation {
    pub to: String,
    pub name: String,
    pub order_number: String,
    pub product_interest: Option<String>,
    pub message: String,
}

fn shell(body: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background: linear-gradient(135deg, #8B4513 0%, #5C3317 100%); padding: 30px; text-align: center;">
    <h1 style="color: #F5E6D3; margin: 0;">{BRAND}</h1>
  </div>
  <div style="padding: 30px; background: #fff;">
{body}
    <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">
    <p style="color: #999; font-size: 12px; text-align: center;">{FOOTER_HTML}</p>
  </div>
</div>"#
    )
}

fn order_number_block(order_number: &str) -> String {
    format!(
        r#"    <div style="background: #F5E6D3; padding: 20px; border-radius: 8px; margin: 20px 0; text-align: center;">
      <p style="margin: 0; color: #5C3317; font-size: 14px;">Order Number</p>
      <p style="margin: 5px 0 0 0; color: #5C3317; font-size: 24px; font-weight: bold;">{order_number}</p>
    </div>
"#
    )
}

pub fn render_order_update(notice: &OrderUpdateNotice, track_order_url: &str) -> OutgoingEmail {
    let name = escape_html(&notice.name);
    let order_number = escape_html(&notice.order_number);
    let status = escape_html(notice.status.label());
    let explanation = escape_html(notice.status.customer_message());
    let message = notice.message.as_deref().map(escape_html);
    let tracking_number = notice.tracking_number.as_deref().map(escape_html);
    let delivery = notice.estimated_delivery.map(format_delivery_date);
    let track_url = escape_html(track_order_url);
    let color = notice.status.tone().color();

    let mut body = format!(
        "    <h2 style=\"color: #5C3317;\">Order Update for {name}</h2>\n{}",
        order_number_block(&order_number)
    );
    body.push_str(&format!(
        r#"    <div style="background: {color}; color: #fff; padding: 15px; border-radius: 8px; text-align: center; margin: 20px 0;">
      <p style="margin: 0; font-size: 18px; font-weight: bold;">{status}</p>
    </div>
    <p style="color: #666; line-height: 1.6;">{explanation}</p>
"#
    ));
    if let Some(ref message) = message {
        body.push_str(&format!(
            r#"    <div style="background: #f9f9f9; padding: 15px; border-radius: 8px; margin: 20px 0;">
      <p style="margin: 0; color: #666;">{message}</p>
    </div>
"#
        ));
    }
    if let Some(ref tracking) = tracking_number {
        body.push_str(&format!(
            r#"    <p style="color: #666;"><strong>Tracking Number:</strong> <span style="font-family: monospace; background: #f0f0f0; padding: 3px 8px; border-radius: 4px;">{tracking}</span></p>
"#
        ));
    }
    if let Some(ref delivery) = delivery {
        body.push_str(&format!(
            "    <p style=\"color: #666;\"><strong>Estimated Delivery:</strong> {delivery}</p>\n"
        ));
    }
    body.push_str(&format!(
        r#"    <p style="color: #666; line-height: 1.6; margin-top: 30px;">
      Track your order anytime at:<br>
      <a href="{track_url}" style="color: #8B4513;">Track Your Order</a>
    </p>
"#
    ));

    let mut text = format!(
        "Order Update for {}\n\nOrder Number: {}\nStatus: {}\n\n{}\n",
        notice.name,
        notice.order_number,
        notice.status.label(),
        notice.status.customer_message()
    );
    if let Some(ref message) = notice.message {
        text.push_str(&format!("\n{message}\n"));
    }
    if let Some(ref tracking) = notice.tracking_number {
        text.push_str(&format!("\nTracking Number: {tracking}\n"));
    }
    if let Some(ref delivery) = delivery {
        text.push_str(&format!("Estimated Delivery: {delivery}\n"));
    }
    text.push_str(&format!("\nTrack your order anytime at: {track_order_url}\n"));

    OutgoingEmail {
        to: notice.to.clone(),
        subject: format!(
            "Order Update - {} - {}",
            notice.order_number,
            notice.status.label()
        ),
        html: shell(&body),
        text,
    }
}

pub fn render_inquiry_confirmation(
    confirmation: &InquiryConfirmation,
    track_order_url: &str,
) -> OutgoingEmail {
    let name = escape_html(&confirmation.name);
    let order_number = escape_html(&confirmation.order_number);
    let message = escape_html(&confirmation.message);
    let track_url = escape_html(track_order_url);

    let mut body = format!(
        "    <h2 style=\"color: #5C3317;\">Thank you for your inquiry, {name}!</h2>\n\
         {}    <p style=\"color: #666; line-height: 1.6;\">We have received your inquiry and will get back to you within 24 hours. Keep your order number to track progress.</p>\n",
        order_number_block(&order_number)
    );
    if let Some(ref product) = confirmation.product_interest {
        body.push_str(&format!(
            "    <p style=\"color: #666;\"><strong>Product Interest:</strong> {}</p>\n",
            escape_html(product)
        ));
    }
    body.push_str(&format!(
        r#"    <div style="background: #f9f9f9; padding: 15px; border-radius: 8px; margin: 20px 0;">
      <p style="margin: 0; color: #666;">{message}</p>
    </div>
    <p style="color: #666; line-height: 1.6;">
      Track your order anytime at:<br>
      <a href="{track_url}" style="color: #8B4513;">Track Your Order</a>
    </p>
"#
    ));

    let text = format!(
        "Thank you for your inquiry, {}!\n\nOrder Number: {}\n\n\
         We have received your inquiry and will get back to you within 24 hours.\n\n\
         Track your order anytime at: {track_order_url}\n",
        confirmation.name, confirmation.order_number
    );

    OutgoingEmail {
        to: confirmation.to.clone(),
        subject: format!("Inquiry Received - {}", confirmation.order_number),
        html: shell(&body),
        text,
    }
}
