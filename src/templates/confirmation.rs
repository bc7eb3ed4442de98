use super::{HtmlPolicy, TemplateResult, FOOTER_IMAGE, HEADER_IMAGE};

pub const SUBJECT: &str = "We received your message";

/// Acknowledgement sent back to the submitter. Identical for every kind.
pub fn render(
    name: &str,
    message: &str,
    admin_contact: &str,
    sender_name: &str,
    policy: HtmlPolicy,
) -> TemplateResult {
    let body = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="text-align: center;">
    <img src="{header}" alt="Header" style="width: 100%; max-width: 600px; display: block;" />
  </div>
  <div style="background: #f9f9f9; padding: 30px;">
    <p style="color: #333; font-size: 16px; margin-top: 0;">Dear {name},</p>
    <p style="color: #555; line-height: 1.6;">
      Thank you for reaching out to us! We have received your message and will get back to you as soon as possible.
    </p>
    <div style="background: white; padding: 20px; border-radius: 4px; margin: 20px 0;">
      <h3 style="margin-top: 0; color: #333;">Your Message:</h3>
      <p style="color: #555; white-space: pre-wrap; line-height: 1.6;">{message}</p>
    </div>
    <p style="color: #555; line-height: 1.6;">
      If you have any urgent matters, please don't hesitate to contact us directly at <strong>{contact}</strong>.
    </p>
    <p style="color: #555; margin-bottom: 0;">Best regards,<br><strong>{sender}</strong></p>
  </div>
  <div style="text-align: center; margin-top: 12px;">
    <img src="{footer}" alt="Footer" style="width: 100%; max-width: 600px; display: block;" />
  </div>
</div>"#,
        header = HEADER_IMAGE,
        footer = FOOTER_IMAGE,
        name = policy.apply(name),
        message = policy.apply(message),
        contact = policy.apply(admin_contact),
        sender = policy.apply(sender_name),
    );

    TemplateResult {
        subject: SUBJECT.to_string(),
        body,
    }
}
