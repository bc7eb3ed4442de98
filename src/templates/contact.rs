use super::{heading, mailto, page, table, tel, text_block, HtmlPolicy, TemplateResult};
use crate::relay::Fields;

const ACCENT: &str = "#667eea";

pub fn render(fields: &Fields, policy: HtmlPolicy) -> TemplateResult {
    let name = fields.get_or("name", "");
    let email = policy.apply(fields.get_or("email", ""));
    let phone = policy.apply(fields.get_or("phone", super::NOT_PROVIDED));
    let message = policy.apply(fields.get_or("message", ""));

    let content = [
        heading("Contact Details"),
        table(
            ACCENT,
            &[
                ("Name", policy.apply(name).into_owned()),
                ("Email", mailto(ACCENT, &email)),
                ("Phone", tel(ACCENT, &phone)),
            ],
        ),
        text_block("Message:", &message),
    ]
    .join("\n");

    TemplateResult {
        subject: format!("New Contact Form Submission from {}", name),
        body: page(ACCENT, &content),
    }
}
