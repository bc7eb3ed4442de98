use super::{
    heading, mailto, notice, page, table, tel, text_block, HtmlPolicy, TemplateResult,
    NOT_SPECIFIED, NO_COVER_LETTER,
};
use crate::relay::Fields;

const ACCENT: &str = "#ff6b6b";

pub fn render(fields: &Fields, policy: HtmlPolicy) -> TemplateResult {
    let name = fields.get_or("name", "");
    let role = fields.get_or("role", NOT_SPECIFIED);
    let email = policy.apply(fields.get_or("email", ""));
    let phone = policy.apply(fields.get_or("phone", super::NOT_PROVIDED));
    let cover = policy.apply(fields.get_or("message", NO_COVER_LETTER));

    let content = [
        heading("Applicant Information"),
        table(
            ACCENT,
            &[
                ("Full Name", policy.apply(name).into_owned()),
                ("Email", mailto(ACCENT, &email)),
                ("Phone", tel(ACCENT, &phone)),
                ("Applied For", policy.apply(role).into_owned()),
            ],
        ),
        text_block("Cover Letter:", &cover),
        notice(
            "#fff3cd",
            "#ffc107",
            "#856404",
            "Note",
            "Please check attached documents (CV/Resume) if provided in the application.",
        ),
    ]
    .join("\n");

    TemplateResult {
        subject: format!("Career Application from {} - Position: {}", name, role),
        body: page(ACCENT, &content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_role_uses_one_placeholder() {
        let fields: Fields = [("name", "Sam"), ("email", "sam@example.com"), ("phone", "1")]
            .into_iter()
            .collect();
        let out = render(&fields, HtmlPolicy::Escape);
        assert_eq!(out.subject, "Career Application from Sam - Position: Not Specified");
        assert!(out.body.contains("Applied For:</td>"));
        assert!(out
            .body
            .contains(&format!("color: #333;\">{}</td>", NOT_SPECIFIED)));
        assert!(out.body.contains(NO_COVER_LETTER));
    }
}
