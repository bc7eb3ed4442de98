//! Email bodies for each submission kind.
//!
//! Every renderer is a pure function of the submitted fields. User values go
//! through an [`HtmlPolicy`] before they are interpolated into markup;
//! subjects are plain-text headers and are never escaped.

pub mod blog;
pub mod career;
pub mod confirmation;
pub mod contact;

use std::borrow::Cow;

use crate::relay::{Fields, SubmissionKind};

pub const HEADER_IMAGE: &str =
    "https://res.cloudinary.com/ddgd5aq1u/image/upload/v1765443568/Add_a_heading_1_via4n9.png";
pub const FOOTER_IMAGE: &str =
    "https://res.cloudinary.com/ddgd5aq1u/image/upload/v1765443577/Add_a_heading_4_g7eoqs.png";

// Placeholders shared by the validators and the renderers.
pub const NOT_SPECIFIED: &str = "Not Specified";
pub const NOT_PROVIDED: &str = "Not provided";
pub const NO_COVER_LETTER: &str = "No cover letter provided";
pub const DEFAULT_POST_TITLE: &str = "Blog Post Comment";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateResult {
    pub subject: String,
    pub body: String,
}

/// How user-supplied values are written into HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlPolicy {
    /// Escape `& < > " '`.
    Escape,
    /// Interpolate values exactly as submitted.
    Verbatim,
}

impl HtmlPolicy {
    pub fn apply<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            Self::Escape => html_escape(value),
            Self::Verbatim => Cow::Borrowed(value),
        }
    }
}

pub fn html_escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

// ── Registry ──────────────────────────────────────────

pub type Renderer = fn(&Fields, HtmlPolicy) -> TemplateResult;

pub fn renderer(kind: SubmissionKind) -> Renderer {
    match kind {
        SubmissionKind::Contact => contact::render,
        SubmissionKind::Career => career::render,
        SubmissionKind::Blog => blog::render,
    }
}

pub fn render(kind: SubmissionKind, fields: &Fields, policy: HtmlPolicy) -> TemplateResult {
    renderer(kind)(fields, policy)
}

// ── Layout pieces ─────────────────────────────────────

/// Banner, content card, banner.
fn page(accent: &str, content: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="text-align: center;">
    <img src="{header}" alt="Header" style="width: 100%; max-width: 600px; display: block;" />
  </div>
  <div style="background: #f9f9f9; padding: 30px; border-left: 4px solid {accent};">
{content}
  </div>
  <div style="text-align: center; margin-top: 12px;">
    <img src="{footer}" alt="Footer" style="width: 100%; max-width: 600px; display: block;" />
  </div>
</div>"#,
        header = HEADER_IMAGE,
        footer = FOOTER_IMAGE,
        accent = accent,
        content = content,
    )
}

fn heading(text: &str) -> String {
    format!(
        r#"    <h2 style="color: #333; margin-top: 0; font-size: 20px;">{}</h2>"#,
        text
    )
}

/// Two-column table of `(label, already rendered value)` rows.
fn table(accent: &str, rows: &[(&str, String)]) -> String {
    let mut html = String::from(
        r#"    <table style="width: 100%; border-collapse: collapse; margin: 20px 0;">"#,
    );
    for (i, (label, value)) in rows.iter().enumerate() {
        let border = if i + 1 < rows.len() {
            " border-bottom: 1px solid #ddd;"
        } else {
            ""
        };
        html.push_str(&format!(
            r#"
      <tr>
        <td style="padding: 12px 0;{border} font-weight: bold; color: {accent}; width: 30%;">{label}:</td>
        <td style="padding: 12px 0 12px 20px;{border} color: #333;">{value}</td>
      </tr>"#,
            border = border,
            accent = accent,
            label = label,
            value = value,
        ));
    }
    html.push_str("\n    </table>");
    html
}

fn text_block(title: &str, content: &str) -> String {
    format!(
        r#"    <div style="margin: 30px 0; padding: 20px; background: white; border-radius: 4px;">
      <h3 style="margin-top: 0; color: #333;">{}</h3>
      <p style="color: #555; line-height: 1.6; white-space: pre-wrap;">{}</p>
    </div>"#,
        title, content
    )
}

fn notice(background: &str, border: &str, color: &str, label: &str, text: &str) -> String {
    format!(
        r#"    <div style="background: {background}; padding: 15px; border-radius: 4px; margin: 20px 0; border-left: 4px solid {border};">
      <p style="margin: 0; color: {color}; font-size: 14px;"><strong>{label}:</strong> {text}</p>
    </div>"#,
        background = background,
        border = border,
        color = color,
        label = label,
        text = text,
    )
}

fn link(accent: &str, href: &str, text: &str) -> String {
    format!(
        r#"<a href="{}" style="color: {}; text-decoration: none;">{}</a>"#,
        href, accent, text
    )
}

fn mailto(accent: &str, email: &str) -> String {
    link(accent, &format!("mailto:{}", email), email)
}

/// `tel:` link, or plain text for the placeholder.
fn tel(accent: &str, phone: &str) -> String {
    if phone == NOT_PROVIDED {
        phone.to_string()
    } else {
        link(accent, &format!("tel:{}", phone), phone)
    }
}
