use std::borrow::Cow;

use aktel_db::{members::NewMember, teams::NewTeam, MemberRole};

/// The markup dialect of the channel a message is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageMode {
    Plain,
    Html,
    Markdown,
    MarkdownV2,
    /// WhatsApp markup. Messages in this mode go to the organizers only and so
    /// include the captain's phone number.
    WhatsApp,
}

impl MessageMode {
    /// Parse a mode name. Unknown names fall back to [MessageMode::Plain].
    pub fn from_name(name: &str) -> MessageMode {
        match name {
            "HTML" => MessageMode::Html,
            "Markdown" => MessageMode::Markdown,
            "MarkdownV2" => MessageMode::MarkdownV2,
            "WHATSAPP" => MessageMode::WhatsApp,
            _ => MessageMode::Plain,
        }
    }

    /// Escape text so the channel shows it literally instead of reading it as markup.
    fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let reserved: &[char] = match self {
            MessageMode::Html => return escape_html(text),
            MessageMode::Markdown => &['_', '*', '`', '['],
            MessageMode::MarkdownV2 => &[
                '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}',
                '.', '!', '\\',
            ],
            MessageMode::Plain | MessageMode::WhatsApp => return Cow::Borrowed(text),
        };

        if !text.contains(reserved) {
            return Cow::Borrowed(text);
        }

        let mut escaped = String::with_capacity(text.len() + 8);
        for c in text.chars() {
            if reserved.contains(&c) {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        Cow::Owned(escaped)
    }

    fn emphasize(&self, text: &str) -> String {
        match self {
            MessageMode::Html => format!("<b>{text}</b>"),
            MessageMode::WhatsApp => format!("*{text}*"),
            MessageMode::Markdown | MessageMode::MarkdownV2 => format!("**{text}**"),
            MessageMode::Plain => text.to_string(),
        }
    }

    fn shows_phone(&self) -> bool {
        matches!(self, MessageMode::WhatsApp)
    }
}

fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(&['&', '<', '>'][..]) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Render the announcement for a newly registered team.
///
/// ```text
/// Team "Ravens" registered!
///
/// Squad:
/// 1. Ivanov Ali (2025)
/// 2. Smith Bob (2026)
/// ```
pub fn format_registration(team: &NewTeam, members: &[NewMember], mode: MessageMode) -> String {
    let mut msg = String::new();
    msg.push_str(&mode.escape("Team \""));
    msg.push_str(&mode.emphasize(&mode.escape(&team.name)));
    msg.push_str(&mode.escape("\" registered!\n\nSquad:"));

    for (i, member) in members.iter().enumerate() {
        let line = format!(
            "{}. {} {} ({})",
            i + 1,
            member.surname.trim(),
            member.name.trim(),
            member.grad_year
        );
        msg.push('\n');
        msg.push_str(&mode.escape(&line));

        if member.role == MemberRole::Captain && mode.shows_phone() {
            if let Some(phone) = member.phone_number.as_deref().filter(|p| !p.is_empty()) {
                msg.push(' ');
                msg.push_str(phone);
            }
        }
    }

    msg
}
