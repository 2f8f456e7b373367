//! Message validation and parsing

use crate::error::{ParseError, Result};
use crate::types::{DEFAULT_BODY, DEFAULT_SENDER, DEFAULT_SUBJECT, ParsedEmail};
use chrono::{DateTime, FixedOffset, Local};
use mailparse::{MailHeaderMap, ParsedMail};
use tracing::{debug, warn};

/// Headers whose presence marks a blob as email-shaped
const IDENTITY_HEADERS: [&str; 3] = ["From", "To", "Subject"];

/// Cheap check that raw bytes look like an email before full parsing
///
/// Fails closed: bytes that cannot be parsed, or that carry none of
/// From, To or Subject, are rejected. Passing this check does not
/// guarantee any individual field is present.
#[must_use]
pub fn validate_email(raw: &[u8]) -> bool {
    let Ok(parsed) = mailparse::parse_mail(raw) else {
        return false;
    };

    IDENTITY_HEADERS
        .iter()
        .any(|name| header_value(&parsed, name).is_some())
}

/// Parse raw email bytes into a [`ParsedEmail`]
///
/// Individual missing fields fall back to defaults. Only a structural
/// failure of the header/body format is returned as an error.
pub fn parse_email(raw: &[u8], filename: &str) -> Result<ParsedEmail> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| ParseError::Structure(e.to_string()))?;

    let subject = header_value(&parsed, "Subject").unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
    let sender = header_value(&parsed, "From").unwrap_or_else(|| DEFAULT_SENDER.to_string());
    let timestamp = extract_date(&parsed);
    let body = extract_body(&parsed);

    debug!("Parsed email {filename}: {subject} from {sender}");

    Ok(ParsedEmail {
        subject,
        sender,
        timestamp,
        body,
        filename: filename.to_string(),
    })
}

/// First value of a header, treating blank values as absent
fn header_value(parsed: &ParsedMail, name: &str) -> Option<String> {
    parsed
        .headers
        .get_first_value(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn extract_date(parsed: &ParsedMail) -> DateTime<FixedOffset> {
    let Some(raw) = header_value(parsed, "Date") else {
        debug!("No Date header, using processing time");
        return Local::now().fixed_offset();
    };

    parse_date(&raw).unwrap_or_else(|| {
        warn!("Unparseable Date header {raw:?}, using processing time");
        Local::now().fixed_offset()
    })
}

/// Parse an RFC 5322 date-time, keeping the offset it was written with
///
/// The day-of-week and trailing `(comments)` are ignored, so a
/// mislabelled weekday does not discard an otherwise valid date. A
/// missing or unrecognised zone is read as `-0000`.
#[must_use]
pub fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let unfolded = value.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut date = unfolded.as_str();

    if let Some((day_name, rest)) = date.split_once(',')
        && day_name.trim().chars().all(|c| c.is_ascii_alphabetic())
    {
        date = rest.trim_start();
    }

    while let Some(start) = trailing_comment_start(date) {
        date = date[..start].trim_end();
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(date) {
        return Some(parsed);
    }

    // no zone at all
    if let Ok(parsed) = DateTime::parse_from_rfc2822(&format!("{date} -0000")) {
        return Some(parsed);
    }

    // zone name chrono does not know
    let (without_zone, zone) = date.rsplit_once(' ')?;
    if zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return DateTime::parse_from_rfc2822(&format!("{without_zone} -0000")).ok();
    }

    None
}

/// Byte index of the `(` opening a balanced comment that ends the string
fn trailing_comment_start(date: &str) -> Option<usize> {
    if !date.ends_with(')') {
        return None;
    }

    let mut depth = 0usize;
    for (idx, ch) in date.char_indices().rev() {
        match ch {
            ')' => depth += 1,
            '(' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }

    None
}

fn extract_body(parsed: &ParsedMail) -> String {
    let mut text = String::new();

    if is_multipart(parsed) || is_embedded_message(parsed) {
        collect_plain_text(parsed, &mut text);
    } else if is_plain_text(parsed) {
        match parsed.get_body() {
            Ok(body) => text = body,
            Err(e) => warn!("Failed to decode body: {e}"),
        }
    }

    normalize_body(&text)
}

/// Depth-first walk over the MIME tree, appending every plain-text leaf
///
/// Multipart containers are always descended into. Embedded
/// `message/rfc822` parts are parsed and walked unless they carry an
/// attachment disposition. Attachment leaves and leaves whose content
/// fails to decode are skipped.
fn collect_plain_text(part: &ParsedMail, text: &mut String) {
    if !part.subparts.is_empty() || is_multipart(part) {
        for sub in &part.subparts {
            collect_plain_text(sub, text);
        }
        return;
    }

    if is_attachment(part) {
        debug!("Skipping attachment part ({})", part.ctype.mimetype);
        return;
    }

    if is_embedded_message(part) {
        collect_embedded_message(part, text);
        return;
    }

    if !is_plain_text(part) {
        return;
    }

    match part.get_body() {
        Ok(body) => text.push_str(&body),
        Err(e) => warn!("Skipping undecodable text/plain part: {e}"),
    }
}

fn collect_embedded_message(part: &ParsedMail, text: &mut String) {
    let raw = match part.get_body_raw() {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Skipping undecodable message/rfc822 part: {e}");
            return;
        }
    };

    match mailparse::parse_mail(&raw) {
        Ok(inner) => collect_plain_text(&inner, text),
        Err(e) => warn!("Skipping unparseable message/rfc822 part: {e}"),
    }
}

fn is_multipart(part: &ParsedMail) -> bool {
    part.ctype.mimetype.to_ascii_lowercase().starts_with("multipart/")
}

fn is_embedded_message(part: &ParsedMail) -> bool {
    part.ctype.mimetype.eq_ignore_ascii_case("message/rfc822")
}

fn is_plain_text(part: &ParsedMail) -> bool {
    part.ctype.mimetype.eq_ignore_ascii_case("text/plain")
}

fn is_attachment(part: &ParsedMail) -> bool {
    part.headers
        .get_first_value("Content-Disposition")
        .is_some_and(|d| d.to_ascii_lowercase().contains("attachment"))
}

/// Collapse whitespace runs into single spaces, substituting the default
/// body when nothing is left
#[must_use]
pub fn normalize_body(text: &str) -> String {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        DEFAULT_BODY.to_string()
    } else {
        normalized
    }
}
