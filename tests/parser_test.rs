use chrono::{Datelike, Local, Timelike};
use email_insights::{
    DEFAULT_BODY, DEFAULT_SENDER, DEFAULT_SUBJECT, normalize_body, parse_date, parse_email,
    validate_email,
};

#[test]
fn test_parse_simple_email() {
    let raw = b"From: John Doe <john@example.com>\r\n\
                To: recipient@example.com\r\n\
                Subject: Test Email\r\n\
                Date: Wed, 01 Jan 2025 12:00:00 +0000\r\n\
                \r\n\
                Hello, this is a   test email.\r\n\
                Second line.";

    let email = parse_email(raw, "simple.eml").unwrap();

    assert_eq!(email.sender, "John Doe <john@example.com>");
    assert_eq!(email.subject, "Test Email");
    assert_eq!(email.body, "Hello, this is a test email. Second line.");
    assert_eq!(email.filename, "simple.eml");
    assert_eq!(email.timestamp.year(), 2025);
    assert_eq!(email.timestamp.month(), 1);
    assert_eq!(email.timestamp.day(), 1);
    assert_eq!(email.timestamp.hour(), 12);
}

#[test]
fn test_missing_subject_and_sender_use_defaults() {
    let raw = b"To: recipient@example.com\r\n\
                Date: Wed, 01 Jan 2025 12:00:00 +0000\r\n\
                \r\n\
                Body text";

    let email = parse_email(raw, "anon.eml").unwrap();

    assert_eq!(email.subject, DEFAULT_SUBJECT);
    assert_eq!(email.sender, DEFAULT_SENDER);
}

#[test]
fn test_blank_subject_uses_default() {
    let raw = b"From: a@x.com\r\nSubject:   \r\n\r\nBody";

    let email = parse_email(raw, "blank.eml").unwrap();

    assert_eq!(email.subject, "No Subject");
}

#[test]
fn test_missing_date_uses_processing_time() {
    let raw = b"From: a@x.com\r\nSubject: No date\r\n\r\nBody";

    let before = Local::now().fixed_offset();
    let email = parse_email(raw, "nodate.eml").unwrap();
    let after = Local::now().fixed_offset();

    assert!(email.timestamp >= before - chrono::Duration::seconds(1));
    assert!(email.timestamp <= after + chrono::Duration::seconds(1));
}

#[test]
fn test_garbage_date_uses_processing_time() {
    let raw = b"From: a@x.com\r\nSubject: Bad date\r\nDate: sometime last week\r\n\r\nBody";

    let before = Local::now().fixed_offset();
    let email = parse_email(raw, "baddate.eml").unwrap();

    assert!((email.timestamp - before).num_seconds().abs() < 5);
}

#[test]
fn test_date_keeps_written_offset() {
    let raw = b"From: a@x.com\r\n\
                Subject: Late night\r\n\
                Date: Fri, 31 Jan 2025 23:30:00 -0500\r\n\
                \r\n\
                Body";

    let email = parse_email(raw, "late.eml").unwrap();

    assert_eq!(email.timestamp.day(), 31);
    assert_eq!(email.timestamp.offset().local_minus_utc(), -5 * 3600);
}

#[test]
fn test_parse_date_ignores_wrong_weekday_and_comment() {
    let date = parse_date("Thu, 01 Jan 2025 12:00:00 +0000 (UTC)").unwrap();
    assert_eq!(date.day(), 1);
    assert_eq!(date.hour(), 12);

    let without_weekday = parse_date("1 Jan 2025 08:15:00 +0200").unwrap();
    assert_eq!(without_weekday.minute(), 15);

    assert!(parse_date("not a date").is_none());
}

#[test]
fn test_multipart_skips_attachment() {
    let raw = b"From: a@x.com\r\n\
                To: b@x.com\r\n\
                Subject: Report\r\n\
                Date: Mon, 03 Feb 2025 09:30:00 +0100\r\n\
                MIME-Version: 1.0\r\n\
                Content-Type: multipart/mixed; boundary=\"XYZ\"\r\n\
                \r\n\
                --XYZ\r\n\
                Content-Type: text/plain; charset=utf-8\r\n\
                \r\n\
                Hello   team,\r\n\
                see notes.\r\n\
                --XYZ\r\n\
                Content-Type: text/plain\r\n\
                Content-Disposition: attachment; filename=\"notes.txt\"\r\n\
                \r\n\
                secret attachment text\r\n\
                --XYZ--\r\n";

    let email = parse_email(raw, "report.eml").unwrap();

    assert_eq!(email.body, "Hello team, see notes.");
}

#[test]
fn test_nested_multipart_collects_plain_parts_in_order() {
    let raw = b"From: a@x.com\r\n\
                Subject: Nested\r\n\
                Content-Type: multipart/mixed; boundary=\"outer\"\r\n\
                \r\n\
                --outer\r\n\
                Content-Type: multipart/alternative; boundary=\"inner\"\r\n\
                \r\n\
                --inner\r\n\
                Content-Type: text/plain\r\n\
                \r\n\
                Part one\r\n\
                \r\n\
                --inner\r\n\
                Content-Type: text/html\r\n\
                \r\n\
                <p>Html only</p>\r\n\
                --inner--\r\n\
                \r\n\
                --outer\r\n\
                Content-Type: text/plain\r\n\
                \r\n\
                Part two\r\n\
                \r\n\
                --outer--\r\n";

    let email = parse_email(raw, "nested.eml").unwrap();

    let one = email.body.find("Part one").unwrap();
    let two = email.body.find("Part two").unwrap();
    assert!(one < two);
    assert!(!email.body.contains("Html only"));
}

#[test]
fn test_html_only_message_has_default_body() {
    let raw = b"From: a@x.com\r\n\
                Subject: Newsletter\r\n\
                Content-Type: text/html\r\n\
                \r\n\
                <html><body><p>Hello</p></body></html>";

    let email = parse_email(raw, "html.eml").unwrap();

    assert_eq!(email.body, DEFAULT_BODY);
}

#[test]
fn test_empty_body_has_default_body() {
    let raw = b"From: a@x.com\r\nSubject: Empty\r\n\r\n   \r\n";

    let email = parse_email(raw, "empty.eml").unwrap();

    assert_eq!(email.body, "No text content found");
}

#[test]
fn test_quoted_printable_body_is_decoded() {
    let raw = b"From: a@x.com\r\n\
                Subject: Menu\r\n\
                Content-Type: text/plain; charset=utf-8\r\n\
                Content-Transfer-Encoding: quoted-printable\r\n\
                \r\n\
                Caf=C3=A9 menu=\r\n update";

    let email = parse_email(raw, "menu.eml").unwrap();

    assert_eq!(email.body, "Caf\u{e9} menu update");
}

#[test]
fn test_encoded_subject_is_decoded() {
    let raw = b"From: a@x.com\r\n\
                Subject: =?utf-8?q?Caf=C3=A9_hours?=\r\n\
                \r\n\
                Body";

    let email = parse_email(raw, "subject.eml").unwrap();

    assert_eq!(email.subject, "Caf\u{e9} hours");
}

#[test]
fn test_validate_accepts_email_shaped_input() {
    assert!(validate_email(b"From: a@x.com\r\n\r\nBody"));
    assert!(validate_email(b"To: b@x.com\r\n\r\nBody"));
    assert!(validate_email(b"Subject: Hi\r\n\r\nBody"));
}

#[test]
fn test_validate_rejects_non_email_input() {
    assert!(!validate_email(b""));
    assert!(!validate_email(b"\xff\xfe\x00\x01 random bytes \x7f\x80"));
    assert!(!validate_email(b"just some plain text\nwithout any headers\n"));
    assert!(!validate_email(b"X-Custom: value\r\nContent-Type: text/plain\r\n\r\nBody"));
}

#[test]
fn test_normalize_body() {
    assert_eq!(normalize_body("  a \n\n b\tc  "), "a b c");
    assert_eq!(normalize_body("\r\n\t "), DEFAULT_BODY);
}

#[test]
fn test_parse_date_without_zone_keeps_written_time() {
    let date = parse_date("Thu, 30 Jan 2025 09:00:00").unwrap();

    assert_eq!(date.day(), 30);
    assert_eq!(date.hour(), 9);
    assert_eq!(date.offset().local_minus_utc(), 0);
}

#[test]
fn test_parse_date_with_unknown_zone_name() {
    let date = parse_date("Thu, 30 Jan 2025 09:00:00 CEST").unwrap();

    assert_eq!(date.day(), 30);
    assert_eq!(date.hour(), 9);
    assert_eq!(date.offset().local_minus_utc(), 0);
}

#[test]
fn test_parse_date_strips_nested_comment() {
    let date = parse_date("Thu, 30 Jan 2025 09:00:00 +0100 (Central (European) Time)").unwrap();

    assert_eq!(date.day(), 30);
    assert_eq!(date.hour(), 9);
    assert_eq!(date.offset().local_minus_utc(), 3600);
}

#[test]
fn test_unknown_zone_date_header_is_not_replaced() {
    let raw = b"From: a@x.com\r\n\
                Subject: Zoned\r\n\
                Date: Thu, 30 Jan 2025 09:00:00 CEST\r\n\
                \r\n\
                Body";

    let email = parse_email(raw, "zoned.eml").unwrap();

    assert_eq!(email.timestamp.year(), 2025);
    assert_eq!(email.timestamp.month(), 1);
    assert_eq!(email.timestamp.day(), 30);
}

#[test]
fn test_forwarded_message_part_is_walked() {
    let raw = b"From: a@x.com\r\n\
                Subject: Fwd: Notes\r\n\
                Content-Type: multipart/mixed; boundary=\"FWD\"\r\n\
                \r\n\
                --FWD\r\n\
                Content-Type: text/plain\r\n\
                \r\n\
                See below\r\n\
                \r\n\
                --FWD\r\n\
                Content-Type: message/rfc822\r\n\
                \r\n\
                From: b@x.com\r\n\
                Subject: Notes\r\n\
                Content-Type: text/plain\r\n\
                \r\n\
                inner body\r\n\
                \r\n\
                --FWD--\r\n";

    let email = parse_email(raw, "forward.eml").unwrap();

    let outer = email.body.find("See below").unwrap();
    let inner = email.body.find("inner body").unwrap();
    assert!(outer < inner);
}

#[test]
fn test_top_level_embedded_message_is_walked() {
    let raw = b"From: a@x.com\r\n\
                Subject: Wrapped\r\n\
                Content-Type: message/rfc822\r\n\
                \r\n\
                From: b@x.com\r\n\
                Subject: Inner\r\n\
                \r\n\
                inner body\r\n";

    let email = parse_email(raw, "wrapped.eml").unwrap();

    assert_eq!(email.body, "inner body");
}

#[test]
fn test_message_part_marked_attachment_is_skipped() {
    let raw = b"From: a@x.com\r\n\
                Subject: Fwd as attachment\r\n\
                Content-Type: multipart/mixed; boundary=\"FWD\"\r\n\
                \r\n\
                --FWD\r\n\
                Content-Type: text/plain\r\n\
                \r\n\
                Cover note\r\n\
                --FWD\r\n\
                Content-Type: message/rfc822\r\n\
                Content-Disposition: attachment; filename=\"old.eml\"\r\n\
                \r\n\
                From: b@x.com\r\n\
                Subject: Old\r\n\
                \r\n\
                inner body\r\n\
                --FWD--\r\n";

    let email = parse_email(raw, "attached.eml").unwrap();

    assert_eq!(email.body, "Cover note");
}

#[test]
fn test_attachment_disposition_matches_any_case() {
    let raw = b"From: a@x.com\r\n\
                Subject: Shouting\r\n\
                Content-Type: multipart/mixed; boundary=\"XYZ\"\r\n\
                \r\n\
                --XYZ\r\n\
                Content-Type: text/plain\r\n\
                \r\n\
                Visible text\r\n\
                --XYZ\r\n\
                Content-Type: text/plain\r\n\
                Content-Disposition: ATTACHMENT; filename=\"log.txt\"\r\n\
                \r\n\
                hidden log\r\n\
                --XYZ--\r\n";

    let email = parse_email(raw, "shouting.eml").unwrap();

    assert_eq!(email.body, "Visible text");
}
