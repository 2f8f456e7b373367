//! Frequency aggregates over a collection of parsed emails

use crate::config::AnalyticsConfig;
use crate::tokenizer::tokenize;
use crate::types::{Analytics, GroupBy, ParsedEmail, SenderCount, TimeBucketCounts, WordCount};
use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate};
use std::collections::HashMap;
use std::hash::Hash;

/// Count items, most frequent first
///
/// Ties keep the order in which each item was first seen.
fn most_common<T, I>(items: I, n: usize) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();

    for item in items {
        if let Some(&slot) = index.get(&item) {
            counts[slot].1 += 1;
        } else {
            index.insert(item.clone(), counts.len());
            counts.push((item, 1));
        }
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}

/// Senders with the most emails, compared verbatim
#[must_use]
pub fn top_senders(emails: &[ParsedEmail], n: usize) -> Vec<SenderCount> {
    most_common(emails.iter().map(|e| e.sender.as_str()), n)
        .into_iter()
        .map(|(sender, count)| SenderCount {
            sender: sender.to_string(),
            count,
        })
        .collect()
}

/// Most frequent content words across all texts
#[must_use]
pub fn most_common_words<S: AsRef<str>>(texts: &[S], n: usize) -> Vec<WordCount> {
    most_common(texts.iter().flat_map(|t| tokenize(t.as_ref())), n)
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect()
}

/// Number of emails per day or per week
///
/// Buckets use the calendar date written in each timestamp, without
/// converting between time zones.
#[must_use]
pub fn email_count_over_time(emails: &[ParsedEmail], group_by: GroupBy) -> TimeBucketCounts {
    let mut buckets = TimeBucketCounts::new();
    for email in emails {
        *buckets.entry(bucket_key(&email.timestamp, group_by)).or_insert(0) += 1;
    }
    buckets
}

/// Bucket label for one timestamp, formatted `YYYY-MM-DD`
#[must_use]
pub fn bucket_key(timestamp: &DateTime<FixedOffset>, group_by: GroupBy) -> String {
    let date = timestamp.date_naive();
    let bucket = match group_by {
        GroupBy::Daily => date,
        GroupBy::Weekly => week_start(date),
    };
    bucket.format("%Y-%m-%d").to_string()
}

/// Monday on or before `date`
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Compute every aggregate over one consistent set of emails
#[must_use]
pub fn analyze(emails: &[ParsedEmail], config: &AnalyticsConfig) -> Analytics {
    let bodies: Vec<&str> = emails.iter().map(|e| e.body.as_str()).collect();

    Analytics {
        top_senders: top_senders(emails, config.top_senders),
        most_common_words: most_common_words(&bodies, config.top_words),
        email_count_over_time: email_count_over_time(emails, config.group_by),
    }
}
