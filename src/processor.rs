use crate::models::{OptionKind, OptionRecord};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Per-symbol digest of fetched records, used by the batch report
#[derive(Debug, Clone, Serialize)]
pub struct SymbolSummary {
    pub symbol: String,
    pub total: usize,
    pub calls: usize,
    pub puts: usize,
    pub actions: BTreeMap<String, usize>,
    pub avg_mispricing: Option<f64>,
    pub nearest_expiry_days: Option<i64>,
    pub top_pick: Option<TopPick>,
}

/// Highest final-score record of a symbol
#[derive(Debug, Clone, Serialize)]
pub struct TopPick {
    pub option_type: String,
    pub strike: f64,
    pub expiration: String,
    pub enhanced_score: f64,
    pub action: String,
    pub action_reason: String,
}

impl From<&OptionRecord> for TopPick {
    fn from(r: &OptionRecord) -> Self {
        Self {
            option_type: r.option_type.clone(),
            strike: r.strike,
            expiration: r.expiration.clone(),
            enhanced_score: r.enhanced_score,
            action: r.action.clone(),
            action_reason: r.action_reason.clone(),
        }
    }
}

/// Sort records by final score, best first. NaN scores sink to the end.
pub fn rank_by_score(records: &mut [OptionRecord]) {
    records.sort_by(|a, b| compare_scores(b.enhanced_score, a.enhanced_score));
}

fn compare_scores(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Remove records with NaN/infinite values, returning how many were dropped.
/// JSON would write those values as `null`, which no longer decodes as a record.
pub fn drop_non_finite(records: &mut Vec<OptionRecord>) -> usize {
    let before = records.len();
    records.retain(OptionRecord::is_finite);
    before - records.len()
}

/// Calendar days from `today` until expiration, `None` if the date is malformed
pub fn days_to_expiry(record: &OptionRecord, today: NaiveDate) -> Option<i64> {
    record
        .expiration_date()
        .map(|expiry| (expiry - today).num_days())
}

pub fn summarize(symbol: &str, records: &[OptionRecord], today: NaiveDate) -> SymbolSummary {
    let mut actions = BTreeMap::new();
    let mut calls = 0;
    let mut puts = 0;

    for r in records {
        match r.kind() {
            Some(OptionKind::Call) => calls += 1,
            Some(OptionKind::Put) => puts += 1,
            None => {}
        }
        *actions.entry(r.action.clone()).or_insert(0) += 1;
    }

    let avg_mispricing = if records.is_empty() {
        None
    } else {
        Some(records.iter().map(|r| r.mispricing).sum::<f64>() / records.len() as f64)
    };

    // Expired contracts are ignored
    let nearest_expiry_days = records
        .iter()
        .filter_map(|r| days_to_expiry(r, today))
        .filter(|d| *d >= 0)
        .min();

    let top_pick = records
        .iter()
        .max_by(|a, b| compare_scores(a.enhanced_score, b.enhanced_score))
        .map(TopPick::from);

    SymbolSummary {
        symbol: symbol.to_string(),
        total: records.len(),
        calls,
        puts,
        actions,
        avg_mispricing,
        nearest_expiry_days,
        top_pick,
    }
}
