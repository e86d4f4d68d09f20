//! Record cleaning: deduplication, missing-value handling, type coercion.
//!
//! Applied in order:
//! 1. full-tuple deduplication (first occurrence kept),
//! 2. drop of records missing a required field,
//! 3. string-to-type coercion (currency, integers, dates, times),
//! 4. invoice-id uniqueness (first occurrence kept).
//!
//! Row-level failures never abort the run; each dropped row is counted in
//! [`CleanStats`].

use chrono::{NaiveDate, NaiveTime};
use sales_core::{CleanConfig, RawRecord, SalesRecord};
use std::collections::HashSet;

/// Counts of rows dropped (and optional fields cleared) during cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanStats {
    /// Rows handed to the cleaner.
    pub rows_in: usize,
    /// Rows surviving all cleaning steps.
    pub rows_out: usize,
    /// Rows dropped as exact duplicates or repeated invoice ids.
    pub duplicates_dropped: usize,
    /// Rows dropped for a missing required field.
    pub missing_required_dropped: usize,
    /// Rows dropped because a required or date/time field failed to parse.
    pub parse_failures_dropped: usize,
    /// Optional fields cleared to `None` on parse failure or out-of-range
    /// rating. Does not drop the row.
    pub optional_fields_cleared: usize,
}

/// Why a row was dropped during coercion.
enum DropReason {
    MissingRequired,
    ParseFailure,
}

/// Cleans raw rows into typed [`SalesRecord`]s.
pub struct Cleaner {
    config: CleanConfig,
    stats: CleanStats,
}

impl Cleaner {
    /// Create a new cleaner from configuration.
    pub fn new(config: &CleanConfig) -> Self {
        Self {
            config: config.clone(),
            stats: CleanStats::default(),
        }
    }

    /// Clean a batch of raw rows. Statistics are reset per call and
    /// available through [`Cleaner::stats`] afterwards.
    pub fn clean(&mut self, raw: Vec<RawRecord>) -> Vec<SalesRecord> {
        self.stats = CleanStats {
            rows_in: raw.len(),
            ..CleanStats::default()
        };

        let deduped = self.dedupe(raw);

        let mut seen_invoices: HashSet<String> = HashSet::with_capacity(deduped.len());
        let mut records = Vec::with_capacity(deduped.len());
        for row in &deduped {
            match self.coerce(row) {
                Ok(record) => {
                    if seen_invoices.contains(&record.invoice_id) {
                        self.stats.duplicates_dropped += 1;
                        continue;
                    }
                    seen_invoices.insert(record.invoice_id.clone());
                    records.push(record);
                }
                Err(DropReason::MissingRequired) => {
                    self.stats.missing_required_dropped += 1;
                }
                Err(DropReason::ParseFailure) => {
                    self.stats.parse_failures_dropped += 1;
                }
            }
        }

        self.stats.rows_out = records.len();
        tracing::info!(
            rows_in = self.stats.rows_in,
            rows_out = self.stats.rows_out,
            duplicates = self.stats.duplicates_dropped,
            missing_required = self.stats.missing_required_dropped,
            parse_failures = self.stats.parse_failures_dropped,
            optional_cleared = self.stats.optional_fields_cleared,
            "cleaning complete"
        );
        records
    }

    /// Get cleaning statistics for the last [`Cleaner::clean`] call.
    pub fn stats(&self) -> &CleanStats {
        &self.stats
    }

    /// Drop rows whose full field tuple matches an earlier row.
    fn dedupe(&mut self, raw: Vec<RawRecord>) -> Vec<RawRecord> {
        let mut seen: HashSet<RawRecord> = HashSet::with_capacity(raw.len());
        let mut out = Vec::with_capacity(raw.len());
        for row in raw {
            if seen.contains(&row) {
                self.stats.duplicates_dropped += 1;
                continue;
            }
            seen.insert(row.clone());
            out.push(row);
        }
        out
    }

    /// Coerce one raw row into a typed record, or decide to drop it.
    fn coerce(&mut self, raw: &RawRecord) -> Result<SalesRecord, DropReason> {
        let invoice_id = self.required(&raw.invoice_id)?;
        let branch = self.required(&raw.branch)?;
        let unit_price_text = self.required(&raw.unit_price)?;
        let quantity_text = self.required(&raw.quantity)?;
        let date_text = self.required(&raw.date)?;

        let unit_price = self
            .parse_money(&unit_price_text)
            .ok_or(DropReason::ParseFailure)?;
        let quantity = parse_quantity(&quantity_text).ok_or(DropReason::ParseFailure)?;
        let date = self.parse_date(&date_text).ok_or(DropReason::ParseFailure)?;

        // Time is optional, but a present-and-unparseable value fails the
        // whole record, same as an unparseable date.
        let time = match self.present(&raw.time) {
            Some(text) => Some(self.parse_time(&text).ok_or(DropReason::ParseFailure)?),
            None => None,
        };

        let rating = match self.optional_number(&raw.rating) {
            Some(r) if !self.rating_in_bounds(r) => {
                self.stats.optional_fields_cleared += 1;
                None
            }
            other => other,
        };

        Ok(SalesRecord {
            invoice_id,
            branch,
            city: self.present(&raw.city),
            customer_type: self.present(&raw.customer_type),
            gender: self.present(&raw.gender),
            product_line: self.present(&raw.product_line),
            category: self.present(&raw.category),
            unit_price,
            quantity,
            tax: self.optional_money(&raw.tax),
            total: self.optional_money(&raw.total),
            date,
            time,
            payment_method: self.present(&raw.payment_method),
            cogs: self.optional_money(&raw.cogs),
            gross_margin_pct: self.optional_number(&raw.gross_margin_pct),
            gross_income: self.optional_money(&raw.gross_income),
            rating,
            profit_margin: self.optional_number(&raw.profit_margin),
        })
    }

    /// A required field: missing means the record is dropped.
    fn required(&self, field: &Option<String>) -> Result<String, DropReason> {
        self.present(field).ok_or(DropReason::MissingRequired)
    }

    /// Normalize a field: trimmed text, or `None` when empty or a
    /// configured missing marker.
    fn present(&self, field: &Option<String>) -> Option<String> {
        let text = field.as_deref()?.trim();
        if text.is_empty() {
            return None;
        }
        let lowered = text.to_lowercase();
        if self.config.missing_markers.iter().any(|m| *m == lowered) {
            return None;
        }
        Some(text.to_string())
    }

    /// Parse a currency field after stripping configured substrings.
    /// Negative and non-finite amounts are rejected.
    fn parse_money(&self, text: &str) -> Option<f64> {
        let mut cleaned = text.to_string();
        for strip in &self.config.currency_strip {
            cleaned = cleaned.replace(strip.as_str(), "");
        }
        let value: f64 = cleaned.trim().parse().ok()?;
        (value.is_finite() && value >= 0.0).then_some(value)
    }

    fn parse_date(&self, text: &str) -> Option<NaiveDate> {
        self.config
            .date_formats
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
    }

    fn parse_time(&self, text: &str) -> Option<NaiveTime> {
        self.config
            .time_formats
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
    }

    /// Optional currency field: parse failure clears the field.
    fn optional_money(&mut self, field: &Option<String>) -> Option<f64> {
        let text = self.present(field)?;
        let parsed = self.parse_money(&text);
        if parsed.is_none() {
            self.stats.optional_fields_cleared += 1;
        }
        parsed
    }

    /// Optional plain numeric field: parse failure clears the field.
    fn optional_number(&mut self, field: &Option<String>) -> Option<f64> {
        let text = self.present(field)?;
        let parsed = text.parse::<f64>().ok().filter(|v| v.is_finite());
        if parsed.is_none() {
            self.stats.optional_fields_cleared += 1;
        }
        parsed
    }

    fn rating_in_bounds(&self, rating: f64) -> bool {
        rating >= self.config.rating_min && rating <= self.config.rating_max
    }
}

/// Parse a quantity: a non-negative integer, possibly float-formatted
/// ("7.0") as some exports do.
fn parse_quantity(text: &str) -> Option<u32> {
    if let Ok(q) = text.parse::<u32>() {
        return Some(q);
    }
    let value: f64 = text.parse().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64)
        .then_some(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sales_core::CleanConfig;

    fn make_raw(invoice: &str) -> RawRecord {
        RawRecord {
            invoice_id: Some(invoice.to_string()),
            branch: Some("B1".to_string()),
            city: Some("Austin".to_string()),
            unit_price: Some("$10.00".to_string()),
            quantity: Some("3".to_string()),
            date: Some("2022-01-05".to_string()),
            time: Some("13:08:00".to_string()),
            payment_method: Some("Ewallet".to_string()),
            rating: Some("9.1".to_string()),
            ..RawRecord::default()
        }
    }

    fn cleaner() -> Cleaner {
        Cleaner::new(&CleanConfig::default())
    }

    #[test]
    fn test_basic_coercion() {
        let mut cleaner = cleaner();
        let records = cleaner.clean(vec![make_raw("A-1")]);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.invoice_id, "A-1");
        assert!((record.unit_price - 10.0).abs() < 1e-10);
        assert_eq!(record.quantity, 3);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2022, 1, 5).unwrap());
        assert_eq!(record.time, NaiveTime::from_hms_opt(13, 8, 0));
        assert_eq!(record.rating, Some(9.1));
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let mut cleaner = cleaner();
        let a = make_raw("A-1");
        let records = cleaner.clean(vec![a.clone(), a]);

        assert_eq!(records.len(), 1);
        assert_eq!(cleaner.stats().duplicates_dropped, 1);
    }

    #[test]
    fn test_dedupe_idempotent() {
        let mut cleaner = cleaner();
        let rows = vec![make_raw("A-1"), make_raw("A-1"), make_raw("A-2")];
        let first_pass = cleaner.dedupe(rows);
        assert_eq!(cleaner.stats.duplicates_dropped, 1);

        let mut second = Cleaner::new(&CleanConfig::default());
        let second_pass = second.dedupe(first_pass.clone());
        assert_eq!(second.stats.duplicates_dropped, 0);
        assert_eq!(second_pass, first_pass);
    }

    #[test]
    fn test_invoice_uniqueness() {
        let mut cleaner = cleaner();
        let mut b = make_raw("A-1");
        b.city = Some("Dallas".to_string()); // different tuple, same invoice
        let records = cleaner.clean(vec![make_raw("A-1"), b]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].city.as_deref(), Some("Austin")); // first kept
        assert_eq!(cleaner.stats().duplicates_dropped, 1);
    }

    #[test]
    fn test_missing_required_drops_row() {
        let mut cleaner = cleaner();
        let mut row = make_raw("A-1");
        row.branch = None;
        let records = cleaner.clean(vec![row]);

        assert!(records.is_empty());
        assert_eq!(cleaner.stats().missing_required_dropped, 1);
    }

    #[test]
    fn test_missing_marker_counts_as_missing() {
        let mut cleaner = cleaner();
        let mut row = make_raw("A-1");
        row.invoice_id = Some("N/A".to_string());
        let records = cleaner.clean(vec![row]);

        assert!(records.is_empty());
        assert_eq!(cleaner.stats().missing_required_dropped, 1);
    }

    #[test]
    fn test_unparseable_date_drops_row() {
        let mut cleaner = cleaner();
        let mut row = make_raw("A-1");
        row.date = Some("not-a-date".to_string());
        let records = cleaner.clean(vec![row]);

        assert!(records.is_empty());
        assert_eq!(cleaner.stats().parse_failures_dropped, 1);
    }

    #[test]
    fn test_unparseable_time_drops_row() {
        let mut cleaner = cleaner();
        let mut row = make_raw("A-1");
        row.time = Some("25:99".to_string());
        let records = cleaner.clean(vec![row]);

        assert!(records.is_empty());
        assert_eq!(cleaner.stats().parse_failures_dropped, 1);
    }

    #[test]
    fn test_missing_time_is_kept() {
        let mut cleaner = cleaner();
        let mut row = make_raw("A-1");
        row.time = None;
        let records = cleaner.clean(vec![row]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].time, None);
    }

    #[test]
    fn test_missing_optional_rating_is_kept() {
        let mut cleaner = cleaner();
        let mut row = make_raw("A-1");
        row.rating = None;
        let records = cleaner.clean(vec![row]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rating, None);
    }

    #[test]
    fn test_out_of_bounds_rating_cleared() {
        let mut cleaner = cleaner();
        let mut row = make_raw("A-1");
        row.rating = Some("11.5".to_string());
        let records = cleaner.clean(vec![row]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rating, None);
    }

    #[test]
    fn test_currency_symbols_stripped() {
        let mut cleaner = cleaner();
        let mut row = make_raw("A-1");
        row.unit_price = Some("$1,074.69".to_string());
        let records = cleaner.clean(vec![row]);

        assert_relative_eq!(records[0].unit_price, 1074.69);
    }

    #[test]
    fn test_negative_unit_price_drops_row() {
        let mut cleaner = cleaner();
        let mut row = make_raw("A-1");
        row.unit_price = Some("-3.50".to_string());
        let records = cleaner.clean(vec![row]);

        assert!(records.is_empty());
        assert_eq!(cleaner.stats().parse_failures_dropped, 1);
    }

    #[test]
    fn test_float_formatted_quantity() {
        assert_eq!(parse_quantity("7"), Some(7));
        assert_eq!(parse_quantity("7.0"), Some(7));
        assert_eq!(parse_quantity("7.5"), None);
        assert_eq!(parse_quantity("-1"), None);
    }

    #[test]
    fn test_optional_money_parse_failure_cleared() {
        let mut cleaner = cleaner();
        let mut row = make_raw("A-1");
        row.tax = Some("abc".to_string());
        let records = cleaner.clean(vec![row]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tax, None);
        assert_eq!(cleaner.stats().optional_fields_cleared, 1);
    }

    #[test]
    fn test_multiple_date_formats() {
        let mut cleaner = cleaner();
        let mut a = make_raw("A-1");
        a.date = Some("05/01/19".to_string());
        let mut b = make_raw("A-2");
        b.date = Some("2022-12-31".to_string());
        let records = cleaner.clean(vec![a, b]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2019, 1, 5).unwrap());
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());
    }

    #[test]
    fn test_stats_row_accounting() {
        let mut cleaner = cleaner();
        let mut missing = make_raw("A-2");
        missing.invoice_id = None;
        let mut bad_date = make_raw("A-3");
        bad_date.date = Some("garbage".to_string());

        let records = cleaner.clean(vec![make_raw("A-1"), make_raw("A-1"), missing, bad_date]);

        let stats = cleaner.stats();
        assert_eq!(stats.rows_in, 4);
        assert_eq!(stats.rows_out, 1);
        assert_eq!(stats.duplicates_dropped, 1);
        assert_eq!(stats.missing_required_dropped, 1);
        assert_eq!(stats.parse_failures_dropped, 1);
        assert_eq!(records.len(), 1);
    }
}
