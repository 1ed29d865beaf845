//! Payment file generation for approved batches.
//!
//! The output layout is fixed and parsed positionally by the downstream
//! payment switch: one 5-field header line, then one 17-field line per
//! transaction in ascending sequence order, `;`-delimited, `\r\n`
//! terminated. Field widths, truncation lengths, and zero padding must
//! not change.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::batch::types::{EftBatch, EftTransaction, GeneratedFile};
use crate::export::error::ExportError;
use crate::refdata::types::ReferenceData;

/// Largest tolerated difference between the cached total and the live sum.
const RECONCILE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Wire truncation length for the batch name.
const NAME_WIDTH: usize = 50;
/// Wire truncation length for the supplier name.
const SUPPLIER_WIDTH: usize = 55;
/// Wire truncation length for the narration.
const NARRATION_WIDTH: usize = 200;

/// Stateless payment file generator.
pub struct FileGenerator;

impl FileGenerator {
    /// Generates the wire-format payment file for an approved batch.
    ///
    /// Before serializing, the batch is reconciled: the live transaction
    /// sum and count are recomputed and compared against the cached
    /// totals (0.01 tolerance on the sum, exact on the count). Every
    /// line's references are then resolved through `refdata` so a
    /// dangling record surfaces as an error naming the offending
    /// sequence number instead of producing a malformed file.
    ///
    /// Re-export of an already-exported batch is permitted; the caller
    /// overwrites the previously persisted file.
    ///
    /// # Errors
    ///
    /// * `ExportError::InvalidStatus` if the batch is not Approved
    /// * `ExportError::EmptyBatch` if the batch has no transactions
    /// * `ExportError::AmountMismatch` / `ExportError::CountMismatch` if
    ///   the cached totals disagree with the live aggregation
    /// * `ExportError::IncompleteTransaction` if a line's supplier, bank,
    ///   scheme, zone, or debit account cannot be resolved
    pub fn generate(
        batch: &EftBatch,
        refdata: &dyn ReferenceData,
    ) -> Result<GeneratedFile, ExportError> {
        if !batch.status.can_export() {
            return Err(ExportError::InvalidStatus {
                status: batch.status,
            });
        }
        if batch.transactions.is_empty() {
            return Err(ExportError::EmptyBatch);
        }

        let live_total: Decimal = batch.transactions.iter().map(|t| t.amount).sum();
        if (live_total - batch.total_amount).abs() > RECONCILE_TOLERANCE {
            return Err(ExportError::AmountMismatch {
                computed: live_total,
                cached: batch.total_amount,
            });
        }
        let live_count = u32::try_from(batch.transactions.len()).unwrap_or(u32::MAX);
        if live_count != batch.record_count {
            return Err(ExportError::CountMismatch {
                computed: live_count,
                cached: batch.record_count,
            });
        }

        let mut ordered: Vec<&EftTransaction> = batch.transactions.iter().collect();
        ordered.sort_by_key(|t| t.sequence);

        // The header carries the recomputed sum, not the cached total, so
        // the declared total always equals the body sum exactly even when
        // the cache sits at the edge of the reconciliation tolerance.
        let mut lines = Vec::with_capacity(ordered.len() + 1);
        lines.push(format!(
            "0;{};{};{};{:04}",
            truncate(&batch.name, NAME_WIDTH),
            batch.currency,
            format_amount(live_total),
            batch.record_count
        ));
        for transaction in ordered {
            lines.push(Self::body_line(batch, transaction, refdata)?);
        }

        let mut content = lines.join("\r\n");
        content.push_str("\r\n");
        Ok(GeneratedFile {
            content,
            generated_at: Utc::now(),
        })
    }

    /// Serializes one transaction as a 17-field body line.
    fn body_line(
        batch: &EftBatch,
        transaction: &EftTransaction,
        refdata: &dyn ReferenceData,
    ) -> Result<String, ExportError> {
        let missing = |missing| ExportError::IncompleteTransaction {
            sequence: transaction.sequence,
            missing,
        };

        let debit_account = refdata
            .debit_account(transaction.debit_account_id)
            .ok_or_else(|| missing("debit account"))?;
        let supplier = refdata
            .supplier(transaction.supplier_id)
            .ok_or_else(|| missing("supplier"))?;
        let bank = refdata
            .bank(supplier.bank_id)
            .ok_or_else(|| missing("supplier bank"))?;
        let scheme = refdata
            .scheme(transaction.scheme_id)
            .ok_or_else(|| missing("scheme"))?;
        let zone = refdata
            .zone(transaction.zone_id)
            .ok_or_else(|| missing("zone"))?;

        // Two fixed empty fields follow the scheme code and two more
        // precede the reference number; the switch parses positionally.
        Ok(format!(
            "1;{};{};{};{};{};{};{};;;{};{};{};;;{};{}",
            transaction.sequence,
            batch.currency,
            debit_account.account_number,
            zone.code,
            format_amount(transaction.amount),
            truncate(&supplier.name, SUPPLIER_WIDTH),
            scheme.code,
            supplier.credit_reference,
            bank.swift_code,
            supplier.account_number,
            transaction.reference_number,
            truncate(&transaction.narration, NARRATION_WIDTH),
        ))
    }

    /// Re-emits generated content in a strict always-quoted CSV style.
    ///
    /// The same `;` delimiter and `\r\n` terminators are kept; only the
    /// quoting changes. Intended for consumers that require RFC-style
    /// quoting rather than the switch's raw layout.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Reshape` if the CSV writer fails.
    pub fn reshape_csv(content: &str) -> Result<String, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::CRLF)
            // The header has 5 fields and body lines 17, so the writer
            // must accept records of differing widths.
            .flexible(true)
            .from_writer(Vec::new());

        for line in content.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                continue;
            }
            writer
                .write_record(line.split(';'))
                .map_err(|e| ExportError::Reshape(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::Reshape(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ExportError::Reshape(e.to_string()))
    }
}

/// Formats an amount with exactly two decimal places and no separators.
fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Truncates a string to at most `width` characters.
fn truncate(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}
