//! Schedule export.
//!
//! CSV uses one header row followed by one row per payment, with plain
//! 2-decimal numbers and ISO dates so the file parses back losslessly. JSON is
//! the serde form of `AmortizationSchedule`.

use std::io::{Read, Write};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amortization::{AmortizationSchedule, PaymentLineItem};
use crate::decimal::Money;
use crate::errors::{MortgageError, Result};

/// column order of an exported schedule
pub const CSV_HEADER: [&str; 6] = [
    "payment_number",
    "payment_date",
    "principal",
    "interest",
    "total_payment",
    "remaining_balance",
];

/// one exported schedule row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub payment_number: u32,
    pub payment_date: NaiveDate,
    pub principal: Money,
    pub interest: Money,
    pub total_payment: Money,
    pub remaining_balance: Money,
}

impl From<&PaymentLineItem> for ScheduleRow {
    fn from(item: &PaymentLineItem) -> Self {
        Self {
            payment_number: item.payment_number,
            payment_date: item.payment_date,
            principal: item.principal_portion.round_cents(),
            interest: item.interest_portion.round_cents(),
            total_payment: item.total_payment.round_cents(),
            remaining_balance: item.remaining_balance.round_cents(),
        }
    }
}

/// write payments as CSV, header first
pub fn write_schedule_csv<W: Write>(payments: &[PaymentLineItem], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    // the header is written even for an empty schedule
    if payments.is_empty() {
        wtr.write_record(CSV_HEADER)?;
    }
    for item in payments {
        wtr.serialize(ScheduleRow::from(item))?;
    }
    wtr.flush()?;
    Ok(())
}

/// CSV export as a string
pub fn schedule_to_csv_string(payments: &[PaymentLineItem]) -> Result<String> {
    let mut buf = Vec::new();
    write_schedule_csv(payments, &mut buf)?;
    String::from_utf8(buf).map_err(|e| MortgageError::CalculationError {
        message: format!("csv output is not utf-8: {e}"),
    })
}

/// parse rows written by `write_schedule_csv`
pub fn read_schedule_csv<R: Read>(reader: R) -> Result<Vec<ScheduleRow>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        let row: ScheduleRow = record?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn schedule_to_json(schedule: &AmortizationSchedule) -> Result<String> {
    Ok(serde_json::to_string_pretty(schedule)?)
}

pub fn schedule_from_json(json: &str) -> Result<AmortizationSchedule> {
    Ok(serde_json::from_str(json)?)
}
