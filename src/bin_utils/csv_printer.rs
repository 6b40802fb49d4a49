use std::io::Write;

use anyhow::Context;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AccountRow<'a> {
    pub id: &'a str,
    pub holder: &'a str,
    pub balance: Decimal,
}

/// Writes one CSV record per account, headed by the field names of [`AccountRow`].
pub fn print_accounts<'a, W>(
    output: &mut W,
    rows: impl IntoIterator<Item = AccountRow<'a>>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for row in rows {
        let id = row.id;
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write account `{id}` as CSV"))?;
    }
    writer.flush().context("Failed to flush account listing")
}
