//! Data block parsing.
//!
//! Every line after the header becomes one row of `NV + 1` numeric fields:
//! the independent value followed by one value per declared variable.
//! Missing-value sentinels are stored exactly as written.

use crate::error::{NasError, Result};
use crate::fields::split_fields;
use crate::header::Header;
use crate::lines::RawLines;
use crate::models::DataBlock;
use tracing::debug;

/// Parse the data lines that follow the header
pub fn parse_data(raw: &RawLines, header: &Header) -> Result<DataBlock> {
    let names: Vec<String> = header.variables.iter().map(|v| v.name.clone()).collect();
    let expected = names.len() + 1;
    let mut block = DataBlock::with_names(names);

    let rows = raw
        .numbered_from(header.n_header_lines)
        .take(header.n_data_lines);

    for (number, line) in rows {
        let fields = split_fields(line);
        if fields.len() != expected {
            return Err(NasError::DataRowFieldCountMismatch {
                line: number,
                expected,
                found: fields.len(),
            });
        }

        block
            .independent
            .push(coerce(fields[0], number, &header.independent.name)?);
        for (column, value) in fields[1..].iter().enumerate() {
            let parsed = coerce(value, number, &block.names[column])?;
            block.columns[column].push(parsed);
        }
    }

    debug!(
        "Parsed {} data rows x {} columns",
        block.len(),
        block.names.len() + 1
    );
    Ok(block)
}

fn coerce(value: &str, line: usize, column: &str) -> Result<f64> {
    value.parse::<f64>().map_err(|_| NasError::DataCoercionError {
        line,
        column: column.to_string(),
        value: value.to_string(),
    })
}
