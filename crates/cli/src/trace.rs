//! Trace parsing.
//!
//! One reference per line: `<core> <kind> <address>`, where kind is `I`,
//! `L` or `S` (or the numeric `0`, `1`, `2`) and the address is hex with an
//! optional `0x` prefix. Blank lines and `#` comments are skipped.

use std::io::BufRead;

use memsim_core::common::{AccessType, CoreId};

use crate::error::{MemsimError, TraceError};

/// One parsed reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// Issuing core.
    pub core: CoreId,
    /// Reference kind.
    pub kind: AccessType,
    /// Byte address.
    pub addr: u64,
}

fn parse_kind(field: &str) -> Option<AccessType> {
    match field {
        "I" | "i" | "0" => Some(AccessType::Fetch),
        "L" | "l" | "1" => Some(AccessType::Load),
        "S" | "s" | "2" => Some(AccessType::Store),
        _ => None,
    }
}

/// Parses one trace line. Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns a [`TraceError`] naming the line for a missing or malformed field,
/// or a core id at or above `cores`.
pub fn parse_line(
    line_no: usize,
    text: &str,
    cores: usize,
) -> Result<Option<TraceRecord>, TraceError> {
    let text = text.split('#').next().unwrap_or_default().trim();
    if text.is_empty() {
        return Ok(None);
    }
    let fail = |reason: String| TraceError { line: line_no, reason };

    let mut fields = text.split_whitespace();
    let (Some(core), Some(kind), Some(addr), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(fail(format!("expected `<core> <kind> <address>`, got `{text}`")));
    };

    let core: CoreId = core.parse().map_err(|_| fail(format!("bad core id `{core}`")))?;
    if core >= cores {
        return Err(fail(format!("core {core} out of range for {cores} core(s)")));
    }
    let kind = parse_kind(kind).ok_or_else(|| fail(format!("bad access kind `{kind}`")))?;
    let digits = addr.trim_start_matches("0x").trim_start_matches("0X");
    let addr = u64::from_str_radix(digits, 16).map_err(|_| fail(format!("bad address `{addr}`")))?;

    Ok(Some(TraceRecord { core, kind, addr }))
}

/// Reads every record from `reader`.
///
/// # Errors
///
/// Returns the first I/O or parse error.
pub fn read_trace(reader: impl BufRead, cores: usize) -> Result<Vec<TraceRecord>, MemsimError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        if let Some(record) = parse_line(idx + 1, &line?, cores)? {
            records.push(record);
        }
    }
    Ok(records)
}
