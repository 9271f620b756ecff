//! Lead import from CSV exports.
//!
//! The first record is the header row. Columns are located by name, so their
//! order in the file does not matter and unknown columns are ignored. Rows
//! that cannot be mapped to a [`Lead`] are collected as [`RejectedRow`]s and
//! never abort the import.

use csv::{ReaderBuilder, StringRecord};

use crate::domain::{LEAD_TEXT_MAX, Lead};

pub const COL_ID: &str = "Lead ID";
pub const COL_NAME: &str = "Lead Name";
pub const COL_EMAIL: &str = "Contact Information";
pub const COL_SOURCE: &str = "Source";
pub const COL_INTEREST_LEVEL: &str = "Interest Level";
pub const COL_STATUS: &str = "Status";
pub const COL_SALESPERSON: &str = "Assigned Salesperson";

/// A data row that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line of the record in the file, header included.
    pub line: u64,
    pub reason: String,
}

/// Outcome of mapping a CSV document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadImport {
    /// Accepted leads in file order.
    pub leads: Vec<Lead>,
    pub rejected: Vec<RejectedRow>,
}

/// Column positions resolved from the header row.
struct Columns {
    id: Option<usize>,
    name: Option<usize>,
    email: Option<usize>,
    source: Option<usize>,
    interest_level: Option<usize>,
    status: Option<usize>,
    salesperson: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            id: find(COL_ID),
            name: find(COL_NAME),
            email: find(COL_EMAIL),
            source: find(COL_SOURCE),
            interest_level: find(COL_INTEREST_LEVEL),
            status: find(COL_STATUS),
            salesperson: find(COL_SALESPERSON),
        }
    }

    fn map(&self, record: &StringRecord) -> Result<Lead, String> {
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i));

        let raw_id = cell(self.id).ok_or_else(|| format!("missing '{}'", COL_ID))?;
        let id = raw_id
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid '{}' {:?}: {}", COL_ID, raw_id, e))?;

        let text = |idx: Option<usize>, column: &str| -> Result<Option<String>, String> {
            match cell(idx) {
                Some(value) if value.chars().count() > LEAD_TEXT_MAX => Err(format!(
                    "'{}' exceeds {} characters",
                    column, LEAD_TEXT_MAX
                )),
                Some(value) => Ok(Some(value.to_string())),
                None => Ok(None),
            }
        };

        Ok(Lead {
            id,
            lead_name: text(self.name, COL_NAME)?,
            email: text(self.email, COL_EMAIL)?,
            source: text(self.source, COL_SOURCE)?,
            interest_level: text(self.interest_level, COL_INTEREST_LEVEL)?,
            status: text(self.status, COL_STATUS)?,
            salesperson: text(self.salesperson, COL_SALESPERSON)?,
        })
    }
}

/// Map CSV text to leads.
///
/// A leading byte-order mark is ignored. Records may be ragged; missing
/// cells read as `None`. An unreadable header row rejects nothing and
/// imports nothing.
pub fn parse_lead_csv(text: &str) -> LeadImport {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = match reader.headers() {
        Ok(headers) => Columns::resolve(headers),
        Err(e) => {
            return LeadImport {
                leads: Vec::new(),
                rejected: vec![RejectedRow {
                    line: 1,
                    reason: format!("unreadable header row: {}", e),
                }],
            };
        }
    };

    let mut import = LeadImport::default();
    for (index, result) in reader.records().enumerate() {
        let fallback_line = index as u64 + 2;
        let mapped = match result {
            Ok(record) => {
                let line = record.position().map_or(fallback_line, |p| p.line());
                columns.map(&record).map_err(|reason| RejectedRow { line, reason })
            }
            Err(e) => Err(RejectedRow {
                line: e.position().map_or(fallback_line, |p| p.line()),
                reason: e.to_string(),
            }),
        };
        match mapped {
            Ok(lead) => import.leads.push(lead),
            Err(rejected) => import.rejected.push(rejected),
        }
    }
    import
}
