//! Structural comparison between declared table shapes and a live schema.
//!
//! Types are compared in a canonical spelling (`integer`, `varchar(26)`,
//! `text`, `boolean`, `timestamp`, `timestamptz`, ...). Producing that
//! spelling from entity definitions and from the store's catalog is the job
//! of the infrastructure layer.

use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnShape {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
}

impl ColumnShape {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableShape {
    pub name: String,
    pub columns: Vec<ColumnShape>,
}

impl TableShape {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnShape>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    fn column(&self, name: &str) -> Option<&ColumnShape> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// One divergence between the declared and the live schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaDifference {
    MissingTable(String),
    UnexpectedTable(String),
    MissingColumn {
        table: String,
        column: String,
    },
    UnexpectedColumn {
        table: String,
        column: String,
    },
    TypeMismatch {
        table: String,
        column: String,
        declared: String,
        live: String,
    },
    NullabilityMismatch {
        table: String,
        column: String,
        declared_nullable: bool,
    },
}

impl fmt::Display for SchemaDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaDifference::MissingTable(table) => {
                write!(f, "table '{}' is declared but missing from the database", table)
            }
            SchemaDifference::UnexpectedTable(table) => {
                write!(f, "table '{}' exists in the database but is not declared", table)
            }
            SchemaDifference::MissingColumn { table, column } => {
                write!(f, "column '{}.{}' is declared but missing", table, column)
            }
            SchemaDifference::UnexpectedColumn { table, column } => {
                write!(f, "column '{}.{}' exists but is not declared", table, column)
            }
            SchemaDifference::TypeMismatch {
                table,
                column,
                declared,
                live,
            } => write!(
                f,
                "column '{}.{}' is declared as {} but the database has {}",
                table, column, declared, live
            ),
            SchemaDifference::NullabilityMismatch {
                table,
                column,
                declared_nullable,
            } => {
                let (declared, live) = if *declared_nullable {
                    ("NULL", "NOT NULL")
                } else {
                    ("NOT NULL", "NULL")
                };
                write!(
                    f,
                    "column '{}.{}' is declared {} but the database has {}",
                    table, column, declared, live
                )
            }
        }
    }
}

/// Compare declared tables against live tables.
///
/// Output is ordered by table name, then declared column order, then
/// undeclared live columns.
pub fn diff_schemas(declared: &[TableShape], live: &[TableShape]) -> Vec<SchemaDifference> {
    let declared: BTreeMap<&str, &TableShape> =
        declared.iter().map(|t| (t.name.as_str(), t)).collect();
    let live: BTreeMap<&str, &TableShape> = live.iter().map(|t| (t.name.as_str(), t)).collect();

    let mut names: Vec<&str> = declared.keys().chain(live.keys()).copied().collect();
    names.sort_unstable();
    names.dedup();

    let mut diffs = Vec::new();
    for name in names {
        match (declared.get(name), live.get(name)) {
            (Some(_), None) => diffs.push(SchemaDifference::MissingTable(name.to_string())),
            (None, Some(_)) => diffs.push(SchemaDifference::UnexpectedTable(name.to_string())),
            (Some(d), Some(l)) => diff_columns(d, l, &mut diffs),
            (None, None) => {}
        }
    }
    diffs
}

fn diff_columns(declared: &TableShape, live: &TableShape, diffs: &mut Vec<SchemaDifference>) {
    let table = &declared.name;
    for column in &declared.columns {
        let Some(actual) = live.column(&column.name) else {
            diffs.push(SchemaDifference::MissingColumn {
                table: table.clone(),
                column: column.name.clone(),
            });
            continue;
        };
        if column.data_type != actual.data_type {
            diffs.push(SchemaDifference::TypeMismatch {
                table: table.clone(),
                column: column.name.clone(),
                declared: column.data_type.clone(),
                live: actual.data_type.clone(),
            });
        }
        if column.nullable != actual.nullable {
            diffs.push(SchemaDifference::NullabilityMismatch {
                table: table.clone(),
                column: column.name.clone(),
                declared_nullable: column.nullable,
            });
        }
    }
    for column in &live.columns {
        if declared.column(&column.name).is_none() {
            diffs.push(SchemaDifference::UnexpectedColumn {
                table: table.clone(),
                column: column.name.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leads() -> TableShape {
        TableShape::new(
            "leads",
            vec![
                ColumnShape::new("id", "integer", false),
                ColumnShape::new("lead_name", "varchar(100)", true),
            ],
        )
    }

    #[test]
    fn test_identical_schemas_have_no_drift() {
        assert!(diff_schemas(&[leads()], &[leads()]).is_empty());
    }

    #[test]
    fn test_missing_and_unexpected_tables() {
        let live = TableShape::new("audit", vec![]);
        let diffs = diff_schemas(&[leads()], &[live]);
        assert_eq!(
            diffs,
            vec![
                SchemaDifference::UnexpectedTable("audit".to_string()),
                SchemaDifference::MissingTable("leads".to_string()),
            ]
        );
    }

    #[test]
    fn test_column_level_differences() {
        let live = TableShape::new(
            "leads",
            vec![
                ColumnShape::new("id", "bigint", true),
                ColumnShape::new("notes", "text", true),
            ],
        );
        let diffs = diff_schemas(&[leads()], &[live]);
        assert_eq!(diffs.len(), 4);
        assert!(matches!(
            &diffs[0],
            SchemaDifference::TypeMismatch { column, .. } if column == "id"
        ));
        assert!(matches!(
            &diffs[1],
            SchemaDifference::NullabilityMismatch { declared_nullable: false, .. }
        ));
        assert!(matches!(
            &diffs[2],
            SchemaDifference::MissingColumn { column, .. } if column == "lead_name"
        ));
        assert!(matches!(
            &diffs[3],
            SchemaDifference::UnexpectedColumn { column, .. } if column == "notes"
        ));
    }

    #[test]
    fn test_difference_display_is_readable() {
        let diff = SchemaDifference::NullabilityMismatch {
            table: "users".to_string(),
            column: "email".to_string(),
            declared_nullable: false,
        };
        assert_eq!(
            diff.to_string(),
            "column 'users.email' is declared NOT NULL but the database has NULL"
        );
    }
}
