//! Target-dialect statement forms used by the migration script

use crate::dialect::Dialect;
use crate::model::{Column, RoutineKind};

/// Table used in a SQL Server DROP INDEX when the index's table is unknown
const UNKNOWN_INDEX_TABLE: &str = "dbo.unknown";

/// Column definition text as written in the source, minus a trailing comma
pub fn column_definition(column: &Column) -> &str {
    let raw = column.raw.trim();
    raw.strip_suffix(',').unwrap_or(raw).trim_end()
}

pub fn add_column(dialect: Dialect, table: &str, column: &Column) -> String {
    let definition = column_definition(column);
    match dialect {
        Dialect::Oracle => format!("ALTER TABLE {} ADD ({});", table, definition),
        Dialect::SqlServer => format!("ALTER TABLE {} ADD {};", table, definition),
    }
}

/// Retype `column` to its source type.
///
/// SQL Server needs the nullability restated; it is taken from the source
/// column.
pub fn alter_column_type(dialect: Dialect, table: &str, column: &Column) -> String {
    match dialect {
        Dialect::Oracle => format!(
            "ALTER TABLE {} MODIFY ({} {});",
            table, column.name, column.data_type
        ),
        Dialect::SqlServer => format!(
            "ALTER TABLE {} ALTER COLUMN {} {} {};",
            table,
            column.name,
            column.data_type,
            if column.nullable { "NULL" } else { "NOT NULL" }
        ),
    }
}

pub fn drop_index(dialect: Dialect, name: &str, table: Option<&str>) -> String {
    match dialect {
        Dialect::Oracle => format!("DROP INDEX {};", name),
        Dialect::SqlServer => format!(
            "IF EXISTS (SELECT * FROM sys.indexes WHERE name = '{}') DROP INDEX {} ON {};",
            name,
            name,
            table.unwrap_or(UNKNOWN_INDEX_TABLE)
        ),
    }
}

/// Guarded drop of a routine, including the closing separator line.
///
/// SQL Server checks the catalog first; Oracle runs the drop dynamically
/// and swallows the error raised when the object does not exist.
pub fn drop_routine(dialect: Dialect, kind: RoutineKind, name: &str) -> Vec<String> {
    match dialect {
        Dialect::Oracle => vec![
            "BEGIN".to_string(),
            format!("  EXECUTE IMMEDIATE 'DROP {} {}';", kind.keyword(), name),
            "EXCEPTION".to_string(),
            "  WHEN OTHERS THEN NULL;".to_string(),
            "END;".to_string(),
            dialect.batch_separator().to_string(),
        ],
        Dialect::SqlServer => vec![
            format!(
                "IF OBJECT_ID(N'{}', N'{}') IS NOT NULL",
                name,
                kind.sqlserver_type_code()
            ),
            format!("  DROP {} {};", kind.keyword(), name),
            dialect.batch_separator().to_string(),
        ],
    }
}
