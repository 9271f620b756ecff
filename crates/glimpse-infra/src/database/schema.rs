//! Declared and live table shapes for the schema drift check.

use sea_orm::sea_query::{ColumnType, StringLen};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait, IdenStatic, Iterable, Statement,
};

use glimpse_core::schema::{ColumnShape, TableShape};

use super::entity::{lead, post, user};

/// Tables owned by the migration tool rather than by an entity.
pub const IGNORED_TABLES: &[&str] = &["seaql_migrations"];

/// Canonical spelling of a SeaORM column type, matching [`canonical_pg_type`].
pub fn canonical_entity_type(column_type: &ColumnType) -> String {
    match column_type {
        ColumnType::SmallInteger => "smallint".to_string(),
        ColumnType::Integer => "integer".to_string(),
        ColumnType::BigInteger => "bigint".to_string(),
        ColumnType::Boolean => "boolean".to_string(),
        ColumnType::Text => "text".to_string(),
        ColumnType::String(StringLen::N(len)) => format!("varchar({})", len),
        ColumnType::String(_) => "varchar".to_string(),
        ColumnType::DateTime | ColumnType::Timestamp => "timestamp".to_string(),
        ColumnType::TimestampWithTimeZone => "timestamptz".to_string(),
        ColumnType::Date => "date".to_string(),
        ColumnType::Double => "double precision".to_string(),
        ColumnType::Float => "real".to_string(),
        ColumnType::Json => "json".to_string(),
        ColumnType::JsonBinary => "jsonb".to_string(),
        ColumnType::Uuid => "uuid".to_string(),
        other => format!("{:?}", other).to_lowercase(),
    }
}

/// Canonical spelling of an `information_schema.columns.data_type` value.
pub fn canonical_pg_type(data_type: &str, max_length: Option<i32>) -> String {
    match (data_type, max_length) {
        ("character varying", Some(len)) => format!("varchar({})", len),
        ("character varying", None) => "varchar".to_string(),
        ("timestamp without time zone", _) => "timestamp".to_string(),
        ("timestamp with time zone", _) => "timestamptz".to_string(),
        (other, _) => other.to_string(),
    }
}

fn entity_shape<E>() -> TableShape
where
    E: EntityTrait,
{
    let columns = E::Column::iter()
        .map(|column| {
            let def = column.def();
            ColumnShape::new(
                column.as_str(),
                canonical_entity_type(def.get_column_type()),
                def.is_null(),
            )
        })
        .collect();
    TableShape::new(E::default().table_name(), columns)
}

/// Shapes of every table the entities declare.
pub fn declared_schema() -> Vec<TableShape> {
    vec![
        entity_shape::<user::Entity>(),
        entity_shape::<post::Entity>(),
        entity_shape::<lead::Entity>(),
    ]
}

const LIVE_COLUMNS_SQL: &str = r#"
SELECT table_name::text AS table_name,
       column_name::text AS column_name,
       data_type::text AS data_type,
       is_nullable::text AS is_nullable,
       character_maximum_length::int4 AS max_length
FROM information_schema.columns
WHERE table_schema = current_schema()
ORDER BY table_name, ordinal_position
"#;

/// Read the shapes of every table in the current schema, minus
/// [`IGNORED_TABLES`].
pub async fn live_schema<C>(db: &C) -> Result<Vec<TableShape>, DbErr>
where
    C: ConnectionTrait,
{
    let rows = db
        .query_all(Statement::from_string(DbBackend::Postgres, LIVE_COLUMNS_SQL))
        .await?;

    let mut tables: Vec<TableShape> = Vec::new();
    for row in rows {
        let table: String = row.try_get("", "table_name")?;
        if IGNORED_TABLES.contains(&table.as_str()) {
            continue;
        }
        let name: String = row.try_get("", "column_name")?;
        let data_type: String = row.try_get("", "data_type")?;
        let is_nullable: String = row.try_get("", "is_nullable")?;
        let max_length: Option<i32> = row.try_get("", "max_length")?;

        let column = ColumnShape::new(
            name,
            canonical_pg_type(&data_type, max_length),
            is_nullable == "YES",
        );
        // Rows arrive grouped by table.
        match tables.last_mut() {
            Some(last) if last.name == table => last.columns.push(column),
            _ => tables.push(TableShape::new(table, vec![column])),
        }
    }
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimpse_core::schema::diff_schemas;

    fn declared(table: &str) -> TableShape {
        declared_schema()
            .into_iter()
            .find(|t| t.name == table)
            .unwrap()
    }

    #[test]
    fn test_declares_all_three_tables() {
        let names: Vec<String> = declared_schema().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["users", "posts", "leads"]);
    }

    #[test]
    fn test_user_columns_follow_entity_definition() {
        let users = declared("users");
        let username = users.columns.iter().find(|c| c.name == "username").unwrap();
        assert_eq!(username.data_type, "varchar(26)");
        assert!(!username.nullable);

        let last_login = users.columns.iter().find(|c| c.name == "last_login").unwrap();
        assert_eq!(last_login.data_type, "timestamp");
        assert!(last_login.nullable);
    }

    #[test]
    fn test_post_content_is_nullable_text() {
        let posts = declared("posts");
        let content = posts.columns.iter().find(|c| c.name == "content").unwrap();
        assert_eq!(content.data_type, "text");
        assert!(content.nullable);
    }

    #[test]
    fn test_lead_id_is_plain_integer() {
        let leads = declared("leads");
        assert_eq!(leads.columns[0], ColumnShape::new("id", "integer", false));
        assert_eq!(leads.columns.len(), 7);
    }

    #[test]
    fn test_postgres_type_names_are_canonicalized() {
        assert_eq!(canonical_pg_type("character varying", Some(100)), "varchar(100)");
        assert_eq!(canonical_pg_type("timestamp without time zone", None), "timestamp");
        assert_eq!(canonical_pg_type("integer", None), "integer");
    }

    #[test]
    fn test_migrated_leads_table_has_no_drift() {
        // What information_schema reports after the leads migration.
        let mut columns = vec![ColumnShape::new("id", "integer", false)];
        for name in ["lead_name", "email", "source", "interest_level", "status", "salesperson"] {
            columns.push(ColumnShape::new(
                name,
                canonical_pg_type("character varying", Some(100)),
                true,
            ));
        }
        let live = TableShape::new("leads", columns);
        assert!(diff_schemas(&[declared("leads")], &[live]).is_empty());
    }
}
