//! Schema migrations, applied by the `migration` binary.
//!
//! Revisions are ordered by name; the last entry of
//! [`Migrator::migrations`] is the head revision the API server expects.

pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_users;
mod m20250801_000002_create_posts;
mod m20250801_000003_create_leads;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_users::Migration),
            Box::new(m20250801_000002_create_posts::Migration),
            Box::new(m20250801_000003_create_leads::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revisions_are_in_name_order() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.last().map(String::as_str), Some("m20250801_000003_create_leads"));
    }
}
