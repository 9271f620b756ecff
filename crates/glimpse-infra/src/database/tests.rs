#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use crate::database::entity::{lead, post, user};
    use crate::database::postgres_repo::{
        PostgresLeadRepository, PostgresPostRepository, PostgresUserRepository,
    };
    use crate::database::schema::live_schema;
    use crate::database::{PostgresProbe, head_revision};
    use glimpse_core::domain::{Lead, LeadFilter, Post, User};
    use glimpse_core::error::RepoError;
    use glimpse_core::ports::{BaseRepository, DatabaseProbe, LeadRepository, PostRepository};
    use glimpse_core::schema::ColumnShape;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};

    fn lead_model(id: i32, name: &str) -> lead::Model {
        lead::Model {
            id,
            lead_name: Some(name.to_owned()),
            email: None,
            source: Some("Web".to_owned()),
            interest_level: None,
            status: None,
            salesperson: None,
        }
    }

    fn written() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    fn column_row(
        table: &str,
        column: &str,
        data_type: &str,
        is_nullable: &str,
        max_length: Option<i32>,
    ) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("table_name", Value::from(table.to_owned())),
            ("column_name", Value::from(column.to_owned())),
            ("data_type", Value::from(data_type.to_owned())),
            ("is_nullable", Value::from(is_nullable.to_owned())),
            ("max_length", Value::from(max_length)),
        ])
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let now = chrono::Utc::now().naive_utc();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: 7,
                user_id: 3,
                title: "Test Post".to_owned(),
                content: Some("Content".to_owned()),
                created_at: now,
                updated_at: now,
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(Arc::new(db));

        let result: Option<Post> = repo.find_by_id(7).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.user_id, 3);
    }

    #[tokio::test]
    async fn test_find_user_maps_every_column() {
        let now = chrono::Utc::now().naive_utc();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: 1,
                username: "ada".to_owned(),
                email: "ada@example.com".to_owned(),
                phone: None,
                last_login: None,
                is_active: true,
                created_at: now,
                profile_picture: Some("ada.png".to_owned()),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(Arc::new(db));
        let user: User = repo.find_by_id(1).await.unwrap().unwrap();

        assert_eq!(user.username, "ada");
        assert_eq!(user.profile_picture.as_deref(), Some("ada.png"));
        assert_eq!(user.created_at, now);
    }

    #[tokio::test]
    async fn test_posts_by_user() {
        let now = chrono::Utc::now().naive_utc();
        let row = |id: i32| post::Model {
            id,
            user_id: 3,
            title: format!("Post {}", id),
            content: None,
            created_at: now,
            updated_at: now,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row(1), row(2)]])
            .into_connection();

        let repo = PostgresPostRepository::new(Arc::new(db));
        let posts = repo.find_by_user_id(3).await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].title, "Post 2");
    }

    #[tokio::test]
    async fn test_find_leads_returns_rows_as_domain_leads() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![lead_model(5, "Ada")]])
            .into_connection();

        let repo = PostgresLeadRepository::new(Arc::new(db));
        let filter = LeadFilter {
            id: Some(5),
            source: Some("Referral".to_owned()),
            ..Default::default()
        };
        let leads = repo.find(filter).await.unwrap();

        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].lead_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_upsert_batch_counts_written_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![written(), written()])
            .into_connection();

        let repo = PostgresLeadRepository::new(Arc::new(db));
        let leads = vec![
            Lead::from(lead_model(1, "Ada")),
            Lead::from(lead_model(2, "Grace")),
        ];

        assert_eq!(repo.upsert_batch(leads).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_failed_upsert_rolls_back_the_batch() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results(vec![written()])
                .append_exec_errors(vec![DbErr::Custom("boom".to_owned())])
                .into_connection(),
        );

        let repo = PostgresLeadRepository::new(db.clone());
        let leads = vec![
            Lead::from(lead_model(1, "Ada")),
            Lead::from(lead_model(2, "Grace")),
            Lead::from(lead_model(3, "Linus")),
        ];
        let result = repo.upsert_batch(leads).await;
        assert!(result.is_err());

        drop(repo);
        let log = format!("{:?}", Arc::into_inner(db).unwrap().into_transaction_log());
        let rollback = log.rfind("ROLLBACK").expect("transaction was not rolled back");
        assert!(rollback > log.rfind("INSERT").unwrap());
        assert!(!log.contains("COMMIT"));
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(Arc::new(db));
        let result = BaseRepository::<Post, i32>::delete(&repo, 9).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_live_schema_groups_columns_by_table() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                column_row("leads", "id", "integer", "NO", None),
                column_row("leads", "source", "character varying", "YES", Some(100)),
                column_row("seaql_migrations", "version", "character varying", "NO", None),
                column_row("posts", "content", "text", "YES", None),
                column_row("posts", "updated_at", "timestamp without time zone", "NO", None),
            ]])
            .into_connection();

        let tables = live_schema(&db).await.unwrap();

        let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["leads", "posts"]);
        assert_eq!(
            tables[0].columns,
            vec![
                ColumnShape::new("id", "integer", false),
                ColumnShape::new("source", "varchar(100)", true),
            ]
        );
        assert_eq!(
            tables[1].columns[1],
            ColumnShape::new("updated_at", "timestamp", false)
        );
    }

    #[tokio::test]
    async fn test_missing_migration_table_means_nothing_applied() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![BTreeMap::from([(
                "present",
                Value::from(false),
            )])]])
            .into_connection();

        let probe = PostgresProbe::new(Arc::new(db));
        let revisions = probe.migration_revisions().await.unwrap();

        assert_eq!(revisions.current, None);
        assert_eq!(revisions.head, head_revision());
        assert!(!revisions.is_current());
    }

    #[tokio::test]
    async fn test_latest_applied_migration_is_current_revision() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![BTreeMap::from([(
                "present",
                Value::from(true),
            )])]])
            .append_query_results(vec![vec![BTreeMap::from([
                ("version", Value::from("m20250801_000003_create_leads".to_owned())),
                ("applied_at", Value::from(1_754_006_400_i64)),
            ])]])
            .into_connection();

        let probe = PostgresProbe::new(Arc::new(db));
        let revisions = probe.migration_revisions().await.unwrap();

        assert_eq!(
            revisions.current.as_deref(),
            Some("m20250801_000003_create_leads")
        );
        assert!(revisions.is_current());
    }

    #[test]
    fn test_head_revision_is_last_migration() {
        assert_eq!(
            head_revision().as_deref(),
            Some("m20250801_000003_create_leads")
        );
    }
}
