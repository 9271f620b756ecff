//! Startup database checks.
//!
//! The sequence is connectivity, then migration currency, then schema drift.
//! It stops at the first failure; every failure is logged before returning.

use thiserror::Error;

use crate::ports::DatabaseProbe;
use crate::schema::SchemaDifference;

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum StartupCheckError {
    #[error("Database connection failed: {0}")]
    Connectivity(String),

    #[error(
        "Migrations not up to date (current: {}, head: {})",
        .current.as_deref().unwrap_or("none"),
        .head.as_deref().unwrap_or("none")
    )]
    MigrationsOutdated {
        current: Option<String>,
        head: Option<String>,
    },

    #[error("Schema drift detected ({} difference(s))", .0.len())]
    SchemaDrift(Vec<SchemaDifference>),

    #[error("Failed to inspect database: {0}")]
    Inspection(String),
}

/// Result of a check run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    /// Running under managed hosting, nothing was checked.
    Skipped,
}

/// Run the startup checks unless `managed_hosting` is set.
pub async fn run_startup_checks(
    probe: &dyn DatabaseProbe,
    managed_hosting: bool,
) -> Result<CheckOutcome, StartupCheckError> {
    tracing::info!("Running database health check");

    if managed_hosting {
        tracing::info!("Managed hosting environment detected, skipping database checks");
        return Ok(CheckOutcome::Skipped);
    }

    if let Err(e) = probe.ping().await {
        tracing::error!(error = %e, "Database connection failed");
        return Err(StartupCheckError::Connectivity(e.to_string()));
    }
    tracing::info!("Database connection successful");

    let revisions = probe.migration_revisions().await.map_err(|e| {
        tracing::error!(error = %e, "Error checking migration status");
        StartupCheckError::Inspection(e.to_string())
    })?;
    if !revisions.is_current() {
        tracing::error!(
            current = revisions.current.as_deref().unwrap_or("none"),
            head = revisions.head.as_deref().unwrap_or("none"),
            "Database schema outdated, run the migration tool"
        );
        return Err(StartupCheckError::MigrationsOutdated {
            current: revisions.current,
            head: revisions.head,
        });
    }
    tracing::info!("Database schema up to date");

    let drift = probe.schema_drift().await.map_err(|e| {
        tracing::error!(error = %e, "Error checking schema drift");
        StartupCheckError::Inspection(e.to_string())
    })?;
    if !drift.is_empty() {
        tracing::error!(
            "Schema drift detected, entity definitions differ from the database schema:"
        );
        for difference in &drift {
            tracing::error!("  - {}", difference);
        }
        tracing::error!("Generate a migration for the entity changes and apply it");
        return Err(StartupCheckError::SchemaDrift(drift));
    }
    tracing::info!("Entities match database schema");

    tracing::info!("All database checks passed");
    Ok(CheckOutcome::Passed)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::RepoError;
    use crate::ports::MigrationRevisions;

    #[derive(Default)]
    struct ScriptedProbe {
        unreachable: bool,
        current: Option<String>,
        drift: Vec<SchemaDifference>,
        revisions_fail: bool,
        drift_fails: bool,
        calls: AtomicUsize,
    }

    impl ScriptedProbe {
        fn healthy() -> Self {
            Self {
                current: Some("m2".to_string()),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl DatabaseProbe for ScriptedProbe {
        async fn ping(&self) -> Result<(), RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unreachable {
                return Err(RepoError::Connection("refused".to_string()));
            }
            Ok(())
        }

        async fn migration_revisions(&self) -> Result<MigrationRevisions, RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.revisions_fail {
                return Err(RepoError::Query(
                    "permission denied for seaql_migrations".to_string(),
                ));
            }
            Ok(MigrationRevisions {
                current: self.current.clone(),
                head: Some("m2".to_string()),
            })
        }

        async fn schema_drift(&self) -> Result<Vec<SchemaDifference>, RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.drift_fails {
                return Err(RepoError::Query("information_schema unavailable".to_string()));
            }
            Ok(self.drift.clone())
        }
    }

    #[tokio::test]
    async fn test_healthy_database_passes_all_steps() {
        let probe = ScriptedProbe::healthy();
        let outcome = run_startup_checks(&probe, false).await.unwrap();
        assert_eq!(outcome, CheckOutcome::Passed);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_managed_hosting_skips_every_step() {
        let probe = ScriptedProbe {
            unreachable: true,
            ..Default::default()
        };
        let outcome = run_startup_checks(&probe, true).await.unwrap();
        assert_eq!(outcome, CheckOutcome::Skipped);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unreachable_database_stops_at_connectivity() {
        let probe = ScriptedProbe {
            unreachable: true,
            ..ScriptedProbe::healthy()
        };
        let err = run_startup_checks(&probe, false).await.unwrap_err();
        assert!(matches!(err, StartupCheckError::Connectivity(_)));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_outdated_migrations_stop_before_drift_check() {
        let probe = ScriptedProbe {
            current: Some("m1".to_string()),
            ..Default::default()
        };
        let err = run_startup_checks(&probe, false).await.unwrap_err();
        assert!(matches!(
            err,
            StartupCheckError::MigrationsOutdated { ref current, .. }
                if current.as_deref() == Some("m1")
        ));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            err.to_string(),
            "Migrations not up to date (current: m1, head: m2)"
        );
    }

    #[tokio::test]
    async fn test_drift_fails_the_check() {
        let probe = ScriptedProbe {
            drift: vec![SchemaDifference::MissingTable("leads".to_string())],
            ..ScriptedProbe::healthy()
        };
        let err = run_startup_checks(&probe, false).await.unwrap_err();
        assert!(matches!(err, StartupCheckError::SchemaDrift(ref d) if d.len() == 1));
    }

    #[tokio::test]
    async fn test_unreadable_revisions_fail_as_inspection() {
        let probe = ScriptedProbe {
            revisions_fail: true,
            ..ScriptedProbe::healthy()
        };
        let err = run_startup_checks(&probe, false).await.unwrap_err();
        assert!(matches!(
            err,
            StartupCheckError::Inspection(ref msg) if msg.contains("seaql_migrations")
        ));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_schema_introspection_fails_as_inspection() {
        let probe = ScriptedProbe {
            drift_fails: true,
            ..ScriptedProbe::healthy()
        };
        let err = run_startup_checks(&probe, false).await.unwrap_err();
        assert!(matches!(err, StartupCheckError::Inspection(_)));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 3);
    }
}
