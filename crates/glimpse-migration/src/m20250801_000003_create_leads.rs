use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Lead ids come from the import source, so no sequence.
        manager
            .create_table(
                Table::create()
                    .table(Leads::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Leads::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Leads::LeadName).string_len(100).null())
                    .col(ColumnDef::new(Leads::Email).string_len(100).null())
                    .col(ColumnDef::new(Leads::Source).string_len(100).null())
                    .col(ColumnDef::new(Leads::InterestLevel).string_len(100).null())
                    .col(ColumnDef::new(Leads::Status).string_len(100).null())
                    .col(ColumnDef::new(Leads::Salesperson).string_len(100).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Leads::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Leads {
    Table,
    Id,
    LeadName,
    Email,
    Source,
    InterestLevel,
    Status,
    Salesperson,
}
