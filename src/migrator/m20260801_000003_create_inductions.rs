use sea_orm_migration::prelude::*;

use super::m20260801_000001_create_employees::Employees;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inductions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inductions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Inductions::EmployeeId).integer().not_null())
                    .col(ColumnDef::new(Inductions::Name).string().not_null())
                    .col(ColumnDef::new(Inductions::CompletedDate).date())
                    .col(ColumnDef::new(Inductions::ExpiryDate).date())
                    .col(ColumnDef::new(Inductions::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Inductions::Provider).string())
                    .col(ColumnDef::new(Inductions::Notes).text())
                    .col(ColumnDef::new(Inductions::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Inductions::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inductions_employee")
                            .from(Inductions::Table, Inductions::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inductions_employee_id")
                    .table(Inductions::Table)
                    .col(Inductions::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inductions_expiry_date")
                    .table(Inductions::Table)
                    .col(Inductions::ExpiryDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inductions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Inductions {
    Table,
    Id,
    EmployeeId,
    Name,
    CompletedDate,
    ExpiryDate,
    Status,
    Provider,
    Notes,
    CreatedAt,
    UpdatedAt,
}
