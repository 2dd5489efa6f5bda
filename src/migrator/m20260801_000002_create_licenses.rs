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
                    .table(Licenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Licenses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Licenses::EmployeeId).integer().not_null())
                    .col(ColumnDef::new(Licenses::Name).string().not_null())
                    .col(ColumnDef::new(Licenses::LicenseNumber).string())
                    .col(ColumnDef::new(Licenses::IssueDate).date().not_null())
                    .col(ColumnDef::new(Licenses::ExpiryDate).date().not_null())
                    .col(ColumnDef::new(Licenses::Status).string_len(24).not_null())
                    .col(ColumnDef::new(Licenses::IssuingAuthority).string())
                    .col(ColumnDef::new(Licenses::DocumentUrl).string())
                    .col(ColumnDef::new(Licenses::Notes).text())
                    .col(ColumnDef::new(Licenses::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Licenses::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_licenses_employee")
                            .from(Licenses::Table, Licenses::EmployeeId)
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
                    .name("idx_licenses_employee_id")
                    .table(Licenses::Table)
                    .col(Licenses::EmployeeId)
                    .to_owned(),
            )
            .await?;

        // The expiry dashboard sorts and filters on this column.
        manager
            .create_index(
                Index::create()
                    .name("idx_licenses_expiry_date")
                    .table(Licenses::Table)
                    .col(Licenses::ExpiryDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Licenses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Licenses {
    Table,
    Id,
    EmployeeId,
    Name,
    LicenseNumber,
    IssueDate,
    ExpiryDate,
    Status,
    IssuingAuthority,
    DocumentUrl,
    Notes,
    CreatedAt,
    UpdatedAt,
}
