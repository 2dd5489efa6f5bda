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
                    .table(EmergencyContacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmergencyContacts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmergencyContacts::EmployeeId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmergencyContacts::Name).string().not_null())
                    .col(
                        ColumnDef::new(EmergencyContacts::Relationship)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmergencyContacts::Phone).string().not_null())
                    .col(ColumnDef::new(EmergencyContacts::Email).string())
                    .col(ColumnDef::new(EmergencyContacts::Address).text())
                    .col(
                        ColumnDef::new(EmergencyContacts::IsPrimary)
                            .boolean()
                            .default(false)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmergencyContacts::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmergencyContacts::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_emergency_contacts_employee")
                            .from(EmergencyContacts::Table, EmergencyContacts::EmployeeId)
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
                    .name("idx_emergency_contacts_employee_id")
                    .table(EmergencyContacts::Table)
                    .col(EmergencyContacts::EmployeeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmergencyContacts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EmergencyContacts {
    Table,
    Id,
    EmployeeId,
    Name,
    Relationship,
    Phone,
    Email,
    Address,
    IsPrimary,
    CreatedAt,
    UpdatedAt,
}
