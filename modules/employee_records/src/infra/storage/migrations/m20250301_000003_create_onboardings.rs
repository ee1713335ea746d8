use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Onboardings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Onboardings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Onboardings::Orientation)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Onboardings::FormsComplete)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Onboardings::EmployeeId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_onboardings_employee_id_employees")
                            .from(Onboardings::Table, Onboardings::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index enforces the one-to-one cardinality
        manager
            .create_index(
                Index::create()
                    .name("idx_onboardings_employee_id")
                    .table(Onboardings::Table)
                    .col(Onboardings::EmployeeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Onboardings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Onboardings {
    Table,
    Id,
    Orientation,
    FormsComplete,
    EmployeeId,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
}
