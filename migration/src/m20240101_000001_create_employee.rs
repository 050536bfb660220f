use sea_orm_migration::{prelude::*, sea_orm::DatabaseBackend};

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
}

/// 64-bit auto-increment key. SQLite only auto-assigns through an `integer`
/// rowid alias, which is already 64 bits wide.
fn id_column(backend: DatabaseBackend) -> ColumnDef {
    let mut column = ColumnDef::new(Employee::Id);
    match backend {
        DatabaseBackend::Sqlite => column.integer(),
        _ => column.big_integer(),
    };
    column.not_null().auto_increment().primary_key().to_owned()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(&mut id_column(manager.get_database_backend()))
                    .col(ColumnDef::new(Employee::FirstName).string_len(128))
                    .col(ColumnDef::new(Employee::LastName).string_len(128))
                    .col(ColumnDef::new(Employee::Email).string_len(320))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_last_name")
                    .table(Employee::Table)
                    .col(Employee::LastName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employee::Table).if_exists().to_owned())
            .await
    }
}
