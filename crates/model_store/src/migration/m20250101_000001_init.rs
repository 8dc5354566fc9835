use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

use crate::db::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        manager
            .create_table(
                Table::create()
                    .table(Sets::Table)
                    .if_not_exists()
                    .col(identity_col(backend, Sets::Id))
                    .col(ColumnDef::new(Sets::SetName).string().not_null())
                    .col(ColumnDef::new(Sets::Description).text())
                    .col(ColumnDef::new(Sets::Items).text().not_null())
                    .col(ColumnDef::new(Sets::Length).big_integer().not_null())
                    .col(ColumnDef::new(Sets::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Sets::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Parameters::Table)
                    .if_not_exists()
                    .col(identity_col(backend, Parameters::Id))
                    .col(ColumnDef::new(Parameters::Name).string().not_null())
                    .col(ColumnDef::new(Parameters::Value).double().not_null())
                    .col(ColumnDef::new(Parameters::Relations).text().not_null())
                    .col(ColumnDef::new(Parameters::Description).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DecisionVariables::Table)
                    .if_not_exists()
                    .col(identity_col(backend, DecisionVariables::Id))
                    .col(ColumnDef::new(DecisionVariables::Name).string().not_null())
                    .col(ColumnDef::new(DecisionVariables::Description).text())
                    .col(
                        ColumnDef::new(DecisionVariables::Relations)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DecisionVariables::Length)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DecisionVariables::Value).double())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Constraints::Table)
                    .if_not_exists()
                    .col(identity_col(backend, Constraints::Id))
                    .col(ColumnDef::new(Constraints::Name).string().not_null())
                    .col(
                        ColumnDef::new(Constraints::ParametersNeeded)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Constraints::DecisionNeeded).text().not_null())
                    .col(ColumnDef::new(Constraints::Description).text())
                    .col(ColumnDef::new(Constraints::Sign).string().not_null())
                    .col(ColumnDef::new(Constraints::Format).text())
                    .col(ColumnDef::new(Constraints::Rhs).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ObjectiveFunctions::Table)
                    .if_not_exists()
                    .col(identity_col(backend, ObjectiveFunctions::Id))
                    .col(ColumnDef::new(ObjectiveFunctions::Name).string().not_null())
                    .col(
                        ColumnDef::new(ObjectiveFunctions::ParametersNeeded)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ObjectiveFunctions::DecisionNeeded)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ObjectiveFunctions::Description).text())
                    .col(ColumnDef::new(ObjectiveFunctions::Format).text().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(ObjectiveFunctions::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Constraints::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(DecisionVariables::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Parameters::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sets::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

/// Auto-increment primary key whose values are never handed out twice.
///
/// SQLite only honours `AUTOINCREMENT` on an `INTEGER PRIMARY KEY`; Postgres
/// gets a `BIGSERIAL` backed by a sequence.
fn identity_col<T: Iden + 'static>(backend: DatabaseBackend, column: T) -> ColumnDef {
    let mut def = ColumnDef::new(column);
    match backend {
        DatabaseBackend::Sqlite => def.integer(),
        _ => def.big_integer(),
    };
    def.not_null().auto_increment().primary_key().to_owned()
}
