//! Create `classrooms` table with FK to `users` (owner).
//!
//! `is_deleted` is a soft-delete flag; rows are never removed by the API.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Classrooms::Table)
                    .if_not_exists()
                    .col(string_len(Classrooms::ClassId, 16).primary_key())
                    .col(string_len(Classrooms::ClassName, 128).not_null())
                    .col(text_null(Classrooms::Description))
                    .col(boolean(Classrooms::Done).not_null().default(false))
                    .col(uuid(Classrooms::OwnerId).not_null())
                    .col(boolean(Classrooms::IsDeleted).not_null().default(false))
                    .col(boolean(Classrooms::Shared).not_null().default(false))
                    .col(
                        timestamp_with_time_zone(Classrooms::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_classroom_owner")
                            .from(Classrooms::Table, Classrooms::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Classrooms::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Classrooms { Table, ClassId, ClassName, Description, Done, OwnerId, IsDeleted, Shared, CreatedAt }

#[derive(DeriveIden)]
enum Users { Table, Id }
