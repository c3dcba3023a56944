//! Create `assignments` table scoped to a classroom and authored by a user.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(uuid(Assignments::Id).primary_key())
                    .col(string_len(Assignments::Title, 255).not_null())
                    .col(string_len_null(Assignments::Type, 64))
                    .col(text_null(Assignments::Description))
                    .col(string_len_null(Assignments::Link, 1024))
                    .col(string_len(Assignments::ClassId, 16).not_null())
                    .col(uuid(Assignments::AuthorId).not_null())
                    .col(boolean(Assignments::IsDeleted).not_null().default(false))
                    .col(
                        timestamp_with_time_zone(Assignments::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignment_classroom")
                            .from(Assignments::Table, Assignments::ClassId)
                            .to(Classrooms::Table, Classrooms::ClassId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignment_author")
                            .from(Assignments::Table, Assignments::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Assignments::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Assignments { Table, Id, Title, Type, Description, Link, ClassId, AuthorId, IsDeleted, CreatedAt }

#[derive(DeriveIden)]
enum Users { Table, Id }

#[derive(DeriveIden)]
enum Classrooms { Table, ClassId }
