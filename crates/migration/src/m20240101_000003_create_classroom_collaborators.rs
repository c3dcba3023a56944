//! Create `classroom_collaborators` join table.
//!
//! One row per (user, classroom); `is_removed` marks a member who left or was removed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClassroomCollaborators::Table)
                    .if_not_exists()
                    .col(uuid(ClassroomCollaborators::UserId).not_null())
                    .col(string_len(ClassroomCollaborators::ClassId, 16).not_null())
                    .col(string_len(ClassroomCollaborators::Role, 16).not_null())
                    .col(boolean(ClassroomCollaborators::IsRemoved).not_null().default(false))
                    .col(
                        timestamp_with_time_zone(ClassroomCollaborators::JoinedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_classroom_collaborators")
                            .col(ClassroomCollaborators::UserId)
                            .col(ClassroomCollaborators::ClassId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collaborator_user")
                            .from(ClassroomCollaborators::Table, ClassroomCollaborators::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collaborator_classroom")
                            .from(ClassroomCollaborators::Table, ClassroomCollaborators::ClassId)
                            .to(Classrooms::Table, Classrooms::ClassId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClassroomCollaborators::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ClassroomCollaborators { Table, UserId, ClassId, Role, IsRemoved, JoinedAt }

#[derive(DeriveIden)]
enum Users { Table, Id }

#[derive(DeriveIden)]
enum Classrooms { Table, ClassId }
