use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Classrooms: lookups by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_classroom_owner")
                    .table(Classrooms::Table)
                    .col(Classrooms::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Collaborators: member listings go by class + role
        manager
            .create_index(
                Index::create()
                    .name("idx_collaborator_class_role")
                    .table(ClassroomCollaborators::Table)
                    .col(ClassroomCollaborators::ClassId)
                    .col(ClassroomCollaborators::Role)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comment_class")
                    .table(Comments::Table)
                    .col(Comments::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assignment_class")
                    .table(Assignments::Table)
                    .col(Assignments::ClassId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_classroom_owner").table(Classrooms::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_collaborator_class_role")
                    .table(ClassroomCollaborators::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_comment_class").table(Comments::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_assignment_class").table(Assignments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Classrooms { Table, OwnerId }

#[derive(DeriveIden)]
enum ClassroomCollaborators { Table, ClassId, Role }

#[derive(DeriveIden)]
enum Comments { Table, ClassId }

#[derive(DeriveIden)]
enum Assignments { Table, ClassId }
