use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProgram::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserProgram::UserId).integer().not_null())
                    .col(ColumnDef::new(UserProgram::ProgramId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_user_program")
                            .col(UserProgram::UserId)
                            .col(UserProgram::ProgramId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_program_user_id")
                            .from(UserProgram::Table, UserProgram::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_program_program_id")
                            .from(UserProgram::Table, UserProgram::ProgramId)
                            .to(Program::Table, Program::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_program_program_id")
                    .table(UserProgram::Table)
                    .col(UserProgram::ProgramId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_program_owner_id")
                    .table(Program::Table)
                    .col(Program::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_episode_program_id")
                    .table(Episode::Table)
                    .col(Episode::ProgramId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_episode_slug")
                    .table(Episode::Table)
                    .col(Episode::Slug)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_episode_slug")
                    .table(Episode::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_episode_program_id")
                    .table(Episode::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_program_owner_id")
                    .table(Program::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(UserProgram::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserProgram {
    Table,
    UserId,
    ProgramId,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Program {
    Table,
    Id,
    OwnerId,
}

#[derive(DeriveIden)]
enum Episode {
    Table,
    ProgramId,
    Slug,
}
