use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .integer()
                            .auto_increment()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(User::Username)
                            .string_len(50)
                            .unique_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(User::PasswordHash).string().not_null())
                    .col(ColumnDef::new(User::PasswordSalt).string().not_null())
                    .col(ColumnDef::new(User::Role).string_len(20).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Complaint::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Complaint::Id)
                            .integer()
                            .auto_increment()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Complaint::Text).text().not_null())
                    .col(ColumnDef::new(Complaint::Category).string_len(50).not_null())
                    .col(ColumnDef::new(Complaint::Priority).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Complaint::Status)
                            .string_len(20)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(Complaint::Location).string_len(120).not_null())
                    .col(ColumnDef::new(Complaint::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(Complaint::SubmittedAt)
                            .date_time()
                            .not_null(),
                    )
                    // sqlite only accepts foreign keys inline with the create
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_user")
                            .from(Complaint::Table, Complaint::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // the dashboards always filter on one of these two
        manager
            .create_index(
                Index::create()
                    .name("complaint_user_id")
                    .table(Complaint::Table)
                    .col(Complaint::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("complaint_status")
                    .table(Complaint::Table)
                    .col(Complaint::Status)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Complaint::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum User {
    Table,
    Id,
    Username,
    PasswordHash,
    PasswordSalt,
    Role,
}

#[derive(Iden)]
pub(crate) enum Complaint {
    Table,
    Id,
    Text,
    Category,
    Priority,
    Status,
    Location,
    UserId,
    SubmittedAt,
}
