use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Friends::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Friends::UserId).integer().not_null())
                    .col(ColumnDef::new(Friends::FriendId).integer().not_null())
                    .primary_key(Index::create().col(Friends::UserId).col(Friends::FriendId))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Friends::Table, Friends::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Friends::Table, Friends::FriendId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Friends::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Friends {
    Table,
    UserId,
    FriendId,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
