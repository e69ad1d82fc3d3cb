use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VisitCompanions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(VisitCompanions::VisitId).integer().not_null())
                    .col(ColumnDef::new(VisitCompanions::UserId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(VisitCompanions::VisitId)
                            .col(VisitCompanions::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VisitCompanions::Table, VisitCompanions::VisitId)
                            .to(Visits::Table, Visits::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VisitCompanions::Table, VisitCompanions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VisitCompanions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VisitCompanions {
    Table,
    VisitId,
    UserId,
}

#[derive(Iden)]
enum Visits {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
