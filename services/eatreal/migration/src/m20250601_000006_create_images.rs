use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// No ON DELETE CASCADE: images are removed by the service in the same
// transaction as their visit.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Images::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Images::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Images::Url).text().not_null())
                    .col(ColumnDef::new(Images::Caption).string())
                    .col(ColumnDef::new(Images::VisitId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Images::Table, Images::VisitId)
                            .to(Visits::Table, Visits::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Images::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Images {
    Table,
    Id,
    Url,
    Caption,
    VisitId,
}

#[derive(Iden)]
enum Visits {
    Table,
    Id,
}
