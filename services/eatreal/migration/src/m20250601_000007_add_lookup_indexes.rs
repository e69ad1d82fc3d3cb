use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Visits::Table)
                    .col(Visits::UserId)
                    .name("idx_visits_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Visits::Table)
                    .col(Visits::RestaurantId)
                    .name("idx_visits_restaurant_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Visits::Table)
                    .col(Visits::VisitedAt)
                    .name("idx_visits_visited_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Images::Table)
                    .col(Images::VisitId)
                    .name("idx_images_visit_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Restaurants::Table)
                    .col(Restaurants::Latitude)
                    .col(Restaurants::Longitude)
                    .name("idx_restaurants_lat_lon")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_restaurants_lat_lon",
            "idx_images_visit_id",
            "idx_visits_visited_at",
            "idx_visits_restaurant_id",
            "idx_visits_user_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Visits {
    Table,
    UserId,
    RestaurantId,
    VisitedAt,
}

#[derive(Iden)]
enum Images {
    Table,
    VisitId,
}

#[derive(Iden)]
enum Restaurants {
    Table,
    Latitude,
    Longitude,
}
