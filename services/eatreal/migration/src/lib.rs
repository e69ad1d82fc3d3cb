use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users;
mod m20250601_000002_create_friends;
mod m20250601_000003_create_restaurants;
mod m20250601_000004_create_visits;
mod m20250601_000005_create_visit_companions;
mod m20250601_000006_create_images;
mod m20250601_000007_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users::Migration),
            Box::new(m20250601_000002_create_friends::Migration),
            Box::new(m20250601_000003_create_restaurants::Migration),
            Box::new(m20250601_000004_create_visits::Migration),
            Box::new(m20250601_000005_create_visit_companions::Migration),
            Box::new(m20250601_000006_create_images::Migration),
            Box::new(m20250601_000007_add_lookup_indexes::Migration),
        ]
    }
}
