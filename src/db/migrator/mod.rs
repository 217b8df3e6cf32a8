use sea_orm_migration::prelude::*;

mod m20210101_000001_initial;
mod m20210131_065352_favorites;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20210101_000001_initial::Migration),
            Box::new(m20210131_065352_favorites::Migration),
        ]
    }
}
