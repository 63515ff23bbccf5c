use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Products::Name, 30))
                    .col(double(Products::Price))
                    .col(timestamp_with_time_zone(Products::CreationDate))
                    .to_owned(),
            )
            .await?;

        // Mirrors the product validation rules
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE products
                    ADD CONSTRAINT products_name_length CHECK (char_length(name) BETWEEN 2 AND 30),
                    ADD CONSTRAINT products_price_non_negative CHECK (price >= 0)
                "#,
            )
            .await?;

        // Exact-match search by name
        manager
            .create_index(
                Index::create()
                    .name("idx_products_name")
                    .table(Products::Table)
                    .col(Products::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Price,
    CreationDate,
}
