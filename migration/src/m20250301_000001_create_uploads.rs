use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 上传记录表，文件描述信息内嵌为列
        manager
            .create_table(
                Table::create()
                    .table(Uploads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Uploads::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Uploads::Name).string().null())
                    .col(ColumnDef::new(Uploads::Created).big_integer().not_null())
                    .col(ColumnDef::new(Uploads::StoredName).string().not_null())
                    .col(ColumnDef::new(Uploads::OriginalName).string().not_null())
                    .col(ColumnDef::new(Uploads::MimeType).string().not_null())
                    .col(ColumnDef::new(Uploads::SizeBytes).big_integer().not_null())
                    .col(ColumnDef::new(Uploads::Path).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 下载按 (stored_name, original_name) 查找
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_uploads_stored_original")
                    .table(Uploads::Table)
                    .col(Uploads::StoredName)
                    .col(Uploads::OriginalName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Uploads::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Uploads {
    #[sea_orm(iden = "uploads")]
    Table,
    Id,
    Name,
    Created,
    StoredName,
    OriginalName,
    MimeType,
    SizeBytes,
    Path,
}
