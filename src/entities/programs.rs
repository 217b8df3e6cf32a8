use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "program")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub synopsis: String,
    pub poster: Option<String>,
    pub country: Option<String>,
    pub year: Option<i32>,
    /// Only null between construction and owner assignment.
    pub owner_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Owner,
    #[sea_orm(has_many = "super::seasons::Entity")]
    Seasons,
    #[sea_orm(has_many = "super::episodes::Entity")]
    Episodes,
    #[sea_orm(has_many = "super::user_programs::Entity")]
    UserPrograms,
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seasons.def()
    }
}

impl Related<super::episodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Episodes.def()
    }
}

impl Related<super::user_programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserPrograms.def()
    }
}

/// Users who have this program in their favorites.
impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_programs::Relation::User.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::user_programs::Relation::Program.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
