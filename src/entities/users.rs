use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,
    #[sea_orm(has_many = "super::user_programs::Entity")]
    UserPrograms,
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::user_programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserPrograms.def()
    }
}

/// Favorites: users reach programs through the `user_program` join table.
impl Related<super::programs::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_programs::Relation::Program.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::user_programs::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
