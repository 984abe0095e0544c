use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    pub full_name: String,

    /// bcrypt hash (`$2b$...`), shared with the inventario API login flow
    pub password_hash: String,

    /// One of `admin`, `operador`, `supervisor`, `storekeeper`
    pub role: String,

    pub shift_id: Option<i32>,

    /// Assigned by the database (`CURRENT_TIMESTAMP`)
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shifts::Entity",
        from = "Column::ShiftId",
        to = "super::shifts::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Shift,
}

impl Related<super::shifts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shift.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
