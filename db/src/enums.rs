use diesel_derive_enum::DbEnum;

/// The position a member holds on a team roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::MemberRole"]
pub enum MemberRole {
    #[db_rename = "CAPTAIN"]
    Captain,
    #[db_rename = "PLAYER"]
    Player,
    #[db_rename = "RESERVE"]
    Reserve,
}
