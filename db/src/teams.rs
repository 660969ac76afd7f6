use diesel::prelude::*;

use crate::schema::*;

#[derive(Clone, Debug, Queryable, Identifiable)]
#[diesel(table_name = team)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub fastcup_link: String,
    pub logo_link: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Insertable)]
#[diesel(table_name = team)]
pub struct NewTeam {
    pub name: String,
    /// Link to the team's page on the bracket site.
    pub fastcup_link: String,
    pub logo_link: String,
}
