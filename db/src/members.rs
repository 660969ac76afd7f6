use diesel::prelude::*;

use crate::{schema::*, MemberRole};

#[derive(Clone, Debug, Queryable, Identifiable)]
#[diesel(table_name = member)]
pub struct Member {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub surname: String,
    pub grad_year: i32,
    pub role: MemberRole,
    pub phone_number: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub surname: String,
    pub grad_year: i32,
    pub role: MemberRole,
    pub phone_number: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = member)]
pub(crate) struct MemberRow<'a> {
    pub team_id: i64,
    pub name: &'a str,
    pub surname: &'a str,
    pub grad_year: i32,
    pub role: MemberRole,
    pub phone_number: Option<&'a str>,
}

impl NewMember {
    pub(crate) fn for_team(&self, team_id: i64) -> MemberRow<'_> {
        MemberRow {
            team_id,
            name: &self.name,
            surname: &self.surname,
            grad_year: self.grad_year,
            role: self.role,
            phone_number: self.phone_number.as_deref(),
        }
    }
}
