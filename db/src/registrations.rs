use diesel::{
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
    PgConnection,
};
use tracing::{event, Level};

use crate::{
    members::NewMember, schema::*, submissions::NewSubmission, teams::NewTeam, Error, Pool,
    PoolExt,
};

const EXTERNAL_ID_CONSTRAINT: &str = "submission_external_id_key";

/// Everything a single form submission produces: one team, its submission
/// record and the roster in display order (captain first).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub team: NewTeam,
    pub submission: NewSubmission,
    pub members: Vec<NewMember>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Registered { team_id: i64 },
    /// A submission with the same external id was stored earlier. Nothing was written.
    AlreadyRegistered,
}

/// Store the team, submission and roster as one transaction.
pub async fn apply_submission(
    pool: &Pool,
    registration: Registration,
) -> Result<ApplyOutcome, Error> {
    let result = pool
        .transaction(move |conn| insert_registration(conn, &registration))
        .await;

    match result {
        Ok(team_id) => Ok(ApplyOutcome::Registered { team_id }),
        Err(Error::DuplicateSubmission(external_id)) => {
            event!(Level::INFO, %external_id, "submission already registered");
            Ok(ApplyOutcome::AlreadyRegistered)
        }
        Err(e) => Err(e),
    }
}

/// Insert all rows of a registration on `conn`, returning the new team id.
///
/// This does not open a transaction itself, callers are expected to run it inside one
/// so that a failed member insert leaves nothing behind.
pub fn insert_registration(
    conn: &mut PgConnection,
    registration: &Registration,
) -> Result<i64, Error> {
    let team_id = diesel::insert_into(team::table)
        .values(&registration.team)
        .returning(team::id)
        .get_result::<i64>(conn)?;

    let submission_row = registration.submission.for_team(team_id);
    diesel::insert_into(submission::table)
        .values(&submission_row)
        .execute(conn)
        .map_err(|e| match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                if info.constraint_name() == Some(EXTERNAL_ID_CONSTRAINT) =>
            {
                Error::DuplicateSubmission(
                    registration
                        .submission
                        .external_id
                        .clone()
                        .unwrap_or_default(),
                )
            }
            e => Error::from(e),
        })?;

    for (index, member) in registration.members.iter().enumerate() {
        diesel::insert_into(member::table)
            .values(&member.for_team(team_id))
            .execute(conn)
            .map_err(|source| Error::MemberInsert { index, source })?;
    }

    event!(
        Level::INFO,
        team_id,
        members = registration.members.len(),
        "stored registration"
    );

    Ok(team_id)
}
