use diesel::prelude::*;

use crate::{schema::*, Error, Pool, PoolExt};

/// Names of the teams registered for the active tournament, in submission order.
///
/// When several tournaments are active the one that starts first wins. Returns
/// `None` if no tournament is active.
pub async fn registered_team_names(pool: &Pool) -> Result<Option<Vec<String>>, Error> {
    pool.interact(|conn| {
        let tournament_id = tournament::table
            .filter(tournament::is_active.eq(true))
            .order(tournament::start_date.asc())
            .select(tournament::id)
            .first::<i64>(conn)
            .optional()?;

        let Some(tournament_id) = tournament_id else {
            return Ok(None);
        };

        let names = team::table
            .inner_join(submission::table)
            .filter(submission::tournament_id.eq(tournament_id))
            .order(submission::submitted_at.asc())
            .select(team::name)
            .load::<String>(conn)?;

        Ok::<_, Error>(Some(names))
    })
    .await
}
