use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::*;

#[derive(Clone, Debug, Queryable, Identifiable)]
#[diesel(table_name = submission)]
pub struct Submission {
    pub id: i64,
    pub external_id: Option<String>,
    pub team_id: i64,
    pub tournament_id: i64,
    pub submitted_at: DateTime<Utc>,
    pub submission_ip: String,
    pub submission_url: String,
    pub submission_edit_url: String,
    pub last_updated_at: DateTime<Utc>,
}

/// A form submission before it has been attached to a team.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSubmission {
    /// The form's own submission id. Unique when present.
    pub external_id: Option<String>,
    pub tournament_id: i64,
    pub submitted_at: DateTime<Utc>,
    pub submission_ip: String,
    pub submission_url: String,
    pub submission_edit_url: String,
    /// [crate::unset_timestamp] when the form was never edited.
    pub last_updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = submission)]
pub(crate) struct SubmissionRow<'a> {
    pub team_id: i64,
    pub external_id: Option<&'a str>,
    pub tournament_id: i64,
    pub submitted_at: DateTime<Utc>,
    pub submission_ip: &'a str,
    pub submission_url: &'a str,
    pub submission_edit_url: &'a str,
    pub last_updated_at: DateTime<Utc>,
}

impl NewSubmission {
    pub(crate) fn for_team(&self, team_id: i64) -> SubmissionRow<'_> {
        SubmissionRow {
            team_id,
            external_id: self.external_id.as_deref(),
            tournament_id: self.tournament_id,
            submitted_at: self.submitted_at,
            submission_ip: &self.submission_ip,
            submission_url: &self.submission_url,
            submission_edit_url: &self.submission_edit_url,
            last_updated_at: self.last_updated_at,
        }
    }
}
