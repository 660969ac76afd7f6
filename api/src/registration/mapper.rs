use aktel_db::{
    members::NewMember, registrations::Registration, submissions::NewSubmission, teams::NewTeam,
    unset_timestamp, MemberRole,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{event, Level};

use super::phone::normalize_phone_or_raw;

/// The registration form's webhook payload, keyed by the form's field labels.
///
/// Missing fields default to empty values, the same as an unanswered question on the form.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireSubmission {
    #[serde(rename = "Submission Date")]
    pub submitted_at: String,
    #[serde(rename = "Team name")]
    pub team_name: String,
    #[serde(rename = "Captain - First Name")]
    pub captain_first_name: String,
    #[serde(rename = "Captain - Last Name")]
    pub captain_last_name: String,
    #[serde(rename = "Captain - Grad. Year")]
    pub captain_grad_year: i32,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "FastCup Link")]
    pub fastcup_link: String,
    #[serde(rename = "Member 2 - First Name")]
    pub member2_first_name: String,
    #[serde(rename = "Member 2 - Last Name")]
    pub member2_last_name: String,
    #[serde(rename = "Member 2 - Grad. Year")]
    pub member2_grad_year: i32,
    #[serde(rename = "Member 3 - First Name")]
    pub member3_first_name: String,
    #[serde(rename = "Member 3 - Last Name")]
    pub member3_last_name: String,
    #[serde(rename = "Member 3 - Grad. Year")]
    pub member3_grad_year: i32,
    #[serde(rename = "Member 4 - First Name")]
    pub member4_first_name: String,
    #[serde(rename = "Member 4 - Last Name")]
    pub member4_last_name: String,
    #[serde(rename = "Member 4 - Grad. Year")]
    pub member4_grad_year: i32,
    #[serde(rename = "Member 5 - First Name")]
    pub member5_first_name: String,
    #[serde(rename = "Member 5 - Last Name")]
    pub member5_last_name: String,
    #[serde(rename = "Member 5 - Grad. Year")]
    pub member5_grad_year: i32,
    #[serde(rename = "Reserve - First Name")]
    pub reserve_first_name: Option<String>,
    #[serde(rename = "Reserve - Last Name")]
    pub reserve_last_name: Option<String>,
    #[serde(rename = "Reserve - Grad. Year")]
    pub reserve_grad_year: Option<i32>,
    #[serde(rename = "Team logo")]
    pub team_logo: String,
    #[serde(rename = "Submission IP")]
    pub submission_ip: String,
    #[serde(rename = "Submission URL")]
    pub submission_url: String,
    #[serde(rename = "Submission Edit URL")]
    pub submission_edit_url: String,
    #[serde(rename = "Last Update Date")]
    pub last_update_date: Option<String>,
    #[serde(rename = "Submission ID")]
    pub submission_id: String,
}

impl WireSubmission {
    /// The reserve player, only if the form filled in all of the reserve's fields.
    fn reserve(&self) -> Option<(&str, &str, i32)> {
        match (
            &self.reserve_first_name,
            &self.reserve_last_name,
            self.reserve_grad_year,
        ) {
            (Some(first), Some(last), Some(year)) => Some((first.as_str(), last.as_str(), year)),
            _ => None,
        }
    }
}

/// Turn a form payload into the rows it should produce.
///
/// Never fails: unreadable timestamps and phone numbers are logged and replaced
/// by the unset timestamp and the raw phone text respectively.
pub fn map_submission(wire: &WireSubmission, tournament_id: i64) -> Registration {
    let team = NewTeam {
        name: wire.team_name.clone(),
        fastcup_link: wire.fastcup_link.clone(),
        logo_link: wire.team_logo.clone(),
    };

    let submitted_at = parse_timestamp("submitted_at", &wire.submitted_at);
    let last_updated_at = match wire.last_update_date.as_deref() {
        None | Some("") => unset_timestamp(),
        Some(s) => parse_timestamp("last_updated_at", s),
    };

    let external_id = Some(wire.submission_id.trim())
        .filter(|id| !id.is_empty())
        .map(String::from);

    let submission = NewSubmission {
        external_id,
        tournament_id,
        submitted_at,
        submission_ip: wire.submission_ip.clone(),
        submission_url: wire.submission_url.clone(),
        submission_edit_url: wire.submission_edit_url.clone(),
        last_updated_at,
    };

    let mut members = Vec::with_capacity(6);
    members.push(NewMember {
        name: wire.captain_first_name.clone(),
        surname: wire.captain_last_name.clone(),
        grad_year: wire.captain_grad_year,
        role: MemberRole::Captain,
        phone_number: Some(normalize_phone_or_raw(&wire.phone_number)),
    });

    let players = [
        (&wire.member2_first_name, &wire.member2_last_name, wire.member2_grad_year),
        (&wire.member3_first_name, &wire.member3_last_name, wire.member3_grad_year),
        (&wire.member4_first_name, &wire.member4_last_name, wire.member4_grad_year),
        (&wire.member5_first_name, &wire.member5_last_name, wire.member5_grad_year),
    ];
    members.extend(players.into_iter().map(|(first, last, year)| NewMember {
        name: first.clone(),
        surname: last.clone(),
        grad_year: year,
        role: MemberRole::Player,
        phone_number: None,
    }));

    if let Some((first, last, year)) = wire.reserve() {
        members.push(NewMember {
            name: first.to_string(),
            surname: last.to_string(),
            grad_year: year,
            role: MemberRole::Reserve,
            phone_number: None,
        });
    }

    Registration {
        team,
        submission,
        members,
    }
}

fn parse_timestamp(field: &'static str, value: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(t) => t.with_timezone(&Utc),
        Err(e) => {
            event!(Level::WARN, field, %value, error = %e, "could not parse timestamp");
            unset_timestamp()
        }
    }
}
