use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Item condition reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
}

impl Condition {
    /// Parses the wire form (`new`, `like-new`, `good`, `fair`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Condition::New),
            "like-new" => Some(Condition::LikeNew),
            "good" => Some(Condition::Good),
            "fair" => Some(Condition::Fair),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Giveaway {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Estimated value in cents, for reference only.
    pub estimated_value: i64,
    pub image_url: String,
    pub host_username: String,
    pub condition: Condition,
    /// String-typed boolean, kept as `"true"`/`"false"` on the wire.
    pub is_active: String,
    pub created_at: DateTime<Utc>,
    pub location: Option<String>,
    pub end_date: DateTime<Utc>,
    pub claimed_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: i64,
    pub giveaway_id: i64,
    pub claimer_name: String,
    pub claimer_contact: Option<String>,
    pub claimed_at: DateTime<Utc>,
    pub status: ClaimStatus,
}

/// A claim joined with the giveaway it targets, as returned to hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimWithGiveaway {
    #[serde(flatten)]
    pub claim: Claim,
    pub giveaway: Giveaway,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

/// Validated input for creating a giveaway. `duration` is the listing
/// lifetime in days (1-30) and is not persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGiveaway {
    pub title: String,
    pub description: String,
    pub category: String,
    pub estimated_value: i64,
    pub image_url: String,
    pub host_username: String,
    pub duration: i64,
    pub condition: Option<Condition>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClaim {
    pub giveaway_id: i64,
    pub claimer_name: String,
    pub claimer_contact: Option<String>,
}
