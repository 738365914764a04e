use serde::{Deserialize, Deserializer, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct KloutIdentity {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub network: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    #[serde(deserialize_with = "string_or_number")]
    pub score: String,
    #[serde(default)]
    pub score_delta: ScoreDelta,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDelta {
    #[serde(default, deserialize_with = "string_or_number")]
    pub day_change: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub week_change: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub month_change: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub display_name: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InfluenceGraph {
    #[serde(rename = "myInfluencers", default)]
    pub influencers: Vec<InfluenceEntity>,
    #[serde(rename = "myInfluencees", default)]
    pub influencees: Vec<InfluenceEntity>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InfluenceEntity {
    pub entity: EntityDetail,
}

impl InfluenceEntity {
    pub fn id(&self) -> &str {
        &self.entity.id
    }

    pub fn nick(&self) -> &str {
        &self.entity.payload.nick
    }

    pub fn score(&self) -> &str {
        &self.entity.payload.score.score
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EntityDetail {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub payload: InfluencePayload,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InfluencePayload {
    #[serde(default, deserialize_with = "string_or_number")]
    pub klout_id: String,
    pub nick: String,
    pub score: InfluenceScore,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InfluenceScore {
    #[serde(deserialize_with = "string_or_number")]
    pub score: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

// The API is inconsistent about quoting numeric fields
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}
