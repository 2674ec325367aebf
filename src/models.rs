use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A marketplace skill entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub provider: SkillProvider,
    pub category: String,
    pub outcomes: Vec<String>,
    pub risk_score: u8,
    pub compatibility: Compatibility,
    pub status: SkillStatus,
    pub install_count: u64,
    pub last_audited: NaiveDate,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkillProvider {
    Notion,
    Figma,
    Atlassian,
    Slack,
    Internal,
    Community,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Compatibility {
    Local,
    Hosted,
    Edge,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkillStatus {
    Active,
    Quarantined,
    Flagged,
    Review,
}

/// Compact projection of a skill sent to the ranking service.
/// Full records are withheld to keep the outbound request small.
#[derive(Debug, Clone, Serialize)]
pub struct SkillSummary {
    pub name: String,
    pub outcomes: Vec<String>,
}

impl SkillSummary {
    pub fn of(skill: &Skill) -> Self {
        Self {
            name: skill.name.clone(),
            outcomes: skill.outcomes.clone(),
        }
    }
}

/// A cognition stream entry: one observation/action pair from a platform agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentLog {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub agent_id: String,
    pub event_type: AgentEventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_skill: Option<String>,
    pub observation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u8>,
    pub action_taken: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentEventType {
    PermissionMismatch,
    ApiDrift,
    OutcomeMapping,
    SecurityScan,
    AutoFix,
    ContentGen,
    AssetRender,
    PolicyUpdate,
    EconomicAdjustment,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Discovery search request
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// Discovery search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    /// Monotonically increasing per-search token. A caller holding responses
    /// from overlapping searches keeps only the highest generation.
    pub generation: u64,
    pub results: Vec<Skill>,
    /// Number of results selected by the ranking service, in its order.
    pub ranked: usize,
    /// Number of results appended by the local substring fallback.
    pub fallback: usize,
    /// True when the ranking service failed or returned nothing usable and
    /// the results are pure local substring matches.
    pub degraded: bool,
}

/// Sentinel audit request
#[derive(Debug, Clone, Deserialize)]
pub struct AuditRequest {
    pub code: String,
}

/// Sentinel audit report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub risk_score: u8,
    pub findings: Vec<String>,
    pub verdict: AuditVerdict,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditVerdict {
    Approved,
    Flagged,
    Quarantined,
}

/// A generated marketing article for a skill
#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    pub title: String,
    /// Markdown body
    pub content: String,
    pub seo_description: String,
    pub keywords: Vec<String>,
    pub generated_date: DateTime<Utc>,
    pub author_agent: String,
}

/// Image generation request
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    #[serde(default)]
    pub size: ImageSize,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "9:16")]
    Tall,
    #[serde(rename = "16:9")]
    Wide,
}

/// Image edit request. `image` is a data URL or raw base64.
#[derive(Debug, Clone, Deserialize)]
pub struct EditRequest {
    pub image: String,
    pub prompt: String,
}

/// Video generation request
#[derive(Debug, Clone, Deserialize)]
pub struct VideoRequest {
    pub prompt: String,
    #[serde(default)]
    pub aspect_ratio: VideoAspect,
    #[serde(default)]
    pub resolution: VideoResolution,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum VideoAspect {
    #[default]
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "9:16")]
    Tall,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum VideoResolution {
    #[serde(rename = "720p")]
    Hd,
    #[default]
    #[serde(rename = "1080p")]
    FullHd,
}

/// Generated image response: a base64 data URL
#[derive(Debug, Clone, Serialize)]
pub struct ImageResponse {
    pub data_url: String,
}

/// Generated video response: a provider-hosted URI
#[derive(Debug, Clone, Serialize)]
pub struct VideoResponse {
    pub uri: String,
}

/// LLM config update request
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfigUpdate {
    pub provider: Option<String>,
    // base_url intentionally omitted: immutable at runtime to prevent SSRF
    pub rank_model: Option<String>,
    pub content_model: Option<String>,
    pub image_model: Option<String>,
    pub edit_model: Option<String>,
    pub video_model: Option<String>,
    pub api_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_status_serializes_to_snake_case() {
        let json = serde_json::to_value(SkillStatus::Quarantined).unwrap();
        assert_eq!(json, "quarantined");
    }

    #[test]
    fn test_event_type_round_trips_screaming_case() {
        let json = serde_json::to_string(&AgentEventType::PermissionMismatch).unwrap();
        assert_eq!(json, "\"PERMISSION_MISMATCH\"");
        let back: AgentEventType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AgentEventType::PermissionMismatch);
    }

    #[test]
    fn test_image_size_uses_display_names() {
        assert_eq!(serde_json::to_value(ImageSize::FourK).unwrap(), "4K");
        let back: ImageSize = serde_json::from_value(serde_json::json!("2K")).unwrap();
        assert_eq!(back, ImageSize::TwoK);
    }

    #[test]
    fn test_aspect_ratio_rejects_unknown_variant() {
        let result: Result<AspectRatio, _> = serde_json::from_value(serde_json::json!("21:9"));
        assert!(result.is_err());
    }

    #[test]
    fn test_video_request_defaults() {
        let req: VideoRequest = serde_json::from_str(r#"{"prompt":"a drone shot"}"#).unwrap();
        assert_eq!(req.aspect_ratio, VideoAspect::Wide);
        assert_eq!(req.resolution, VideoResolution::FullHd);
    }

    #[test]
    fn test_skill_summary_projects_name_and_outcomes_only() {
        let summary = SkillSummary {
            name: "SEC Analyst Pro".into(),
            outcomes: vec!["Analyze 10-K".into()],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json.as_object().unwrap().keys().collect::<Vec<_>>(),
            vec!["name", "outcomes"]
        );
    }
}
