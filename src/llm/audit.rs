use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::LlmConfig;
use crate::llm::complete_json;
use crate::models::{AuditReport, AuditVerdict};

/// Run a Sentinel security audit over a code snippet.
///
/// Unlike discovery ranking, a provider failure here is surfaced: an audit
/// that silently degrades to "no findings" would be worse than no audit.
pub async fn audit_snippet(
    client: &reqwest::Client,
    config: &LlmConfig,
    code: &str,
) -> Result<AuditReport> {
    let prompt = build_audit_prompt(code);
    let response = complete_json(client, config, &config.content_model, &prompt).await?;
    parse_audit_report(&response)
}

fn build_audit_prompt(code: &str) -> String {
    format!(
        "You are the Sentinel, an autonomous security agent.\n\
         Analyze the following code snippet for high-risk primitives \
         (fs:write, network calls, shell execution).\n\n\
         Code:\n```\n{code}\n```\n\n\
         Return a JSON object with:\n\
         - riskScore (0-100)\n\
         - findings (array of strings)\n\
         - status (APPROVED | FLAGGED | QUARANTINED)"
    )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuditWire {
    risk_score: f32,
    #[serde(default)]
    findings: Vec<String>,
    status: String,
}

fn parse_audit_report(content: &str) -> Result<AuditReport> {
    // Direct parse first, then the object embedded in surrounding chatter
    let wire: AuditWire = match serde_json::from_str(content) {
        Ok(w) => w,
        Err(_) => {
            let start = content.find('{').context("No JSON object in audit response")?;
            let end = content.rfind('}').context("No JSON object in audit response")?;
            serde_json::from_str(&content[start..=end])
                .context("Audit response is not a valid report object")?
        }
    };

    let verdict = match wire.status.as_str() {
        "APPROVED" => AuditVerdict::Approved,
        "FLAGGED" => AuditVerdict::Flagged,
        "QUARANTINED" => AuditVerdict::Quarantined,
        other => anyhow::bail!("Unexpected audit verdict: {other}"),
    };

    Ok(AuditReport {
        risk_score: wire.risk_score.round().clamp(0.0, 100.0) as u8,
        findings: wire.findings,
        verdict,
    })
}
