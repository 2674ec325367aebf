use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::llm::complete_json;
use crate::matcher::Ranker;
use crate::models::SkillSummary;

/// Production ranker: asks the configured LLM to order skill names by
/// relevance to the user's intent.
pub struct LlmRanker {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmRanker {
    pub fn new(client: reqwest::Client, config: LlmConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Ranker for LlmRanker {
    async fn rank(&self, query: &str, candidates: &[SkillSummary]) -> Result<Vec<String>> {
        let prompt = build_rank_prompt(query, candidates)?;
        let response = complete_json(
            &self.client,
            &self.config,
            &self.config.rank_model,
            &prompt,
        )
        .await?;
        Ok(parse_ranked_names(&response))
    }
}

fn build_rank_prompt(query: &str, candidates: &[SkillSummary]) -> Result<String> {
    let database =
        serde_json::to_string(candidates).context("Failed to encode skill summaries")?;

    Ok(format!(
        "User Query: \"{query}\"\n\n\
         Available Skills Database (JSON):\n{database}\n\n\
         Task:\n\
         1. Analyze the user's intent.\n\
         2. Select the skills that match the intent.\n\
         3. Return a JSON array of skill names, sorted by relevance.\n\n\
         Respond with ONLY the JSON array of strings. No explanation."
    ))
}

/// Parse the service's answer into a list of names. The service is expected
/// to return a JSON string array, possibly wrapped in chatter or a markdown
/// fence. Anything unparseable is treated as an empty ranking; a decode
/// failure must never surface past the matcher.
fn parse_ranked_names(content: &str) -> Vec<String> {
    let json_str = if let Some(start) = content.find('[') {
        if let Some(end) = content.rfind(']') {
            &content[start..=end]
        } else {
            content
        }
    } else {
        content
    };

    match serde_json::from_str::<Vec<String>>(json_str) {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!("Failed to parse ranked names: {e}. Raw: {content}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_json_array() {
        let input = r#"["SEC Analyst Pro", "Jira Sprint Groomer"]"#;
        let result = parse_ranked_names(input);
        assert_eq!(result, vec!["SEC Analyst Pro", "Jira Sprint Groomer"]);
    }

    #[test]
    fn test_parse_json_embedded_in_text() {
        let input = "Here are the matches:\n[\"Figma Design Auditor\"]\nHope that helps!";
        let result = parse_ranked_names(input);
        assert_eq!(result, vec!["Figma Design Auditor"]);
    }

    #[test]
    fn test_parse_json_in_markdown_code_block() {
        let input = "```json\n[\"SEC Analyst Pro\"]\n```";
        let result = parse_ranked_names(input);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_ranked_names("[]").is_empty());
    }

    #[test]
    fn test_parse_garbage_returns_empty() {
        assert!(parse_ranked_names("I don't understand the question.").is_empty());
    }

    #[test]
    fn test_parse_no_closing_bracket() {
        assert!(parse_ranked_names("[\"partial").is_empty());
    }

    #[test]
    fn test_parse_non_string_elements_returns_empty() {
        assert!(parse_ranked_names(r#"[{"name":"SEC Analyst Pro"}]"#).is_empty());
    }

    #[test]
    fn test_parse_unicode_names() {
        let result = parse_ranked_names(r#"["契約レビュー"]"#);
        assert_eq!(result, vec!["契約レビュー"]);
    }

    #[test]
    fn test_rank_prompt_contains_query_and_candidates() {
        let candidates = vec![SkillSummary {
            name: "SEC Analyst Pro".into(),
            outcomes: vec!["Analyze 10-K".into()],
        }];
        let prompt = build_rank_prompt("analyze filings", &candidates).unwrap();
        assert!(prompt.contains("analyze filings"));
        assert!(prompt.contains("SEC Analyst Pro"));
        assert!(prompt.contains("Analyze 10-K"));
    }
}
