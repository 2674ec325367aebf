use anyhow::{Context, Result};
use chrono::Utc;
use serde::Deserialize;

use crate::config::LlmConfig;
use crate::llm::complete_json;
use crate::models::{BlogPost, Skill};

/// Generate a marketing article for a skill. Provider failures and
/// undecodable output are surfaced to the caller.
pub async fn generate_blog_post(
    client: &reqwest::Client,
    config: &LlmConfig,
    skill: &Skill,
) -> Result<BlogPost> {
    let prompt = build_blog_prompt(skill);
    let response = complete_json(client, config, &config.content_model, &prompt).await?;
    let wire = parse_blog_wire(&response)?;

    Ok(BlogPost {
        title: wire.title,
        content: wire.content,
        seo_description: wire.seo_description,
        keywords: wire.keywords,
        generated_date: Utc::now(),
        author_agent: format!("Writer-01 ({})", config.content_model),
    })
}

fn build_blog_prompt(skill: &Skill) -> String {
    format!(
        "You are 'Writer-01', an autonomous AI technical content strategist.\n\
         Write a comprehensive, SEO-optimized blog post for the following \
         Enterprise AI Skill.\n\n\
         Skill Name: {}\n\
         Description: {}\n\
         Category: {}\n\
         Outcomes: {}\n\n\
         Requirements:\n\
         1. Title: Catchy and professional.\n\
         2. Content: 400-600 words, formatted in Markdown. Include headers, \
         bullet points for benefits, and a \"Technical Deep Dive\" section.\n\
         3. Tone: Authoritative, futuristic, enterprise-grade.\n\
         4. SEO: Provide a meta description and keywords.\n\n\
         Output JSON Schema:\n\
         {{\n\
           \"title\": \"string\",\n\
           \"content\": \"markdown string\",\n\
           \"seoDescription\": \"string\",\n\
           \"keywords\": [\"string\"]\n\
         }}",
        skill.name,
        skill.description,
        skill.category,
        skill.outcomes.join(", ")
    )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlogWire {
    title: String,
    content: String,
    seo_description: String,
    #[serde(default)]
    keywords: Vec<String>,
}

fn parse_blog_wire(content: &str) -> Result<BlogWire> {
    match serde_json::from_str(content) {
        Ok(w) => Ok(w),
        Err(_) => {
            let start = content.find('{').context("No JSON object in blog response")?;
            let end = content.rfind('}').context("No JSON object in blog response")?;
            serde_json::from_str(&content[start..=end])
                .context("Blog response is not a valid article object")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_article() {
        let input = r##"{"title":"T","content":"# Body","seoDescription":"S","keywords":["ai"]}"##;
        let wire = parse_blog_wire(input).unwrap();
        assert_eq!(wire.title, "T");
        assert_eq!(wire.keywords, vec!["ai"]);
    }

    #[test]
    fn test_parse_article_in_markdown_fence() {
        let input = "```json\n{\"title\":\"T\",\"content\":\"C\",\"seoDescription\":\"S\",\"keywords\":[]}\n```";
        let wire = parse_blog_wire(input).unwrap();
        assert_eq!(wire.title, "T");
    }

    #[test]
    fn test_parse_missing_title_is_an_error() {
        let input = r#"{"content":"C","seoDescription":"S","keywords":[]}"#;
        assert!(parse_blog_wire(input).is_err());
    }

    #[test]
    fn test_parse_garbage_is_an_error() {
        assert!(parse_blog_wire("I wrote you a lovely post.").is_err());
    }

    #[test]
    fn test_blog_prompt_includes_skill_fields() {
        let skill = crate::catalog::Catalog::load(None)
            .unwrap()
            .skills
            .remove(0);
        let prompt = build_blog_prompt(&skill);
        assert!(prompt.contains(&skill.name));
        assert!(prompt.contains(&skill.description));
        assert!(prompt.contains("Technical Deep Dive"));
    }
}
