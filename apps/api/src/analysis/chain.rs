//! Resume analysis chain.
//!
//! Flow: retrieve market context → render prompt → LLM call → parse →
//!       patch missing fields from the rule-based result.
//!
//! Any LLM or parse failure falls back to the full rule-based analysis. No retries.

use tracing::{info, warn};

use crate::analysis::models::{
    clamp_score, AnalysisResult, AnalysisSource, LlmAnalysis, LlmMarketComparison, MarketComparison,
    SectionScore,
};
use crate::analysis::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM, ANALYSIS_TEMPERATURE};
use crate::analysis::rules;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{ChatOptions, LlmClient};
use crate::rag::{get_relevant_context, VectorStore};

/// Analyzes resume text, preferring the LLM when one is configured.
pub async fn analyze_resume(
    llm: Option<&LlmClient>,
    store: &VectorStore,
    text: &str,
) -> AnalysisResult {
    let fallback = rules::analyze(text);

    let Some(llm) = llm else {
        info!("No LLM configured, using rule-based resume analysis");
        return fallback;
    };

    let market_context = get_relevant_context(store, text).await;
    let prompt = render_prompt(&market_context, text);
    let options = ChatOptions {
        temperature: ANALYSIS_TEMPERATURE,
        ..ChatOptions::default()
    };

    match llm
        .call_json::<LlmAnalysis>(&prompt, ANALYSIS_SYSTEM, options)
        .await
    {
        Ok(parsed) => patch_analysis(parsed, fallback),
        Err(e) => {
            warn!("LLM analysis error, falling back to rule-based: {e}");
            fallback
        }
    }
}

fn render_prompt(market_context: &str, resume_text: &str) -> String {
    let body = ANALYSIS_PROMPT_TEMPLATE
        .replace("{market_context}", market_context)
        .replace("{resume_text}", resume_text);
    format!("{body}\n{JSON_ONLY_INSTRUCTION}")
}

/// Fills every field the model left out with the rule-based value and clamps scores.
pub fn patch_analysis(parsed: LlmAnalysis, fallback: AnalysisResult) -> AnalysisResult {
    let overall_score = parsed
        .overall_score
        .map(clamp_score)
        .unwrap_or(fallback.overall_score);

    let sections: Vec<SectionScore> = parsed
        .sections
        .into_iter()
        .filter_map(|s| {
            let title = s.title.filter(|t| !t.trim().is_empty())?;
            let score = match s.score {
                Some(raw) => clamp_score(raw),
                None => fallback
                    .sections
                    .iter()
                    .find(|f| same_section(&f.title, &title))
                    .map_or(overall_score, |f| f.score),
            };
            Some(SectionScore {
                title,
                score,
                feedback: s.feedback.unwrap_or_default(),
                suggestions: s.suggestions,
            })
        })
        .collect();
    let sections = if sections.is_empty() {
        fallback.sections
    } else {
        sections
    };

    let market_comparison = match parsed.market_comparison {
        Some(market) => patch_market(market, fallback.market_comparison),
        None => fallback.market_comparison,
    };

    let tips = if parsed.tips.is_empty() {
        fallback.tips
    } else {
        parsed.tips
    };

    let summary = parsed
        .summary
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(fallback.summary);

    AnalysisResult {
        overall_score,
        sections,
        market_comparison,
        tips,
        summary,
        source: AnalysisSource::Llm,
    }
}

/// Section titles match on their head before any "&", ignoring case, when
/// either head contains the other ("Education" ~ "Education & Certifications",
/// "Experience" ~ "Work Experience").
fn same_section(rule_title: &str, llm_title: &str) -> bool {
    fn head(title: &str) -> String {
        title
            .split('&')
            .next()
            .unwrap_or(title)
            .trim()
            .to_lowercase()
    }

    let (a, b) = (head(rule_title), head(llm_title));
    !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a))
}

fn patch_market(market: LlmMarketComparison, fallback: MarketComparison) -> MarketComparison {
    fn or_fallback(list: Vec<String>, fallback: Vec<String>) -> Vec<String> {
        if list.is_empty() {
            fallback
        } else {
            list
        }
    }

    MarketComparison {
        strengths: or_fallback(market.strengths, fallback.strengths),
        gaps: or_fallback(market.gaps, fallback.gaps),
        in_demand_skills: or_fallback(market.in_demand_skills, fallback.in_demand_skills),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::LlmSection;
    use crate::rag::HashingEmbedder;
    use std::sync::Arc;
    use std::time::Duration;

    const RESUME: &str = "John Smith john@example.com linkedin.com/in/js\n\
        Summary: backend developer. Experience: Developed Python services for 3 years.\n\
        Skills: Python, Docker. Education: BSc, State University.";

    #[test]
    fn test_render_prompt_substitutes_placeholders() {
        let prompt = render_prompt("CONTEXT", "RESUME");
        assert!(prompt.contains("CONTEXT"));
        assert!(prompt.contains("RESUME"));
        assert!(!prompt.contains("{market_context}"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(prompt.ends_with(JSON_ONLY_INSTRUCTION));
    }

    #[test]
    fn test_patch_fills_missing_fields_from_rules() {
        let fallback = rules::analyze(RESUME);
        let parsed = LlmAnalysis {
            overall_score: Some(150.0),
            ..LlmAnalysis::default()
        };
        let patched = patch_analysis(parsed, fallback.clone());

        assert_eq!(patched.overall_score, 100);
        assert_eq!(patched.sections.len(), fallback.sections.len());
        assert_eq!(patched.tips, fallback.tips);
        assert_eq!(patched.summary, fallback.summary);
        assert_eq!(
            patched.market_comparison.gaps,
            fallback.market_comparison.gaps
        );
        assert_eq!(patched.source, AnalysisSource::Llm);
    }

    #[test]
    fn test_patch_keeps_llm_values_and_clamps_sections() {
        let fallback = rules::analyze(RESUME);
        let parsed = LlmAnalysis {
            overall_score: None,
            sections: vec![
                LlmSection {
                    title: Some("Work Experience".to_string()),
                    score: Some(-20.0),
                    feedback: Some("thin".to_string()),
                    suggestions: vec!["add metrics".to_string()],
                },
                LlmSection {
                    title: None,
                    score: Some(50.0),
                    ..LlmSection::default()
                },
            ],
            market_comparison: Some(LlmMarketComparison {
                strengths: vec!["Clear structure".to_string()],
                ..LlmMarketComparison::default()
            }),
            tips: vec!["Be concise".to_string()],
            summary: Some("Solid.".to_string()),
        };
        let patched = patch_analysis(parsed, fallback.clone());

        assert_eq!(patched.overall_score, fallback.overall_score);
        assert_eq!(patched.sections.len(), 1);
        assert_eq!(patched.sections[0].score, 0);
        assert_eq!(patched.market_comparison.strengths, vec!["Clear structure"]);
        assert_eq!(
            patched.market_comparison.in_demand_skills,
            fallback.market_comparison.in_demand_skills
        );
        assert_eq!(patched.tips, vec!["Be concise"]);
        assert_eq!(patched.summary, "Solid.");
    }

    #[test]
    fn test_patch_section_without_score_uses_rule_section() {
        let fallback = rules::analyze(RESUME);
        let expected = fallback
            .sections
            .iter()
            .find(|s| s.title == rules::CONTACT_TITLE)
            .unwrap()
            .score;
        let parsed = LlmAnalysis {
            sections: vec![LlmSection {
                title: Some(rules::CONTACT_TITLE.to_string()),
                ..LlmSection::default()
            }],
            ..LlmAnalysis::default()
        };
        let patched = patch_analysis(parsed, fallback);
        assert_eq!(patched.sections[0].score, expected);
    }

    #[test]
    fn test_patch_matches_section_title_variants() {
        let fallback = rules::analyze(RESUME);
        let education = fallback
            .sections
            .iter()
            .find(|s| s.title == rules::EDUCATION_TITLE)
            .unwrap()
            .score;
        assert_ne!(education, fallback.overall_score);

        let parsed = LlmAnalysis {
            sections: vec![LlmSection {
                title: Some("Education & Certifications".to_string()),
                ..LlmSection::default()
            }],
            ..LlmAnalysis::default()
        };
        let patched = patch_analysis(parsed, fallback);
        assert_eq!(patched.sections[0].title, "Education & Certifications");
        assert_eq!(patched.sections[0].score, education);
    }

    #[test]
    fn test_same_section() {
        assert!(same_section("Education", "Education & Certifications"));
        assert!(same_section("Work Experience", "experience"));
        assert!(same_section("Skills & Technologies", "Technical Skills"));
        assert!(!same_section("Education", "Work Experience"));
        assert!(!same_section("Education", "  "));
    }

    #[tokio::test]
    async fn test_without_llm_returns_rule_based() {
        let store = VectorStore::new(Arc::new(HashingEmbedder::default()));
        let result = analyze_resume(None, &store, RESUME).await;
        assert_eq!(result.source, AnalysisSource::RuleBased);
        assert_eq!(result.overall_score, rules::analyze(RESUME).overall_score);
    }

    #[tokio::test]
    async fn test_unreachable_llm_falls_back() {
        let llm = LlmClient::new(
            "test-key".to_string(),
            "http://127.0.0.1:9".to_string(),
            "test-model".to_string(),
            Duration::from_secs(2),
        )
        .unwrap();
        let store = VectorStore::new(Arc::new(HashingEmbedder::default()));
        let result = analyze_resume(Some(&llm), &store, RESUME).await;
        assert_eq!(result.source, AnalysisSource::RuleBased);
        assert_eq!(result.sections.len(), 5);
    }
}
