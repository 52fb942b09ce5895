//! JD gap analysis chain.
//!
//! Flow: retrieve context for resume + JD → LLM call → parse → filter generic
//!       skills and top up from the rule-based extraction.

use tracing::{info, warn};

use crate::analysis::models::{clamp_score, AnalysisSource};
use crate::gap::models::{GapAnalysisResult, LlmGapAnalysis};
use crate::gap::prompts::{
    GAP_ANALYSIS_PROMPT_TEMPLATE, GAP_ANALYSIS_SYSTEM, GAP_ANALYSIS_TEMPERATURE,
};
use crate::gap::rules::{
    calculate_match_score, contains_ignore_case, extract_missing_skills, is_generic_skill,
    MAX_MISSING_SKILLS, MIN_MISSING_SKILLS,
};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{ChatOptions, LlmClient};
use crate::rag::{get_relevant_context, VectorStore};

const PLACEHOLDER_STRENGTH: &str = "Resume submitted for analysis";
const PLACEHOLDER_GAP: &str = "Skill gaps identified";

pub async fn analyze_gap(
    llm: Option<&LlmClient>,
    store: &VectorStore,
    resume_text: &str,
    job_description: &str,
) -> GapAnalysisResult {
    let Some(llm) = llm else {
        info!("No LLM configured, using rule-based gap analysis");
        return rule_based_gap(resume_text, job_description);
    };

    let market_context =
        get_relevant_context(store, &format!("{resume_text} {job_description}")).await;
    let prompt = format!(
        "{}\n{JSON_ONLY_INSTRUCTION}",
        GAP_ANALYSIS_PROMPT_TEMPLATE
            .replace("{market_context}", &market_context)
            .replace("{resume_text}", resume_text)
            .replace("{job_description}", job_description)
    );
    let options = ChatOptions {
        temperature: GAP_ANALYSIS_TEMPERATURE,
        ..ChatOptions::default()
    };

    match llm
        .call_json::<LlmGapAnalysis>(&prompt, GAP_ANALYSIS_SYSTEM, options)
        .await
    {
        Ok(parsed) => patch_gap_analysis(parsed, resume_text, job_description),
        Err(e) => {
            warn!("LLM gap analysis error, falling back to rule-based: {e}");
            rule_based_gap(resume_text, job_description)
        }
    }
}

pub fn rule_based_gap(resume_text: &str, job_description: &str) -> GapAnalysisResult {
    let mut missing_skills = extract_missing_skills(resume_text, job_description);
    missing_skills.truncate(MAX_MISSING_SKILLS);
    GapAnalysisResult {
        missing_skills,
        match_score: calculate_match_score(resume_text, job_description),
        strengths: vec![PLACEHOLDER_STRENGTH.to_string()],
        gaps: vec![PLACEHOLDER_GAP.to_string()],
        source: AnalysisSource::RuleBased,
    }
}

pub fn patch_gap_analysis(
    parsed: LlmGapAnalysis,
    resume_text: &str,
    job_description: &str,
) -> GapAnalysisResult {
    let rule_skills = extract_missing_skills(resume_text, job_description);

    let missing_skills = if parsed.missing_skills.is_empty() {
        let mut skills = rule_skills;
        skills.truncate(MAX_MISSING_SKILLS);
        skills
    } else {
        merge_skills(parsed.missing_skills, &rule_skills)
    };

    // A zero score is treated as absent, same as a missing one.
    let match_score = parsed
        .match_score
        .filter(|s| s.is_finite() && *s != 0.0)
        .map(clamp_score)
        .unwrap_or_else(|| calculate_match_score(resume_text, job_description));

    GapAnalysisResult {
        missing_skills,
        match_score,
        strengths: non_empty_or(parsed.strengths, PLACEHOLDER_STRENGTH),
        gaps: non_empty_or(parsed.gaps, PLACEHOLDER_GAP),
        source: AnalysisSource::Llm,
    }
}

/// Filters generic and duplicate model skills, then tops up from `rule_skills`.
fn merge_skills(llm_skills: Vec<String>, rule_skills: &[String]) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in llm_skills {
        let skill = skill.trim().to_string();
        if !is_generic_skill(&skill) && !contains_ignore_case(&skills, &skill) {
            skills.push(skill);
        }
    }
    skills.truncate(MAX_MISSING_SKILLS);

    if skills.len() < MIN_MISSING_SKILLS {
        for skill in rule_skills {
            if skills.len() >= MAX_MISSING_SKILLS {
                break;
            }
            if !is_generic_skill(skill) && !contains_ignore_case(&skills, skill) {
                skills.push(skill.clone());
            }
        }
    }

    if skills.len() < MIN_MISSING_SKILLS {
        let rule_only: Vec<String> = rule_skills.iter().take(MIN_MISSING_SKILLS).cloned().collect();
        if rule_only.len() > skills.len() {
            return rule_only;
        }
    }

    skills
}

fn non_empty_or(list: Option<Vec<String>>, placeholder: &str) -> Vec<String> {
    match list {
        Some(items) if !items.is_empty() => items,
        _ => vec![placeholder.to_string()],
    }
}
