//! Rule-based resume analyzer.
//!
//! Deterministic, pure function of the input text. Used whenever the LLM path
//! is unavailable or fails, and to patch holes in partial LLM answers.
//!
//! Section weights:
//! - Contact: email 40, phone 30, LinkedIn 30
//! - Summary: present 75, absent 30
//! - Experience: heading 40, action verb 30, metrics 30
//! - Skills: heading present → 50 + 10 per in-demand skill (cap 100), absent → 30
//! - Education: present 80, absent 40

use std::sync::OnceLock;

use regex::Regex;

use crate::analysis::models::{AnalysisResult, AnalysisSource, MarketComparison, SectionScore};

pub const IN_DEMAND_TECH_SKILLS: &[&str] = &[
    "React",
    "TypeScript",
    "Python",
    "AWS",
    "Docker",
    "Kubernetes",
    "AI/ML",
    "Node.js",
    "GraphQL",
    "CI/CD",
];

pub const IN_DEMAND_SOFT_SKILLS: &[&str] = &[
    "Leadership",
    "Communication",
    "Problem-solving",
    "Teamwork",
    "Agile",
    "Project Management",
];

const ACTION_VERBS: &[&str] = &[
    "Developed",
    "Implemented",
    "Led",
    "Created",
    "Managed",
    "Optimized",
    "Designed",
    "Built",
    "Achieved",
    "Delivered",
];

const IDEAL_MIN_WORDS: usize = 400;
const IDEAL_MAX_WORDS: usize = 800;
const LOW_SECTION_SCORE: u32 = 60;
const MAX_TIPS: usize = 6;
const MAX_IN_DEMAND_SKILLS: usize = 6;

pub const CONTACT_TITLE: &str = "Contact Information";
pub const SUMMARY_TITLE: &str = "Professional Summary";
pub const EXPERIENCE_TITLE: &str = "Work Experience";
pub const SKILLS_TITLE: &str = "Skills & Technologies";
pub const EDUCATION_TITLE: &str = "Education";

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern is valid"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"[\w.-]+@[\w.-]+\.\w+")
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
}

fn metrics_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(
        &RE,
        r"(?i)\d+%|\$\d+|\d+ (years|months|projects|clients|users)",
    )
}

fn quantified_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(?i)\d+%|\d+ (years|projects)")
}

fn contains_any(text_lower: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text_lower.contains(n))
}

/// Case-insensitive substring check for each skill in `skills`.
fn skills_found<'a>(text_lower: &str, skills: &[&'a str]) -> Vec<&'a str> {
    skills
        .iter()
        .filter(|s| text_lower.contains(&s.to_lowercase()))
        .copied()
        .collect()
}

pub fn has_email(text: &str) -> bool {
    email_re().is_match(text)
}

pub fn has_phone(text: &str) -> bool {
    phone_re().is_match(text)
}

/// Runs the full rule-based analysis.
pub fn analyze(text: &str) -> AnalysisResult {
    let sections = analyze_sections(text);
    let overall_score = overall_score(&sections);
    let market_comparison = compare_with_market(text);
    let tips = generate_tips(text, &sections);

    AnalysisResult {
        overall_score,
        sections,
        market_comparison,
        tips,
        summary: summary_for_score(overall_score).to_string(),
        source: AnalysisSource::RuleBased,
    }
}

/// Rounded mean of section scores, clamped to 0 – 100. Empty input scores 0.
pub fn overall_score(sections: &[SectionScore]) -> u32 {
    if sections.is_empty() {
        return 0;
    }
    let total: u32 = sections.iter().map(|s| s.score.min(100)).sum();
    let mean = f64::from(total) / sections.len() as f64;
    mean.round().clamp(0.0, 100.0) as u32
}

pub fn summary_for_score(score: u32) -> &'static str {
    if score >= 80 {
        "Excellent resume! Your resume is well-structured and competitive for the current market."
    } else if score >= 60 {
        "Good foundation! With some improvements, your resume can stand out more to recruiters."
    } else {
        "Your resume needs work. Focus on the suggested improvements to increase your chances."
    }
}

pub fn analyze_sections(text: &str) -> Vec<SectionScore> {
    let lower = text.to_lowercase();
    vec![
        contact_section(text, &lower),
        summary_section(&lower),
        experience_section(text, &lower),
        skills_section(&lower),
        education_section(&lower),
    ]
}

fn contact_section(text: &str, lower: &str) -> SectionScore {
    let has_email = has_email(text);
    let has_phone = has_phone(text);
    let has_linkedin = lower.contains("linkedin");

    let mut score = 0;
    let mut suggestions = Vec::new();
    if has_email {
        score += 40;
    } else {
        suggestions.push("Add a professional email address".to_string());
    }
    if has_phone {
        score += 30;
    } else {
        suggestions.push("Include a phone number".to_string());
    }
    if has_linkedin {
        score += 30;
    } else {
        suggestions.push("Add your LinkedIn profile URL".to_string());
    }

    SectionScore {
        title: CONTACT_TITLE.to_string(),
        score,
        feedback: if score >= 70 {
            "Good contact information provided"
        } else {
            "Missing some contact details"
        }
        .to_string(),
        suggestions,
    }
}

fn summary_section(lower: &str) -> SectionScore {
    let has_summary = contains_any(lower, &["summary", "objective", "profile", "about"]);

    SectionScore {
        title: SUMMARY_TITLE.to_string(),
        score: if has_summary { 75 } else { 30 },
        feedback: if has_summary {
            "Summary section detected"
        } else {
            "No clear professional summary found"
        }
        .to_string(),
        suggestions: vec![if has_summary {
            "Consider making your summary more impactful with quantified achievements"
        } else {
            "Add a professional summary at the top highlighting your key strengths"
        }
        .to_string()],
    }
}

fn experience_section(text: &str, lower: &str) -> SectionScore {
    let has_experience = contains_any(lower, &["experience", "work history", "employment"]);
    let has_action_verbs = !skills_found(lower, ACTION_VERBS).is_empty();
    let has_metrics = metrics_re().is_match(text);

    let mut score = 0;
    let mut suggestions = Vec::new();
    if has_experience {
        score += 40;
    }
    if has_action_verbs {
        score += 30;
    } else {
        suggestions.push(
            "Use action verbs to start bullet points (Led, Developed, Implemented)".to_string(),
        );
    }
    if has_metrics {
        score += 30;
    } else {
        suggestions.push("Add quantifiable achievements and metrics".to_string());
    }
    if !has_experience {
        suggestions.push("Add a clear work experience section".to_string());
    }

    SectionScore {
        title: EXPERIENCE_TITLE.to_string(),
        score,
        feedback: if score >= 70 {
            "Strong experience section with good details"
        } else {
            "Experience section needs improvement"
        }
        .to_string(),
        suggestions,
    }
}

fn skills_section(lower: &str) -> SectionScore {
    let has_skills = contains_any(lower, &["skills", "technologies", "competencies", "expertise"]);
    let found = skills_found(lower, IN_DEMAND_TECH_SKILLS).len();

    let score = if has_skills {
        (50 + found as u32 * 10).min(100)
    } else {
        30
    };

    let mut suggestions = Vec::new();
    if !has_skills {
        suggestions.push("Add a dedicated skills section".to_string());
    }
    if found < 5 {
        suggestions.push("Consider adding more in-demand technical skills".to_string());
    }

    SectionScore {
        title: SKILLS_TITLE.to_string(),
        score,
        feedback: if found > 3 {
            format!("Good skills coverage with {found} in-demand skills")
        } else {
            "Skills section could be more comprehensive".to_string()
        },
        suggestions,
    }
}

fn education_section(lower: &str) -> SectionScore {
    let has_education = contains_any(
        lower,
        &[
            "education",
            "degree",
            "university",
            "college",
            "bachelor",
            "master",
            "phd",
        ],
    );

    SectionScore {
        title: EDUCATION_TITLE.to_string(),
        score: if has_education { 80 } else { 40 },
        feedback: if has_education {
            "Education section present"
        } else {
            "Education information is missing or unclear"
        }
        .to_string(),
        suggestions: vec![if has_education {
            "Include relevant coursework or certifications"
        } else {
            "Add your educational background"
        }
        .to_string()],
    }
}

pub fn compare_with_market(text: &str) -> MarketComparison {
    let lower = text.to_lowercase();
    let tech_found = skills_found(&lower, IN_DEMAND_TECH_SKILLS);
    let soft_found = skills_found(&lower, IN_DEMAND_SOFT_SKILLS);
    let missing: Vec<String> = IN_DEMAND_TECH_SKILLS
        .iter()
        .filter(|s| !tech_found.contains(s))
        .take(MAX_IN_DEMAND_SKILLS)
        .map(|s| s.to_string())
        .collect();

    let mut strengths = Vec::new();
    let mut gaps = Vec::new();

    if tech_found.len() >= 3 {
        strengths.push(format!(
            "Strong technical foundation with {}",
            tech_found.join(", ")
        ));
    }
    if soft_found.len() >= 2 {
        strengths.push("Good soft skills highlighted".to_string());
    }
    if quantified_re().is_match(text) {
        strengths.push("Includes quantifiable achievements".to_string());
    }
    if contains_any(&lower, &["github", "portfolio", "website"]) {
        strengths.push("Portfolio or code samples linked".to_string());
    }

    if tech_found.len() < 3 {
        gaps.push("Limited technical skills mentioned".to_string());
    }
    if !has_percent_metric(text) {
        gaps.push("Missing metrics and percentages in achievements".to_string());
    }
    if !lower.contains("certif") {
        gaps.push("No certifications mentioned".to_string());
    }
    if soft_found.len() < 2 {
        gaps.push("Limited soft skills highlighted".to_string());
    }

    if strengths.is_empty() {
        strengths.push("Resume submitted for review".to_string());
    }
    if gaps.is_empty() {
        gaps.push("No major gaps identified".to_string());
    }

    MarketComparison {
        strengths,
        gaps,
        in_demand_skills: missing,
    }
}

/// True when some number is immediately followed by `%`.
fn has_percent_metric(text: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"\d+%").is_match(text)
}

pub fn generate_tips(text: &str, sections: &[SectionScore]) -> Vec<String> {
    let mut tips = Vec::new();
    let word_count = text.split_whitespace().count();

    if word_count < IDEAL_MIN_WORDS {
        tips.push("Your resume is quite short. Consider adding more details about your accomplishments and responsibilities.".to_string());
    }
    if word_count > IDEAL_MAX_WORDS {
        tips.push(
            "Your resume is lengthy. Focus on the most relevant and impactful experiences."
                .to_string(),
        );
    }

    tips.push(
        "Use the STAR method (Situation, Task, Action, Result) to describe achievements."
            .to_string(),
    );
    tips.push("Tailor your resume for each job application by matching keywords from the job description.".to_string());
    tips.push(
        "Keep formatting consistent - use the same font, spacing, and bullet style throughout."
            .to_string(),
    );
    tips.push(
        "Include links to your portfolio, GitHub, or professional projects if applicable."
            .to_string(),
    );

    let low: Vec<&str> = sections
        .iter()
        .filter(|s| s.score < LOW_SECTION_SCORE)
        .map(|s| s.title.as_str())
        .collect();
    if !low.is_empty() {
        tips.push(format!("Focus on improving: {}", low.join(", ")));
    }

    tips.truncate(MAX_TIPS);
    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRONG_RESUME: &str = "Jane Doe\n\
        jane.doe@example.com | (555) 123-4567 | linkedin.com/in/janedoe | github.com/janedoe\n\
        Professional Summary: Senior engineer with 8 years of experience.\n\
        Experience\n\
        - Led migration to Kubernetes, reducing costs by 30%\n\
        - Developed GraphQL APIs in Node.js and TypeScript serving 2 million users\n\
        - Built React dashboards and Python data pipelines on AWS with Docker\n\
        Skills: React, TypeScript, Python, AWS, Docker, Kubernetes, GraphQL, CI/CD, Node.js\n\
        Leadership, Communication, Agile\n\
        Education: B.S. Computer Science, State University\n\
        Certifications: AWS Certified Solutions Architect";

    const WEAK_RESUME: &str = "I like computers and have done some things with them over time.";

    fn section<'a>(sections: &'a [SectionScore], title: &str) -> &'a SectionScore {
        sections.iter().find(|s| s.title == title).unwrap()
    }

    #[test]
    fn test_email_adds_contact_points() {
        let with_email = analyze_sections("reach me at someone@mail.org");
        let without = analyze_sections("reach me by carrier pigeon");
        let delta = section(&with_email, CONTACT_TITLE).score
            - section(&without, CONTACT_TITLE).score;
        assert_eq!(delta, 40);
    }

    #[test]
    fn test_contact_full_marks() {
        let sections = analyze_sections(STRONG_RESUME);
        let contact = section(&sections, CONTACT_TITLE);
        assert_eq!(contact.score, 100);
        assert!(contact.suggestions.is_empty());
        assert_eq!(contact.feedback, "Good contact information provided");
    }

    #[test]
    fn test_contact_missing_everything() {
        let sections = analyze_sections(WEAK_RESUME);
        let contact = section(&sections, CONTACT_TITLE);
        assert_eq!(contact.score, 0);
        assert_eq!(contact.suggestions.len(), 3);
    }

    #[test]
    fn test_phone_formats_detected() {
        assert!(has_phone("+1 555-123-4567"));
        assert!(has_phone("(555) 123 4567"));
        assert!(has_phone("5551234567"));
        assert!(!has_phone("call 555-12"));
    }

    #[test]
    fn test_experience_scoring() {
        let sections = analyze_sections(STRONG_RESUME);
        assert_eq!(section(&sections, EXPERIENCE_TITLE).score, 100);

        let weak = analyze_sections(WEAK_RESUME);
        let exp = section(&weak, EXPERIENCE_TITLE);
        assert_eq!(exp.score, 0);
        assert_eq!(exp.suggestions.len(), 3);
    }

    #[test]
    fn test_skills_score_caps_at_100() {
        let sections = analyze_sections(STRONG_RESUME);
        let skills = section(&sections, SKILLS_TITLE);
        assert_eq!(skills.score, 100);
        assert!(skills.feedback.starts_with("Good skills coverage"));
    }

    #[test]
    fn test_skills_without_heading_is_30() {
        let sections = analyze_sections("React and Python developer");
        assert_eq!(section(&sections, SKILLS_TITLE).score, 30);
    }

    #[test]
    fn test_overall_score_is_rounded_mean() {
        let sections = analyze_sections(WEAK_RESUME);
        // contact 0, summary 30, experience 0, skills 30, education 40 → 20
        assert_eq!(overall_score(&sections), 20);
    }

    #[test]
    fn test_overall_score_bounded() {
        for text in [STRONG_RESUME, WEAK_RESUME, "", "summary skills education"] {
            let result = analyze(text);
            assert!(result.overall_score <= 100);
            assert!(result.sections.iter().all(|s| s.score <= 100));
        }
    }

    #[test]
    fn test_overall_score_empty_sections() {
        assert_eq!(overall_score(&[]), 0);
    }

    #[test]
    fn test_market_comparison_strong() {
        let market = compare_with_market(STRONG_RESUME);
        assert!(market.strengths[0].starts_with("Strong technical foundation"));
        assert!(market
            .strengths
            .contains(&"Portfolio or code samples linked".to_string()));
        assert!(market.in_demand_skills.contains(&"AI/ML".to_string()));
        assert!(!market
            .gaps
            .contains(&"Missing metrics and percentages in achievements".to_string()));
    }

    #[test]
    fn test_market_comparison_weak_has_placeholders() {
        let market = compare_with_market(WEAK_RESUME);
        assert_eq!(market.strengths, vec!["Resume submitted for review"]);
        assert_eq!(market.in_demand_skills.len(), 6);
        assert!(market
            .gaps
            .contains(&"Limited technical skills mentioned".to_string()));
    }

    #[test]
    fn test_tips_capped_and_flag_low_sections() {
        let sections = analyze_sections(WEAK_RESUME);
        let tips = generate_tips(WEAK_RESUME, &sections);
        assert_eq!(tips.len(), MAX_TIPS);
        assert!(tips[0].contains("quite short"));
        assert!(tips[5].starts_with("Focus on improving:"));
    }

    #[test]
    fn test_summary_thresholds() {
        assert!(summary_for_score(80).starts_with("Excellent"));
        assert!(summary_for_score(60).starts_with("Good foundation"));
        assert!(summary_for_score(59).starts_with("Your resume needs work"));
    }

    #[test]
    fn test_analyze_is_rule_based_and_deterministic() {
        let a = analyze(STRONG_RESUME);
        let b = analyze(STRONG_RESUME);
        assert_eq!(a.source, AnalysisSource::RuleBased);
        assert_eq!(a.overall_score, b.overall_score);
        assert_eq!(a.sections.len(), 5);
    }
}
