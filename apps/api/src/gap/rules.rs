//! Rule-based gap extraction and keyword-overlap match scoring.

use std::collections::HashSet;

pub const MAX_MISSING_SKILLS: usize = 6;
pub const MIN_MISSING_SKILLS: usize = 4;

const COMMON_TECH_SKILLS: &[&str] = &[
    "React",
    "Angular",
    "Vue",
    "TypeScript",
    "JavaScript",
    "Python",
    "Java",
    "C++",
    "C#",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "Spring",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "CI/CD",
    "Jenkins",
    "Git",
    "GraphQL",
    "REST API",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "Elasticsearch",
    "Machine Learning",
    "AI",
    "TensorFlow",
    "PyTorch",
    "Data Science",
    "SQL",
    "NoSQL",
    "Microservices",
    "Agile",
    "Scrum",
    "DevOps",
];

/// Lowercase keywords walked when the common list yields too few gaps.
const ADDITIONAL_TECH_KEYWORDS: &[&str] = &[
    "terraform",
    "ansible",
    "gitlab",
    "github actions",
    "next.js",
    "nuxt",
    "svelte",
    "fastapi",
    "rails",
    "laravel",
    "spring boot",
    "dynamodb",
    "cloudformation",
    "go",
    "rust",
    "kotlin",
    "swift",
    "machine learning",
    "deep learning",
    "nlp",
    "computer vision",
    "serverless",
    "lambda",
    "microservices",
];

/// Phrases too vague to study; matched against skills by mutual substring.
pub const GENERIC_SKILL_PATTERNS: &[&str] = &[
    "professional development",
    "industry best practices",
    "best practices",
    "technical skills",
    "industry knowledge",
    "advanced problem solving",
    "specialized tools",
    "advanced technical skills",
];

pub fn is_generic_skill(skill: &str) -> bool {
    let lower = skill.to_lowercase();
    GENERIC_SKILL_PATTERNS
        .iter()
        .any(|p| lower.contains(p) || p.contains(lower.as_str()))
}

/// Skills named in the job description but absent from the resume, at most 6.
/// Never pads with generic skills; may return fewer than 4.
pub fn extract_missing_skills(resume_text: &str, job_description: &str) -> Vec<String> {
    let jd = job_description.to_lowercase();
    let resume = resume_text.to_lowercase();
    let is_missing = |needle: &str| jd.contains(needle) && !resume.contains(needle);

    let mut missing: Vec<String> = Vec::new();
    for skill in COMMON_TECH_SKILLS {
        if is_missing(&skill.to_lowercase()) {
            missing.push(skill.to_string());
            if missing.len() >= MAX_MISSING_SKILLS {
                return missing;
            }
        }
    }

    if missing.len() < MIN_MISSING_SKILLS {
        for keyword in ADDITIONAL_TECH_KEYWORDS {
            if !is_missing(keyword) {
                continue;
            }
            let name = title_case(keyword);
            if !contains_ignore_case(&missing, &name) {
                missing.push(name);
                if missing.len() >= MAX_MISSING_SKILLS {
                    break;
                }
            }
        }
    }

    missing
}

/// Share of distinct JD words (longer than 3 chars) that also appear in the resume.
pub fn calculate_match_score(resume_text: &str, job_description: &str) -> u32 {
    let words = |text: &str| -> HashSet<String> {
        text.to_lowercase()
            .split_whitespace()
            .filter(|w| w.chars().count() > 3)
            .map(str::to_string)
            .collect()
    };
    let jd_words = words(job_description);
    if jd_words.is_empty() {
        return 0;
    }
    let resume_words = words(resume_text);
    let matches = jd_words.intersection(&resume_words).count();

    let ratio = matches as f64 / jd_words.len() as f64;
    ((ratio * 100.0).round() as u32).min(100)
}

pub fn contains_ignore_case(list: &[String], candidate: &str) -> bool {
    let candidate = candidate.to_lowercase();
    list.iter().any(|s| s.to_lowercase() == candidate)
}

/// Capitalises the first character of each space-separated word.
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "We are hiring a backend engineer with Python, Django, PostgreSQL, \
        Docker, Kubernetes and AWS experience. Terraform and GitHub Actions a plus.";

    #[test]
    fn test_extracts_jd_skills_missing_from_resume() {
        let resume = "Python developer with Django, PostgreSQL and Git";
        let missing = extract_missing_skills(resume, JD);
        assert_eq!(missing[..3], ["AWS", "Docker", "Kubernetes"]);
        assert!(!missing.contains(&"Python".to_string()));
    }

    #[test]
    fn test_tops_up_from_additional_keywords_title_cased() {
        let resume = "Python developer with Django, PostgreSQL and Git";
        let missing = extract_missing_skills(resume, JD);
        assert!(missing.contains(&"Terraform".to_string()));
        assert!(missing.contains(&"Github Actions".to_string()));
        assert!(missing.len() <= MAX_MISSING_SKILLS);
    }

    #[test]
    fn test_no_case_insensitive_duplicates() {
        // "machine learning" and "microservices" appear in both keyword lists
        let jd = "Machine learning engineer building microservices with deep learning and NLP";
        let missing = extract_missing_skills("I write documentation", jd);
        let lowered: HashSet<String> = missing.iter().map(|s| s.to_lowercase()).collect();
        assert_eq!(lowered.len(), missing.len());
        assert!(missing.contains(&"Machine Learning".to_string()));
    }

    #[test]
    fn test_caps_at_six() {
        let jd = "React Angular Vue TypeScript JavaScript Python Java Docker AWS";
        let missing = extract_missing_skills("Cobol", jd);
        assert_eq!(missing.len(), MAX_MISSING_SKILLS);
    }

    #[test]
    fn test_match_score_overlap() {
        assert_eq!(calculate_match_score("rust tokio axum", "rust tokio axum"), 100);
        // "with" and "rust" are > 3 chars: jd words {rust, tokio, with, axum}; resume has two
        assert_eq!(calculate_match_score("tokio axum", "Rust tokio with axum"), 50);
    }

    #[test]
    fn test_match_score_empty_jd_is_zero() {
        assert_eq!(calculate_match_score("anything here", ""), 0);
        assert_eq!(calculate_match_score("anything here", "a an the"), 0);
    }

    #[test]
    fn test_generic_skill_detection() {
        assert!(is_generic_skill("Industry Best Practices"));
        assert!(is_generic_skill("Technical Skills"));
        assert!(is_generic_skill("best"));
        assert!(!is_generic_skill("Kubernetes"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("spring boot"), "Spring Boot");
        assert_eq!(title_case("next.js"), "Next.js");
    }
}
