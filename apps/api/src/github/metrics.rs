//! GitHub profile scoring.
//!
//! Every function takes `now` explicitly so results are reproducible in tests.
//! Only public repositories count; complexity additionally ignores forks.
//!
//! Overall weights: activity 0.25, complexity 0.25, recent activity 0.20,
//! open source 0.30.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::github::models::{
    ActivityMetrics, Charts, ComplexityMetrics, GithubAnalysisResult, GithubRepo, GithubUser,
    LanguageShare, LanguageStat, MonthCount, OpenSourceMetrics, ProfileMetrics,
    RecentActivityMetrics,
};

const MAX_RECOMMENDATIONS: usize = 5;
const MAX_IMPROVEMENT_IDEAS: usize = 8;
const CHART_LANGUAGES: usize = 10;
const TIMELINE_MONTHS: i32 = 12;
const MONTH_FORMAT: &str = "%b %Y";
const NOT_AVAILABLE: &str = "N/A";

fn public(repos: &[GithubRepo]) -> impl Iterator<Item = &GithubRepo> {
    repos.iter().filter(|r| !r.private)
}

fn pushed_after(repo: &GithubRepo, cutoff: DateTime<Utc>) -> bool {
    repo.pushed_at.is_some_and(|p| p > cutoff)
}

fn month_key(date: &impl Datelike) -> String {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .map(|d| d.format(MONTH_FORMAT).to_string())
        .unwrap_or_default()
}

/// Increments `key` in an insertion-ordered tally.
fn tally(counts: &mut Vec<(String, u32)>, key: String) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key, 1)),
    }
}

/// Languages by repo count, most used first. Ties keep first-seen order.
pub fn extract_languages(repos: &[GithubRepo]) -> Vec<LanguageStat> {
    let mut counts: Vec<(String, u32)> = Vec::new();
    for language in public(repos).filter_map(|r| r.language.clone()) {
        tally(&mut counts, language);
    }
    let total: u32 = counts.iter().map(|(_, c)| c).sum();

    let mut stats: Vec<LanguageStat> = counts
        .into_iter()
        .map(|(language, repo_count)| LanguageStat {
            language,
            repo_count,
            percentage: if total > 0 {
                (f64::from(repo_count) / f64::from(total) * 100.0).round() as u32
            } else {
                0
            },
        })
        .collect();
    stats.sort_by(|a, b| b.repo_count.cmp(&a.repo_count));
    stats
}

pub fn calculate_activity(repos: &[GithubRepo], now: DateTime<Utc>) -> ActivityMetrics {
    let thirty_days_ago = now - Duration::days(30);
    let total_repos = public(repos).count() as u32;
    let active_repos_count = public(repos)
        .filter(|r| pushed_after(r, thirty_days_ago))
        .count() as u32;

    let days_since_last_activity = public(repos)
        .filter_map(|r| r.pushed_at)
        .max()
        .map(|last| (now - last).num_days());

    let mut score = match days_since_last_activity {
        None => 0,
        Some(d) if d <= 7 => 100,
        Some(d) if d <= 30 => 80,
        Some(d) if d <= 90 => 60,
        Some(d) if d <= 180 => 40,
        Some(_) => 20,
    };
    if active_repos_count > 5 {
        score = (score + 10).min(100);
    }
    if total_repos > 20 {
        score = (score + 10).min(100);
    }

    ActivityMetrics {
        total_repos,
        recent_commits: days_since_last_activity.is_some_and(|d| d <= 30),
        days_since_last_activity,
        active_repos_count,
        score,
    }
}

pub fn assess_complexity(repos: &[GithubRepo]) -> ComplexityMetrics {
    let own_repos: Vec<&GithubRepo> = public(repos).filter(|r| !r.fork).collect();
    if own_repos.is_empty() {
        return ComplexityMetrics {
            average_repo_size: 0,
            has_advanced_projects: false,
            total_stars: 0,
            total_forks: 0,
            score: 0,
        };
    }

    let total_size: u64 = own_repos.iter().map(|r| r.size).sum();
    let average_repo_size = (total_size as f64 / own_repos.len() as f64).round() as u64;
    let total_stars: u64 = own_repos.iter().map(|r| r.stargazers_count).sum();
    let total_forks: u64 = own_repos.iter().map(|r| r.forks_count).sum();

    let has_long_description = own_repos
        .iter()
        .any(|r| r.description.as_ref().is_some_and(|d| d.chars().count() > 100));
    let has_advanced_projects = average_repo_size > 500 || total_stars > 50 || has_long_description;

    let mut score = 0;
    score += match average_repo_size {
        s if s > 1000 => 30,
        s if s > 500 => 20,
        s if s > 200 => 10,
        _ => 0,
    };
    score += match total_stars {
        s if s > 100 => 30,
        s if s > 50 => 20,
        s if s > 20 => 10,
        _ => 0,
    };
    if has_advanced_projects {
        score += 20;
    }
    if total_forks > 50 {
        score += 20;
    }

    ComplexityMetrics {
        average_repo_size,
        has_advanced_projects,
        total_stars,
        total_forks,
        score: score.min(100),
    }
}

pub fn analyze_recent_activity(
    repos: &[GithubRepo],
    now: DateTime<Utc>,
) -> RecentActivityMetrics {
    let six_months_ago = now - Duration::days(180);
    let twelve_months_ago = now - Duration::days(365);

    let last_6 = public(repos)
        .filter(|r| pushed_after(r, six_months_ago))
        .count() as u32;
    let last_12 = public(repos)
        .filter(|r| pushed_after(r, twelve_months_ago))
        .count() as u32;

    let mut months: Vec<(String, u32)> = Vec::new();
    for pushed in public(repos).filter_map(|r| r.pushed_at) {
        tally(&mut months, month_key(&pushed));
    }
    // First-seen month wins ties.
    let most_active_month = months
        .iter()
        .fold(None::<&(String, u32)>, |best, entry| match best {
            Some(b) if b.1 >= entry.1 => Some(b),
            _ => Some(entry),
        })
        .map_or_else(|| NOT_AVAILABLE.to_string(), |(month, _)| month.clone());

    let score = match (last_6, last_12) {
        (n, _) if n > 10 => 100,
        (n, _) if n > 5 => 80,
        (n, _) if n > 2 => 60,
        (n, _) if n > 0 => 40,
        (_, m) if m > 0 => 20,
        _ => 0,
    };

    RecentActivityMetrics {
        repos_updated_last_6_months: last_6,
        repos_updated_last_12_months: last_12,
        most_active_month,
        score,
    }
}

pub fn analyze_open_source(repos: &[GithubRepo]) -> OpenSourceMetrics {
    let visible: Vec<&GithubRepo> = public(repos).collect();
    if visible.is_empty() {
        return OpenSourceMetrics {
            total_stars: 0,
            total_forks: 0,
            average_stars_per_repo: 0.0,
            top_starred_repo: NOT_AVAILABLE.to_string(),
            score: 0,
        };
    }

    let total_stars: u64 = visible.iter().map(|r| r.stargazers_count).sum();
    let total_forks: u64 = visible.iter().map(|r| r.forks_count).sum();
    let average = total_stars as f64 / visible.len() as f64;
    let top_starred_repo = visible
        .iter()
        .copied()
        .reduce(|best, r| {
            if r.stargazers_count > best.stargazers_count {
                r
            } else {
                best
            }
        })
        .map_or_else(|| NOT_AVAILABLE.to_string(), |r| r.name.clone());

    let mut score = match total_stars {
        s if s > 500 => 100,
        s if s > 200 => 80,
        s if s > 100 => 60,
        s if s > 50 => 40,
        s if s > 20 => 30,
        s if s > 0 => 20,
        _ => 0,
    };
    score = match total_forks {
        f if f > 100 => (score + 20).min(100),
        f if f > 50 => (score + 15).min(100),
        f if f > 20 => (score + 10).min(100),
        _ => score,
    };

    OpenSourceMetrics {
        total_stars,
        total_forks,
        average_stars_per_repo: (average * 10.0).round() / 10.0,
        top_starred_repo,
        score,
    }
}

/// Top languages plus a push timeline over the 12 months ending with `now`'s month.
pub fn generate_charts(repos: &[GithubRepo], languages: &[LanguageStat], now: DateTime<Utc>) -> Charts {
    let current = now.year() * 12 + now.month0() as i32;
    let mut timeline: Vec<MonthCount> = (0..TIMELINE_MONTHS)
        .rev()
        .filter_map(|offset| {
            let index = current - offset;
            let month = index.rem_euclid(12) as u32 + 1;
            NaiveDate::from_ymd_opt(index.div_euclid(12), month, 1)
        })
        .map(|date| MonthCount {
            month: date.format(MONTH_FORMAT).to_string(),
            repos: 0,
        })
        .collect();

    for pushed in public(repos).filter_map(|r| r.pushed_at) {
        let key = month_key(&pushed);
        if let Some(slot) = timeline.iter_mut().find(|m| m.month == key) {
            slot.repos += 1;
        }
    }

    Charts {
        language_distribution: languages
            .iter()
            .take(CHART_LANGUAGES)
            .map(|l| LanguageShare {
                language: l.language.clone(),
                percentage: l.percentage,
            })
            .collect(),
        activity_timeline: timeline,
    }
}

pub fn overall_score(metrics: &ProfileMetrics) -> u32 {
    let weighted = f64::from(metrics.activity.score) * 0.25
        + f64::from(metrics.complexity.score) * 0.25
        + f64::from(metrics.recent_activity.score) * 0.20
        + f64::from(metrics.open_source.score) * 0.30;
    (weighted.round() as u32).min(100)
}

pub fn summary_for_score(score: u32) -> String {
    if score >= 80 {
        format!("Excellent GitHub profile! Strong activity, project complexity, and open-source involvement ({score}/100).")
    } else if score >= 60 {
        format!("Good GitHub profile with solid development activity and projects ({score}/100). Continue building!")
    } else {
        format!("Your GitHub profile scores {score}/100. Focus on regular commits, building complex projects, and open-source contributions.")
    }
}

pub fn generate_recommendations(metrics: &ProfileMetrics) -> Vec<String> {
    let mut recommendations: Vec<&str> = Vec::new();

    if metrics.languages.len() < 3 {
        recommendations.push("Diversify your tech stack - learn and build projects in different programming languages");
    }
    if metrics.activity.score < 50 {
        recommendations.push("Increase your activity - commit to repositories regularly to show consistent development");
    }
    if metrics.complexity.score < 50 {
        recommendations.push("Build more complex projects - create repositories with substantial codebases and features");
    }
    if metrics.recent_activity.repos_updated_last_6_months == 0 {
        recommendations.push("Update your repositories - recent activity shows you are actively maintaining your code");
    }
    if metrics.open_source.total_stars < 20 {
        recommendations.push("Focus on building projects that solve real problems - this attracts stars and forks");
    }
    if recommendations.is_empty() {
        recommendations.push("Keep up the excellent work! Your GitHub profile shows strong development activity");
        recommendations.push("Consider contributing to open source projects to increase visibility");
    }

    recommendations
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(str::to_string)
        .collect()
}

pub fn generate_improvement_ideas(metrics: &ProfileMetrics) -> Vec<String> {
    let mut ideas: Vec<&str> = Vec::new();

    if metrics.activity.score < 50 {
        ideas.push("Increase commit frequency: aim for small daily or weekly commits to showcase consistency.");
        ideas.push("Set a contribution schedule and use issues/projects to track progress.");
    } else {
        ideas.push("Keep committing regularly; add milestone-based releases for larger projects.");
    }

    if metrics.complexity.score < 50 {
        ideas.push("Build at least one medium-sized project with clear modules and tests to demonstrate complexity.");
        ideas.push("Add unit/integration tests and CI (GitHub Actions) to showcase engineering practices.");
    } else {
        ideas.push("Document architecture and add a CONTRIBUTING guide to attract collaborators.");
    }

    if metrics.languages.len() < 3 {
        ideas.push("Explore one complementary language or framework to broaden your skillset.");
    } else {
        ideas.push("Create a showcase project combining your top languages to demonstrate cross-tech skills.");
    }

    if metrics.open_source.total_stars < 20 {
        ideas.push("Contribute to popular open-source projects: start with docs/bug fixes to build reputation.");
    } else {
        ideas.push("Highlight top-starred projects in your README and pin them on your profile.");
    }

    if metrics.recent_activity.repos_updated_last_6_months == 0 {
        ideas.push("Update at least one repo in the last 6 months to show current engagement.");
    }

    ideas.push("Add a detailed README for key projects that includes screenshots, setup steps, and a demo.");
    ideas.push("Pin 4-6 representative repositories to your profile that demonstrate a range of skills.");

    ideas
        .into_iter()
        .take(MAX_IMPROVEMENT_IDEAS)
        .map(str::to_string)
        .collect()
}

/// Scores a profile from already-fetched data.
pub fn analyze_profile(
    user: &GithubUser,
    repos: &[GithubRepo],
    now: DateTime<Utc>,
) -> GithubAnalysisResult {
    let languages = extract_languages(repos);
    let charts = generate_charts(repos, &languages, now);
    let metrics = ProfileMetrics {
        languages,
        activity: calculate_activity(repos, now),
        complexity: assess_complexity(repos),
        recent_activity: analyze_recent_activity(repos, now),
        open_source: analyze_open_source(repos),
    };
    let overall_score = overall_score(&metrics);

    GithubAnalysisResult {
        overall_score,
        username: user.login.clone(),
        profile_url: user.html_url.clone(),
        summary: summary_for_score(overall_score),
        recommendations: generate_recommendations(&metrics),
        improvement_ideas: generate_improvement_ideas(&metrics),
        metrics,
        charts,
    }
}
