// GitHub Profile Scorer: fetches public repositories and scores activity,
// complexity, recent activity and open-source involvement.
// Scoring is pure over (repos, now); only client.rs talks to GitHub.

pub mod client;
pub mod handlers;
pub mod metrics;
pub mod models;
