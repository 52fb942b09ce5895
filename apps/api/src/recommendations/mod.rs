// Course Recommender: YouTube tutorials plus LLM-suggested Udemy courses.
// Both sources degrade independently: YouTube to an empty list, courses to a
// templated fallback.

pub mod courses;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod youtube;
