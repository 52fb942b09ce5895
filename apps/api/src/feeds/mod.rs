// RapidAPI pass-through feeds: trending tech news and internship search.
// Both are optional (RAPIDAPI_KEY); any upstream failure yields an empty list.

pub mod client;
pub mod handlers;
pub mod models;
