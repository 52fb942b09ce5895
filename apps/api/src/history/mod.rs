// Analysis History: persists produced analyses per user and lists them back.
// Requires DATABASE_URL; without it the history routes answer 503.

pub mod handlers;
pub mod storage;
