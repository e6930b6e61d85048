//! Test fixtures for generating test data.

use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique usernames.
static USERNAME_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a unique, valid username with the given prefix.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub fn unique_username(prefix: &str) -> String {
    let n = USERNAME_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{n}")
}

/// A profile document exercising every section type.
#[allow(dead_code)]
pub fn sample_document() -> Value {
    json!({
        "name": "Alice",
        "description": "Builder of small tools",
        "style": { "theme": "light", "font": "serif" },
        "sections": [
            {
                "type": "list",
                "title": "Projects",
                "items": [
                    { "title": "opn", "url": "https://opn.bio", "description": "Profile pages", "date": "2024" }
                ]
            },
            { "type": "text", "title": "About", "content": "Hello there." },
            {
                "type": "links",
                "title": "Elsewhere",
                "links": [{ "title": "GitHub", "url": "https://github.com/alice" }]
            }
        ]
    })
}
