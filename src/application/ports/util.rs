// src/application/ports/util.rs

/// Turns titles and tag names into URL-safe ASCII tokens.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}
