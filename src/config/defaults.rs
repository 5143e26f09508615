//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [general] Section Defaults
// ============================================================================

pub mod general {
    use crate::config::site::SiteId;

    pub fn fallback_url() -> String {
        "/".into()
    }

    pub fn primary_site() -> SiteId {
        1
    }
}

// ============================================================================
// [[sites]] Section Defaults
// ============================================================================

pub mod site {
    pub fn handle() -> String {
        "default".into()
    }

    pub fn language() -> String {
        "en-US".into()
    }
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use std::path::PathBuf;

    pub fn index() -> PathBuf {
        "content.json".into()
    }

    pub fn bundles() -> PathBuf {
        "bundles".into()
    }
}
