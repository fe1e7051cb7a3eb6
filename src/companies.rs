// src/companies.rs

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Company {
    pub id: &'static str,           // lowercase key used in data paths
    pub display_name: &'static str,
    pub accent_color: &'static str, // CSS hex
}

/// Every company the dashboard knows about, in display order.
pub const COMPANIES: [Company; 5] = [
    Company { id: "anthropic", display_name: "Anthropic", accent_color: "#d97757" },
    Company { id: "openai", display_name: "OpenAI", accent_color: "#10a37f" },
    Company { id: "google", display_name: "Google DeepMind", accent_color: "#4285f4" },
    Company { id: "meta", display_name: "Meta AI", accent_color: "#0668e1" },
    // no mood pipeline feeds xai yet; its mood document is normally absent
    Company { id: "xai", display_name: "xAI", accent_color: "#6b7280" },
];

pub fn find(id: &str) -> Option<&'static Company> {
    COMPANIES.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_lowercase() {
        for (i, c) in COMPANIES.iter().enumerate() {
            assert_eq!(c.id, c.id.to_ascii_lowercase());
            assert!(COMPANIES.iter().skip(i + 1).all(|o| o.id != c.id));
        }
    }

    #[test]
    fn find_is_exact() {
        assert_eq!(find("openai").map(|c| c.display_name), Some("OpenAI"));
        assert!(find("OpenAI").is_none());
        assert!(find("").is_none());
    }
}
