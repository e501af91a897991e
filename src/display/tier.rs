//! Tier display formatting
//!
//! Formats tiers as a tree, the same way the settings file orders them.

use crate::config::Tier;

/// Format tiers with their categories as a tree
pub fn format_tier_tree(tiers: &[Tier]) -> String {
    if tiers.is_empty() {
        return "No tiers configured.\n\nRun 'minted tier create <name>' to add one.".to_string();
    }

    let mut output = String::new();

    for (i, tier) in tiers.iter().enumerate() {
        if tier.color.is_empty() {
            output.push_str(&format!("{}\n", tier.name));
        } else {
            output.push_str(&format!("{} ({})\n", tier.name, tier.color));
        }

        if tier.categories.is_empty() {
            output.push_str("  (no categories)\n");
        } else {
            for (j, category) in tier.categories.iter().enumerate() {
                let prefix = if j == tier.categories.len() - 1 {
                    "└── "
                } else {
                    "├── "
                };
                output.push_str(&format!("  {}{}\n", prefix, category));
            }
        }

        if i < tiers.len() - 1 {
            output.push('\n');
        }
    }

    output
}
