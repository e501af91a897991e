//! Settings CLI commands
//!
//! Tier management and the subcategory depth. Every change is written back
//! to the settings file.

use clap::Subcommand;

use crate::config::{MintedPaths, Settings};
use crate::display::format_tier_tree;
use crate::error::{MintedError, MintedResult};

/// Tier subcommands
#[derive(Subcommand, Debug)]
pub enum TierCommands {
    /// List tiers and their categories
    List,

    /// Create an empty tier
    Create {
        /// Tier name
        name: String,
        /// Display color, e.g. "#8e44ad"
        #[arg(short, long, default_value = "")]
        color: String,
    },

    /// Delete a tier
    Delete {
        /// Tier name
        name: String,
    },

    /// Add a category to a tier
    Add {
        /// Tier name
        tier: String,
        /// Expense category
        category: String,
    },

    /// Remove a category from a tier
    Remove {
        /// Tier name
        tier: String,
        /// Expense category
        category: String,
    },
}

/// Handle a tier command
pub fn handle_tier_command(
    paths: &MintedPaths,
    settings: &mut Settings,
    cmd: TierCommands,
) -> MintedResult<()> {
    match cmd {
        TierCommands::List => {
            print!("{}", format_tier_tree(&settings.tiers));
            return Ok(());
        }

        TierCommands::Create { name, color } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(MintedError::Validation("Tier name cannot be empty".into()));
            }
            settings.create_tier(name, &color)?;
            println!("Created tier: {}", name);
        }

        TierCommands::Delete { name } => {
            let tier = settings.delete_tier(&name)?;
            println!(
                "Deleted tier: {} ({} categories now unassigned)",
                tier.name,
                tier.categories.len()
            );
        }

        TierCommands::Add { tier, category } => {
            settings.add_category(&tier, &category)?;
            println!("Added '{}' to tier '{}'", category, tier);
            if let Some(owner) = settings.tier_for_category(&category) {
                if owner.name != tier {
                    println!(
                        "Note: '{}' is also in '{}', which comes first and takes precedence",
                        category, owner.name
                    );
                }
            }
        }

        TierCommands::Remove { tier, category } => {
            settings.remove_category(&tier, &category)?;
            println!("Removed '{}' from tier '{}'", category, tier);
        }
    }

    settings.save(paths)
}

/// Handle `minted depth <n>`
pub fn handle_depth_command(paths: &MintedPaths, settings: &mut Settings, depth: usize) -> MintedResult<()> {
    settings.subcategory_depth = depth;
    settings.save(paths)?;
    println!("Subcategory depth set to {}", depth);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, MintedPaths, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MintedPaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, paths, Settings::default())
    }

    #[test]
    fn test_tier_commands_persist() {
        let (_temp_dir, paths, mut settings) = setup();

        handle_tier_command(
            &paths,
            &mut settings,
            TierCommands::Create {
                name: "Travel".into(),
                color: "#8e44ad".into(),
            },
        )
        .unwrap();
        handle_tier_command(
            &paths,
            &mut settings,
            TierCommands::Add {
                tier: "Travel".into(),
                category: "Flights".into(),
            },
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.find_tier("Travel").unwrap().categories, vec!["Flights"]);
    }

    #[test]
    fn test_empty_tier_name_rejected() {
        let (_temp_dir, paths, mut settings) = setup();
        let result = handle_tier_command(
            &paths,
            &mut settings,
            TierCommands::Create {
                name: "  ".into(),
                color: String::new(),
            },
        );
        assert!(matches!(result, Err(MintedError::Validation(_))));
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_depth_command() {
        let (_temp_dir, paths, mut settings) = setup();
        handle_depth_command(&paths, &mut settings, 2).unwrap();
        assert_eq!(Settings::load_or_create(&paths).unwrap().subcategory_depth, 2);
    }
}
