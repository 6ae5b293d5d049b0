use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::get_config_path;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

fn render_config(store_lines: &str, ttl: &str) -> String {
    format!(
        "# facdash configuration\n\
         store:\n\
         {store_lines}\n\
         session:\n  \
         ttl: \"{ttl}\"\n\
         \n\
         # Uncomment to rank on a subset of achievement fields:\n\
         # achievements:\n\
         #   - key: journalpublications\n\
         #     label: Journal Publications\n\
         #     short_label: Journals\n\
         #   - key: patents\n\
         #     label: Patents\n\
         #     short_label: Patents\n"
    )
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, uses the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("facdash configuration");
    println!("=====================");
    println!();

    let remote = prompt_yes_no("Use a remote record store? (n uses a local JSON file)", true)?;

    let store_lines = if remote {
        let url = loop {
            let input = prompt("Record store URL (e.g. https://myproject.supabase.co): ")?;
            if input.starts_with("http://") || input.starts_with("https://") {
                break input;
            }
            println!("  Invalid: must start with http:// or https://. Try again.");
        };
        let api_key = prompt("API key (leave empty to use FACDASH_API_KEY env var): ")?;
        if api_key.is_empty() {
            format!("  url: \"{}\"", url)
        } else {
            format!("  url: \"{}\"\n  api_key: \"{}\"", url, api_key)
        }
    } else {
        let data_file = prompt_with_default("Path to faculty JSON file", "faculty.json")?;
        format!("  data_file: \"{}\"", data_file)
    };

    let ttl = loop {
        let input = prompt_with_default("Session window (humantime format)", "7d")?;
        match humantime::parse_duration(&input) {
            Ok(_) => break input,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    let config_path = default_path.unwrap_or_else(get_config_path);
    if config_path.exists() && !prompt_yes_no("Config file exists. Overwrite?", false)? {
        println!("Aborted; existing config left untouched.");
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory at {}", parent.display())
        })?;
    }

    std::fs::write(&config_path, render_config(&store_lines, &ttl))
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Wrote {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_rendered_remote_config_parses() {
        let yaml = render_config(
            "  url: \"https://example.supabase.co\"\n  api_key: \"anon-key\"",
            "7d",
        );
        let config: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(
            config.store.url.as_deref(),
            Some("https://example.supabase.co")
        );
        assert_eq!(config.session.unwrap().ttl.as_deref(), Some("7d"));
    }

    #[test]
    fn test_rendered_local_config_parses() {
        let yaml = render_config("  data_file: \"faculty.json\"", "12h");
        let config: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert!(config.store.data_file.is_some());
        assert!(config.store.url.is_none());
    }
}
