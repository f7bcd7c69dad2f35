//! Interactive prompts

use anyhow::Result;
use std::io::{self, Write};

use plantpal_core::Confirm;
use tracing::warn;

/// Prompt for confirmation
///
/// Returns true if user confirms, false otherwise.
/// In non-interactive mode (no TTY), returns false.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}

/// Confirmation source for destructive commands
pub enum Confirmation {
    /// Ask on the terminal
    Interactive,
    /// Already approved with --yes
    Approved,
    /// Non-human output mode without --yes
    Denied,
}

impl Confirm for Confirmation {
    fn confirm(&mut self, prompt: &str) -> bool {
        match self {
            Confirmation::Approved => true,
            Confirmation::Denied => false,
            Confirmation::Interactive => confirm(prompt).unwrap_or_else(|e| {
                warn!("Confirmation prompt failed: {}", e);
                false
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("nope"));
    }

    #[test]
    fn test_fixed_confirmations() {
        assert!(Confirmation::Approved.confirm("Delete?"));
        assert!(!Confirmation::Denied.confirm("Delete?"));
    }
}
