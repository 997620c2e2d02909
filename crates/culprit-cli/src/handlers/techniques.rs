//! Techniques command handler

use culprit::Technique;
use std::fmt::Write;

/// One line per technique: name and formula
#[must_use]
pub fn render_techniques() -> String {
    let mut out = String::new();
    for technique in Technique::ALL {
        let _ = writeln!(out, "{:<10} {}", technique.name(), technique.formula());
    }
    out
}

/// Execute the techniques command
pub fn execute_techniques() {
    print!("{}", render_techniques());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_technique() {
        let text = render_techniques();
        assert_eq!(text.lines().count(), Technique::ALL.len());
        for name in Technique::names() {
            assert!(text.lines().any(|line| line.starts_with(name)));
        }
    }
}
