use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

use crate::errors::read_context;

/// Read a show's match descriptors, one per line. Blank lines and lines
/// starting with `#` are ignored.
pub fn load_descriptors(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| read_context(path))?;
    let descriptors = parse_descriptor_lines(&text);
    info!("Loaded {} match descriptors from {}", descriptors.len(), path.display());
    Ok(descriptors)
}

pub fn parse_descriptor_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let text = "# week 12\nSingles: A vs B\n\n  TripleThreat: C vs D vs E  \r\n# done\n";
        assert_eq!(
            parse_descriptor_lines(text),
            vec!["Singles: A vs B", "TripleThreat: C vs D vs E"]
        );
    }
}
