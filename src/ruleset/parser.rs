//! Public suffix list text format parser.

use std::io::{BufRead, BufReader, Read};

use super::{ListConfig, RuleSet};
use crate::rule::Rule;
use crate::Result;

const COMMENT_PREFIX: &str = "//";
const PRIVATE_BEGIN: &str = "===BEGIN PRIVATE DOMAINS===";
const PRIVATE_END: &str = "===END PRIVATE DOMAINS===";

/// Public suffix list text parser.
///
/// One rule per line, only the first whitespace-delimited token counts.
/// Lines starting with `//` are comments, except for the markers that
/// open and close the private section.
pub struct ListParser;

impl ListParser {
    /// Parse rules from a reader into a new rule set.
    pub fn parse<R: Read>(reader: R, config: &ListConfig) -> Result<RuleSet> {
        let mut ruleset = RuleSet::new();
        let buf_reader = BufReader::new(reader);

        let mut private = false;
        let mut skipped = 0usize;

        for (lineno, line) in buf_reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            if line.starts_with(COMMENT_PREFIX) {
                if line.contains(PRIVATE_BEGIN) {
                    private = true;
                } else if line.contains(PRIVATE_END) {
                    private = false;
                }
                continue;
            }

            if private && !config.private_domains {
                continue;
            }

            let token = match line.split_whitespace().next() {
                Some(t) => t,
                None => continue,
            };

            match Rule::parse_with_section(token, private) {
                Ok(rule) => ruleset.add(rule),
                Err(e) => {
                    skipped += 1;
                    log::warn!("Skipping line {}: {}", lineno + 1, e);
                }
            }
        }

        log::debug!(
            "Parsed rule list: {} rules ({} private), {} skipped",
            ruleset.len(),
            ruleset.iter().filter(|r| r.is_private()).count(),
            skipped
        );

        Ok(ruleset)
    }
}
