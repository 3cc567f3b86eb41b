use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashSet;

use super::event::{DescriptorForm, MatchEvent, MatchType};
use crate::errors::MatchError;

const PIPED_HEAD: &str = "matchtype";
const DRAW_HEAD: &str = "draw";

/// Parses both descriptor spellings into a [`MatchEvent`]:
///
/// - `TripleThreat(PPV): A vs B vs C | Finish: Pinfall [Storyline] | 2025-01-04`
/// - `MatchType: TripleThreat | A vs B, C | Finish: TBD`
///
/// The winner is the first listed name. `Draw: A, B` in place of the
/// participant list records a draw.
pub struct DescriptorParser {
    ppv_regex: Regex,
    storyline_regex: Regex,
    date_regex: Regex,
    finish_regex: Regex,
    draw_regex: Regex,
    defeats_regex: Regex,
    separator_regex: Regex,
}

/// Participant list after separator splitting
struct Participants {
    names: Vec<String>,
    is_draw: bool,
}

impl DescriptorParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            ppv_regex: compile(r"(?i)\(\s*ppv\s*\)")?,
            storyline_regex: compile(r"(?i)\[\s*storyline\s*\]")?,
            date_regex: compile(r"^\d{4}-\d{2}-\d{2}$")?,
            finish_regex: compile(r"(?i)^finish\s*:\s*")?,
            draw_regex: compile(r"(?i)^draw\s*:\s*")?,
            defeats_regex: compile(r"(?i)\s+def\.?\s+")?,
            separator_regex: compile(r"(?i)\s+vs\.?\s+|,")?,
        })
    }

    pub fn parse(&self, descriptor: &str) -> Result<MatchEvent, MatchError> {
        let original = descriptor.trim();
        if original.is_empty() {
            return Err(MatchError::parse(descriptor, "empty descriptor"));
        }

        let is_ppv = self.ppv_regex.is_match(original);
        let cleaned = self.ppv_regex.replace_all(original, "");
        let segments: Vec<&str> = cleaned.split('|').map(str::trim).collect();

        let (head, body) = segments[0]
            .split_once(':')
            .ok_or_else(|| MatchError::parse(original, "missing ':' after the match type"))?;
        let head = head.trim();

        let (form, type_text, participant_text, trailing) = if normalize(head) == PIPED_HEAD {
            let participants = segments
                .get(1)
                .ok_or_else(|| MatchError::parse(original, "missing participant segment"))?;
            (DescriptorForm::Piped, body.trim(), participants.to_string(), &segments[2..])
        } else if normalize(head) == DRAW_HEAD {
            // "Draw: A, B" on its own; the type follows from the field size
            (DescriptorForm::Inline, "", format!("Draw: {}", body.trim()), &segments[1..])
        } else {
            (DescriptorForm::Inline, head, body.trim().to_string(), &segments[1..])
        };

        let participants = self.parse_participants(original, &participant_text)?;
        let match_type = resolve_match_type(original, type_text, participants.names.len())?;
        let (finish, date_part) = self.parse_trailing(original, trailing)?;
        let (finish, is_storyline) = self.strip_storyline(finish);

        Ok(MatchEvent {
            descriptor: original.to_string(),
            form,
            match_type,
            participants: participants.names,
            is_draw: participants.is_draw,
            is_storyline,
            is_ppv,
            finish,
            date_part,
        })
    }

    // --- Participants ---

    fn parse_participants(&self, original: &str, text: &str) -> Result<Participants, MatchError> {
        let (text, is_draw) = match self.draw_regex.find(text) {
            Some(m) => (&text[m.end()..], true),
            None => (text, false),
        };

        let names = if !is_draw && self.defeats_regex.is_match(text) {
            self.split_defeats(text)
        } else {
            self.split_names(original, text)?
        };

        validate_names(original, &names)?;
        Ok(Participants { names, is_draw })
    }

    /// `Winner def. Loser, Loser`
    fn split_defeats(&self, text: &str) -> Vec<String> {
        let mut parts = self.defeats_regex.splitn(text, 2);
        let winner = parts.next().unwrap_or_default().trim();
        let rest = parts.next().unwrap_or_default();

        let mut names = vec![winner.to_string()];
        names.extend(self.separator_regex.split(rest).map(|n| n.trim().to_string()));
        names
    }

    fn split_names(&self, original: &str, text: &str) -> Result<Vec<String>, MatchError> {
        if !self.separator_regex.is_match(text) {
            return Err(MatchError::parse(original, "no 'vs' separator between participants"));
        }
        Ok(self
            .separator_regex
            .split(text)
            .map(|n| n.trim().to_string())
            .collect())
    }

    // --- Trailing segments ---

    fn parse_trailing(
        &self,
        original: &str,
        segments: &[&str],
    ) -> Result<(Option<String>, Option<NaiveDate>), MatchError> {
        let mut finish_parts = Vec::new();
        let mut date_part = None;

        for segment in segments.iter().filter(|s| !s.is_empty()) {
            if self.date_regex.is_match(segment) {
                let date = NaiveDate::parse_from_str(segment, "%Y-%m-%d")
                    .map_err(|_| MatchError::parse(original, format!("invalid date {:?}", segment)))?;
                date_part = Some(date);
            } else {
                let text = self.finish_regex.replace(segment, "");
                finish_parts.push(text.trim().to_string());
            }
        }

        let finish = if finish_parts.is_empty() {
            None
        } else {
            Some(finish_parts.join(" | "))
        };
        Ok((finish, date_part))
    }

    fn strip_storyline(&self, finish: Option<String>) -> (Option<String>, bool) {
        let Some(finish) = finish else {
            return (None, false);
        };
        if !self.storyline_regex.is_match(&finish) {
            return (Some(finish), false);
        }

        let stripped = self.storyline_regex.replace_all(&finish, "").trim().to_string();
        let finish = if stripped.is_empty() { None } else { Some(stripped) };
        (finish, true)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("Failed to compile descriptor regex {}", pattern))
}

fn normalize(head: &str) -> String {
    head.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase()
}

fn validate_names(original: &str, names: &[String]) -> Result<(), MatchError> {
    if names.iter().any(|n| n.is_empty()) {
        return Err(MatchError::parse(original, "empty participant name"));
    }
    if names.len() < 2 {
        return Err(MatchError::parse(original, "fewer than 2 participants"));
    }

    let mut seen = HashSet::new();
    if let Some(dup) = names.iter().find(|n| !seen.insert(n.as_str())) {
        return Err(MatchError::parse(original, format!("{:?} is listed twice", dup)));
    }
    Ok(())
}

fn resolve_match_type(original: &str, type_text: &str, field_size: usize) -> Result<MatchType, MatchError> {
    if type_text.is_empty() {
        return MatchType::for_field_size(field_size).ok_or_else(|| {
            MatchError::parse(original, format!("no match type fits {} participants", field_size))
        });
    }
    MatchType::from_name(type_text)
        .ok_or_else(|| MatchError::parse(original, format!("unknown match type {:?}", type_text)))
}
