use std::fmt;

use serde::{Deserialize, Serialize};

/// A free-text skill name such as "Machine Learning".
///
/// There is no canonical id. Two tokens are related only through the similarity
/// the gap analyzer computes for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawSkill", into = "String")]
pub struct SkillToken(String);

/// Ordered skill list. Duplicates are allowed.
pub type SkillSet = Vec<SkillToken>;

impl SkillToken {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.len() == name.len() {
            Self(name)
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `phrase` appears as a whole word sequence, ignoring case and punctuation.
    /// "AWS" is mentioned by "Amazon AWS (EC2)" but not by "Laws".
    pub fn mentions(&self, phrase: &str) -> bool {
        let needle = normalize_phrase(phrase);
        if needle.is_empty() {
            return false;
        }
        format!(" {} ", normalize_phrase(&self.0)).contains(&format!(" {needle} "))
    }
}

fn normalize_phrase(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for SkillToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SkillToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SkillToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<SkillToken> for String {
    fn from(value: SkillToken) -> Self {
        value.0
    }
}

impl AsRef<str> for SkillToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Builds a `SkillSet` from anything string-like.
pub fn skill_set<I, S>(names: I) -> SkillSet
where
    I: IntoIterator<Item = S>,
    S: Into<SkillToken>,
{
    names.into_iter().map(Into::into).collect()
}

/// Skill records arrive either as bare strings or as `{ "name": ... }` objects
/// (`skill` is accepted as an alias). Both collapse into a `SkillToken` here so
/// nothing downstream has to care which shape the ingestion layer produced.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSkill {
    Name(String),
    Record {
        #[serde(alias = "skill")]
        name: String,
    },
}

impl From<RawSkill> for SkillToken {
    fn from(raw: RawSkill) -> Self {
        match raw {
            RawSkill::Name(name) | RawSkill::Record { name } => SkillToken::new(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_is_trimmed() {
        assert_eq!(SkillToken::new("  Python ").as_str(), "Python");
        assert!(SkillToken::new("   ").is_blank());
    }

    #[test]
    fn test_mentions_whole_phrases_only() {
        let skill = SkillToken::new("Deep-Learning with PyTorch");
        assert!(skill.mentions("deep learning"));
        assert!(skill.mentions("PYTORCH"));
        assert!(!skill.mentions("torch"));
        assert!(!skill.mentions(""));
        assert!(!SkillToken::new("HTML").mentions("ml"));
    }

    #[test]
    fn test_deserializes_plain_string() {
        let token: SkillToken = serde_json::from_value(json!("Rust")).unwrap();
        assert_eq!(token.as_str(), "Rust");
    }

    #[test]
    fn test_deserializes_record_with_name() {
        let tokens: SkillSet = serde_json::from_value(json!([
            {"name": "Docker", "level": "advanced"},
            {"skill": "AWS", "required": true},
            "SQL"
        ]))
        .unwrap();
        assert_eq!(tokens, skill_set(["Docker", "AWS", "SQL"]));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let value = serde_json::to_value(SkillToken::new("Kubernetes")).unwrap();
        assert_eq!(value, json!("Kubernetes"));
    }
}
