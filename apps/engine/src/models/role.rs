//! Role definitions and the role catalog loader.
//!
//! A catalog file is either a JSON array of role objects or a JSON object keyed
//! by role name. Object keys keep their file order so ranking ties resolve the
//! same way the file lists them.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::errors::FitError;
use crate::models::skill::{SkillSet, SkillToken};

/// A role's skill requirements split into must-have and nice-to-have.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleSkillSpec {
    #[serde(default)]
    pub required: SkillSet,
    #[serde(default)]
    pub preferred: SkillSet,
}

impl RoleSkillSpec {
    pub fn new(required: SkillSet, preferred: SkillSet) -> Self {
        Self {
            required,
            preferred,
        }
    }

    /// Required skills followed by preferred skills.
    /// A preferred entry that is also required is dropped; required wins.
    pub fn all_skills(&self) -> SkillSet {
        let required: HashSet<&SkillToken> = self.required.iter().collect();
        self.required
            .iter()
            .chain(self.preferred.iter().filter(|s| !required.contains(s)))
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.preferred.is_empty()
    }
}

/// A named role from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required_skills: SkillSet,
    #[serde(default, alias = "optional_skills")]
    pub preferred_skills: SkillSet,
    /// Minimum years the role asks for. `None` falls back to the engine default.
    #[serde(default)]
    pub min_years_experience: Option<f64>,
}

impl RoleDefinition {
    pub fn new(name: impl Into<String>, required: SkillSet, preferred: SkillSet) -> Self {
        Self {
            name: name.into(),
            description: None,
            required_skills: required,
            preferred_skills: preferred,
            min_years_experience: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_min_years(mut self, years: f64) -> Self {
        self.min_years_experience = Some(years);
        self
    }

    pub fn skill_spec(&self) -> RoleSkillSpec {
        RoleSkillSpec::new(self.required_skills.clone(), self.preferred_skills.clone())
    }
}

/// Role body as it appears under a name key in the object-shaped catalog.
#[derive(Debug, Deserialize)]
struct KeyedRole {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    required_skills: SkillSet,
    #[serde(default, alias = "optional_skills")]
    preferred_skills: SkillSet,
    #[serde(default)]
    min_years_experience: Option<f64>,
}

/// Ordered collection of roles with unique names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RoleCatalog {
    roles: Vec<RoleDefinition>,
}

impl RoleCatalog {
    /// Builds a catalog, rejecting duplicate or blank role names.
    pub fn new(roles: Vec<RoleDefinition>) -> Result<Self, FitError> {
        let mut seen = HashSet::new();
        for role in &roles {
            if role.name.trim().is_empty() {
                return Err(FitError::Catalog("role name cannot be empty".to_string()));
            }
            if !seen.insert(role.name.as_str()) {
                return Err(FitError::Catalog(format!(
                    "duplicate role name '{}'",
                    role.name
                )));
            }
        }
        Ok(Self { roles })
    }

    pub fn from_json_str(json: &str) -> Result<Self, FitError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::new(raw.0)
    }

    /// Reads and parses a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FitError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&contents)?;
        info!("Loaded {} roles from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn roles(&self) -> &[RoleDefinition] {
        &self.roles
    }

    pub fn get(&self, name: &str) -> Option<&RoleDefinition> {
        self.roles.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleDefinition> {
        self.roles.iter()
    }
}

impl<'de> Deserialize<'de> for RoleCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCatalog::deserialize(deserializer)?;
        RoleCatalog::new(raw.0).map_err(serde::de::Error::custom)
    }
}

/// Accepts both catalog shapes without validating names.
struct RawCatalog(Vec<RoleDefinition>);

impl<'de> Deserialize<'de> for RawCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawCatalogVisitor)
    }
}

struct RawCatalogVisitor;

impl<'de> Visitor<'de> for RawCatalogVisitor {
    type Value = RawCatalog;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array of roles or an object keyed by role name")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut roles = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(role) = seq.next_element::<RoleDefinition>()? {
            roles.push(role);
        }
        Ok(RawCatalog(roles))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut roles = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, body)) = map.next_entry::<String, KeyedRole>()? {
            roles.push(RoleDefinition {
                name,
                description: body.description,
                required_skills: body.required_skills,
                preferred_skills: body.preferred_skills,
                min_years_experience: body.min_years_experience,
            });
        }
        Ok(RawCatalog(roles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::skill::skill_set;
    use std::io::Write;

    #[test]
    fn test_all_skills_required_takes_precedence() {
        let spec = RoleSkillSpec::new(
            skill_set(["Python", "SQL"]),
            skill_set(["SQL", "AWS"]),
        );
        assert_eq!(spec.all_skills(), skill_set(["Python", "SQL", "AWS"]));
    }

    #[test]
    fn test_catalog_from_keyed_object_keeps_file_order() {
        let json = r#"{
            "Zeta Engineer": {"required_skills": ["Rust"], "description": "Systems"},
            "Alpha Analyst": {"required_skills": ["SQL"], "optional_skills": ["Tableau"]}
        }"#;
        let catalog = RoleCatalog::from_json_str(json).unwrap();
        let names: Vec<&str> = catalog.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta Engineer", "Alpha Analyst"]);

        let analyst = catalog.get("Alpha Analyst").unwrap();
        assert_eq!(analyst.preferred_skills, skill_set(["Tableau"]));
        assert_eq!(
            catalog.get("Zeta Engineer").unwrap().description.as_deref(),
            Some("Systems")
        );
    }

    #[test]
    fn test_catalog_from_array() {
        let json = r#"[
            {"name": "ML Engineer", "required_skills": ["Python", {"name": "TensorFlow"}],
             "preferred_skills": ["AWS"], "min_years_experience": 3}
        ]"#;
        let catalog = RoleCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        let role = &catalog.roles()[0];
        assert_eq!(role.required_skills, skill_set(["Python", "TensorFlow"]));
        assert_eq!(role.min_years_experience, Some(3.0));
    }

    #[test]
    fn test_duplicate_role_names_rejected() {
        let json = r#"[{"name": "A"}, {"name": "A"}]"#;
        let err = RoleCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, FitError::Catalog(_)));
    }

    #[test]
    fn test_malformed_catalog_is_json_error() {
        let err = RoleCatalog::from_json_str("42").unwrap_err();
        assert!(matches!(err, FitError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"Data Scientist": {{"required_skills": ["Python", "Statistics"]}}}}"#
        )
        .unwrap();

        let catalog = RoleCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("Data Scientist").is_some());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RoleCatalog::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, FitError::Io(_)));
    }
}
