//! Tailored content records.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Selected resume content, ready to be composed into markup.
///
/// Every field may be absent in JSON input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailoredContent {
    /// Skill lists keyed by category, in input order
    pub tailored_skills: SkillCategories,

    /// Work history entries
    pub tailored_experience: Vec<ExperienceItem>,

    /// Project entries
    pub tailored_projects: Vec<ProjectItem>,

    /// Education entries
    pub education: Vec<EducationItem>,
}

impl TailoredContent {
    /// Parse tailored content from JSON. Missing keys default to empty.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check if there is nothing to compose besides the header.
    pub fn is_empty(&self) -> bool {
        !self.tailored_skills.has_skills()
            && self.tailored_experience.is_empty()
            && self.tailored_projects.is_empty()
            && self.education.is_empty()
    }
}

/// One work history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceItem {
    /// Job title
    pub title: String,
    /// Employer
    pub company: String,
    /// Location
    pub location: String,
    /// Date range
    #[serde(deserialize_with = "lenient_string")]
    pub dates: String,
    /// Bullet points
    pub responsibilities: Vec<String>,
}

/// One project entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    /// Project name
    pub name: String,
    /// Technologies used
    pub technologies: String,
    /// Bullet points
    pub description: Vec<String>,
}

/// One education entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationItem {
    /// Degree name
    pub degree: String,
    /// School or university
    pub institution: String,
    /// Date range
    #[serde(deserialize_with = "lenient_string")]
    pub dates: String,
}

/// Skill categories in insertion order.
///
/// Serialized as a JSON object; key order is kept on both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillCategories(Vec<(String, Vec<String>)>);

impl SkillCategories {
    /// Create an empty set of categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category, replacing the skills of an existing one in place.
    pub fn insert(&mut self, category: impl Into<String>, skills: Vec<String>) {
        let category = category.into();
        match self.0.iter_mut().find(|(name, _)| *name == category) {
            Some(entry) => entry.1 = skills,
            None => self.0.push((category, skills)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, category: impl Into<String>, skills: &[&str]) -> Self {
        self.insert(category, skills.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Iterate over categories and their skills.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(name, skills)| (name.as_str(), skills.as_slice()))
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no categories.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if any category lists at least one skill.
    pub fn has_skills(&self) -> bool {
        self.0.iter().any(|(_, skills)| !skills.is_empty())
    }
}

impl Serialize for SkillCategories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, skills) in &self.0 {
            map.serialize_entry(category, skills)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SkillCategories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoriesVisitor;

        impl<'de> Visitor<'de> for CategoriesVisitor {
            type Value = SkillCategories;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category names to skill lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut categories = SkillCategories::new();
                while let Some((category, skills)) = access.next_entry::<String, Vec<String>>()? {
                    categories.insert(category, skills);
                }
                Ok(categories)
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(SkillCategories::new())
            }
        }

        deserializer.deserialize_any(CategoriesVisitor)
    }
}

/// Accept a string, a number or null for free-form text fields.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, a number or null")
        }

        fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}
