//! Markup composition from structured resume content.
//!
//! [`compose`] writes the markup dialect that the parser reads: a title,
//! the contact line and one section per non-empty content group.

mod content;

pub use content::{EducationItem, ExperienceItem, ProjectItem, SkillCategories, TailoredContent};

use crate::model::Identity;
use crate::parser::sanitize::strip_inline_markup;
use crate::parser::SENTINEL;

/// Name used when the identity has none.
pub const DEFAULT_NAME: &str = "User Name";

/// Compose resume markup for `identity` from tailored content.
///
/// Sections appear in a fixed order (skills, experience, projects,
/// education) and are left out entirely when they have nothing to show.
pub fn compose(identity: &Identity, content: &TailoredContent) -> String {
    let mut lines = Vec::new();

    let name = identity.name.trim();
    lines.push(format!(
        "# {}",
        if name.is_empty() { DEFAULT_NAME } else { name }
    ));
    lines.push(identity.contact.joined());
    lines.push(String::new());

    if content.tailored_skills.has_skills() {
        lines.push("## Skills".to_string());
        for (category, skills) in content.tailored_skills.iter() {
            if !skills.is_empty() {
                lines.push(format!("**{}:** {}", category, skills.join(", ")));
            }
        }
        lines.push(String::new());
    }

    if !content.tailored_experience.is_empty() {
        lines.push("## Experience".to_string());
        for item in &content.tailored_experience {
            lines.push(format!(
                "**{}** | {} | {} {} {}",
                item.title, item.company, item.location, SENTINEL, item.dates
            ));
            push_bullets(&mut lines, &item.responsibilities);
            lines.push(String::new());
        }
    }

    if !content.tailored_projects.is_empty() {
        lines.push("## Projects".to_string());
        for item in &content.tailored_projects {
            if item.technologies.trim().is_empty() {
                lines.push(format!("**{}** |", item.name));
            } else {
                lines.push(format!("**{}** | *{}*", item.name, item.technologies));
            }
            push_bullets(&mut lines, &item.description);
            lines.push(String::new());
        }
    }

    if !content.education.is_empty() {
        lines.push("## Education".to_string());
        for item in &content.education {
            lines.push(format!("**{}** {} {}", item.degree, SENTINEL, item.dates));
            if !item.institution.trim().is_empty() {
                lines.push(format!("*{}*", item.institution));
            }
            lines.push(String::new());
        }
    }

    let markup = lines.join("\n").trim().to_string();
    log::debug!("Composed {} lines of markup", markup.lines().count());
    markup
}

fn push_bullets(lines: &mut Vec<String>, points: &[String]) {
    for point in points {
        let point = strip_inline_markup(point);
        if !point.is_empty() {
            lines.push(format!("- {}", point));
        }
    }
}
