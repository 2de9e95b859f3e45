use crate::core::catalog::SectionCatalog;
use crate::domain::model::{Draft, Template};
use std::fmt::Write;

/// Text rendering of the builder form, one line per section.
///
/// Move markers follow the form's rules: a removable section offers "up"
/// unless it is first after the lead, and "down" unless it is last before
/// the references.
pub fn render_form(draft: &Draft, template: Template) -> String {
    let mut out = String::new();
    let len = draft.sections.len();

    let _ = writeln!(out, "Write About {}", template.title());
    let subject = if draft.subject_name.is_empty() {
        "(empty)"
    } else {
        draft.subject_name.as_str()
    };
    let _ = writeln!(out, "{}: {}", template.subject_label(), subject);
    let _ = writeln!(out);

    for (index, section) in draft.sections.iter().enumerate() {
        let mut actions = Vec::new();
        if section.removable && index > 1 {
            actions.push("up");
        }
        if section.removable && index + 2 < len {
            actions.push("down");
        }
        if section.removable {
            actions.push("remove");
        }

        let tag = if section.removable { "" } else { " [required]" };
        let _ = write!(out, "{:>2}. {}{} <{}>", index, section.name, tag, section.id);
        if !actions.is_empty() {
            let _ = write!(out, " ({})", actions.join(", "));
        }
        let _ = writeln!(out);

        let chars = section.content.chars().count();
        if chars == 0 {
            let _ = writeln!(
                out,
                "    Write the {} content here...",
                section.name.to_lowercase()
            );
        } else {
            let first_line = section.content.lines().next().unwrap_or_default();
            let _ = writeln!(out, "    {} ({} chars)", first_line, chars);
        }
    }

    if let Some(saved_at) = draft.saved_at {
        let _ = writeln!(out);
        let _ = writeln!(out, "Last saved: {}", saved_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    out
}

pub fn render_available(available: &[String]) -> String {
    if available.is_empty() {
        return "No more sections to add.\n".to_string();
    }
    available.iter().map(|name| format!("{}\n", name)).collect()
}

pub fn render_templates() -> String {
    Template::ALL
        .iter()
        .map(|t| {
            format!(
                "{:<13} {} ({} optional sections)\n",
                t.title(),
                t.description(),
                SectionCatalog::for_template(*t).names().len()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_marks_fixed_sections_and_moves() {
        let mut draft = Draft::default();
        draft.subject_name = "Acme Corp".to_string();
        draft.sections.insert(
            1,
            crate::domain::model::Section::optional("history-1".to_string(), "History"),
        );
        draft.sections.insert(
            2,
            crate::domain::model::Section::optional("leadership-2".to_string(), "Leadership"),
        );

        let view = render_form(&draft, Template::Organization);

        assert!(view.contains("Organization Name: Acme Corp"));
        assert!(view.contains(" 0. Introduction [required] <intro>\n"));
        assert!(view.contains(" 1. History <history-1> (down, remove)"));
        assert!(view.contains(" 2. Leadership <leadership-2> (up, remove)"));
        assert!(view.contains(" 3. References [required] <references>\n"));
        assert!(view.contains("Write the references content here..."));
    }

    #[test]
    fn test_available_empty_message() {
        assert_eq!(render_available(&[]), "No more sections to add.\n");
        assert_eq!(render_available(&["Idea".to_string()]), "Idea\n");
    }

    #[test]
    fn test_templates_listing() {
        let listing = render_templates();
        assert_eq!(listing.lines().count(), 4);
        assert!(listing.contains("Accounts"));
    }
}
