use crate::domain::model::Draft;

/// Renders the draft as markdown-style article text.
///
/// A blank subject yields `prompt` instead. Sections whose trimmed content is
/// empty are skipped entirely, fixed sections included.
pub fn format_article_text(draft: &Draft, prompt: &str) -> String {
    let subject = draft.subject_name.trim();
    if subject.is_empty() {
        return prompt.to_string();
    }

    let mut content = format!("# {}\n\n", draft.subject_name);
    for section in &draft.sections {
        let body = section.content.trim();
        if !body.is_empty() {
            content.push_str(&format!("## {}\n\n{}\n\n", section.name, body));
        }
    }
    content
}
