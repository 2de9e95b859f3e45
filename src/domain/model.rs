use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const LEAD_SECTION_ID: &str = "intro";
pub const LEAD_SECTION_NAME: &str = "Introduction";
pub const REFERENCES_SECTION_ID: &str = "references";
pub const REFERENCES_SECTION_NAME: &str = "References";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub content: String,
    pub removable: bool,
}

impl Section {
    pub fn lead() -> Self {
        Self::fixed(LEAD_SECTION_ID, LEAD_SECTION_NAME)
    }

    pub fn references() -> Self {
        Self::fixed(REFERENCES_SECTION_ID, REFERENCES_SECTION_NAME)
    }

    pub fn optional(id: String, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            content: String::new(),
            removable: true,
        }
    }

    fn fixed(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            content: String::new(),
            removable: false,
        }
    }
}

/// One article draft: a subject plus sections framed by the lead and references blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub subject_name: String,
    pub sections: Vec<Section>,
    pub saved_at: Option<DateTime<Utc>>,
}

/// Lenient wire shape. Missing or null fields fall back to the defaults,
/// and the keys written by the first web release are accepted as aliases.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDraft {
    #[serde(default, alias = "personName")]
    subject_name: Option<String>,
    #[serde(default)]
    sections: Option<Vec<Section>>,
    #[serde(default, alias = "timestamp")]
    saved_at: Option<DateTime<Utc>>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            subject_name: String::new(),
            sections: default_sections(),
            saved_at: None,
        }
    }
}

pub fn default_sections() -> Vec<Section> {
    vec![Section::lead(), Section::references()]
}

impl Draft {
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("stored draft is not a JSON object"));
        }
        let stored: StoredDraft = serde_json::from_value(value)?;
        Ok(Self {
            subject_name: stored.subject_name.unwrap_or_default(),
            sections: stored.sections.unwrap_or_else(default_sections),
            saved_at: stored.saved_at,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Puts the lead section first and the references section last,
    /// reinserting either one if it went missing, drops any further copies
    /// of their ids, and marks everything between them removable.
    /// Returns whether anything changed.
    pub fn repair_boundaries(&mut self) -> bool {
        let before = self.sections.clone();

        let mut lead =
            take_section(&mut self.sections, LEAD_SECTION_ID).unwrap_or_else(Section::lead);
        let mut references = take_section(&mut self.sections, REFERENCES_SECTION_ID)
            .unwrap_or_else(Section::references);
        lead.removable = false;
        references.removable = false;

        for section in &mut self.sections {
            section.removable = true;
        }

        self.sections.insert(0, lead);
        self.sections.push(references);

        self.sections != before
    }

    /// Whether the fixed sections sit at both ends, nothing else is fixed,
    /// and no two sections share an id.
    pub fn has_valid_boundaries(&self) -> bool {
        let n = self.sections.len();
        let mut ids = HashSet::new();
        n >= 2
            && self.sections.iter().all(|s| ids.insert(s.id.as_str()))
            && self.sections[0].id == LEAD_SECTION_ID
            && !self.sections[0].removable
            && self.sections[n - 1].id == REFERENCES_SECTION_ID
            && !self.sections[n - 1].removable
            && self.sections[1..n - 1].iter().all(|s| s.removable)
    }
}

/// Removes every section with `id` and returns the first one.
fn take_section(sections: &mut Vec<Section>, id: &str) -> Option<Section> {
    let index = sections.iter().position(|s| s.id == id)?;
    let first = sections.remove(index);
    sections.retain(|s| s.id != id);
    Some(first)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// The article builders offered by the site. They share one draft slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Person,
    Organization,
    Phenomena,
    #[default]
    Account,
}

impl Template {
    pub const ALL: [Template; 4] = [
        Template::Person,
        Template::Organization,
        Template::Phenomena,
        Template::Account,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Template::Person => "Person",
            Template::Organization => "Organization",
            Template::Phenomena => "Phenomena",
            Template::Account => "Accounts",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Template::Person => "Create biographical articles about notable individuals",
            Template::Organization => "Write about companies, institutions, and groups",
            Template::Phenomena => "Document scientific, cultural, or natural phenomena",
            Template::Account => "Chronicle historical events and accounts",
        }
    }

    pub fn subject_label(&self) -> &'static str {
        match self {
            Template::Person => "Person's Name",
            Template::Organization => "Organization Name",
            Template::Phenomena => "Phenomenon",
            Template::Account => "Account of Idea",
        }
    }

    /// Shown instead of the article when the subject is blank.
    pub fn preview_prompt(&self) -> &'static str {
        match self {
            Template::Person => "Please enter a person's name to preview the article.",
            Template::Organization => "Please enter an organization's name to preview the article.",
            Template::Phenomena => "Please enter the phenomenon's name to preview the article.",
            Template::Account => "Please enter a person's name to preview the article.",
        }
    }
}
