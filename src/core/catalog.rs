use crate::domain::model::{Draft, Template};
use std::collections::HashSet;

const PERSON_SECTIONS: &[&str] = &[
    "Early Life",
    "Education",
    "Career",
    "Personal Life",
    "Awards and Honors",
    "Legacy",
    "Further Reading",
    "External Links",
];

const ORGANIZATION_SECTIONS: &[&str] = &[
    "History",
    "Products and Services",
    "Leadership",
    "Operations",
    "Controversies",
    "Further Reading",
    "External Links",
];

const PHENOMENA_SECTIONS: &[&str] = &[
    "Characteristics",
    "Causes",
    "Observation",
    "Explanation",
    "Impact",
    "Research & Development",
    "Further Reading",
    "External Links",
];

const ACCOUNT_SECTIONS: &[&str] = &[
    "Background",
    "Causes",
    "Impact",
    "Historical Context",
    "Cultural Significance",
    "Aftermath",
    "Further Reading",
    "Geographical Significance",
    "Physical Features",
    "Demographics",
    "Formulae",
    "Research & Development",
    "Idea",
    "Socio-Economic Impact",
    "External Links",
];

/// Optional section names a draft may add, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCatalog {
    names: Vec<String>,
}

impl SectionCatalog {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn for_template(template: Template) -> Self {
        let names = match template {
            Template::Person => PERSON_SECTIONS,
            Template::Organization => ORGANIZATION_SECTIONS,
            Template::Phenomena => PHENOMENA_SECTIONS,
            Template::Account => ACCOUNT_SECTIONS,
        };
        Self::new(names.iter().map(|n| n.to_string()).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Catalog names not already used by a section of `draft`.
    pub fn available_for(&self, draft: &Draft) -> Vec<String> {
        let in_use: HashSet<&str> = draft.section_names().collect();
        self.names
            .iter()
            .filter(|name| !in_use.contains(name.as_str()))
            .cloned()
            .collect()
    }
}
