use super::template::NodeTemplate;
use itertools::Itertools;

/// Criteria for narrowing the loaded template list.
///
/// Category and library match exactly, ignoring case. The search text is a
/// case-insensitive substring match against display name, description and
/// step type. Empty criteria are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateFilter {
    pub category: Option<String>,
    pub library: Option<String>,
    pub search: Option<String>,
}

impl TemplateFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn matches(&self, template: &NodeTemplate) -> bool {
        let category_ok = non_blank(&self.category)
            .is_none_or(|c| template.category.eq_ignore_ascii_case(c.trim()));
        let library_ok = non_blank(&self.library)
            .is_none_or(|l| template.library.eq_ignore_ascii_case(l.trim()));
        let search_ok = non_blank(&self.search).is_none_or(|text| {
            let needle = text.trim().to_lowercase();
            [
                &template.display_name,
                &template.description,
                &template.step_type,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
        });
        category_ok && library_ok && search_ok
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Applies `filter` to `templates`, preserving catalog order.
pub fn filter_templates<'a>(
    templates: &'a [NodeTemplate],
    filter: &TemplateFilter,
) -> Vec<&'a NodeTemplate> {
    templates.iter().filter(|t| filter.matches(t)).collect()
}

/// Distinct, sorted category names present in `templates`.
pub fn categories(templates: &[NodeTemplate]) -> Vec<String> {
    templates
        .iter()
        .map(|t| t.category.clone())
        .filter(|c| !c.is_empty())
        .sorted()
        .dedup()
        .collect()
}

/// Distinct, sorted library names present in `templates`.
pub fn libraries(templates: &[NodeTemplate]) -> Vec<String> {
    templates
        .iter()
        .map(|t| t.library.clone())
        .filter(|l| !l.is_empty())
        .sorted()
        .dedup()
        .collect()
}
