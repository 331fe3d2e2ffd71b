use crate::models::{Category, FacetCode, ListingRecord, Tech};

/// Characters of description shown on a card before the ellipsis.
pub const CARD_EXCERPT_CHARS: usize = 30;

/// The two optional filter dimensions. `None` matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub tech: Option<Tech>,
    pub project: Option<Category>,
}

impl Facets {
    pub fn new(tech: Option<Tech>, project: Option<Category>) -> Self {
        Self { tech, project }
    }

    /// Build facets from raw codes, treating empty strings as unset.
    pub fn parse(tech: Option<&str>, project: Option<&str>) -> Self {
        Self {
            tech: tech.filter(|code| !code.is_empty()).map(Tech::from_code),
            project: project
                .filter(|code| !code.is_empty())
                .map(Category::from_code),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tech.is_none() && self.project.is_none()
    }

    /// Whether `record` passes both facets.
    pub fn matches(&self, record: &ListingRecord) -> bool {
        facet_matches(self.tech.as_ref(), record.tech.as_ref())
            && facet_matches(self.project.as_ref(), record.project.as_ref())
    }
}

fn facet_matches<T: FacetCode>(wanted: Option<&T>, actual: Option<&T>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual.is_some_and(|actual| actual.code() == wanted.code()),
    }
}

/// Records passing both facets, in catalog order.
pub fn filter(records: &[ListingRecord], facets: &Facets) -> Vec<ListingRecord> {
    records
        .iter()
        .filter(|record| facets.matches(record))
        .cloned()
        .collect()
}

/// Heading describing the active facet combination.
pub fn display_title(facets: &Facets) -> String {
    match (&facets.tech, &facets.project) {
        (Some(_), Some(_)) => "Projects".to_string(),
        (Some(tech), None) => format!("{} Courses", tech.code().to_uppercase()),
        (None, Some(project)) => format!("{} Courses", project.course_label()),
        (None, None) => "All Projects".to_string(),
    }
}

/// First `max_chars` characters of `text` followed by `...`.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut shortened: String = text.chars().take(max_chars).collect();
    shortened.push_str("...");
    shortened
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: &str, tech: &str, project: &str) -> ListingRecord {
        ListingRecord {
            id: id.into(),
            title: format!("Course {id}"),
            description: String::new(),
            image: "/img.png".into(),
            link: format!("/course/{id}"),
            tech: Facets::parse(Some(tech), None).tech,
            project: Facets::parse(None, Some(project)).project,
            price: String::new(),
            features: Vec::new(),
            buy_link: String::new(),
        }
    }

    fn catalog() -> Vec<ListingRecord> {
        vec![
            record("a", "react", "fullstack"),
            record("b", "gsap", "uiux"),
            record("c", "react", "software"),
        ]
    }

    fn ids(records: &[ListingRecord]) -> Vec<&str> {
        records.iter().map(|record| record.id.as_str()).collect()
    }

    #[test]
    fn tech_facet_keeps_catalog_order() {
        let facets = Facets::parse(Some("react"), None);
        assert_eq!(ids(&filter(&catalog(), &facets)), vec!["a", "c"]);
    }

    #[test]
    fn both_facets_are_anded() {
        let facets = Facets::parse(Some("react"), Some("software"));
        assert_eq!(ids(&filter(&catalog(), &facets)), vec!["c"]);

        let none = Facets::parse(Some("gsap"), Some("software"));
        assert!(filter(&catalog(), &none).is_empty());
    }

    #[test]
    fn unset_facets_match_everything() {
        let facets = Facets::parse(Some(""), None);
        assert!(facets.is_empty());
        assert_eq!(filter(&catalog(), &facets), catalog());
    }

    #[test]
    fn untagged_records_never_match_a_set_facet() {
        let mut records = catalog();
        records.push(record("d", "", ""));
        let facets = Facets::parse(None, Some("uiux"));
        assert_eq!(ids(&filter(&records, &facets)), vec!["b"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let facets = Facets::parse(Some("React"), None);
        assert!(filter(&catalog(), &facets).is_empty());
    }

    #[test]
    fn filter_is_idempotent_and_pure() {
        let records = catalog();
        let facets = Facets::parse(Some("react"), None);
        let once = filter(&records, &facets);
        assert_eq!(filter(&once, &facets), once);
        assert_eq!(filter(&records, &facets), once);
        assert_eq!(records, catalog());
    }

    #[test]
    fn display_titles() {
        assert_eq!(display_title(&Facets::default()), "All Projects");
        assert_eq!(display_title(&Facets::parse(Some("js"), None)), "JS Courses");
        assert_eq!(
            display_title(&Facets::parse(None, Some("uiux"))),
            "UI/UX Courses"
        );
        assert_eq!(
            display_title(&Facets::parse(None, Some("fullstack"))),
            "Full Stack Web Dev Courses"
        );
        assert_eq!(
            display_title(&Facets::parse(None, Some("quantum"))),
            "Project Courses"
        );
        assert_eq!(
            display_title(&Facets::parse(Some("react"), Some("uiux"))),
            "Projects"
        );
    }

    #[test]
    fn excerpt_cuts_on_char_boundaries() {
        assert_eq!(excerpt("Next.js Full Stack Project that ...", 30), "Next.js Full Stack Project tha...");
        assert_eq!(excerpt("₹₹₹₹", 2), "₹₹...");
        assert_eq!(excerpt("", CARD_EXCERPT_CHARS), "...");
    }
}
