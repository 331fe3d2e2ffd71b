//! Domain models persisted in the catalog snapshot and passed throughout the
//! TUI. `ListingRecord` mirrors the JSON objects stored under the catalog key,
//! while `Tech` and `Category` give the two filter facets a closed vocabulary.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::parse_features;

/// Shared behaviour of the two facet vocabularies. Both round-trip through the
/// short lowercase code used on the wire and in filter selections.
pub trait FacetCode: Sized {
    /// Known values in the order they are offered in pickers.
    fn known() -> Vec<Self>;
    /// The wire code, e.g. `react` or `uiux`.
    fn code(&self) -> &str;
    /// Map a wire code back to a value. Unknown codes are preserved.
    fn from_code(code: &str) -> Self;
    /// Label shown in forms and tag chips.
    fn label(&self) -> &str;
}

/// Technology tag attached to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tech {
    Js,
    React,
    Gsap,
    Database,
    Video,
    Kubernetes,
    Cloud,
    /// A code outside the known set, kept verbatim.
    Other(String),
}

impl FacetCode for Tech {
    fn known() -> Vec<Self> {
        vec![
            Tech::Js,
            Tech::React,
            Tech::Gsap,
            Tech::Database,
            Tech::Video,
            Tech::Kubernetes,
            Tech::Cloud,
        ]
    }

    fn code(&self) -> &str {
        match self {
            Tech::Js => "js",
            Tech::React => "react",
            Tech::Gsap => "gsap",
            Tech::Database => "database",
            Tech::Video => "video",
            Tech::Kubernetes => "kubernetes",
            Tech::Cloud => "cloud",
            Tech::Other(code) => code,
        }
    }

    fn from_code(code: &str) -> Self {
        match code {
            "js" => Tech::Js,
            "react" => Tech::React,
            "gsap" => Tech::Gsap,
            "database" => Tech::Database,
            "video" => Tech::Video,
            "kubernetes" => Tech::Kubernetes,
            "cloud" => Tech::Cloud,
            other => Tech::Other(other.to_string()),
        }
    }

    fn label(&self) -> &str {
        match self {
            Tech::Js => "JavaScript",
            Tech::React => "React",
            Tech::Gsap => "GSAP",
            Tech::Database => "Database",
            Tech::Video => "Video",
            Tech::Kubernetes => "Kubernetes",
            Tech::Cloud => "Cloud",
            Tech::Other(code) => code,
        }
    }
}

/// Project category attached to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    FullStack,
    UiUx,
    Software,
    AiMl,
    DevOps,
    DataScience,
    Blockchain,
    Cybersecurity,
    Cloud,
    Graphic,
    /// A code outside the known set, kept verbatim.
    Other(String),
}

impl Category {
    /// Heading used when the grid is filtered by this category alone. Unknown
    /// codes share the generic "Project" heading.
    pub fn course_label(&self) -> &str {
        match self {
            Category::FullStack => "Full Stack Web Dev",
            Category::Other(_) => "Project",
            known => known.label(),
        }
    }
}

impl FacetCode for Category {
    fn known() -> Vec<Self> {
        vec![
            Category::FullStack,
            Category::UiUx,
            Category::Software,
            Category::AiMl,
            Category::DevOps,
            Category::DataScience,
            Category::Blockchain,
            Category::Cybersecurity,
            Category::Cloud,
            Category::Graphic,
        ]
    }

    fn code(&self) -> &str {
        match self {
            Category::FullStack => "fullstack",
            Category::UiUx => "uiux",
            Category::Software => "software",
            Category::AiMl => "aiml",
            Category::DevOps => "devops",
            Category::DataScience => "datascience",
            Category::Blockchain => "blockchain",
            Category::Cybersecurity => "cybersecurity",
            Category::Cloud => "cloud",
            Category::Graphic => "graphic",
            Category::Other(code) => code,
        }
    }

    fn from_code(code: &str) -> Self {
        match code {
            "fullstack" => Category::FullStack,
            "uiux" => Category::UiUx,
            "software" => Category::Software,
            "aiml" => Category::AiMl,
            "devops" => Category::DevOps,
            "datascience" => Category::DataScience,
            "blockchain" => Category::Blockchain,
            "cybersecurity" => Category::Cybersecurity,
            "cloud" => Category::Cloud,
            "graphic" => Category::Graphic,
            other => Category::Other(other.to_string()),
        }
    }

    fn label(&self) -> &str {
        match self {
            Category::FullStack => "Full Stack",
            Category::UiUx => "UI/UX",
            Category::Software => "Software",
            Category::AiMl => "AI/ML",
            Category::DevOps => "DevOps",
            Category::DataScience => "Data Science",
            Category::Blockchain => "Blockchain",
            Category::Cybersecurity => "Cybersecurity",
            Category::Cloud => "Cloud",
            Category::Graphic => "Graphic Design",
            Category::Other(code) => code,
        }
    }
}

impl fmt::Display for Tech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One course/project card. Field names on the wire follow the snapshot
/// format, so `buy_link` is stored as `buyLink`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    /// Unique within the catalog and never reassigned. Edit/delete flows key
    /// off this value.
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Opaque image handle: a data URI, a site path, or a URL.
    pub image: String,
    pub link: String,
    #[serde(default, with = "blank_as_none")]
    pub tech: Option<Tech>,
    #[serde(default, with = "blank_as_none")]
    pub project: Option<Category>,
    /// Free-form display text such as `₹99/-`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: String,
    #[serde(default, deserialize_with = "list_or_comma_text")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub buy_link: String,
}

impl ListingRecord {
    pub fn tech_code(&self) -> &str {
        self.tech.as_ref().map(FacetCode::code).unwrap_or("")
    }

    pub fn project_code(&self) -> &str {
        self.project.as_ref().map(FacetCode::code).unwrap_or("")
    }
}

/// Older snapshots may hold `null` where a string is expected.
fn null_as_default<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Default + Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeatureList {
    Items(Vec<String>),
    Text(String),
}

/// Features are normally an array, but hand-edited snapshots carry the raw
/// comma-separated form text.
fn list_or_comma_text<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<FeatureList>::deserialize(deserializer)? {
        Some(FeatureList::Items(items)) => items,
        Some(FeatureList::Text(text)) => parse_features(&text),
        None => Vec::new(),
    })
}

/// Facets travel as plain strings where the empty string means "unset".
mod blank_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::FacetCode;

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: FacetCode,
        S: Serializer,
    {
        serializer.serialize_str(value.as_ref().map(FacetCode::code).unwrap_or(""))
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FacetCode,
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .filter(|code| !code.is_empty())
            .map(|code| T::from_code(&code)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample() -> ListingRecord {
        ListingRecord {
            id: "1".into(),
            title: "Chat Application".into(),
            description: "Next.js Full Stack Project".into(),
            image: "/chat.jpg".into(),
            link: "/course/chat".into(),
            tech: Some(Tech::Js),
            project: None,
            price: "₹99/-".into(),
            features: vec!["Life Time Access".into()],
            buy_link: "https://pay.example/chat".into(),
        }
    }

    #[test]
    fn wire_shape_uses_camel_case_and_blank_facets() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "1",
                "title": "Chat Application",
                "description": "Next.js Full Stack Project",
                "image": "/chat.jpg",
                "link": "/course/chat",
                "tech": "js",
                "project": "",
                "price": "₹99/-",
                "features": ["Life Time Access"],
                "buyLink": "https://pay.example/chat"
            })
        );
    }

    #[test]
    fn grid_era_records_without_commerce_fields_still_load() {
        let record: ListingRecord = serde_json::from_value(json!({
            "id": "5",
            "title": "Full-Stack Web Development",
            "description": "Build complete web applications",
            "image": "/fullstack-development.jpg",
            "link": "/course/fullstack",
            "tech": "database",
            "project": "fullstack"
        }))
        .unwrap();

        assert_eq!(record.tech, Some(Tech::Database));
        assert_eq!(record.project, Some(Category::FullStack));
        assert!(record.features.is_empty());
        assert_eq!(record.price, "");
        assert_eq!(record.buy_link, "");
    }

    #[test]
    fn features_written_as_text_are_split() {
        let record: ListingRecord = serde_json::from_value(json!({
            "id": "1",
            "title": "Chat Application",
            "image": "/chat.jpg",
            "link": "/course/chat",
            "features": "a, b,, ",
            "tech": "js",
            "project": "fullstack"
        }))
        .unwrap();

        assert_eq!(record.features, vec!["a", "b"]);
    }

    #[test]
    fn null_text_fields_load_as_empty() {
        let record: ListingRecord = serde_json::from_value(json!({
            "id": "2",
            "title": "Food Delivery App",
            "description": null,
            "image": "/food.jpg",
            "link": "/course/food",
            "tech": null,
            "project": "",
            "price": null,
            "features": null,
            "buyLink": null
        }))
        .unwrap();

        assert_eq!(record.description, "");
        assert_eq!(record.price, "");
        assert_eq!(record.buy_link, "");
        assert!(record.features.is_empty());
        assert_eq!(record.tech, None);
    }

    #[test]
    fn unknown_codes_survive_a_reload() {
        let record: ListingRecord = serde_json::from_value(json!({
            "id": "9",
            "title": "Rust",
            "image": "/rust.png",
            "link": "/course/rust",
            "tech": "rust",
            "project": "systems"
        }))
        .unwrap();

        assert_eq!(record.tech, Some(Tech::Other("rust".into())));
        assert_eq!(record.project_code(), "systems");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["tech"], "rust");
        assert_eq!(value["project"], "systems");
    }

    #[test]
    fn category_course_labels_follow_heading_table() {
        assert_eq!(Category::FullStack.course_label(), "Full Stack Web Dev");
        assert_eq!(Category::UiUx.course_label(), "UI/UX");
        assert_eq!(Category::Graphic.course_label(), "Graphic Design");
        assert_eq!(Category::from_code("quantum").course_label(), "Project");
    }

    #[test]
    fn known_codes_round_trip() {
        for tech in Tech::known() {
            assert_eq!(Tech::from_code(tech.code()), tech);
        }
        for category in Category::known() {
            assert_eq!(Category::from_code(category.code()), category);
        }
    }
}
