use pretty_assertions::assert_eq;

use course_catalog::catalog::STORAGE_KEY;
use course_catalog::{
    default_catalog, display_title, filter, CatalogEditor, CatalogError, CatalogStore, Category,
    Facets, KeyValueStore, ListingInput, SqliteStorage, Tech,
};

fn course(title: &str, tech: Tech, project: Category) -> ListingInput {
    ListingInput {
        title: title.to_string(),
        description: format!("{title} from the ground up"),
        image: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        link: format!("/course/{}", title.to_lowercase().replace(' ', "-")),
        tech: Some(tech),
        project: Some(project),
        price: "₹149/-".to_string(),
        features: "Life Time Access,  Installation Video ,,".to_string(),
        buy_link: "https://pay.example/course".to_string(),
    }
}

#[test]
fn catalog_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("catalog.sqlite");

    let created_id = {
        let storage = SqliteStorage::open(&db_path).unwrap();
        let mut store = CatalogStore::load(storage).unwrap();
        assert_eq!(store.records(), default_catalog().as_slice());

        let mut editor = CatalogEditor::new(&mut store);
        let created = editor
            .create(course("Rust Services", Tech::Cloud, Category::DevOps))
            .unwrap();
        editor
            .update("3", course("Motion Design", Tech::Gsap, Category::Graphic))
            .unwrap();
        assert!(editor.delete("8"));
        assert!(!editor.delete("8"));
        created.id
    };

    let storage = SqliteStorage::open(&db_path).unwrap();
    let store = CatalogStore::load(storage).unwrap();

    assert_eq!(store.len(), default_catalog().len());
    let last = store.records().last().unwrap();
    assert_eq!(last.id, created_id);
    assert_eq!(last.features, vec!["Life Time Access", "Installation Video"]);
    assert_eq!(store.position("3"), Some(2));
    assert_eq!(store.get("3").unwrap().title, "Motion Design");
    assert!(store.get("8").is_none());
}

#[test]
fn persisted_snapshot_is_a_json_array_of_records() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    let store = CatalogStore::load(storage).unwrap();

    let json = store.storage().get(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["id"], "1");
    assert_eq!(first["buyLink"], "https://razorpay.com/...");
    assert!(first["features"].is_array());
}

#[test]
fn failed_mutations_leave_storage_untouched() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    let mut store = CatalogStore::load(storage).unwrap();
    let before = store.storage().get(STORAGE_KEY).unwrap();

    let mut editor = CatalogEditor::new(&mut store);
    let err = editor.create(ListingInput::default()).unwrap_err();
    assert!(matches!(err, CatalogError::Validation { .. }));
    let err = editor
        .update("missing", course("Ghost", Tech::Js, Category::Software))
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));

    assert_eq!(store.storage().get(STORAGE_KEY).unwrap(), before);
}

#[test]
fn grid_view_over_the_seeded_catalog() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    let store = CatalogStore::load(storage).unwrap();

    let facets = Facets::parse(Some("react"), None);
    let ids: Vec<_> = filter(store.records(), &facets)
        .into_iter()
        .map(|record| record.id)
        .collect();
    assert_eq!(ids, vec!["2", "4"]);
    assert_eq!(display_title(&facets), "REACT Courses");

    let fullstack = Facets::parse(None, Some("fullstack"));
    assert_eq!(filter(store.records(), &fullstack).len(), 3);
    assert_eq!(display_title(&fullstack), "Full Stack Web Dev Courses");
}
