//! Integration tests for the complete orgtree pipeline
//!
//! These tests verify end-to-end functionality across crates:
//! - Archive loading → RecordStore → graphs
//! - Walker → Annotator over the canonical and alternate hierarchies
//! - External reference chain over the walk output
//!
//! Run with: cargo test --test integration_tests

use std::io::Write;

use orgtree_core::*;
use tempfile::tempdir;

// ============================================================================
// Loading → walking
// ============================================================================

#[test]
fn test_zip_export_to_walk() {
    use zip::write::SimpleFileOptions;

    let dir = tempdir().unwrap();
    let path = dir.path().join("export.json.zip");
    let mut zip = zip::ZipWriter::new(std::fs::File::create(&path).unwrap());
    zip.start_file("export.json", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(
        br#"{"service": [
            {"id": "A", "nom": "A", "hierarchie": [{"service": "B", "type_hierarchie": "Service Fils"}]},
            {"id": "B", "nom": "B", "hierarchie": [{"service": "C", "type_hierarchie": "Service Fils"}]},
            {"id": "C", "nom": "C", "hierarchie": []}
        ]}"#,
    )
    .unwrap();
    zip.finish().unwrap();

    let store = RecordStore::new(orgtree_ingest_json::load_records(&path).unwrap());
    let entries = HierarchyWalker::new(&store).walk_from("A").unwrap();

    assert_eq!(
        entries,
        vec![
            HierarchyEntry {
                depth: 0,
                node_id: "B".to_string(),
                relationship_type: RelationshipType::Child,
                name: "B".to_string(),
            },
            HierarchyEntry {
                depth: 1,
                node_id: "C".to_string(),
                relationship_type: RelationshipType::Child,
                name: "C".to_string(),
            },
        ]
    );
}

#[test]
fn test_unknown_reference_is_a_leaf() {
    let store = RecordStore::new(vec![
        Record::new("root", "Root").with_relationship(Relationship::child("nonexistent-id"))
    ]);

    let stub = store.lookup("nonexistent-id");
    assert_eq!(stub.id, "nonexistent-id");
    assert_eq!(stub.name, "nonexistent-id");
    assert!(stub.relationships.is_empty());
    assert!(HierarchyWalker::new(&store).walk(&stub).unwrap().is_empty());

    let entries = HierarchyWalker::new(&store).walk_from("root").unwrap();
    assert_eq!(entries.len(), 1);
}

// ============================================================================
// Cross-hierarchy resolution
// ============================================================================

fn ministry_fixture() -> (RecordStore, HierarchyConfig) {
    let config = HierarchyConfig::new("gov", "min");
    let store = RecordStore::new(vec![
        Record::new("gov", "Government")
            .with_relationship(Relationship::child("min"))
            .with_relationship(Relationship::child("rootA"))
            .with_relationship(Relationship::child("rootB")),
        Record::new("min", "Ministry")
            .with_relationship(Relationship::child("Y"))
            .with_relationship(Relationship::alternate("Z")),
        Record::new("rootA", "Root A").with_relationship(Relationship::child("X")),
        Record::new("rootB", "Root B").with_relationship(Relationship::child("Z")),
        Record::new("X", "X").with_relationship(Relationship::alternate("Y")),
        Record::new("Z", "Z").with_relationship(Relationship::alternate("Y")),
        Record::new("Y", "Y").with_external_code("110000000"),
    ]);
    (store, config)
}

#[test]
fn test_alternate_parents_reprojected_onto_roots() {
    let (store, config) = ministry_fixture();
    let graphs = HierarchyGraphs::build(store.records());
    let resolver = AlternateResolver::new(&graphs.alternate, &graphs.canonical, &config);

    assert_eq!(
        resolver.top_level_alternate_parents("Y").unwrap(),
        ["rootA", "rootB"]
    );
}

#[test]
fn test_walk_and_annotate_ministry() {
    let (store, config) = ministry_fixture();
    let graphs = HierarchyGraphs::build(store.records());
    let entries = HierarchyWalker::new(&store)
        .walk_from(&config.ministry_root)
        .unwrap();
    let annotated = Annotator::new(&graphs, &config)
        .annotate_all(entries)
        .unwrap();

    let ids: Vec<(usize, &str)> = annotated
        .iter()
        .map(|a| (a.entry.depth, a.entry.node_id.as_str()))
        .collect();
    assert_eq!(ids, [(0, "Y"), (0, "Z"), (1, "Y")]);

    assert_eq!(annotated[0].alternate_parents, ["rootA", "rootB"]);
    assert_eq!(annotated[1].declared_parent.as_deref(), Some("rootB"));
    assert!(annotated[2].alternate_parents.is_empty());
    assert_eq!(annotated[2].declared_parent.as_deref(), Some("Y"));
}

#[test]
fn test_multi_parent_violation_surfaces_through_annotation() {
    let config = HierarchyConfig::default();
    let store = RecordStore::new(vec![
        Record::new("parentA", "A")
            .with_relationship(Relationship::child("child"))
            .with_relationship(Relationship::alternate("child")),
        Record::new("parentB", "B").with_relationship(Relationship::child("child")),
    ]);
    let graphs = HierarchyGraphs::build(store.records());
    let entries = HierarchyWalker::new(&store).walk_from("parentA").unwrap();
    let err = Annotator::new(&graphs, &config)
        .annotate_all(entries)
        .unwrap_err();

    assert_eq!(
        err,
        HierarchyError::MultipleParents {
            node: "child".to_string(),
            parents: vec!["parentA".to_string(), "parentB".to_string()],
        }
    );
    assert!(!check_forest(&graphs, &config).is_ok());
}

// ============================================================================
// External references over walk output
// ============================================================================

#[test]
fn test_links_resolved_once_per_emitted_code() {
    use orgtree_xref::{Binding, ReferenceResolver, SparqlEndpoint, XrefConfig, XrefError};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recording {
        queries: RefCell<Vec<String>>,
    }

    impl SparqlEndpoint for Recording {
        fn select(&self, query: &str) -> Result<Vec<Binding>, XrefError> {
            self.queries.borrow_mut().push(query.to_string());
            let (var, value) = if query.contains("?item") {
                ("item", "http://www.wikidata.org/entity/Q42")
            } else {
                ("xref", "113230702")
            };
            Ok(vec![Binding::from([(var.to_string(), value.to_string())])])
        }
    }

    let (store, config) = ministry_fixture();
    let entries = HierarchyWalker::new(&store)
        .walk_from(&config.ministry_root)
        .unwrap();

    let endpoint = Recording::default();
    let resolver = ReferenceResolver::new(
        &endpoint,
        XrefConfig {
            enabled: true,
            ..Default::default()
        },
    )
    .unwrap();

    let mut linked = Vec::new();
    for entry in &entries {
        let code = store
            .get(&entry.node_id)
            .and_then(|r| r.external_code.as_deref());
        let links = resolver.resolve_links(code).unwrap();
        if !links.is_empty() {
            linked.push((entry.node_id.clone(), links));
        }
    }

    // "Y" is emitted twice but only has one code; "Z" has none.
    assert_eq!(linked.len(), 2);
    assert_eq!(
        linked[0].1.secondary_link.as_deref(),
        Some("https://viaf.org/viaf/113230702")
    );
    assert_eq!(endpoint.queries.borrow().len(), 2);
    assert!(endpoint.queries.borrow()[0].contains("wdt:P1616 \"110000000\""));
    assert!(endpoint.queries.borrow()[1].contains("wd:Q42 wdt:P214"));
}
