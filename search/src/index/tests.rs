use super::*;
use crate::testing::{Attached, RecordingEngine, doc_id, field, index_name};
use common::create_index;
use labelidx_core::types::{FieldCapabilities, FieldType};

mod common {
    use super::*;

    pub(super) fn create_index() -> LabelIndex<RecordingEngine> {
        LabelIndex::create(index_name("test"), &Config::in_memory()).unwrap()
    }
}

mod create {
    use super::*;

    #[test]
    fn test_create_passes_name_to_engine() {
        let index = create_index();

        assert_eq!(index.name().as_str(), "test");
        assert_eq!(index.engine().name, Some(index_name("test")));
        assert!(index.registry().is_empty());
    }
}

mod index_document {
    use super::*;

    #[test]
    fn test_tag_and_numeric_labels_are_committed_in_order() {
        let mut index = create_index();
        let labels = vec![
            Label::tag("loc", "nyc").unwrap(),
            Label::numeric("temp", 72.5).unwrap(),
        ];

        index.index_document(&doc_id("sensor:1"), &labels).unwrap();

        let engine = index.engine();
        assert_eq!(
            engine.declared,
            vec![
                (field("loc"), FieldCapabilities::POLY),
                (field("temp"), FieldCapabilities::POLY),
            ]
        );
        assert_eq!(engine.commits.len(), 1);
        assert_eq!(engine.commits[0].id, doc_id("sensor:1"));
        assert_eq!(
            engine.commits[0].values,
            vec![
                Attached::Text(field("loc"), "nyc".to_string(), TextKind::Tag),
                Attached::Number(field("temp"), 72.5),
            ]
        );
    }

    #[test]
    fn test_full_text_label_uses_full_text_marker() {
        let mut index = create_index();

        index
            .index_document(&doc_id("post"), &[Label::full_text("title", "hello").unwrap()])
            .unwrap();

        assert_eq!(
            index.engine().commits[0].values,
            vec![Attached::Text(
                field("title"),
                "hello".to_string(),
                TextKind::FullText
            )]
        );
    }

    #[test]
    fn test_geo_label_fails_without_commit() {
        let mut index = create_index();
        let labels = vec![
            Label::tag("loc", "nyc").unwrap(),
            Label::geo("pos", "-73.98,40.75").unwrap(),
            Label::numeric("temp", 72.5).unwrap(),
        ];

        let err = index.index_document(&doc_id("sensor:1"), &labels).unwrap_err();

        match err {
            IndexError::UnsupportedFieldType { field: f, field_type } => {
                assert_eq!(f, field("pos"));
                assert_eq!(field_type, FieldType::Geo);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(index.engine().commits.is_empty());
    }

    #[test]
    fn test_fields_registered_before_failure_stay_registered() {
        let mut index = create_index();
        let labels = vec![
            Label::tag("loc", "nyc").unwrap(),
            Label::geo("pos", "-73.98,40.75").unwrap(),
            Label::numeric("temp", 72.5).unwrap(),
        ];

        index.index_document(&doc_id("sensor:1"), &labels).unwrap_err();

        let fields: Vec<&str> = index.fields().map(|name| name.as_str()).collect();
        assert_eq!(fields, vec!["loc", "pos"]);
    }

    #[test]
    fn test_repeat_document_reuses_registered_fields() {
        let mut index = create_index();
        let labels = vec![
            Label::tag("loc", "nyc").unwrap(),
            Label::numeric("temp", 72.5).unwrap(),
        ];

        index.index_document(&doc_id("sensor:1"), &labels).unwrap();
        index.index_document(&doc_id("sensor:2"), &labels).unwrap();
        index.index_document(&doc_id("sensor:1"), &labels).unwrap();

        let engine = index.engine();
        assert_eq!(engine.declared.len(), 2);
        assert_eq!(engine.commits.len(), 3);
        assert_eq!(engine.documents.len(), 2);
    }

    #[test]
    fn test_empty_label_list_commits_empty_document() {
        let mut index = create_index();

        index.index_document(&doc_id("bare"), &[]).unwrap();

        let engine = index.engine();
        assert!(engine.declared.is_empty());
        assert_eq!(engine.commits.len(), 1);
        assert!(engine.commits[0].values.is_empty());
    }

    #[test]
    fn test_engine_commit_failure_is_passed_through() {
        let mut index = LabelIndex::from_engine(
            index_name("test"),
            RecordingEngine {
                refuse_commits: true,
                ..RecordingEngine::default()
            },
        );

        let err = index
            .index_document(&doc_id("a"), &[Label::tag("loc", "nyc").unwrap()])
            .unwrap_err();

        assert!(matches!(err, IndexError::Engine(EngineError::Document(_))));
    }
}

mod remove_document {
    use super::*;

    #[test]
    fn test_remove_existing_document() {
        let mut index = create_index();
        index
            .index_document(&doc_id("a"), &[Label::tag("loc", "nyc").unwrap()])
            .unwrap();

        index.remove_document(&doc_id("a")).unwrap();

        assert!(index.engine().documents.is_empty());
    }

    #[test]
    fn test_remove_missing_document_is_not_found() {
        let mut index = create_index();

        let err = index.remove_document(&doc_id("missing")).unwrap_err();

        assert!(matches!(err, IndexError::DocumentNotFound(id) if id == doc_id("missing")));
        assert_eq!(index.engine().deletes, vec![doc_id("missing")]);
    }
}

mod query {
    use super::*;

    fn populated() -> LabelIndex<RecordingEngine> {
        let mut index = create_index();
        index
            .index_document(&doc_id("a"), &[Label::tag("loc", "nyc").unwrap()])
            .unwrap();
        index
            .index_document(&doc_id("b"), &[Label::tag("loc", "sf").unwrap()])
            .unwrap();
        index
            .index_document(&doc_id("c"), &[Label::tag("loc", "nyc").unwrap()])
            .unwrap();
        index
    }

    #[test]
    fn test_advance_yields_matches_then_end() {
        let index = populated();

        let mut results = index.open_query("loc:nyc").unwrap();

        assert_eq!(results.index().as_str(), "test");
        assert_eq!(results.advance().unwrap(), Some(doc_id("a")));
        assert_eq!(results.advance().unwrap(), Some(doc_id("c")));
        assert_eq!(results.advance().unwrap(), None);
        assert_eq!(results.advance().unwrap(), None);
    }

    #[test]
    fn test_results_iterate() {
        let index = populated();

        let ids: Vec<DocId> = index
            .open_query("*")
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(ids, vec![doc_id("a"), doc_id("b"), doc_id("c")]);
    }

    #[test]
    fn test_query_error_carries_engine_message() {
        let index = populated();

        let err = index.open_query("no separator").err().unwrap();

        match err {
            IndexError::Query(message) => assert!(message.contains("no separator")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
