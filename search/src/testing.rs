//! In-memory engine that records every call made through the engine contract.

use crate::engine::error::EngineError;
use crate::engine::{Engine, EngineDocument, TextKind};
use labelidx_core::types::{Config, DocId, FieldCapabilities, FieldName, IndexName};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Attached {
    Number(FieldName, f64),
    Text(FieldName, String, TextKind),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedDocument {
    pub(crate) id: DocId,
    pub(crate) values: Vec<Attached>,
}

impl EngineDocument for RecordedDocument {
    fn add_number(&mut self, field: &FieldName, value: f64) {
        self.values.push(Attached::Number(field.clone(), value));
    }

    fn add_text(&mut self, field: &FieldName, value: &str, kind: TextKind) {
        self.values
            .push(Attached::Text(field.clone(), value.to_string(), kind));
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingEngine {
    pub(crate) name: Option<IndexName>,
    pub(crate) declared: Vec<(FieldName, FieldCapabilities)>,
    pub(crate) commits: Vec<RecordedDocument>,
    pub(crate) documents: BTreeMap<DocId, RecordedDocument>,
    pub(crate) deletes: Vec<DocId>,
    pub(crate) refuse_commits: bool,
}

impl RecordingEngine {
    fn matches(document: &RecordedDocument, field: &str, value: &str) -> bool {
        document.values.iter().any(|attached| match attached {
            Attached::Number(name, n) => name.as_str() == field && n.to_string() == value,
            Attached::Text(name, text, _) => name.as_str() == field && text == value,
        })
    }
}

impl Engine for RecordingEngine {
    type Document = RecordedDocument;
    type Results = std::vec::IntoIter<Result<DocId, EngineError>>;

    fn create_index(name: &IndexName, _config: &Config) -> Result<Self, EngineError> {
        Ok(Self {
            name: Some(name.clone()),
            ..Self::default()
        })
    }

    fn create_field(
        &mut self,
        name: &FieldName,
        capabilities: FieldCapabilities,
    ) -> Result<(), EngineError> {
        self.declared.push((name.clone(), capabilities));
        Ok(())
    }

    fn create_document(&self, id: &DocId) -> RecordedDocument {
        RecordedDocument {
            id: id.clone(),
            values: Vec::new(),
        }
    }

    fn add_document(&mut self, document: RecordedDocument) -> Result<(), EngineError> {
        if self.refuse_commits {
            return Err(EngineError::Document("commit refused".to_string()));
        }
        self.commits.push(document.clone());
        self.documents.insert(document.id.clone(), document);
        Ok(())
    }

    fn delete_document(&mut self, id: &DocId) -> Result<bool, EngineError> {
        self.deletes.push(id.clone());
        Ok(self.documents.remove(id).is_some())
    }

    /// Understands `*` and `field:value`.
    fn iterate_query(&self, query: &str) -> Result<Self::Results, EngineError> {
        let ids: Vec<Result<DocId, EngineError>> = if query == "*" {
            self.documents.keys().cloned().map(Ok).collect()
        } else {
            let (field, value) = query
                .split_once(':')
                .ok_or_else(|| EngineError::Query(format!("Syntax error in {query:?}")))?;
            self.documents
                .values()
                .filter(|document| Self::matches(document, field, value))
                .map(|document| Ok(document.id.clone()))
                .collect()
        };
        Ok(ids.into_iter())
    }
}

pub(crate) fn field(s: &str) -> FieldName {
    FieldName::try_from(s).unwrap()
}

pub(crate) fn doc_id(s: &str) -> DocId {
    DocId::try_from(s).unwrap()
}

pub(crate) fn index_name(s: &str) -> IndexName {
    IndexName::try_from(s).unwrap()
}
