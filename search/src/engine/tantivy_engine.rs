//! Tantivy-backed engine index.
//!
//! Tantivy schemas are fixed at creation, so declared fields live as paths
//! inside three JSON fields, one per value flavour:
//! - `text.<field>`: full-text values, default tokenizer
//! - `tag.<field>`: tag values, raw tokenizer (exact match)
//! - `num.<field>`: numeric values, also a fast field so ranges work
//!
//! Every declared field is addressable under all three paths. The redb field
//! catalog records which fields were declared and with which capabilities.

use super::error::EngineError;
use super::{Engine, EngineDocument, TextKind};
use labelidx_core::catalog::FieldCatalog;
use labelidx_core::types::{Config, DocId, FieldCapabilities, FieldName, FieldType, IndexName};
use serde_json::{Map, Value as JsonValue};
use tantivy::collector::{Count, DocSetCollector};
use tantivy::directory::MmapDirectory;
use tantivy::query::{QueryParser, TermQuery};
use tantivy::schema::{FAST, Field, IndexRecordOption, STORED, STRING, Schema, TEXT, Value};
use tantivy::{
    DocAddress, Index, IndexReader, IndexWriter, ReloadPolicy, Searcher, TantivyDocument, Term,
};
use tracing::{debug, info, warn};

const ID_FIELD: &str = "id";
const TEXT_FIELD: &str = "text";
const TAG_FIELD: &str = "tag";
const NUM_FIELD: &str = "num";

#[derive(Debug, Clone, Copy)]
struct SchemaFields {
    id: Field,
}

impl SchemaFields {
    fn build_schema() -> Schema {
        let mut builder = Schema::builder();
        builder.add_text_field(ID_FIELD, STRING | STORED);
        builder.add_json_field(TEXT_FIELD, TEXT);
        builder.add_json_field(TAG_FIELD, STRING);
        builder.add_json_field(NUM_FIELD, STRING | FAST);
        builder.build()
    }

    fn resolve(schema: &Schema) -> Result<Self, EngineError> {
        Ok(Self {
            id: schema.get_field(ID_FIELD)?,
        })
    }
}

pub struct TantivyEngine {
    name: IndexName,
    index: Index,
    writer: IndexWriter,
    reader: IndexReader,
    catalog: FieldCatalog,
    fields: SchemaFields,
}

impl TantivyEngine {
    /// Declared fields with their capabilities, in name order.
    pub fn declared_fields(&self) -> Result<Vec<(FieldName, FieldCapabilities)>, EngineError> {
        Ok(self.catalog.fields()?)
    }

    /// Number of live documents visible to searches.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Queues writer operations and commits them as one batch.
    ///
    /// If queueing or the commit fails, every pending operation is rolled
    /// back so a later commit cannot apply it.
    pub(super) fn write_batch<F>(&mut self, queue: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut IndexWriter) -> Result<(), EngineError>,
    {
        let written = queue(&mut self.writer)
            .and_then(|()| self.writer.commit().map(|_| ()).map_err(EngineError::from));

        if let Err(err) = written {
            if let Err(rollback) = self.writer.rollback() {
                warn!(index = %self.name, error = %rollback, "Writer rollback failed");
            }
            return Err(err);
        }

        self.reader.reload()?;
        Ok(())
    }

    pub(super) fn id_term(&self, id: &DocId) -> Term {
        Term::from_field_text(self.fields.id, id.as_str())
    }

    fn check_declared(&self, document: &PendingDocument) -> Result<(), EngineError> {
        for (field, field_type) in &document.attached {
            let declared = self
                .catalog
                .capabilities(field)?
                .is_some_and(|caps| caps.supports(*field_type));
            if !declared {
                return Err(EngineError::UndeclaredField {
                    field: field.clone(),
                    field_type: *field_type,
                });
            }
        }
        Ok(())
    }
}

impl Engine for TantivyEngine {
    type Document = PendingDocument;
    type Results = TantivyResults;

    fn create_index(name: &IndexName, config: &Config) -> Result<Self, EngineError> {
        let schema = SchemaFields::build_schema();

        let (index, catalog) = match (config.tantivy_path(name), config.catalog_path(name)) {
            (Some(index_path), Some(catalog_path)) => {
                std::fs::create_dir_all(&index_path)?;
                let dir = MmapDirectory::open(&index_path)?;
                let index = Index::open_or_create(dir, schema)?;
                (index, FieldCatalog::open(&catalog_path)?)
            }
            _ => (Index::create_in_ram(schema), FieldCatalog::in_memory()?),
        };

        let fields = SchemaFields::resolve(&index.schema())?;
        let writer: IndexWriter =
            index.writer_with_num_threads(config.writer_threads.max(1), config.writer_heap_bytes)?;
        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        info!(
            index = %name,
            on_disk = config.base_path.is_some(),
            docs = reader.searcher().num_docs(),
            "Opened engine index"
        );

        Ok(Self {
            name: name.clone(),
            index,
            writer,
            reader,
            catalog,
            fields,
        })
    }

    fn create_field(
        &mut self,
        name: &FieldName,
        capabilities: FieldCapabilities,
    ) -> Result<(), EngineError> {
        let is_new = self.catalog.declare(name, capabilities)?;
        debug!(index = %self.name, field = %name, is_new, "Declared field");
        Ok(())
    }

    fn create_document(&self, id: &DocId) -> PendingDocument {
        PendingDocument {
            id: id.clone(),
            text: Map::new(),
            tag: Map::new(),
            num: Map::new(),
            attached: Vec::new(),
        }
    }

    fn add_document(&mut self, document: PendingDocument) -> Result<(), EngineError> {
        self.check_declared(&document)?;

        let id = document.id.clone();
        let values = document.attached.len();
        let doc = document.into_tantivy(&self.index.schema())?;

        let term = self.id_term(&id);
        self.write_batch(|writer| {
            writer.delete_term(term);
            writer.add_document(doc)?;
            Ok(())
        })?;

        debug!(index = %self.name, id = %id, values, "Committed document");
        Ok(())
    }

    fn delete_document(&mut self, id: &DocId) -> Result<bool, EngineError> {
        let term = self.id_term(id);
        let query = TermQuery::new(term.clone(), IndexRecordOption::Basic);
        let existing = self.reader.searcher().search(&query, &Count)?;

        if existing == 0 {
            debug!(index = %self.name, id = %id, "Delete of unknown document");
            return Ok(false);
        }

        self.write_batch(|writer| {
            writer.delete_term(term);
            Ok(())
        })?;

        debug!(index = %self.name, id = %id, "Deleted document");
        Ok(true)
    }

    fn iterate_query(&self, query: &str) -> Result<TantivyResults, EngineError> {
        let parser = QueryParser::for_index(&self.index, Vec::new());
        let parsed = parser
            .parse_query(query)
            .map_err(|e| EngineError::Query(e.to_string()))?;

        let searcher = self.reader.searcher();
        let mut addresses: Vec<DocAddress> = searcher
            .search(parsed.as_ref(), &DocSetCollector)?
            .into_iter()
            .collect();
        addresses.sort();

        debug!(index = %self.name, query, matches = addresses.len(), "Opened query");
        Ok(TantivyResults {
            searcher,
            addresses: addresses.into_iter(),
            id_field: self.fields.id,
        })
    }
}

/// Document being assembled for a [`TantivyEngine`].
///
/// Values are kept as JSON objects keyed by field name; a field given more
/// than one value of the same flavour becomes an array.
#[derive(Debug, Clone)]
pub struct PendingDocument {
    id: DocId,
    text: Map<String, JsonValue>,
    tag: Map<String, JsonValue>,
    num: Map<String, JsonValue>,
    attached: Vec<(FieldName, FieldType)>,
}

impl PendingDocument {
    fn into_tantivy(self, schema: &Schema) -> Result<TantivyDocument, EngineError> {
        let mut object = Map::new();
        object.insert(ID_FIELD.to_string(), JsonValue::String(self.id.to_string()));
        object.insert(TEXT_FIELD.to_string(), JsonValue::Object(self.text));
        object.insert(TAG_FIELD.to_string(), JsonValue::Object(self.tag));
        object.insert(NUM_FIELD.to_string(), JsonValue::Object(self.num));

        let json = JsonValue::Object(object).to_string();
        TantivyDocument::parse_json(schema, &json).map_err(|e| EngineError::Document(e.to_string()))
    }
}

impl EngineDocument for PendingDocument {
    /// Whole numbers are indexed as both integer and float so `72` and
    /// `72.0` query the same value.
    fn add_number(&mut self, field: &FieldName, value: f64) {
        if let Some(whole) = whole_number(value) {
            push_value(&mut self.num, field, JsonValue::from(whole));
        }
        push_value(&mut self.num, field, JsonValue::from(value));
        self.attached.push((field.clone(), FieldType::Numeric));
    }

    fn add_text(&mut self, field: &FieldName, value: &str, kind: TextKind) {
        let (target, field_type) = match kind {
            TextKind::FullText => (&mut self.text, FieldType::FullText),
            TextKind::Tag => (&mut self.tag, FieldType::Tag),
        };
        push_value(target, field, JsonValue::from(value));
        self.attached.push((field.clone(), field_type));
    }
}

/// Largest magnitude below which every whole f64 is exact as an i64.
const MAX_EXACT_WHOLE: f64 = 9_007_199_254_740_992.0;

fn whole_number(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < MAX_EXACT_WHOLE).then_some(value as i64)
}

fn push_value(map: &mut Map<String, JsonValue>, field: &FieldName, value: JsonValue) {
    match map.get_mut(field.as_str()) {
        None => {
            map.insert(field.to_string(), value);
        }
        Some(JsonValue::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = JsonValue::Array(vec![first, value]);
        }
    }
}

/// Matches of one query, bound to the searcher snapshot it was opened on.
///
/// Ids are read from stored fields one at a time as the iterator advances.
pub struct TantivyResults {
    searcher: Searcher,
    addresses: std::vec::IntoIter<DocAddress>,
    id_field: Field,
}

impl TantivyResults {
    fn resolve(&self, address: DocAddress) -> Result<DocId, EngineError> {
        let doc: TantivyDocument = self.searcher.doc(address)?;
        let raw = doc
            .get_first(self.id_field)
            .and_then(|v| v.as_str())
            .ok_or(EngineError::MissingId)?;
        DocId::try_from(raw).map_err(|_| EngineError::MissingId)
    }
}

impl Iterator for TantivyResults {
    type Item = Result<DocId, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        let address = self.addresses.next()?;
        Some(self.resolve(address))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.addresses.size_hint()
    }
}
