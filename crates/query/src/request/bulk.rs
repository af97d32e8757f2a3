// crates/query/src/request/bulk.rs

use serde::Serialize;
use std::fmt::{self, Display, Formatter};

use crate::error::{Error, Result};
use crate::map::OrderedMap;

/// Action of one bulk line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOperationType {
    Create,
    Delete,
    Index,
    Update,
}

impl BulkOperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkOperationType::Create => "create",
            BulkOperationType::Delete => "delete",
            BulkOperationType::Index => "index",
            BulkOperationType::Update => "update",
        }
    }
}

impl Display for BulkOperationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation of a bulk request.
#[derive(Debug, Clone)]
pub struct BulkOperation<T> {
    pub op: BulkOperationType,
    pub id: String,
    pub index: String,
    pub doc: Option<T>,
}

impl<T> BulkOperation<T> {
    pub fn new(
        op: BulkOperationType,
        index: impl Into<String>,
        id: impl Into<String>,
        doc: Option<T>,
    ) -> Self {
        Self {
            op,
            id: id.into(),
            index: index.into(),
            doc,
        }
    }

    /// `{"<op>":{"_id":id,"_index":index}}`
    fn meta(&self) -> OrderedMap {
        OrderedMap::with_capacity(1).with(
            self.op.as_str(),
            OrderedMap::with_capacity(2)
                .with("_id", self.id.as_str())
                .with("_index", self.index.as_str()),
        )
    }
}

/// Append the newline-delimited bulk body for `ops` to `buf`.
///
/// Every operation writes its meta line; the document follows on its own line
/// unless the operation is a delete or carries no document. Documents are
/// user types and go through `serde_json`.
pub fn build_bulk_body<T: Serialize>(ops: &[BulkOperation<T>], buf: &mut Vec<u8>) -> Result<()> {
    for op in ops {
        op.meta().append_json(buf);
        buf.push(b'\n');

        if op.op == BulkOperationType::Delete {
            continue;
        }
        if let Some(doc) = &op.doc {
            serde_json::to_writer(&mut *buf, doc).map_err(|source| Error::Document {
                op: op.op,
                id: op.id.clone(),
                source,
            })?;
            buf.push(b'\n');
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde::Serializer;

    #[derive(Serialize)]
    struct Doc {
        id: String,
        name: String,
    }

    fn doc(id: &str, name: &str) -> Option<Doc> {
        Some(Doc {
            id: id.into(),
            name: name.into(),
        })
    }

    fn body(ops: &[BulkOperation<Doc>]) -> String {
        let mut buf = Vec::new();
        build_bulk_body(ops, &mut buf).expect("bulk body");
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn two_index_ops() {
        let ops = [
            BulkOperation::new(BulkOperationType::Index, "test-index", "ID-1", doc("1", "Doc 1")),
            BulkOperation::new(BulkOperationType::Index, "test-index", "ID-2", doc("2", "Doc 2")),
        ];
        assert_eq!(
            body(&ops),
            concat!(
                "{\"index\":{\"_id\":\"ID-1\",\"_index\":\"test-index\"}}\n",
                "{\"id\":\"1\",\"name\":\"Doc 1\"}\n",
                "{\"index\":{\"_id\":\"ID-2\",\"_index\":\"test-index\"}}\n",
                "{\"id\":\"2\",\"name\":\"Doc 2\"}\n",
            )
        );
    }

    #[test]
    fn index_and_delete() {
        let ops = [
            BulkOperation::new(BulkOperationType::Index, "test-index", "ID-1", doc("1", "Doc 1")),
            BulkOperation::new(BulkOperationType::Delete, "test-index", "ID-2", None),
        ];
        assert_eq!(
            body(&ops),
            concat!(
                "{\"index\":{\"_id\":\"ID-1\",\"_index\":\"test-index\"}}\n",
                "{\"id\":\"1\",\"name\":\"Doc 1\"}\n",
                "{\"delete\":{\"_id\":\"ID-2\",\"_index\":\"test-index\"}}\n",
            )
        );
    }

    #[test]
    fn delete_ignores_document() {
        let ops = [BulkOperation::new(
            BulkOperationType::Delete,
            "i",
            "x",
            doc("1", "ignored"),
        )];
        assert_eq!(body(&ops), "{\"delete\":{\"_id\":\"x\",\"_index\":\"i\"}}\n");
    }

    #[test]
    fn empty_ops_write_nothing() {
        assert_eq!(body(&[]), "");
    }

    #[test]
    fn ordered_map_documents_keep_order() {
        let ops = [BulkOperation::new(
            BulkOperationType::Create,
            "i",
            "1",
            Some(ordered_map! { "z" => 1, "a" => "b" }),
        )];
        let mut buf = Vec::new();
        build_bulk_body(&ops, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\"create\":{\"_id\":\"1\",\"_index\":\"i\"}}\n{\"z\":1,\"a\":\"b\"}\n"
        );
    }

    struct Broken;

    impl Serialize for Broken {
        fn serialize<S: Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("cannot serialize"))
        }
    }

    #[test]
    fn document_errors_carry_operation_and_id() {
        let ops = [BulkOperation::new(
            BulkOperationType::Update,
            "i",
            "doc-7",
            Some(Broken),
        )];
        let err = build_bulk_body(&ops, &mut Vec::new()).unwrap_err();
        match err {
            Error::Document { op, id, .. } => {
                assert_eq!(op, BulkOperationType::Update);
                assert_eq!(id, "doc-7");
            }
            other => panic!("expected Document error, got {:?}", other),
        }
    }
}
