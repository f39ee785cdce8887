use nutype::nutype;
use redb::TypeName;
use std::cmp::Ordering;
use std::str;

pub const MAX_FIELD_NAME_LENGTH: usize = 256;
pub const MAX_DOC_ID_LENGTH: usize = 1024;
pub const MAX_INDEX_NAME_LENGTH: usize = 128;

/// Name of a field declared on an index.
///
/// Field names are compared by full equality, never by prefix.
#[nutype(
    validate(not_empty, len_char_max = MAX_FIELD_NAME_LENGTH),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Borrow,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct FieldName(String);

/// Opaque document identifier.
#[nutype(
    validate(not_empty, len_char_max = MAX_DOC_ID_LENGTH),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Borrow,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct DocId(String);

/// Name of a logical index. Doubles as a directory name when indexes live on disk.
#[nutype(
    validate(
        not_empty,
        len_char_max = MAX_INDEX_NAME_LENGTH,
        predicate = |name: &str| is_portable_name(name),
    ),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct IndexName(String);

fn is_portable_name(name: &str) -> bool {
    name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && name.trim() == name
}

impl redb::Key for FieldName {
    fn compare(data1: &[u8], data2: &[u8]) -> Ordering {
        data1.cmp(data2)
    }
}

impl redb::Value for FieldName {
    type SelfType<'a> = Self;
    type AsBytes<'a> = &'a [u8];

    fn fixed_width() -> Option<usize> {
        None
    }

    fn from_bytes<'a>(data: &'a [u8]) -> Self::SelfType<'a>
    where
        Self: 'a,
    {
        let s = str::from_utf8(data).expect("invalid UTF-8 in field name");
        Self::try_from(s).expect("catalog holds validated field names")
    }

    fn as_bytes<'a, 'b: 'a>(value: &'a Self::SelfType<'b>) -> Self::AsBytes<'a>
    where
        Self: 'b,
    {
        value.as_bytes()
    }

    fn type_name() -> TypeName {
        TypeName::new("labelidx::FieldName")
    }
}
