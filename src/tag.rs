use std::fmt::{self, Debug, Formatter};

use indexmap::IndexMap;

/// An ordered key-value map backing [`NbtCompound`]. Iteration order always
/// matches insertion order, matched byte-for-byte on the key: `IndexMap`
/// hashes and compares `String` the same way `HashMap` would, so two keys
/// that differ only in, say, invalid surrogate handling are never merged.
pub type Map = IndexMap<String, NbtTag>;

/// A single decoded SNBT value.
///
/// This is the decoder's only output type; there is no separate "list of
/// named tags" wrapper the way binary NBT has one, since SNBT's grammar
/// never distinguishes a named tag from its value — naming happens only at
/// the one place a value can follow a key, in a compound.
#[derive(Clone, PartialEq)]
pub enum NbtTag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    ByteArray(Vec<i8>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    List(NbtList),
    Compound(NbtCompound),
}

impl NbtTag {
    /// A short, stable name for the tag's variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            NbtTag::Byte(_) => "Byte",
            NbtTag::Short(_) => "Short",
            NbtTag::Int(_) => "Int",
            NbtTag::Long(_) => "Long",
            NbtTag::Float(_) => "Float",
            NbtTag::Double(_) => "Double",
            NbtTag::String(_) => "String",
            NbtTag::ByteArray(_) => "ByteArray",
            NbtTag::IntArray(_) => "IntArray",
            NbtTag::LongArray(_) => "LongArray",
            NbtTag::List(_) => "List",
            NbtTag::Compound(_) => "Compound",
        }
    }
}

impl Debug for NbtTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NbtTag::Byte(value) => write!(f, "Byte({value})"),
            NbtTag::Short(value) => write!(f, "Short({value})"),
            NbtTag::Int(value) => write!(f, "Int({value})"),
            NbtTag::Long(value) => write!(f, "Long({value})"),
            NbtTag::Float(value) => write!(f, "Float({value})"),
            NbtTag::Double(value) => write!(f, "Double({value})"),
            NbtTag::String(value) => write!(f, "String({value:?})"),
            NbtTag::ByteArray(value) => write!(f, "ByteArray({value:?})"),
            NbtTag::IntArray(value) => write!(f, "IntArray({value:?})"),
            NbtTag::LongArray(value) => write!(f, "LongArray({value:?})"),
            NbtTag::List(value) => Debug::fmt(value, f),
            NbtTag::Compound(value) => Debug::fmt(value, f),
        }
    }
}

macro_rules! tag_from {
    ($($type:ty, $variant:ident);* $(;)?) => {
        $(
            impl From<$type> for NbtTag {
                fn from(value: $type) -> Self {
                    NbtTag::$variant(value)
                }
            }
        )*
    };
}

tag_from! {
    i8, Byte;
    i16, Short;
    i32, Int;
    i64, Long;
    f32, Float;
    f64, Double;
    String, String;
    Vec<i8>, ByteArray;
    Vec<i32>, IntArray;
    Vec<i64>, LongArray;
    NbtList, List;
    NbtCompound, Compound;
}

impl From<bool> for NbtTag {
    /// `true`/`false` always widen to `Byte(1)`/`Byte(0)`, never to a
    /// distinct boolean representation — SNBT has no boolean tag.
    fn from(value: bool) -> Self {
        NbtTag::Byte(if value { 1 } else { 0 })
    }
}

/// A heterogeneous SNBT list (`[value, value, ...]`).
///
/// Unlike binary NBT, an SNBT list is not required to be homogeneous: its
/// elements may be any mix of tag variants, including nested lists and
/// compounds.
#[derive(Clone, PartialEq, Default)]
pub struct NbtList(pub Vec<NbtTag>);

impl NbtList {
    pub fn new() -> Self {
        NbtList(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NbtList(Vec::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push<T: Into<NbtTag>>(&mut self, value: T) {
        self.0.push(value.into());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NbtTag> {
        self.0.iter()
    }
}

impl IntoIterator for NbtList {
    type Item = NbtTag;
    type IntoIter = std::vec::IntoIter<NbtTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NbtList {
    type Item = &'a NbtTag;
    type IntoIter = std::slice::Iter<'a, NbtTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<NbtTag> for NbtList {
    fn from_iter<T: IntoIterator<Item = NbtTag>>(iter: T) -> Self {
        NbtList(Vec::from_iter(iter))
    }
}

impl Debug for NbtList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// An SNBT compound (`{key: value, ...}`).
///
/// Keys are always read by the quoted/unquoted string reader, never by the
/// value classifier — `{true: 1}` has the string key `"true"`, not a
/// boolean one. Insertion order is preserved and duplicate keys are
/// rejected at parse time (see the container parser), so this type never
/// needs to decide what "last write wins" means.
#[repr(transparent)]
#[derive(Clone, PartialEq, Default)]
pub struct NbtCompound(Map);

impl NbtCompound {
    pub fn new() -> Self {
        NbtCompound(Map::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NbtCompound(Map::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&NbtTag> {
        self.0.get(key)
    }

    /// Inserts `key` with `value`, returning the previous value if present.
    ///
    /// The container parser is responsible for rejecting duplicate keys as
    /// a syntax error before calling this; this method itself allows
    /// overwriting, the way the underlying map does, since the type is
    /// usable outside the decoder too.
    pub fn insert<T: Into<NbtTag>>(&mut self, key: String, value: T) -> Option<NbtTag> {
        self.0.insert(key, value.into())
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, NbtTag> {
        self.0.iter()
    }
}

impl IntoIterator for NbtCompound {
    type Item = (String, NbtTag);
    type IntoIter = indexmap::map::IntoIter<String, NbtTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NbtCompound {
    type Item = (&'a String, &'a NbtTag);
    type IntoIter = indexmap::map::Iter<'a, String, NbtTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, NbtTag)> for NbtCompound {
    fn from_iter<T: IntoIterator<Item = (String, NbtTag)>>(iter: T) -> Self {
        NbtCompound(Map::from_iter(iter))
    }
}

impl Debug for NbtCompound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}
