//=========================================================================
// Event Record
//
// The typed, attribute-addressable value every pumped event becomes.
//
// Design:
// An event is a type code plus an ordered map of named fields. The code
// is fixed at construction; fields may be added while the event is being
// built or annotated (e.g. the engine adds `instance_id` to a device-added
// event, or `keys_down` to a chord event).
//
// Equality and hashing consider only the code and the *set* of field
// names, never the values:
// ```text
// MOUSE_MOTION{pos:(1,2)}  == MOUSE_MOTION{pos:(9,9)}   ✓
// MOUSE_MOTION{pos}        == MOUSE_MOTION{pos, rel}    ✗ (different names)
// KEY_DOWN{key}            == KEY_UP{key}               ✗ (different code)
// ```
// This lets a `HashSet<Event>` coalesce continuous events of the same
// shape, keeping only the latest.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

//=== Internal Dependencies ===============================================

use super::codes::{self, EventCode};
use crate::core::input::{KeyCode, Modifiers};

//=== Value ===============================================================

/// A single event field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// Integer pair: positions, relative motion, hat and ball deltas.
    Pair(i32, i32),
    Key(KeyCode),
    Keys(Vec<KeyCode>),
    Modifiers(Modifiers),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Text(v) => write!(f, "{:?}", v),
            Self::Pair(x, y) => write!(f, "({}, {})", x, y),
            Self::Key(k) => write!(f, "{:?}", k),
            Self::Keys(keys) => write!(f, "{:?}", keys),
            Self::Modifiers(m) => write!(f, "{:?}", m),
        }
    }
}

//--- Conversions ---------------------------------------------------------

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<(i32, i32)> for Value {
    fn from((x, y): (i32, i32)) -> Self {
        Self::Pair(x, y)
    }
}

impl From<KeyCode> for Value {
    fn from(v: KeyCode) -> Self {
        Self::Key(v)
    }
}

impl From<Vec<KeyCode>> for Value {
    fn from(v: Vec<KeyCode>) -> Self {
        Self::Keys(v)
    }
}

impl From<Modifiers> for Value {
    fn from(v: Modifiers) -> Self {
        Self::Modifiers(v)
    }
}

//=== Event ===============================================================

/// A normalized event: type code plus named fields.
///
/// Fields are only present for the categories that define them, so
/// readers use the typed accessors, which return `None` when a field is
/// missing or has a different type.
///
/// # Examples
///
/// ```
/// use proxima_engine::core::event::{codes, Event};
///
/// let event = Event::new(codes::JOY_AXIS_MOTION)
///     .with("instance_id", 0)
///     .with("axis", 1)
///     .with("value", 0.7);
///
/// assert_eq!(event.int("axis"), Some(1));
/// assert_eq!(event.float("value"), Some(0.7));
/// assert!(event.text("axis").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Event {
    code: EventCode,
    fields: BTreeMap<String, Value>,
}

impl Event {
    //--- Construction -----------------------------------------------------

    /// Creates an event with no fields.
    pub fn new(code: EventCode) -> Self {
        Self {
            code,
            fields: BTreeMap::new(),
        }
    }

    /// Creates a GAME event with its `subtype` field set.
    pub fn game(subtype: &str) -> Self {
        Self::new(codes::GAME_EVENT).with("subtype", subtype)
    }

    /// Adds a field (builder style). Replaces an existing field of the
    /// same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Inserts a field, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    //--- Inspection -------------------------------------------------------

    /// The raw type code.
    pub fn code(&self) -> EventCode {
        self.code
    }

    /// Symbolic name of the type code.
    pub fn code_name(&self) -> &'static str {
        codes::name(self.code)
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    //--- Typed Accessors --------------------------------------------------

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Reads a float field; integer fields widen.
    pub fn float(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn pair(&self, name: &str) -> Option<(i32, i32)> {
        match self.get(name)? {
            Value::Pair(x, y) => Some((*x, *y)),
            _ => None,
        }
    }

    pub fn key(&self, name: &str) -> Option<KeyCode> {
        match self.get(name)? {
            Value::Key(k) => Some(*k),
            _ => None,
        }
    }

    pub fn keys(&self, name: &str) -> Option<&[KeyCode]> {
        match self.get(name)? {
            Value::Keys(keys) => Some(keys.as_slice()),
            _ => None,
        }
    }

    pub fn modifiers(&self, name: &str) -> Option<Modifiers> {
        match self.get(name)? {
            Value::Modifiers(m) => Some(*m),
            _ => None,
        }
    }
}

//--- Trait Implementations -----------------------------------------------

/// Equal when codes match and both carry the same set of field names.
impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.fields.keys().eq(other.fields.keys())
    }
}

impl Eq for Event {}

/// Hashes the code and the field names (sorted), never the values.
impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
        for name in self.fields.keys() {
            name.hash(state);
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:04x}) {{", self.code_name(), self.code)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}: {}", name, value)?;
        }
        write!(f, " }}")
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    //--- Utility: compute hash -------------------------------------------
    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn motion(x: i32, y: i32) -> Event {
        Event::new(codes::MOUSE_MOTION).with("pos", (x, y)).with("rel", (0, 0))
    }

    //=====================================================================
    // Equality & Hashing
    //=====================================================================

    #[test]
    fn equal_when_code_and_names_match_regardless_of_values() {
        assert_eq!(motion(1, 2), motion(300, 400));
        assert_eq!(hash_of(&motion(1, 2)), hash_of(&motion(300, 400)));
    }

    #[test]
    fn differs_when_field_names_differ() {
        let a = Event::new(codes::MOUSE_MOTION).with("pos", (1, 1));
        let b = motion(1, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn differs_when_codes_differ() {
        let down = Event::new(codes::KEY_DOWN).with("key", KeyCode::KeyA);
        let up = Event::new(codes::KEY_UP).with("key", KeyCode::KeyA);
        assert_ne!(down, up);
        assert_ne!(hash_of(&down), hash_of(&up));
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a = Event::new(codes::JOY_HAT_MOTION).with("hat", 0).with("value", (1, 0));
        let b = Event::new(codes::JOY_HAT_MOTION).with("value", (0, -1)).with("hat", 3);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn hashset_coalesces_same_shape() {
        let mut set = HashSet::new();
        set.insert(motion(10, 10));
        set.replace(motion(20, 30));

        assert_eq!(set.len(), 1, "Same-shaped events should coalesce");
        let kept = set.iter().next().unwrap();
        assert_eq!(kept.pair("pos"), Some((20, 30)), "Latest event should win");
    }

    //=====================================================================
    // Accessors
    //=====================================================================

    #[test]
    fn typed_accessors_check_type() {
        let event = Event::new(codes::KEY_DOWN)
            .with("key", KeyCode::Space)
            .with("mod", Modifiers::SHIFT)
            .with("repeat", false)
            .with("scancode", 44);

        assert_eq!(event.key("key"), Some(KeyCode::Space));
        assert_eq!(event.modifiers("mod"), Some(Modifiers::SHIFT));
        assert_eq!(event.flag("repeat"), Some(false));
        assert_eq!(event.int("scancode"), Some(44));
        assert_eq!(event.int("key"), None);
        assert_eq!(event.text("missing"), None);
    }

    #[test]
    fn float_widens_integers() {
        let event = Event::new(codes::FPS_EVENT).with("fps", 60);
        assert_eq!(event.float("fps"), Some(60.0));
    }

    #[test]
    fn insert_replaces_and_returns_previous() {
        let mut event = Event::new(codes::USER_EVENT).with("n", 1);
        let previous = event.insert("n", 2);
        assert_eq!(previous, Some(Value::Int(1)));
        assert_eq!(event.int("n"), Some(2));
    }

    #[test]
    fn field_names_are_sorted() {
        let event = Event::new(codes::USER_EVENT).with("b", 1).with("a", 2);
        let names: Vec<_> = event.field_names().collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn display_includes_name_and_fields() {
        let event = Event::new(codes::JOY_AXIS_MOTION).with("axis", 1).with("value", 0.5);
        let text = event.to_string();
        assert!(text.starts_with("JOY_AXIS_MOTION(0x0600)"));
        assert!(text.contains("axis: 1"));
        assert!(text.contains("value: 0.5"));
    }
}
