/// Upper bound on stored pairs per record. Pairs past it are dropped.
pub const MAX_ATTRIBUTES: usize = 32;

/// Upper bound on key and value length, in characters. Longer content is
/// truncated.
pub const MAX_FIELD_CHARS: usize = 255;

/// Read access to request attributes, keyed by exact match.
///
/// Absent and empty attributes are indistinguishable on purpose: [`value`]
/// returns `""` for a missing key, so every policy rule sees a string and
/// none can fail on lookup.
///
/// [`value`]: AttributeSource::value
pub trait AttributeSource {
    /// Returns the value for `key`, or `""` when no such attribute exists.
    fn value(&self, key: &str) -> &str;
}

/// An ordered, bounded collection of string attribute pairs decoded from
/// one input line.
///
/// Capacity is a policy, not an error: insertion beyond [`MAX_ATTRIBUTES`]
/// silently drops the pair, and keys or values longer than
/// [`MAX_FIELD_CHARS`] characters are silently truncated on a character
/// boundary.
#[derive(Debug, Default)]
pub struct AttributeRecord {
    entries: Vec<(String, String)>,
}

impl AttributeRecord {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_ATTRIBUTES),
        }
    }

    /// Inserts a pair, applying the truncate and drop capacity policy.
    pub fn push(&mut self, key: &str, value: &str) {
        if self.is_full() {
            return;
        }
        self.entries.push((
            truncate_chars(key, MAX_FIELD_CHARS).to_string(),
            truncate_chars(value, MAX_FIELD_CHARS).to_string(),
        ));
    }

    /// First match in insertion order. Duplicate keys after the first are
    /// stored but unreachable here.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == MAX_ATTRIBUTES
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl AttributeSource for AttributeRecord {
    fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }
}

/// Lets a fixed pair slice stand in for a decoded record, mostly in tests
/// and demos.
impl<'a> AttributeSource for [(&'a str, &'a str)] {
    fn value(&self, key: &str) -> &str {
        self.iter()
            .find(|(k, _)| *k == key)
            .map_or("", |(_, v)| *v)
    }
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
