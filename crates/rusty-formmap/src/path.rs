// File: src/path.rs
// Purpose: Dotted/indexed field paths shared by the walker, overrides and error lookup

use std::fmt;

/// Path of a named field under `parent` (`name` at the root, `parent.name` below it)
pub fn field(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

/// Path of a sequence element: `parent[index]`
pub fn index(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Index(usize),
}

/// An owned field path such as `items[2].price`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, name: &str) -> Self {
        Self(field(&self.0, name))
    }

    pub fn index(&self, i: usize) -> Self {
        Self(index(&self.0, i))
    }

    /// Split the path back into its segments.
    ///
    /// Bracket contents that are not numbers are kept as field segments.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::new();

        for part in self.0.split('.').filter(|p| !p.is_empty()) {
            let mut rest = part;
            if let Some(open) = rest.find('[') {
                if open > 0 {
                    segments.push(Segment::Field(rest[..open].to_string()));
                }
                rest = &rest[open..];
                while let Some(stripped) = rest.strip_prefix('[') {
                    let Some(close) = stripped.find(']') else {
                        segments.push(Segment::Field(rest.to_string()));
                        break;
                    };
                    let inner = &stripped[..close];
                    match inner.parse::<usize>() {
                        Ok(i) => segments.push(Segment::Index(i)),
                        Err(_) => segments.push(Segment::Field(inner.to_string())),
                    }
                    rest = &stripped[close + 1..];
                }
            } else {
                segments.push(Segment::Field(rest.to_string()));
            }
        }

        segments
    }

    /// Name of the last named segment, e.g. `price` for `items[0].price`
    pub fn leaf_name(&self) -> Option<String> {
        self.segments().into_iter().rev().find_map(|segment| match segment {
            Segment::Field(name) => Some(name),
            Segment::Index(_) => None,
        })
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_join() {
        assert_eq!(field("", "name"), "name");
        assert_eq!(field("metadata", "version"), "metadata.version");
        assert_eq!(field(&index("items", 2), "price"), "items[2].price");
        assert_eq!(index(&index("matrix", 0), 1), "matrix[0][1]");
    }

    #[test]
    fn test_field_path_builder() {
        let path = FieldPath::root().field("items").index(2).field("price");
        assert_eq!(path.as_str(), "items[2].price");
        assert_eq!(path.to_string(), "items[2].price");
        assert!(FieldPath::root().is_root());
    }

    #[test]
    fn test_segments() {
        let path = FieldPath::from("order.items[2].tags[0]");
        assert_eq!(
            path.segments(),
            vec![
                Segment::Field("order".to_string()),
                Segment::Field("items".to_string()),
                Segment::Index(2),
                Segment::Field("tags".to_string()),
                Segment::Index(0),
            ]
        );
    }

    #[test]
    fn test_segments_keep_map_keys() {
        let path = FieldPath::from("labels[en].text");
        assert_eq!(
            path.segments(),
            vec![
                Segment::Field("labels".to_string()),
                Segment::Field("en".to_string()),
                Segment::Field("text".to_string()),
            ]
        );
    }

    #[test]
    fn test_leaf_name() {
        assert_eq!(FieldPath::from("items[0].price").leaf_name().as_deref(), Some("price"));
        assert_eq!(FieldPath::from("tags[3]").leaf_name().as_deref(), Some("tags"));
        assert_eq!(FieldPath::root().leaf_name(), None);
    }
}
