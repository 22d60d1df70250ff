//! Constructor manifest.
//!
//! The manifest is a hand-curated list of the structs that receive an `add`
//! constructor, and of the calling convention each constructor follows.

/// Owner a constructed element is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentKind {
    /// Attached to the root specification.
    Spec,
    /// Attached to a body.
    Body {
        /// Takes a parent frame instead of a default class.
        parent_frame: bool,
    },
}

impl ParentKind {
    /// Parses a parent kind from its manifest name.
    #[must_use]
    pub fn parse(s: &str, parent_frame: bool) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spec" => Some(Self::Spec),
            "body" => Some(Self::Body { parent_frame }),
            _ => None,
        }
    }
}

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorEntry {
    /// Struct the constructor creates.
    pub name: String,
    /// Owner the new element is attached to.
    pub parent: ParentKind,
    /// Whether the constructor ends with an optional `default` argument.
    pub has_default: bool,
}

impl ConstructorEntry {
    /// Creates a new manifest entry.
    #[must_use]
    pub fn new(name: impl Into<String>, parent: ParentKind, has_default: bool) -> Self {
        Self {
            name: name.into(),
            parent,
            has_default,
        }
    }

    /// Entry attached to the root specification.
    #[must_use]
    pub fn spec(name: impl Into<String>, has_default: bool) -> Self {
        Self::new(name, ParentKind::Spec, has_default)
    }

    /// Entry attached to a body, taking a default class.
    #[must_use]
    pub fn body(name: impl Into<String>) -> Self {
        Self::new(
            name,
            ParentKind::Body {
                parent_frame: false,
            },
            true,
        )
    }
}

/// Ordered list of constructor entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorManifest {
    entries: Vec<ConstructorEntry>,
}

impl ConstructorManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the manifest matching the native `mjs_add*` API.
    #[must_use]
    pub fn standard() -> Self {
        let mut manifest = Self::new();
        for name in ["mjsSite", "mjsGeom", "mjsJoint", "mjsLight", "mjsCamera", "mjsBody"] {
            manifest.push(ConstructorEntry::body(name));
        }
        manifest.push(ConstructorEntry::new(
            "mjsFrame",
            ParentKind::Body { parent_frame: true },
            true,
        ));
        for name in [
            "mjsMaterial",
            "mjsMesh",
            "mjsPair",
            "mjsEquality",
            "mjsTendon",
            "mjsActuator",
        ] {
            manifest.push(ConstructorEntry::spec(name, true));
        }
        for name in [
            "mjsSkin",
            "mjsTexture",
            "mjsText",
            "mjsTuple",
            "mjsFlex",
            "mjsHField",
            "mjsKey",
            "mjsNumeric",
            "mjsExclude",
            "mjsSensor",
            "mjsPlugin",
        ] {
            manifest.push(ConstructorEntry::spec(name, false));
        }
        manifest
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: ConstructorEntry) {
        self.entries.push(entry);
    }

    /// Iterates the entries in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = &ConstructorEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the manifest has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ConstructorEntry> for ConstructorManifest {
    fn from_iter<I: IntoIterator<Item = ConstructorEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
