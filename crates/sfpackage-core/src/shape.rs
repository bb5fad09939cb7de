use serde::{Deserialize, Serialize};

/// Path components that only exist because of the source-format folder
/// layout (`force-app/main/default/...`).
pub const NOISE_SEGMENTS: [&str; 2] = ["main", "default"];

/// Child folders of a parent component whose files are members in their own
/// right (`objects/Account/fields/Name__c.field-meta.xml`).
pub const DEFAULT_NESTED_PROPERTIES: [&str; 2] = ["fields", "validationRules"];

/// Set of nested property folder names that trigger the nested shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedProperties {
    names: Vec<String>,
}

impl Default for NestedProperties {
    fn default() -> Self {
        Self::new(DEFAULT_NESTED_PROPERTIES)
    }
}

impl NestedProperties {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self { names: Vec::new() };
        for name in names {
            set = set.with(name);
        }
        set
    }

    pub fn with(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.contains(&name) {
            self.names.push(name);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Type and member a changed file contributes to a manifest
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberKey {
    pub type_name: String,
    pub member_id: String,
}

/// Layout of a path below the source root once noise segments are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathShape<'a> {
    /// `root/type/leaf`, also used for deeper paths that match no other shape
    Flat { type_folder: &'a str, leaf: &'a str },
    /// `root/type/folder/leaf`, e.g. email templates inside a folder
    Grouped {
        type_folder: &'a str,
        folder: &'a str,
        leaf: &'a str,
    },
    /// `root/type/parent/property/leaf`, e.g. a field of an object
    Nested {
        parent: &'a str,
        property: &'a str,
        leaf: &'a str,
    },
}

impl<'a> PathShape<'a> {
    /// Decompose the part of a path that follows `root/`.
    ///
    /// Returns `None` when fewer than two segments survive noise removal,
    /// i.e. there is no type folder and leaf to work with.
    pub fn parse(relative: &'a str, nested: &NestedProperties) -> Option<Self> {
        let segments: Vec<&'a str> = relative
            .split('/')
            .filter(|segment| !NOISE_SEGMENTS.contains(segment))
            .collect();

        match segments[..] {
            [type_folder, folder, leaf] => Some(Self::Grouped {
                type_folder,
                folder,
                leaf,
            }),
            [_, parent, property, leaf] if nested.contains(property) => Some(Self::Nested {
                parent,
                property,
                leaf,
            }),
            [type_folder, leaf, ..] => Some(Self::Flat { type_folder, leaf }),
            _ => None,
        }
    }

    pub fn member_key(&self) -> MemberKey {
        match *self {
            Self::Flat { type_folder, leaf } => {
                let stem = file_stem(leaf);
                MemberKey {
                    type_name: type_folder.to_string(),
                    member_id: stem.strip_suffix("-meta").unwrap_or(stem).to_string(),
                }
            }
            Self::Grouped {
                type_folder,
                folder,
                leaf,
            } => MemberKey {
                type_name: type_folder.to_string(),
                member_id: format!("{}/{}", folder, file_stem(leaf)),
            },
            Self::Nested {
                parent,
                property,
                leaf,
            } => MemberKey {
                type_name: property.to_string(),
                member_id: format!("{}.{}", parent, file_stem(leaf)),
            },
        }
    }
}

/// Everything before the first dot. Metadata files carry compound
/// extensions such as `.field-meta.xml`.
fn file_stem(name: &str) -> &str {
    name.split_once('.').map_or(name, |(stem, _)| stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(relative: &str) -> MemberKey {
        PathShape::parse(relative, &NestedProperties::default())
            .unwrap()
            .member_key()
    }

    #[test]
    fn test_flat_shape_strips_noise() {
        let shape = PathShape::parse("main/default/classes/Foo.cls", &NestedProperties::default());
        assert_eq!(
            shape,
            Some(PathShape::Flat {
                type_folder: "classes",
                leaf: "Foo.cls"
            })
        );
        assert_eq!(key("main/default/classes/Foo.cls").member_id, "Foo");
    }

    #[test]
    fn test_flat_shape_strips_meta_suffix() {
        let k = key("email/Folder1-meta.xml");
        assert_eq!(k.type_name, "email");
        assert_eq!(k.member_id, "Folder1");
    }

    #[test]
    fn test_grouped_shape() {
        let k = key("main/default/email/Folder1/Welcome.email-meta.xml");
        assert_eq!(k.type_name, "email");
        assert_eq!(k.member_id, "Folder1/Welcome");
    }

    #[test]
    fn test_nested_shape_uses_property_as_type() {
        let k = key("objects/Account/validationRules/Has_Name.validationRule-meta.xml");
        assert_eq!(k.type_name, "validationRules");
        assert_eq!(k.member_id, "Account.Has_Name");
    }

    #[test]
    fn test_unknown_nested_property_falls_back_to_parent() {
        let k = key("objects/Account/listViews/All.listView-meta.xml");
        assert_eq!(k.type_name, "objects");
        assert_eq!(k.member_id, "Account");
    }

    #[test]
    fn test_extended_nested_properties() {
        let nested = NestedProperties::default().with("listViews");
        let k = PathShape::parse("objects/Account/listViews/All.listView-meta.xml", &nested)
            .unwrap()
            .member_key();
        assert_eq!(k.type_name, "listViews");
        assert_eq!(k.member_id, "Account.All");
    }

    #[test]
    fn test_too_few_segments() {
        let nested = NestedProperties::default();
        assert!(PathShape::parse("main/default/classes", &nested).is_none());
        assert!(PathShape::parse("README.md", &nested).is_none());
    }

    #[test]
    fn test_nested_properties_dedupe() {
        let nested = NestedProperties::new(["fields", "fields", "recordTypes"]);
        assert_eq!(nested.names().len(), 2);
        assert!(nested.contains("recordTypes"));
    }
}
