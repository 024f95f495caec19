use std::sync::Arc;

pub fn collection(name: impl Into<String>) -> CollectionReference {
    CollectionReference::new(name)
}

/// Path to a collection at the root of the database. Cheap to clone, so it
/// can be shared by concurrent writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReference(Arc<str>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReference {
    parent: CollectionReference,
    id: String,
}

impl CollectionReference {
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self(Arc::from(collection_name.into()))
    }

    pub fn doc(&self, id: impl Into<String>) -> DocumentReference {
        DocumentReference {
            parent: self.clone(),
            id: id.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl DocumentReference {
    pub fn parent(&self) -> &CollectionReference {
        &self.parent
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for CollectionReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.parent, self.id)
    }
}
