use crate::outcome::OperationOutcome;
use crate::query::ResourceType;
use crate::xml::{Element, FhirDocument};

/// FHIR Bundle view over a parsed search response (first page only)
#[derive(Debug, Clone, Copy)]
pub struct Bundle<'a> {
    root: &'a Element,
}

impl<'a> Bundle<'a> {
    pub fn new(document: &'a FhirDocument) -> Self {
        let root = document.root();
        if !root.is("Bundle") {
            tracing::warn!(root = root.name(), "Search response is not a Bundle");
        }
        Self { root }
    }

    /// Top-level `entry` elements
    pub fn entries(&self) -> impl Iterator<Item = &'a Element> + use<'a> {
        let root = self.root;
        root.is("Bundle")
            .then(|| root.children_named("entry"))
            .into_iter()
            .flatten()
    }

    /// Resources of `resource_type` carried in `entry/resource`, in bundle order
    pub fn resources(&self, resource_type: ResourceType) -> impl Iterator<Item = &'a Element> + use<'a> {
        self.entries()
            .filter_map(|entry| entry.child("resource"))
            .filter_map(move |resource| resource.child(resource_type.as_str()))
    }

    /// Declared `total`, if the server sent one
    pub fn total(&self) -> Option<u32> {
        self.root
            .child("total")
            .and_then(Element::primitive_value)
            .and_then(|v| v.parse().ok())
    }

    /// URL of the `next` page link
    pub fn next_link(&self) -> Option<&'a str> {
        self.root
            .children_named("link")
            .find(|link| {
                link.child("relation").and_then(Element::primitive_value) == Some("next")
            })
            .and_then(|link| link.child("url"))
            .and_then(Element::primitive_value)
    }

    /// OperationOutcome resources the server embedded alongside the results
    pub fn outcomes(&self) -> impl Iterator<Item = OperationOutcome> + use<'a> {
        self.entries()
            .filter_map(|entry| entry.child("resource"))
            .filter_map(|resource| resource.child("OperationOutcome"))
            .map(OperationOutcome::from_element)
    }

    /// Log embedded outcomes and any pages that will not be read
    pub fn report(&self, resource_type: ResourceType) {
        for outcome in self.outcomes() {
            outcome.log(resource_type);
        }
        if let Some(next) = self.next_link() {
            tracing::debug!(
                resource = %resource_type,
                total = ?self.total(),
                next,
                "Bundle has further pages; only the first page is read"
            );
        }
    }
}
