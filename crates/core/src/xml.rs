//! Namespace-aware field extraction over FHIR XML
//!
//! Responses are read once into a small element tree. Every lookup only
//! matches elements bound to [`FHIR_NAMESPACE`]; anything else in the
//! document (XHTML narrative, foreign extensions) is invisible to paths.

use quick_xml::NsReader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use crate::error::SummaryError;

/// Namespace every FHIR element lives under
pub const FHIR_NAMESPACE: &str = "http://hl7.org/fhir";

/// A single XML element with its attributes and children
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    in_fhir_namespace: bool,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Local name of the element, without prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if this is the FHIR element `name`
    pub fn is(&self, name: &str) -> bool {
        self.in_fhir_namespace && self.name == name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// FHIR children of this element, in document order
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter(|c| c.in_fhir_namespace)
    }

    /// FHIR children called `name`
    pub fn children_named<'n>(&self, name: &'n str) -> impl Iterator<Item = &Element> {
        self.children.iter().filter(move |c| c.is(name))
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children_named(name).next()
    }

    /// Value of a FHIR primitive: the `value` attribute, else trimmed text.
    /// Empty values count as absent.
    pub fn primitive_value(&self) -> Option<&str> {
        let value = match self.attribute("value") {
            Some(value) => value.trim(),
            None => self.text.trim(),
        };
        (!value.is_empty()).then_some(value)
    }

    /// All elements matching `path` (segments separated by `/`), in
    /// document order.
    ///
    /// The first segment matches any descendant, later segments match
    /// direct children.
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut found = Vec::new();
        if let Some((first, rest)) = segments.split_first() {
            self.collect_descendants(first, rest, &mut found);
        }
        found
    }

    /// First element matching `path`
    pub fn find(&self, path: &str) -> Option<&Element> {
        self.find_all(path).into_iter().next()
    }

    /// First non-empty primitive value among the elements matching `path`
    pub fn find_value(&self, path: &str) -> Option<String> {
        self.find_all(path)
            .into_iter()
            .find_map(Element::primitive_value)
            .map(str::to_string)
    }

    fn collect_descendants<'a>(&'a self, first: &str, rest: &[&str], found: &mut Vec<&'a Element>) {
        for child in self.children() {
            if child.name == first {
                child.collect_path(rest, found);
            }
            child.collect_descendants(first, rest, found);
        }
    }

    fn collect_path<'a>(&'a self, rest: &[&str], found: &mut Vec<&'a Element>) {
        match rest.split_first() {
            None => found.push(self),
            Some((next, rest)) => {
                for child in self.children_named(next) {
                    child.collect_path(rest, found);
                }
            }
        }
    }
}

/// A parsed FHIR response body
#[derive(Debug, Clone)]
pub struct FhirDocument {
    root: Element,
}

impl FhirDocument {
    /// Parse XML text. Malformed input is a [`SummaryError::Parse`].
    pub fn parse(xml: &str) -> Result<Self, SummaryError> {
        // Text is kept untrimmed: entity references arrive as separate events
        let mut reader = NsReader::from_str(xml);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let (namespace, event) = reader.read_resolved_event()?;
            match event {
                Event::Start(start) => {
                    ensure_single_root(&stack, root.as_ref())?;
                    stack.push(open_element(&namespace, &start)?);
                }
                Event::Empty(start) => {
                    ensure_single_root(&stack, root.as_ref())?;
                    let element = open_element(&namespace, &start)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        SummaryError::Parse("closing tag without matching open tag".into())
                    })?;
                    attach(&mut stack, &mut root, element);
                }
                Event::Text(text) => {
                    let raw = String::from_utf8_lossy(text.as_ref());
                    append_text(&mut stack, &unescape(&raw)?)?;
                }
                Event::GeneralRef(reference) => {
                    let entity = format!("&{};", String::from_utf8_lossy(reference.as_ref()));
                    append_text(&mut stack, &unescape(&entity)?)?;
                }
                Event::CData(data) => {
                    append_text(&mut stack, &String::from_utf8_lossy(data.as_ref()))?;
                }
                Event::Eof => break,
                Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(SummaryError::Parse(format!(
                "document ended inside <{}>",
                open.name
            )));
        }

        root.map(|root| Self { root })
            .ok_or_else(|| SummaryError::Parse("document has no root element".into()))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

fn open_element(namespace: &ResolveResult, start: &BytesStart) -> Result<Element, SummaryError> {
    let in_fhir_namespace = match namespace {
        ResolveResult::Bound(ns) => ns.as_ref() == FHIR_NAMESPACE.as_bytes(),
        _ => false,
    };

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_ref().starts_with(b"xmlns") {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        attributes.push((key, unescape(&raw)?.into_owned()));
    }

    Ok(Element {
        name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        in_fhir_namespace,
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

fn ensure_single_root(stack: &[Element], root: Option<&Element>) -> Result<(), SummaryError> {
    if stack.is_empty() && root.is_some() {
        return Err(SummaryError::Parse("multiple root elements".into()));
    }
    Ok(())
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn append_text(stack: &mut [Element], text: &str) -> Result<(), SummaryError> {
    match stack.last_mut() {
        Some(element) => {
            element.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(SummaryError::Parse("text outside the root element".into())),
    }
}
