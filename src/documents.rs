//! XML element trees
//!
//! [`Element`] is the node representation components are parsed from and
//! rendered back into. Documents are parsed with roxmltree and written with
//! quick-xml; the component layer only needs the qualified name, attribute
//! lookup, child enumeration and text content.

use crate::error::{Error, Result};
use crate::namespaces::{NamespaceContext, QName, XML_NAMESPACE};
use indexmap::IndexMap;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

fn lookup_prefix(node: &roxmltree::Node<'_, '_>, namespace: &str) -> Option<String> {
    node.lookup_prefix(namespace)
        .filter(|prefix| !prefix.is_empty())
        .map(str::to_string)
}

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element qualified name
    pub qname: QName,
    /// Element attributes, in document order
    pub attributes: IndexMap<QName, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Adapt a node of a roxmltree document
    pub fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let tag = node.tag_name();
        let mut qname = QName::new(tag.namespace(), tag.name());
        if let Some(ns) = tag.namespace() {
            qname.prefix = lookup_prefix(&node, ns);
        }

        let mut element = Element::new(qname);
        for attr in node.attributes() {
            let mut attr_qname = QName::new(attr.namespace(), attr.name());
            if let Some(ns) = attr.namespace() {
                attr_qname.prefix = lookup_prefix(&node, ns);
            }
            element.attributes.insert(attr_qname, attr.value().to_string());
        }

        let text: String = node
            .children()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect();
        if !text.trim().is_empty() {
            element.text = Some(text);
        }

        element.children = node
            .children()
            .filter(|n| n.is_element())
            .map(Element::from_node)
            .collect();
        element
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.qname.local_name
    }

    /// Get the namespace of the element
    pub fn namespace(&self) -> Option<&str> {
        self.qname.namespace.as_deref()
    }

    /// Get an un-namespaced attribute value by local name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(qname, _)| qname.namespace.is_none() && qname.local_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// Get a namespaced attribute value
    pub fn get_attribute_ns(&self, namespace: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(qname, _)| qname.matches(namespace, name))
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attribute(&mut self, qname: QName, value: impl Into<String>) {
        self.attributes.insert(qname, value.into());
    }

    /// Set an attribute if the value is present and not blank
    pub fn set_optional_attribute(&mut self, qname: QName, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.set_attribute(qname, value);
        }
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Set text content
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Text content, or the empty string
    pub fn text_content(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Child elements with the given namespace and local name
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |e| e.qname.matches(namespace, local_name))
    }

    /// Collect the prefix declarations this tree needs
    pub fn namespace_declarations(&self) -> Result<NamespaceContext> {
        let mut ctx = NamespaceContext::new();
        self.collect_declarations(&mut ctx)?;
        Ok(ctx)
    }

    fn collect_declarations(&self, ctx: &mut NamespaceContext) -> Result<()> {
        match (&self.qname.prefix, &self.qname.namespace) {
            (Some(prefix), Some(ns)) => ctx.add_prefix(prefix.clone(), ns.clone())?,
            (None, Some(ns)) => ctx.set_default_namespace(ns.clone()),
            _ => {}
        }
        for attr in self.attributes.keys() {
            if let (Some(prefix), Some(ns)) = (&attr.prefix, &attr.namespace) {
                if ns != XML_NAMESPACE {
                    ctx.add_prefix(prefix.clone(), ns.clone())?;
                }
            }
        }
        for child in &self.children {
            child.collect_declarations(ctx)?;
        }
        Ok(())
    }

    /// Serialize this element as a standalone XML fragment, declaring every
    /// namespace the tree uses on the outermost element
    pub fn to_xml_string(&self, indent: Option<usize>) -> Result<String> {
        let declarations = self.namespace_declarations()?;
        let mut writer = match indent {
            Some(size) => Writer::new_with_indent(Vec::new(), b' ', size),
            None => Writer::new(Vec::new()),
        };
        self.write(&mut writer, Some(&declarations))?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| Error::Xml(format!("Serialized XML is not UTF-8: {}", e)))
    }

    fn write(&self, writer: &mut Writer<Vec<u8>>, declarations: Option<&NamespaceContext>) -> Result<()> {
        let name = self.qname.qualified();
        let mut start = BytesStart::new(name.as_str());

        if let Some(ctx) = declarations {
            if let Some(default_ns) = ctx.get_default_namespace() {
                start.push_attribute(("xmlns", default_ns));
            }
            for (prefix, ns) in ctx.iter() {
                let key = format!("xmlns:{}", prefix);
                start.push_attribute((key.as_str(), ns));
            }
        }
        for (qname, value) in &self.attributes {
            let key = qname.qualified();
            start.push_attribute((key.as_str(), value.as_str()));
        }

        let xml_err = |e: quick_xml::Error| Error::Xml(format!("Failed to write element '{}': {}", name, e));

        if self.text.is_none() && self.children.is_empty() {
            writer.write_event(Event::Empty(start)).map_err(xml_err)?;
            return Ok(());
        }

        writer.write_event(Event::Start(start)).map_err(xml_err)?;
        if let Some(text) = &self.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(xml_err)?;
        }
        for child in &self.children {
            child.write(writer, None)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(name.as_str())))
            .map_err(xml_err)?;
        Ok(())
    }
}

/// XML Document representation
#[derive(Debug, Default)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)
            .map_err(|e| Error::Xml(format!("Error parsing XML: {}", e)))?;
        Ok(Self {
            root: Some(Element::from_node(doc.root_element())),
        })
    }

    /// Parse an XML document from a file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let xml = std::fs::read_to_string(path)?;
        Self::from_string(&xml)
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Take the root element out of the document
    pub fn into_root(self) -> Result<Element> {
        self.root
            .ok_or_else(|| Error::Xml("Document has no root element".to_string()))
    }
}
