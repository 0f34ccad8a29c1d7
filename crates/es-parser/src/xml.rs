use std::collections::BTreeMap;

use es_core::{EndscriptError, ErrorKind};
use roxmltree::{Document, Node, NodeType};

/// Element tree of an opaque-dialect description. The resolver never builds
/// one; hosts that render the description as a menu call
/// [`parse_description`] on the captured text.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionElement {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<DescriptionNode>,
    /// 1-based line of the opening tag.
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DescriptionNode {
    Element(DescriptionElement),
    Text(String),
}

impl DescriptionElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn elements(&self) -> impl Iterator<Item = &DescriptionElement> {
        self.children.iter().filter_map(|child| match child {
            DescriptionNode::Element(element) => Some(element),
            DescriptionNode::Text(_) => None,
        })
    }

    /// Concatenated text children, trimmed.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            if let DescriptionNode::Text(value) = child {
                text.push_str(value);
            }
        }
        text.trim().to_string()
    }
}

pub fn parse_description(source: &str) -> Result<DescriptionElement, EndscriptError> {
    let document = Document::parse(source)
        .map_err(|error| ErrorKind::DescriptionFormat(error.to_string()))?;

    let Some(root) = document.root().children().find(|node| node.is_element()) else {
        return Err(ErrorKind::DescriptionFormat(
            "description must contain a root element".to_string(),
        )
        .into());
    };

    Ok(parse_element(&document, root))
}

fn parse_element(document: &Document<'_>, node: Node<'_, '_>) -> DescriptionElement {
    let attributes = node
        .attributes()
        .map(|attribute| (attribute.name().to_string(), attribute.value().to_string()))
        .collect();

    let mut children = Vec::new();
    for child in node.children() {
        match child.node_type() {
            NodeType::Element => {
                children.push(DescriptionNode::Element(parse_element(document, child)))
            }
            NodeType::Text => {
                let value = child.text().unwrap_or_default();
                if value.trim().is_empty() {
                    continue;
                }
                children.push(DescriptionNode::Text(value.to_string()));
            }
            _ => {}
        }
    }

    DescriptionElement {
        name: node.tag_name().name().to_string(),
        attributes,
        children,
        line: document.text_pos_at(node.range().start).row,
    }
}
