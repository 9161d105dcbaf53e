//! Conversion of an XML document into a [`Dictionary`] tree.
//!
//! Each element becomes a dictionary holding:
//! - `@<attr>` for every attribute (by local name, so `xml:lang` is `@lang`)
//! - `@namespace` for the element's namespace URI, when it has one
//! - `#text` for non-blank text content
//! - one key per child tag name, whose value is a dictionary for a single
//!   child and a list of dictionaries for repeated children
//!
//! Text of `name`, `description`, `author` and `license` includes nested
//! elements and is wrapped in Unicode embedding marks when a `dir` is in
//! effect. Selected elements and attributes have their whitespace
//! collapsed; all other text is trimmed.

use std::collections::BTreeMap;

use roxmltree::{Document, Node};

use super::utils::{
    child_elements, collapse_whitespace, get_direct_text, get_namespace, get_node_text,
    get_tag_name, is_element_support_span_and_dir, is_prop_support_dir,
    is_trim_required_for_prop, node_direction, TextDirection,
};
use crate::error::Result;
use crate::values::{Dictionary, Value};

/// Key under which the loader stores element text.
pub const TEXT_KEY: &str = "#text";

/// Key under which the loader stores the element namespace URI.
pub const NAMESPACE_KEY: &str = "@namespace";

/// Parse an XML document into `{ <root tag>: <root element dictionary> }`.
///
/// # Errors
/// Returns `ManifestError::XmlParse` if the document is not well-formed.
///
/// # Examples
/// ```
/// use manifest_parser::xml::load_xml_document;
///
/// let dict = load_xml_document(
///     r#"<widget xmlns="http://www.w3.org/ns/widgets"><icon src="a.png"/><icon src="b.png"/></widget>"#,
/// )
/// .unwrap();
/// assert_eq!(
///     dict.get_string("widget.@namespace"),
///     Some("http://www.w3.org/ns/widgets")
/// );
/// assert_eq!(dict.get_list("widget.icon").map(|icons| icons.len()), Some(2));
/// ```
pub fn load_xml_document(xml: &str) -> Result<Dictionary> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let mut dict = Dictionary::new();
    dict.insert_without_path_expansion(get_tag_name(root), load_xml_node(root, None));
    Ok(dict)
}

/// Convert one element (and its subtree) into a dictionary.
pub fn load_xml_node(node: Node<'_, '_>, inherited: Option<TextDirection>) -> Dictionary {
    let tag = get_tag_name(node);
    let direction = node_direction(node, inherited);
    let mut dict = Dictionary::new();

    for attribute in node.attributes() {
        let name = attribute.name();
        let mut value = attribute.value().to_string();
        if is_trim_required_for_prop(tag, name) {
            value = collapse_whitespace(&value);
        }
        if let Some(direction) = direction.filter(|_| is_prop_support_dir(tag, name)) {
            value = direction.wrap(&value);
        }
        dict.insert_without_path_expansion(format!("@{name}"), value);
    }

    if let Some(namespace) = get_namespace(node) {
        dict.insert_without_path_expansion(NAMESPACE_KEY, namespace);
    }

    let text = if is_element_support_span_and_dir(tag) {
        get_node_text(node, inherited)
    } else {
        get_direct_text(node).trim().to_string()
    };
    if !text.is_empty() {
        dict.insert_without_path_expansion(TEXT_KEY, text);
    }

    let mut children: BTreeMap<&str, Vec<Value>> = BTreeMap::new();
    for child in child_elements(node) {
        children
            .entry(get_tag_name(child))
            .or_default()
            .push(Value::Dictionary(load_xml_node(child, direction)));
    }
    for (name, mut values) in children {
        let value = if values.len() == 1 {
            values.pop().unwrap_or_default()
        } else {
            Value::List(values)
        };
        dict.insert_without_path_expansion(name, value);
    }

    dict
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LRE: char = '\u{202A}';
    const RLE: char = '\u{202B}';
    const PDF: char = '\u{202C}';

    #[test]
    fn test_directions_are_applied_to_flagged_text() {
        let dict = load_xml_document(
            r#"<root><widget dir="ltr"><name short="SA">Some app</name><description>Desc</description><author dir="rtl">enoemoS</author></widget></root>"#,
        )
        .unwrap();

        assert_eq!(dict.get_string("root.widget.@dir"), Some("ltr"));
        assert_eq!(
            dict.get_string("root.widget.name.@short"),
            Some(format!("{LRE}SA{PDF}").as_str())
        );
        assert_eq!(
            dict.get_string("root.widget.name.#text"),
            Some(format!("{LRE}Some app{PDF}").as_str())
        );
        assert_eq!(
            dict.get_string("root.widget.description.#text"),
            Some(format!("{LRE}Desc{PDF}").as_str())
        );
        assert_eq!(dict.get_string("root.widget.author.@dir"), Some("rtl"));
        assert_eq!(
            dict.get_string("root.widget.author.#text"),
            Some(format!("{RLE}enoemoS{PDF}").as_str())
        );
    }

    #[test]
    fn test_namespaces_and_repeated_children() {
        let dict = load_xml_document(
            r#"<widget xmlns="http://www.w3.org/ns/widgets" xmlns:tizen="http://tizen.org/ns/widgets">
                 <content src="index.html"/>
                 <tizen:content src="http://example.com/"/>
                 <tizen:application id="abcdefghij.app"/>
               </widget>"#,
        )
        .unwrap();

        let contents = dict.get_list("widget.content").unwrap();
        assert_eq!(contents.len(), 2);
        assert_eq!(
            contents[0].as_dictionary().unwrap().get_string("@namespace"),
            Some("http://www.w3.org/ns/widgets")
        );
        assert_eq!(
            contents[1].as_dictionary().unwrap().get_string("@namespace"),
            Some("http://tizen.org/ns/widgets")
        );
        assert_eq!(
            dict.get_string("widget.application.@id"),
            Some("abcdefghij.app")
        );
    }

    #[test]
    fn test_xml_lang_uses_local_name() {
        let dict = load_xml_document(
            r#"<widget><description xml:lang="en-US">Text</description></widget>"#,
        )
        .unwrap();
        assert_eq!(dict.get_string("widget.description.@lang"), Some("en-US"));
        assert_eq!(dict.get_string("widget.description.#text"), Some("Text"));
    }

    #[test]
    fn test_whitespace_policies() {
        let dict = load_xml_document(
            r#"<widget id="  http://example.com/  app " version=" 1.0 "><name>  Some
                 app  </name><description>  keep   inner  </description><metadata key=" k "/></widget>"#,
        )
        .unwrap();

        assert_eq!(dict.get_string("widget.@id"), Some("http://example.com/ app"));
        assert_eq!(dict.get_string("widget.@version"), Some("1.0"));
        assert_eq!(dict.get_string("widget.name.#text"), Some("Some app"));
        assert_eq!(
            dict.get_string("widget.description.#text"),
            Some("keep   inner")
        );
        assert_eq!(dict.get_string("widget.metadata.@key"), Some(" k "));
    }

    #[test]
    fn test_blank_text_is_omitted() {
        let dict = load_xml_document("<widget>\n  <icon src=\"a.png\"/>\n</widget>").unwrap();
        assert!(!dict.has_path("widget.#text"));
        assert!(!dict.has_path("widget.icon.#text"));
    }

    #[test]
    fn test_malformed_xml() {
        let err = load_xml_document("<widget>").unwrap_err();
        assert!(err.to_string().starts_with("XML parsing failed"));
    }
}
