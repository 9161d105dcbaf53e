//! Helpers for telling same-named elements from different namespaces apart.

use crate::values::{Dictionary, Value};
use crate::xml::NAMESPACE_KEY;

/// Check whether an element dictionary belongs to `namespace`.
#[must_use]
pub fn verify_element_namespace(element: &Dictionary, namespace: &str) -> bool {
    element.get_string(NAMESPACE_KEY) == Some(namespace)
}

/// Collect the element dictionaries stored at `path`.
///
/// The loader stores a single element as a dictionary and repeated
/// elements as a list; both shapes are accepted here, in document order.
/// With a non-empty `namespace` only elements of that namespace are kept.
///
/// # Examples
/// ```
/// use manifest_parser::utils::get_one_or_many;
/// use manifest_parser::xml::load_xml_document;
///
/// let dict = load_xml_document(
///     r#"<widget xmlns="http://www.w3.org/ns/widgets" xmlns:tizen="http://tizen.org/ns/widgets">
///          <tizen:privilege name="a"/><privilege name="b"/><tizen:privilege name="c"/>
///        </widget>"#,
/// )
/// .unwrap();
///
/// let tizen = get_one_or_many(&dict, "widget.privilege", "http://tizen.org/ns/widgets");
/// assert_eq!(tizen.len(), 2);
/// assert_eq!(get_one_or_many(&dict, "widget.privilege", "").len(), 3);
/// ```
#[must_use]
pub fn get_one_or_many<'a>(root: &'a Dictionary, path: &str, namespace: &str) -> Vec<&'a Dictionary> {
    let matches = |element: &&Dictionary| {
        namespace.is_empty() || verify_element_namespace(element, namespace)
    };

    match root.get(path) {
        Some(Value::Dictionary(element)) => std::iter::once(element).filter(matches).collect(),
        Some(Value::List(items)) => items
            .iter()
            .filter_map(Value::as_dictionary)
            .filter(matches)
            .collect(),
        _ => Vec::new(),
    }
}
