//! XML loading and node utilities.

mod loader;
mod utils;

pub use loader::{load_xml_document, load_xml_node, NAMESPACE_KEY, TEXT_KEY};
pub use utils::{
    child_elements, collapse_whitespace, get_direct_text, get_namespace, get_node_text,
    get_tag_name, is_element_support_span_and_dir, is_prop_support_dir,
    is_trim_required_for_element, is_trim_required_for_prop, node_direction, TextDirection,
};
