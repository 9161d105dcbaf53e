//! XML utility functions for navigating nodes and extracting their text.

use roxmltree::Node;

/// Elements whose text may contain `span` children and honours `dir`.
const SPAN_AND_DIR_ELEMENTS: &[&str] = &["name", "description", "author", "license"];

/// Elements whose text has its whitespace collapsed.
const TRIMMED_ELEMENTS: &[&str] = &["name", "author"];

/// `(element, attribute)` pairs whose value honours `dir`.
const DIR_ATTRIBUTES: &[(&str, &str)] = &[("widget", "version"), ("name", "short")];

/// `(element, attribute)` pairs whose value has its whitespace collapsed.
const TRIMMED_ATTRIBUTES: &[(&str, &str)] = &[
    ("widget", "id"),
    ("widget", "version"),
    ("widget", "defaultlocale"),
    ("name", "short"),
    ("author", "email"),
    ("author", "href"),
    ("license", "href"),
    ("icon", "path"),
];

const POP_DIRECTIONAL_FORMATTING: char = '\u{202C}';

/// Value of a `dir` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
    Lro,
    Rlo,
}

impl TextDirection {
    /// Parse a `dir` attribute value; unknown values are ignored.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ltr" => Some(Self::Ltr),
            "rtl" => Some(Self::Rtl),
            "lro" => Some(Self::Lro),
            "rlo" => Some(Self::Rlo),
            _ => None,
        }
    }

    /// Unicode control character opening an embedding in this direction.
    #[must_use]
    pub fn opening_mark(self) -> char {
        match self {
            Self::Ltr => '\u{202A}',
            Self::Rtl => '\u{202B}',
            Self::Lro => '\u{202D}',
            Self::Rlo => '\u{202E}',
        }
    }

    /// Wrap `text` in this direction's embedding marks.
    #[must_use]
    pub fn wrap(self, text: &str) -> String {
        let mut wrapped = String::with_capacity(text.len() + 6);
        wrapped.push(self.opening_mark());
        wrapped.push_str(text);
        wrapped.push(POP_DIRECTIONAL_FORMATTING);
        wrapped
    }
}

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use manifest_parser::xml::get_tag_name;
///
/// let xml = r#"<widget xmlns:tizen="http://tizen.org/ns/widgets"><tizen:application/></widget>"#;
/// let doc = Document::parse(xml).unwrap();
/// let application = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(application), "application");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Resolved namespace URI of an element, if any.
pub fn get_namespace<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.tag_name().namespace()
}

/// Iterate over the child elements of a node.
pub fn child_elements<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

/// Direction in effect for `node`: its own valid `dir`, else `inherited`.
pub fn node_direction(node: Node<'_, '_>, inherited: Option<TextDirection>) -> Option<TextDirection> {
    node.attribute("dir")
        .and_then(TextDirection::parse)
        .or(inherited)
}

/// Text of `node` including the text of nested elements.
///
/// Each element contributes its trimmed content wrapped in the embedding
/// marks of the direction in effect for it. Without any direction in effect
/// the text is returned unwrapped.
pub fn get_node_text(node: Node<'_, '_>, inherited: Option<TextDirection>) -> String {
    let direction = node_direction(node, inherited);
    let mut content = String::new();
    for child in node.children() {
        if child.is_text() {
            content.push_str(child.text().unwrap_or_default());
        } else if child.is_element() {
            content.push_str(&get_node_text(child, direction));
        }
    }

    content = if is_trim_required_for_element(get_tag_name(node)) {
        collapse_whitespace(&content)
    } else {
        content.trim().to_string()
    };

    match direction {
        Some(direction) if !content.is_empty() => direction.wrap(&content),
        _ => content,
    }
}

/// Concatenated direct text children of `node`, without nested elements.
pub fn get_direct_text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|child| child.text())
        .collect()
}

#[must_use]
pub fn is_element_support_span_and_dir(element: &str) -> bool {
    SPAN_AND_DIR_ELEMENTS.contains(&element)
}

#[must_use]
pub fn is_trim_required_for_element(element: &str) -> bool {
    TRIMMED_ELEMENTS.contains(&element)
}

#[must_use]
pub fn is_prop_support_dir(element: &str, attribute: &str) -> bool {
    DIR_ATTRIBUTES.contains(&(element, attribute))
}

#[must_use]
pub fn is_trim_required_for_prop(element: &str, attribute: &str) -> bool {
    TRIMMED_ATTRIBUTES.contains(&(element, attribute))
}

/// Strip leading and trailing whitespace and fold inner runs into one space.
///
/// # Examples
/// ```
/// use manifest_parser::xml::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  Some \n\t app "), "Some app");
/// ```
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
