//! Inline hyperlink reconstruction
//!
//! Concatenating run text loses hyperlinks, so a paragraph is rebuilt from its ordered
//! children instead:
//!
//! ```xml
//! <p>
//!     Some text
//!     <a href="http://some.link">link display text</a>
//!     tail text
//!     <a href="http://another.link">following display text</a>
//!     tail text
//! </p>
//! ```
//!
//! Text before the first link is the paragraph's own text; text after a link is that
//! link's tail, up to the next link.

use crate::document::{Inline, Paragraph};
use crate::error::ConvertError;

use super::links::{LinkResolver, LinkStyle};
use super::tree::{NodeId, XmlTree};

/// Append `paragraph` as a `<p>` under `parent`, interleaving text and `<a>` elements
pub fn append_paragraph(
    tree: &mut XmlTree,
    parent: NodeId,
    paragraph: &Paragraph,
    links: &LinkResolver,
    style: LinkStyle,
) -> Result<NodeId, ConvertError> {
    let content = tree.append(parent, "p");
    let mut last_link: Option<NodeId> = None;

    for child in &paragraph.children {
        match child {
            Inline::Run(text) => {
                let holder = match last_link {
                    Some(link) => &mut tree.get_mut(link).tail,
                    None => &mut tree.get_mut(content).text,
                };
                holder.push_str(text);
            }
            Inline::Hyperlink(link) => {
                let href = links.href(&link.target, style)?;
                let anchor = tree.append_text(content, "a", link.text());
                tree.set_attribute(anchor, "href", href);
                last_link = Some(anchor);
            }
        }
    }

    Ok(content)
}
