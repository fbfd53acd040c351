//! Tree building: one linear pass over the block items
//!
//! The builder keeps a single cursor pointing at the container that new content is
//! appended to. Headings open `title`/`section`/`subsection` containers, control
//! paragraphs open `control` elements, and everything else lands under the cursor.
//!
//! ```text
//! root
//! └── ism
//!     ├── metadata
//!     └── title*
//!         ├── titletext
//!         ├── control*
//!         └── section*
//!             ├── sectiontext
//!             ├── control*
//!             └── subsection*
//!                 ├── subsectiontext
//!                 └── control*  (p | bullet | table)*
//! ```

use crate::document::{Paragraph, SourceDocument};
use crate::error::ConvertError;

use super::catalog::Baselines;
use super::control::Control;
use super::hyperlink::append_paragraph;
use super::links::{LinkResolver, LinkStyle};
use super::metadata::DocumentMetadata;
use super::signal::{BlockSignal, HEADING_2, HEADING_3};
use super::table::append_table;
use super::tree::{NodeId, XmlTree};

pub const OSCAL_NAMESPACE: &str = "http://csrc.nist.gov/ns/oscal/1.0";

/// Options for a single conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub link_style: LinkStyle,
    /// Offset appended to the metadata `modified` timestamp
    pub utc_offset: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            link_style: LinkStyle::Plain,
            utc_offset: "+10:00".to_string(),
        }
    }
}

/// Result of a conversion: the element tree and the baseline catalog
#[derive(Debug, Clone)]
pub struct Conversion {
    pub tree: XmlTree,
    pub baselines: Baselines,
}

/// The current insertion point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Empty,
    /// An open title, section or subsection
    Open(NodeId),
    Control { node: NodeId, parent: NodeId },
}

impl Cursor {
    fn node(self) -> Option<NodeId> {
        match self {
            Cursor::Empty => None,
            Cursor::Open(node) | Cursor::Control { node, .. } => Some(node),
        }
    }

    /// The heading container, closing any open control
    fn container(self) -> Option<NodeId> {
        match self {
            Cursor::Empty => None,
            Cursor::Open(node) | Cursor::Control { parent: node, .. } => Some(node),
        }
    }
}

/// Convert a loaded document into its element tree and baseline catalog
pub fn convert(
    document: &SourceDocument,
    options: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    let links = LinkResolver::new(&document.relationships);
    let metadata = DocumentMetadata::from_modified(document.modified, &options.utc_offset);

    let mut builder = TreeBuilder::new(&metadata, &links, options.link_style);
    for block in &document.blocks {
        builder.push(BlockSignal::classify(block))?;
    }

    Ok(builder.finish())
}

pub struct TreeBuilder<'a> {
    tree: XmlTree,
    ism: NodeId,
    cursor: Cursor,
    /// Most recent title, and the most recent section within it
    title: Option<NodeId>,
    section: Option<NodeId>,
    baselines: Baselines,
    links: &'a LinkResolver,
    link_style: LinkStyle,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(metadata: &DocumentMetadata, links: &'a LinkResolver, link_style: LinkStyle) -> Self {
        let mut tree = XmlTree::new("root");
        let root = tree.root();
        tree.set_attribute(root, "xmlns", OSCAL_NAMESPACE);
        let ism = tree.append(root, "ism");
        metadata.append_to(&mut tree, ism);

        TreeBuilder {
            tree,
            ism,
            cursor: Cursor::Empty,
            title: None,
            section: None,
            baselines: Baselines::new(),
            links,
            link_style,
        }
    }

    pub fn push(&mut self, signal: BlockSignal<'_>) -> Result<(), ConvertError> {
        match signal {
            BlockSignal::Heading1(para) => {
                let title = self.open(self.ism, "title", "titletext", para);
                self.title = Some(title);
                self.section = None;
                self.cursor = Cursor::Open(title);
            }
            BlockSignal::Heading2(para) => {
                let parent = self.title.ok_or_else(|| hierarchy_error(HEADING_2, "title", para))?;
                let section = self.open(parent, "section", "sectiontext", para);
                self.section = Some(section);
                self.cursor = Cursor::Open(section);
            }
            BlockSignal::Heading3(para) => {
                let parent = self
                    .section
                    .ok_or_else(|| hierarchy_error(HEADING_3, "section", para))?;
                let subsection = self.open(parent, "subsection", "subsectiontext", para);
                self.cursor = Cursor::Open(subsection);
            }
            BlockSignal::TocEntry => {
                log::debug!("skipping table of contents entry");
            }
            BlockSignal::TableGrid(table) => {
                let parent = self.target("table", || format!("{:?}", table.rows.first()))?;
                append_table(&mut self.tree, parent, table);
            }
            BlockSignal::Table(table) => {
                log::debug!("flattening table with style {:?}", table.style);
                let parent = self.target("table", || format!("{:?}", table.rows.first()))?;
                append_table(&mut self.tree, parent, table);
            }
            BlockSignal::Bullet(para) => {
                let text = para.text();
                let parent = self.target("bullet", || text.clone())?;
                self.tree.append_text(parent, "bullet", text);
            }
            BlockSignal::ControlStart(para) => self.open_control(para)?,
            BlockSignal::PlainParagraph(para) => {
                let parent = self.target("paragraph", || para.text())?;
                append_paragraph(&mut self.tree, parent, para, self.links, self.link_style)?;
            }
        }

        Ok(())
    }

    /// Finish the pass, adding back-matter when links are rendered OSCAL-style
    pub fn finish(mut self) -> Conversion {
        if self.link_style == LinkStyle::Oscal {
            let root = self.tree.root();
            let back_matter = self.tree.append(root, "back-matter");
            for resource in self.links.resources() {
                let node = self.tree.append(back_matter, "resource");
                self.tree.set_attribute(node, "uuid", resource.uuid.to_string());
                let rlink = self.tree.append(node, "rlink");
                self.tree.set_attribute(rlink, "href", resource.href);
            }
        }

        log::info!("built {} controls", self.tree.find_all("control").len());
        Conversion {
            tree: self.tree,
            baselines: self.baselines,
        }
    }

    fn open(&mut self, parent: NodeId, name: &str, text_name: &str, para: &Paragraph) -> NodeId {
        let node = self.tree.append(parent, name);
        self.tree.append_text(node, text_name, para.text());
        node
    }

    fn open_control(&mut self, para: &Paragraph) -> Result<(), ConvertError> {
        let text = para.text();
        // a control never nests inside another control
        let parent = self
            .cursor
            .container()
            .ok_or_else(|| ConvertError::NoEnclosingContainer {
                kind: "control",
                text: text.clone(),
            })?;

        let control: Control = text.parse()?;
        log::debug!("{control}");

        let node = self.tree.append(parent, "control");
        for (key, value) in control.attributes() {
            self.tree.set_attribute(node, key, value);
        }
        self.baselines.record(&control);
        self.cursor = Cursor::Control { node, parent };
        Ok(())
    }

    fn target(
        &self,
        kind: &'static str,
        text: impl FnOnce() -> String,
    ) -> Result<NodeId, ConvertError> {
        self.cursor
            .node()
            .ok_or_else(|| ConvertError::NoEnclosingContainer { kind, text: text() })
    }
}

fn hierarchy_error(style: &'static str, expected: &'static str, para: &Paragraph) -> ConvertError {
    ConvertError::MalformedHierarchy {
        style,
        expected,
        text: para.text(),
    }
}
