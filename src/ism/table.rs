//! Table flattening into `<table><tr><td>` elements

use crate::document::Table;

use super::tree::{NodeId, XmlTree};

/// Append `table` under `parent`, row-major, one `<td>` per reported cell
pub fn append_table(tree: &mut XmlTree, parent: NodeId, table: &Table) -> NodeId {
    let node = tree.append(parent, "table");
    for row in &table.rows {
        let tr = tree.append(node, "tr");
        for cell in row {
            tree.append_text(tr, "td", cell.as_str());
        }
    }
    node
}
