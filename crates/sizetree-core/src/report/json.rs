/// JSON view of a [`SizeTree`].
///
/// Each node serializes as `{ "name", "size", "detail", "children" }` with
/// children in their current order.
use crate::model::{NodeIndex, SizeTree};
use serde::ser::{Serialize, SerializeSeq, SerializeStruct, Serializer};
use std::io::{self, Write};

/// Borrowed view of one node, serialized recursively.
struct NodeView<'a> {
    tree: &'a SizeTree,
    index: NodeIndex,
}

struct ChildrenView<'a> {
    tree: &'a SizeTree,
    index: NodeIndex,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.tree.node(self.index);
        let mut state = serializer.serialize_struct("Node", 4)?;
        state.serialize_field("name", node.name.as_str())?;
        state.serialize_field("size", &node.size)?;
        state.serialize_field("detail", &node.detail)?;
        state.serialize_field(
            "children",
            &ChildrenView {
                tree: self.tree,
                index: self.index,
            },
        )?;
        state.end()
    }
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children = self.tree.children(self.index);
        let mut seq = serializer.serialize_seq(Some(children.len()))?;
        for &child in children {
            seq.serialize_element(&NodeView {
                tree: self.tree,
                index: child,
            })?;
        }
        seq.end()
    }
}

/// Pretty-printed JSON for the whole tree.
pub fn render_json(tree: &SizeTree) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&root_view(tree))
}

pub fn write_json<W: Write>(tree: &SizeTree, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &root_view(tree))?;
    writeln!(out)?;
    Ok(())
}

fn root_view(tree: &SizeTree) -> NodeView<'_> {
    NodeView {
        tree,
        index: tree.root(),
    }
}
