use std::fmt::{Display, Write};

use crate::{
    direction::Direction,
    node::{Arena, NodeId, NodeKind},
};

/// Render the tree held in `arena` as a Graphviz DOT digraph.
///
/// Each node is labelled with its value and its cached left/right heights.
/// Empty leaves are rendered as invisible points to keep the left/right
/// layout stable.
pub(crate) fn print_dot<T>(arena: &Arena<T>) -> String
where
    T: Display,
{
    let mut buf = String::new();
    write_dot(arena, &mut buf).unwrap();
    buf
}

fn write_dot<T, W>(arena: &Arena<T>, buf: &mut W) -> std::fmt::Result
where
    T: Display,
    W: Write,
{
    writeln!(buf, "digraph {{")?;
    writeln!(buf, r#"bgcolor = "transparent";"#)?;
    writeln!(
        buf,
        r#"node [shape = record; style = filled; fontcolor = orange4; fillcolor = white;];"#
    )?;
    recurse(arena, arena.root(), buf)?;
    writeln!(buf, "}}")
}

fn recurse<T, W>(arena: &Arena<T>, id: NodeId, buf: &mut W) -> std::fmt::Result
where
    T: Display,
    W: Write,
{
    let n = match arena.node(id).kind() {
        NodeKind::Branch(v) => v,
        NodeKind::Empty => return Ok(()),
    };

    writeln!(
        buf,
        r#""{}" [label="{} | {{ l={} | r={} }}"];"#,
        name(id),
        n.value(),
        n.height(Direction::Left),
        n.height(Direction::Right),
    )?;

    for d in [Direction::Left, Direction::Right] {
        let child = n.child(d);
        match arena.node(child).kind() {
            NodeKind::Branch(_) => {
                writeln!(
                    buf,
                    "\"{}\" -> \"{}\" [color = \"orange1\";];",
                    name(id),
                    name(child)
                )?;
                recurse(arena, child, buf)?;
            }
            NodeKind::Empty => {
                writeln!(buf, "\"null_{}\" [shape=point,style=invis];", name(child))?;
                writeln!(
                    buf,
                    "\"{}\" -> \"null_{}\" [style=invis];",
                    name(id),
                    name(child)
                )?;
            }
        };
    }

    Ok(())
}

fn name(id: NodeId) -> String {
    format!("n{}", id.index())
}
