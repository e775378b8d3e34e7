//! Reconstructs source text from expression tree nodes.

use crate::ast::Node;

/// Returns the literal source text a node was parsed from.
///
/// Text nodes yield their value, lists yield the concatenation of their
/// children, and substitutions yield their retained source text, e.g.
/// `${name:-default}`.
pub fn format_node(node: &Node) -> String {
    let mut buf = String::new();
    write_node(&mut buf, node);
    buf
}

fn write_node(buf: &mut String, node: &Node) {
    match node {
        Node::Text(value) => buf.push_str(value),
        Node::List(nodes) => nodes.iter().for_each(|n| write_node(buf, n)),
        Node::Function(func) => buf.push_str(&func.source),
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_node(self))
    }
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;
    use crate::parse;
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_substitutions_verbatim() -> Result<()> {
        for input in [
            "${var:-5011}",
            "${string/\\/position\\\\/length}",
            "${a:${b:1:2}:${c,,}}",
            "$name",
            "${#name}",
        ] {
            let tree = parse(input)?;
            assert_eq!(format_node(tree.root()), input);
        }
        Ok(())
    }

    #[test]
    fn formats_lists() -> Result<()> {
        let tree = parse("x ${a} y $b")?;
        assert_eq!(tree.root().to_string(), "x ${a} y $b");
        Ok(())
    }

    #[test]
    fn double_dollar_formats_as_resolved_text() -> Result<()> {
        let tree = parse("cost: $$ each")?;
        assert_eq!(format_node(tree.root()), "cost: $ each");
        Ok(())
    }
}
