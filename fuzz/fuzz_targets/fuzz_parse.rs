#![no_main]
#![allow(missing_docs)]

use anyhow::Result;
use envsubst_parser::ast::Node;
use libfuzzer_sys::fuzz_target;

/// Every function node must carry a slice of the input that starts a substitution.
fn check_sources(input: &str, node: &Node) -> Result<()> {
    match node {
        Node::Text(_) => Ok(()),
        Node::List(nodes) => nodes.iter().try_for_each(|n| check_sources(input, n)),
        Node::Function(func) => {
            if !func.source.starts_with('$') || !input.contains(func.source.as_str()) {
                return Err(anyhow::anyhow!(
                    "source '{}' is not a substitution taken from the input",
                    func.source
                ));
            }
            if envsubst_parser::format_node(node) != func.source {
                return Err(anyhow::anyhow!("formatter disagrees with '{}'", func.source));
            }
            func.args.iter().try_for_each(|n| check_sources(input, n))
        }
    }
}

fn parse(input: &str) -> Result<()> {
    let Ok(tree) = envsubst_parser::parse(input) else {
        return Ok(());
    };

    if !input.contains('$') && *tree.root() != Node::Text(input.to_owned()) {
        return Err(anyhow::anyhow!("literal input not preserved: {tree:?}"));
    }

    check_sources(input, tree.root())
}

fuzz_target!(|input: String| {
    parse(&input).unwrap();
});
