//! Help page rendering for a compiled command tree.

use crate::types::CommandNode;

const INDENT_MARKER: &str = "↪";

/// Render the help page for a top-level command: a header followed by one
/// line per node, depth first, in declaration order.
pub fn render(root: &CommandNode) -> String {
    let mut lines = vec![format!("**\\{} Help Page**", root.name())];
    render_node(root, "", 0, &mut lines);
    lines.join("\n")
}

fn render_node(node: &CommandNode, parent: &str, depth: usize, lines: &mut Vec<String>) {
    let path = if parent.is_empty() {
        node.name().to_string()
    } else {
        format!("{parent} {}", node.name())
    };

    let mut usage = format!("\\{path}");
    for arg in node.arguments() {
        usage.push_str(&format!(" [{}: {}]", arg.name, arg.arg_type));
    }

    let line = if depth == 0 {
        format!("`{usage}`")
    } else {
        format!("{} `{usage}`", vec![INDENT_MARKER; depth].join(" "))
    };
    lines.push(line);

    for child in node.children() {
        render_node(child, &path, depth + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::literal;
    use crate::invocation::Invocation;
    use crate::types::HandlerResult;

    fn ok(_: &Invocation<'_>) -> HandlerResult {
        Ok(())
    }

    #[test]
    fn test_render_tree() {
        let root = literal("tool")
            .number("a")
            .executes(ok)
            .then(literal("list").executes(ok))
            .then(
                literal("user")
                    .then(literal("add").string("name").boolean("admin").executes(ok)),
            )
            .compile()
            .unwrap();

        let expected = [
            "**\\tool Help Page**",
            "`\\tool [a: number]`",
            "↪ `\\tool list`",
            "↪ `\\tool user`",
            "↪ ↪ `\\tool user add [name: string] [admin: boolean]`",
        ]
        .join("\n");
        assert_eq!(render(&root), expected);
    }

    #[test]
    fn test_render_is_deterministic() {
        let root = literal("x").then(literal("y").executes(ok)).compile().unwrap();
        assert_eq!(render(&root), render(&root));
    }
}
