use winnow::prelude::*;
use winnow::ascii::{line_ending, multispace0, space0, space1};
use winnow::combinator::{alt, eof, opt};
use winnow::token::{any, take_till, take_while};

use crate::dot_ast::*;
use crate::error::{Error, Result};

/// Reads the DOT dialect produced by [`crate::dot_writer::source`]: leading
/// `//` comments, a single `digraph` and one statement per line.
pub fn parse_dot(input: &str) -> Result<Digraph> {
    let mut input = input;
    digraph(&mut input).map_err(|_| {
        let context = input.lines().next().unwrap_or("").trim();
        let context_display = if context.chars().count() > 40 {
            format!("{}...", context.chars().take(40).collect::<String>())
        } else {
            context.to_string()
        };
        Error::Syntax(format!("unexpected `{context_display}`"))
    })
}

fn digraph(input: &mut &str) -> winnow::Result<Digraph> {
    let comment = comments.parse_next(input)?;
    multispace0.parse_next(input)?;
    "digraph".parse_next(input)?;
    space1.parse_next(input)?;
    let name = value.parse_next(input)?;
    space0.parse_next(input)?;
    "{".parse_next(input)?;

    let mut graph = Digraph::new(name);
    graph.comment = comment;

    loop {
        multispace0.parse_next(input)?;
        if opt("}").parse_next(input)?.is_some() {
            break;
        }
        let stmt = statement.parse_next(input)?;
        graph.body.push(stmt);
        space0.parse_next(input)?;
        opt(";").parse_next(input)?;
        space0.parse_next(input)?;
        alt((line_ending.void(), eof.void())).parse_next(input)?;
    }

    multispace0.parse_next(input)?;
    eof.parse_next(input)?;
    Ok(graph)
}

fn comments(input: &mut &str) -> winnow::Result<Option<String>> {
    let mut lines: Vec<String> = Vec::new();
    loop {
        multispace0.parse_next(input)?;
        if opt("//").parse_next(input)?.is_none() {
            break;
        }
        let text = take_till(0.., ['\r', '\n']).parse_next(input)?;
        lines.push(text.strip_prefix(' ').unwrap_or(text).to_string());
    }
    if lines.is_empty() {
        Ok(None)
    } else {
        Ok(Some(lines.join("\n")))
    }
}

fn statement(input: &mut &str) -> winnow::Result<Stmt> {
    alt((defaults_stmt, id_stmt)).parse_next(input)
}

fn attr_target(input: &mut &str) -> winnow::Result<AttrTarget> {
    alt((
        "graph".value(AttrTarget::Graph),
        "node".value(AttrTarget::Node),
        "edge".value(AttrTarget::Edge),
    ))
    .parse_next(input)
}

fn defaults_stmt(input: &mut &str) -> winnow::Result<Stmt> {
    let target = attr_target.parse_next(input)?;
    space0.parse_next(input)?;
    let attrs = attr_block.parse_next(input)?;
    Ok(Stmt::Defaults(target, attrs))
}

fn id_stmt(input: &mut &str) -> winnow::Result<Stmt> {
    let id = value.parse_next(input)?;
    space0.parse_next(input)?;

    if opt("=").parse_next(input)?.is_some() {
        space0.parse_next(input)?;
        let v = value.parse_next(input)?;
        return Ok(Stmt::Assign(id, v));
    }

    if opt("->").parse_next(input)?.is_some() {
        space0.parse_next(input)?;
        let to = value.parse_next(input)?;
        space0.parse_next(input)?;
        let attrs = opt(attr_block).parse_next(input)?.unwrap_or_default();
        return Ok(Stmt::Edge(Edge { from: id, to, attrs }));
    }

    let mut attrs = opt(attr_block).parse_next(input)?.unwrap_or_default();
    let label = attrs.remove("label").unwrap_or_else(|| id.clone());
    Ok(Stmt::Node(NodeDecl { id, label, attrs }))
}

fn attr_block(input: &mut &str) -> winnow::Result<Attrs> {
    "[".parse_next(input)?;
    let mut attrs = Attrs::new();
    loop {
        space0.parse_next(input)?;
        if opt("]").parse_next(input)?.is_some() {
            break;
        }
        let key = value.parse_next(input)?;
        space0.parse_next(input)?;
        "=".parse_next(input)?;
        space0.parse_next(input)?;
        let v = value.parse_next(input)?;
        space0.parse_next(input)?;
        opt(alt((",", ";"))).parse_next(input)?;
        attrs.insert(key, v);
    }
    Ok(attrs)
}

fn value(input: &mut &str) -> winnow::Result<String> {
    alt((quoted, bare.map(str::to_string))).parse_next(input)
}

fn bare<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    (
        opt('-'),
        take_while(1.., |c: char| {
            c.is_ascii_alphanumeric() || c == '_' || c == '.' || !c.is_ascii()
        }),
    )
        .take()
        .parse_next(input)
}

fn quoted(input: &mut &str) -> winnow::Result<String> {
    '"'.parse_next(input)?;
    let mut out = String::new();
    loop {
        let ch: char = any.parse_next(input)?;
        match ch {
            '"' => return Ok(out),
            '\\' => {
                let next: char = any.parse_next(input)?;
                match next {
                    '"' => out.push('"'),
                    'n' => out.push('\n'),
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                }
            }
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_quoted_unescapes() {
        let mut input = "\"a \\\"b\\\"\\nc\\l\"";
        assert_eq!(quoted(&mut input).unwrap(), "a \"b\"\nc\\l");
        assert_eq!(input, "");
    }

    #[test]
    fn parse_bare_value() {
        let mut input = "0.5 rest";
        assert_eq!(value(&mut input).unwrap(), "0.5");
        assert_eq!(input, " rest");
    }

    #[test]
    fn parse_attr_block_with_separators() {
        let mut input = "[shape=box, margin=\"0.3,0.2\"; style=filled]";
        let attrs = attr_block(&mut input).unwrap();
        assert_eq!(
            attrs,
            crate::dot_ast::attrs(&[("shape", "box"), ("margin", "0.3,0.2"), ("style", "filled")])
        );
    }

    #[test]
    fn parse_assign_statement() {
        let mut input = "rankdir=TB";
        assert_eq!(
            statement(&mut input).unwrap(),
            Stmt::Assign("rankdir".to_string(), "TB".to_string())
        );
    }

    #[test]
    fn parse_defaults_statement() {
        let mut input = "edge [color=gray40]";
        assert_eq!(
            statement(&mut input).unwrap(),
            Stmt::Defaults(AttrTarget::Edge, crate::dot_ast::attrs(&[("color", "gray40")]))
        );
    }

    #[test]
    fn parse_node_named_like_keyword_prefix() {
        let mut input = "nodes [label=N]";
        match statement(&mut input).unwrap() {
            Stmt::Node(n) => {
                assert_eq!(n.id, "nodes");
                assert_eq!(n.label, "N");
            }
            other => panic!("expected node, got {other:?}"),
        }
    }

    #[test]
    fn parse_node_without_label_uses_id() {
        let mut input = "plain";
        match statement(&mut input).unwrap() {
            Stmt::Node(n) => {
                assert_eq!(n.label, "plain");
                assert!(n.attrs.is_empty());
            }
            other => panic!("expected node, got {other:?}"),
        }
    }

    #[test]
    fn parse_edge_statement() {
        let mut input = "a -> b [color=red]";
        assert_eq!(
            statement(&mut input).unwrap(),
            Stmt::Edge(Edge {
                from: "a".to_string(),
                to: "b".to_string(),
                attrs: crate::dot_ast::attrs(&[("color", "red")]),
            })
        );
    }

    #[test]
    fn parse_full_graph() {
        let input = "\
// first
// second
digraph g {
\trankdir=TB

\ta [label=\"A\\nB\" fontsize=9];
\tb
\ta -> b
}
";
        let g = parse_dot(input).unwrap();
        assert_eq!(g.name, "g");
        assert_eq!(g.comment.as_deref(), Some("first\nsecond"));
        assert_eq!(g.body.len(), 4);
        let a = g.nodes().next().unwrap();
        assert_eq!(a.label, "A\nB");
        assert_eq!(g.edges().count(), 1);
    }

    #[test]
    fn parse_rejects_undirected_graph() {
        let err = parse_dot("graph g {\n}\n").unwrap_err();
        assert!(matches!(err, Error::Syntax(_)), "got: {err}");
    }

    #[test]
    fn parse_rejects_trailing_garbage() {
        let err = parse_dot("digraph g {\n}\nextra\n").unwrap_err();
        assert!(err.to_string().contains("syntax error"), "got: {err}");
    }

    #[test]
    fn parse_rejects_unterminated_body() {
        assert!(parse_dot("digraph g {\n\ta -> b\n").is_err());
    }
}
