use std::fmt::Write;

use crate::dot_ast::*;

const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Serializes a graph to DOT text, one statement per line.
pub fn source(graph: &Digraph) -> String {
    let mut out = String::new();
    if let Some(comment) = &graph.comment {
        for line in comment.lines() {
            let _ = writeln!(out, "// {line}");
        }
    }
    let _ = writeln!(out, "digraph {} {{", quote(&graph.name));
    for stmt in &graph.body {
        let _ = writeln!(out, "\t{}", statement(stmt));
    }
    out.push_str("}\n");
    out
}

fn statement(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Assign(key, value) => format!("{}={}", quote(key), quote(value)),
        Stmt::Defaults(target, attrs) => {
            format!("{} [{}]", target.keyword(), attr_list(None, attrs))
        }
        Stmt::Node(node) => format!(
            "{} [{}]",
            quote(&node.id),
            attr_list(Some(&node.label), &node.attrs)
        ),
        Stmt::Edge(edge) => {
            let mut line = format!("{} -> {}", quote(&edge.from), quote(&edge.to));
            if !edge.attrs.is_empty() {
                let _ = write!(line, " [{}]", attr_list(None, &edge.attrs));
            }
            line
        }
    }
}

fn attr_list(label: Option<&str>, attrs: &Attrs) -> String {
    label
        .map(|l| format!("label={}", quote(l)))
        .into_iter()
        .chain(attrs.iter().map(|(k, v)| format!("{}={}", quote(k), quote(v))))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns `text` as a DOT identifier, quoting it unless it is a plain id or
/// a numeral.
pub fn quote(text: &str) -> String {
    if (is_plain_id(text) || is_numeral(text)) && !is_keyword(text) {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn is_id_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || !ch.is_ascii()
}

fn is_plain_id(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_id_start(first) => {
            chars.all(|c| is_id_start(c) || c.is_ascii_digit())
        }
        _ => false,
    }
}

fn is_numeral(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() {
        return false;
    }
    match digits.split_once('.') {
        Some((int, frac)) => {
            (!int.is_empty() || !frac.is_empty())
                && int.chars().all(|c| c.is_ascii_digit())
                && frac.chars().all(|c| c.is_ascii_digit())
        }
        None => digits.chars().all(|c| c.is_ascii_digit()),
    }
}

fn is_keyword(text: &str) -> bool {
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(text))
}
