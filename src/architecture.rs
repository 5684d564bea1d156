//! The PyCS stack: three csPlayer front ends over the csPlayer meta-UI, which
//! drives CSXU executables through the CLI layer in direct or service mode.

use crate::dot_ast::{AttrTarget, Digraph, attrs};

pub const GRAPH_NAME: &str = "pycs_architecture";
pub const COMMENT: &str = "PyCS Architecture Stack";

pub fn pycs_architecture() -> Digraph {
    let mut dot = Digraph::new(GRAPH_NAME).with_comment(COMMENT);

    dot.attr("rankdir", "TB");
    dot.defaults(
        AttrTarget::Graph,
        attrs(&[
            ("bgcolor", "white"),
            ("pad", "0.5"),
            ("nodesep", "0.5"),
            ("ranksep", "1.0"),
        ]),
    );
    dot.defaults(
        AttrTarget::Node,
        attrs(&[
            ("shape", "box"),
            ("style", "filled"),
            ("fillcolor", "lightblue"),
            ("fontname", "Arial"),
            ("fontsize", "10"),
            ("margin", "0.3,0.2"),
        ]),
    );
    dot.defaults(
        AttrTarget::Edge,
        attrs(&[("color", "gray40"), ("fontname", "Arial"), ("fontsize", "9")]),
    );

    let player = || attrs(&[("fillcolor", "lightyellow"), ("fontsize", "9")]);
    let layer =
        |fill: &str| attrs(&[("fillcolor", fill), ("fontsize", "10"), ("fontname", "Arial:bold")]);

    // csPlayer implementations
    dot.node("terminal", "Terminal User\n(compgen completion)", player());
    dot.node("blee", "Blee csPlayer\n(Emacs-based)", player());
    dot.node("webui", "WebUI csPlayer\n(this project)", player());

    dot.node(
        "csplayer",
        "csPlayer\n(Meta-UI for any CSXU)\n\ngithub.com/bisos-pip/csPlayer",
        layer("lightcyan"),
    );
    dot.node("cli", "CLI\n(Execution Layer)", layer("lightgreen"));
    dot.node(
        "csxu",
        "CSXU (Python)\n.cs executable\n\nSelf-describing:\n- Commands\n- Parameters\n- Descriptions\n- Metadata",
        layer("lightcoral"),
    );

    // execution modes
    dot.node("direct", "Direct Mode\n(Local)", player());
    dot.node("service", "Service Mode\n(Remote)", player());

    dot.edge("terminal", "csplayer");
    dot.edge("blee", "csplayer");
    dot.edge("webui", "csplayer");
    dot.edge("csplayer", "cli");
    dot.edge("cli", "csxu");
    dot.edge("csxu", "direct");
    dot.edge("csxu", "service");

    dot
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn architecture_is_valid() {
        assert!(pycs_architecture().validate().is_ok());
    }

    #[test]
    fn front_ends_share_player_style() {
        let g = pycs_architecture();
        let webui = g.nodes().find(|n| n.id == "webui").unwrap();
        assert_eq!(webui.attrs, attrs(&[("fillcolor", "lightyellow"), ("fontsize", "9")]));
    }

    #[test]
    fn core_layers_are_bold() {
        let g = pycs_architecture();
        for id in ["csplayer", "cli", "csxu"] {
            let node = g.nodes().find(|n| n.id == id).unwrap();
            assert_eq!(node.attrs.get("fontname").map(String::as_str), Some("Arial:bold"));
        }
    }

    #[test]
    fn assembly_is_deterministic() {
        assert_eq!(pycs_architecture(), pycs_architecture());
    }
}
