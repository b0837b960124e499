//! Tests for the diagram and JSON renderers.
mod common;
use common::*;
use botgraph::prelude::*;
use botgraph::render::{DEFAULT_COLOR, EDGE_WEIGHT};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn sample_ir() -> GraphIR {
    let node = |flow: &str, state: &str| Node {
        id: qid(flow, state),
        flow: flow.to_string(),
    };
    GraphIR {
        flows: vec!["default".to_string(), "shop".to_string()],
        nodes: vec![
            node("default", "root"),
            node("default", "help"),
            node("shop", "start"),
        ],
        edges: vec![
            Edge::new(qid("default", "root"), qid("shop", "start")),
            Edge::new(qid("shop", "start"), qid("default", "help")),
            Edge::new(qid("default", "help"), qid("shop", "nowhere")),
        ],
    }
}

#[test]
fn test_json_groups_are_one_based_flow_indexes() {
    let graph = JsonRenderer.to_json(&sample_ir());

    let groups: Vec<(&str, usize)> = graph
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.group))
        .collect();
    assert_eq!(
        groups,
        vec![("default.root", 1), ("default.help", 1), ("shop.start", 2)]
    );
}

#[test]
fn test_json_omits_links_to_unknown_nodes() {
    let graph = JsonRenderer.to_json(&sample_ir());

    assert_eq!(graph.links.len(), 2);
    assert!(graph.links.iter().all(|l| l.value == EDGE_WEIGHT));
    for link in &graph.links {
        for endpoint in [&link.source, &link.target] {
            assert_eq!(
                graph.nodes.iter().filter(|n| &n.id == endpoint).count(),
                1,
                "endpoint {} must match exactly one node",
                endpoint
            );
        }
    }
}

#[test]
fn test_json_string_has_expected_schema() {
    let text = JsonRenderer.to_json_string(&sample_ir()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["nodes"][0]["id"], "default.root");
    assert_eq!(value["nodes"][0]["group"], 1);
    assert_eq!(value["links"][0]["source"], "default.root");
    assert_eq!(value["links"][0]["target"], "shop.start");
    assert_eq!(value["links"][0]["value"], 1);
}

#[test]
fn test_dot_draws_initial_state_once_as_double_circle() {
    let ir = sample_ir();
    let dot = DiagramRenderer::new(FlowColors::plain(&ir.flows))
        .to_dot(&ir)
        .unwrap();

    assert!(dot.starts_with("digraph bot_graph {"));
    assert!(dot.contains("rankdir=LR"));
    assert!(dot.contains(&format!(
        "node [fillcolor=\"{}\" shape=doublecircle style=filled]",
        DEFAULT_COLOR
    )));
    assert_eq!(dot.matches("\t\"default.root\"\n").count(), 1);
    assert!(dot.contains("\"shop.start\" -> \"default.help\""));
    assert_eq!(dot.matches(" -> ").count(), 3);
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn test_dot_uses_flow_colors() {
    let ir = sample_ir();
    let mut rng = StdRng::seed_from_u64(3);
    let colors = FlowColors::colorful(&ir.flows, &mut rng);
    let shop_color = colors.get("shop").unwrap().to_string();

    let dot = DiagramRenderer::new(colors).to_dot(&ir).unwrap();
    let shop_attr = format!("node [fillcolor=\"{}\"]", shop_color);
    let attr_pos = dot.find(&shop_attr).expect("shop color set");
    let node_pos = dot.find("\t\"shop.start\"\n").expect("shop node drawn");
    assert!(attr_pos < node_pos);
}

#[test]
fn test_dot_requires_default_flow() {
    let mut ir = sample_ir();
    ir.flows = vec!["shop".to_string()];
    let result = DiagramRenderer::new(FlowColors::plain(&ir.flows)).to_dot(&ir);
    assert!(matches!(result, Err(RenderError::MissingInitialFlow(_))));
}

#[test]
fn test_dot_requires_a_color_for_every_flow() {
    let ir = sample_ir();
    let result = DiagramRenderer::new(FlowColors::plain(&["default".to_string()])).to_dot(&ir);
    assert!(matches!(result, Err(RenderError::MissingFlowColor(f)) if f == "shop"));
}

#[test]
fn test_diagram_artifact_saves_layout() {
    let bot = BotFixture::new();
    let path = bot.root().join("graph.gv");
    let artifact = DiagramArtifact::new(&path, "digraph bot_graph {\n}\n".to_string());

    artifact.save().unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "digraph bot_graph {\n}\n"
    );
    assert_eq!(artifact.image_path(), bot.root().join("graph.gv.pdf"));
}

#[test]
fn test_renderers_share_the_graph_renderer_trait() {
    let ir = sample_ir();
    let renderers: Vec<Box<dyn GraphRenderer>> = vec![
        Box::new(DiagramRenderer::new(FlowColors::plain(&ir.flows))),
        Box::new(JsonRenderer),
    ];
    for renderer in renderers {
        assert!(!renderer.render(&ir).unwrap().is_empty());
    }
}
