//! Disclosure contract: reveal, activate, highlight
//!
//! Exercises the engine through `CanopyApi` the way a host frontend
//! would, against an in-memory surface.

mod common;

use canopy::{
    AssetFetcher, CanopyApi, EdgeKey, GraphStore, MemorySurface, NodeId, RouteOutcome,
    SurfaceContent,
};
use common::{chain_data, fan_data, ScriptedFetcher};
use std::collections::HashSet;
use std::sync::Arc;

fn api_over(data: canopy::GraphData) -> (CanopyApi, Arc<MemorySurface>, Arc<ScriptedFetcher>) {
    let store = Arc::new(GraphStore::build(data, "root"));
    let surface = Arc::new(MemorySurface::new());
    let fetcher = Arc::new(ScriptedFetcher::new());
    let api = CanopyApi::new(
        store,
        surface.clone(),
        fetcher.clone() as Arc<dyn AssetFetcher>,
    );
    (api, surface, fetcher)
}

fn ids(ids: &[&str]) -> HashSet<NodeId> {
    ids.iter().map(|id| NodeId::from(*id)).collect()
}

#[tokio::test]
async fn reveal_then_activate_matches_the_contract() {
    let (api, _surface, _fetcher) = api_over(chain_data());

    api.reveal_neighbors("root");
    api.activate("a").await;

    assert_eq!(api.visible_nodes(), ids(&["root", "a"]));

    let highlights = api.highlights();
    assert_eq!(highlights.nodes, ids(&["root", "a"]));
    assert_eq!(
        highlights.links,
        HashSet::from([EdgeKey::new(&"root".into(), &"a".into())])
    );
}

#[tokio::test]
async fn revealing_twice_changes_nothing() {
    let (api, _surface, _fetcher) = api_over(chain_data());

    api.reveal_neighbors("root");
    let once = api.visible_nodes();
    assert!(!api.reveal_neighbors("root"));
    assert_eq!(api.visible_nodes(), once);
}

#[tokio::test]
async fn reachable_focus_is_always_highlighted() {
    let (api, _surface, _fetcher) = api_over(chain_data());

    api.reveal_neighbors("root");
    api.reveal_neighbors("a");
    for id in ["root", "a", "b"] {
        api.activate(id).await;
        assert!(
            api.highlights().nodes.contains(&NodeId::from(id)),
            "focus {} missing from its own highlight set",
            id
        );
    }
}

#[tokio::test]
async fn root_focus_has_no_highlighted_links_before_reveal() {
    let (api, _surface, _fetcher) = api_over(chain_data());

    api.activate("root").await;

    let highlights = api.highlights();
    assert_eq!(highlights.nodes, ids(&["root"]));
    assert!(highlights.links.is_empty());
}

#[tokio::test]
async fn root_focus_after_reveal_emphasizes_its_children() {
    let (api, _surface, _fetcher) = api_over(chain_data());

    api.reveal_neighbors("root");
    api.activate("root").await;

    let highlights = api.highlights();
    assert_eq!(highlights.nodes, ids(&["root", "a"]));
    assert_eq!(
        highlights.links,
        HashSet::from([EdgeKey::new(&"root".into(), &"a".into())])
    );
}

#[test]
fn hierarchy_depth_invariant_holds() {
    let store = GraphStore::build(fan_data(), "root");

    for node in store.nodes() {
        let Some(depth) = store.depth_of(&node.id) else {
            continue;
        };
        match store.parent_of(&node.id) {
            Some(parent) => assert_eq!(depth, store.depth_of(parent).unwrap() + 1),
            None => assert_eq!(depth, 0),
        }
    }
}

#[tokio::test]
async fn activating_unknown_node_is_a_noop() {
    let (api, _surface, _fetcher) = api_over(chain_data());

    api.reveal_neighbors("root");
    api.activate("a").await;
    let before = api.highlights();

    assert!(api.activate("ghost").await.is_none());
    assert_eq!(api.active_node(), Some(NodeId::from("a")));
    assert_eq!(api.highlights(), before);
}

#[tokio::test]
async fn markdown_node_renders_converted_content_and_title() {
    let (api, surface, _fetcher) = api_over(fan_data());

    api.reveal_neighbors("root");
    let outcome = api.activate("docs").await;

    assert_eq!(outcome, Some(RouteOutcome::Markdown));
    assert_eq!(surface.title(), "Documentation");
    match surface.content() {
        SurfaceContent::Markup(markup) => assert!(markup.contains("<h1>Docs</h1>")),
        other => panic!("expected rendered markup, got {:?}", other),
    }
}

#[tokio::test]
async fn raw_markup_node_renders_verbatim_with_plain_title() {
    let (api, surface, _fetcher) = api_over(fan_data());

    api.reveal_neighbors("root");
    let outcome = api.activate("raw").await;

    assert_eq!(outcome, Some(RouteOutcome::Markup));
    assert_eq!(surface.title(), "");
    assert_eq!(
        surface.content(),
        SurfaceContent::Markup("<section>verbatim</section>".to_string())
    );
}

#[tokio::test]
async fn panel_node_routes_through_the_manager() {
    let (api, surface, fetcher) = api_over(fan_data());
    fetcher.provide("panels/demo-widget/panel.html", "<p>widget</p>");

    api.reveal_neighbors("root");
    let outcome = api.activate("demo").await;

    assert!(matches!(outcome, Some(RouteOutcome::Panel(_))));
    assert_eq!(surface.attribution().as_deref(), Some("demo-widget"));
    assert!(matches!(
        surface.content(),
        SurfaceContent::Panel { ref markup, .. } if markup == "<p>widget</p>"
    ));
}

#[tokio::test]
async fn switching_away_from_a_panel_clears_it() {
    let (api, surface, fetcher) = api_over(fan_data());
    fetcher.provide("panels/demo-widget/panel.html", "<p>widget</p>");
    fetcher.provide("panels/demo-widget/panel.css", ".widget {}");

    api.reveal_neighbors("root");
    api.activate("demo").await;
    assert_eq!(surface.styles().len(), 1);

    api.activate("docs").await;

    assert_eq!(surface.attribution(), None);
    assert!(surface.styles().is_empty());
    assert!(matches!(surface.content(), SurfaceContent::Markup(_)));
}
