//! End-to-end rendering from snapshots to SVG text

use plan_illustrator::model::{BusinessFlow, Supplier};
use plan_illustrator::{
    render, render_with_config, LayoutConfig, PlanSnapshot, RenderConfig, Stylesheet, SvgConfig,
};

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn seed_plan_draws_all_nodes_and_edges() {
    let svg = render(&PlanSnapshot::seed());

    // consultant, five suppliers, assembler, distributor, end user
    assert_eq!(count(&svg, r#"<g id="node-"#), 9);
    // 5 advisory + 4 to assembler + 1 to distributor + assembler->distributor + end user
    assert_eq!(count(&svg, r#"<path class="bp-edge"#), 12);
    assert_eq!(count(&svg, "bp-advisory"), 5);
    assert!(svg.contains("unit sale + consumable rental"));
    assert!(svg.contains("Consulting &amp; Sourcing"));
}

#[test]
fn edge_order_follows_resolution_order() {
    let svg = render(&PlanSnapshot::seed());
    let first_flow = svg.find("bp-flow").unwrap();
    let last_advisory = svg.rfind("bp-advisory").unwrap();
    assert!(last_advisory < first_flow);
}

#[test]
fn long_supplier_description_is_truncated() {
    let mut snapshot = PlanSnapshot::empty();
    snapshot.suppliers.push(Supplier::with_id(
        "s1",
        "Acme",
        "Lithium cells, chargers and cabinets",
    ));
    let svg = render(&snapshot);
    assert!(svg.contains(">Lithium cells, charg...</text>"));
    assert!(!svg.contains("cabinets"));
}

#[test]
fn dangling_flow_reference_is_not_drawn() {
    let mut snapshot = PlanSnapshot::empty();
    snapshot.suppliers.push(Supplier::with_id("s1", "Acme", ""));
    snapshot.business_flow = BusinessFlow {
        consultant_connections: vec!["s1".into(), "ghost".into()],
        ..Default::default()
    };
    let svg = render(&snapshot);
    assert_eq!(count(&svg, r#"<path class="bp-edge"#), 1);
}

#[test]
fn overflowing_supplier_row_widens_viewbox() {
    let mut snapshot = PlanSnapshot::empty();
    for i in 0..12 {
        snapshot
            .suppliers
            .push(Supplier::with_id(i.to_string(), format!("S{}", i), ""));
    }
    let svg = render_with_config(
        &snapshot,
        &RenderConfig::new().with_svg(SvgConfig::default().with_standalone(false)),
    );
    // (1400 - 12 * 180) / 2 = -380, minus padding
    assert!(svg.contains(r#"viewBox="-400 -20"#), "{}", &svg[..200]);
}

#[test]
fn custom_canvas_and_stylesheet() {
    let stylesheet = Stylesheet::from_str(
        r##"
[colors]
consultant-fill = "#123456"
"##,
    )
    .unwrap();
    let config = RenderConfig::new()
        .with_layout(LayoutConfig::default().with_canvas(1000.0, 700.0))
        .with_stylesheet(stylesheet);
    let svg = render_with_config(&PlanSnapshot::empty(), &config);
    assert!(svg.contains(r##"fill="#123456""##));
    // consultant centered on the narrower canvas: (1000 - 140) / 2
    assert!(svg.contains(r#"x="430" y="50" width="140" height="70" rx="12""#));
}

#[test]
fn debug_mode_renders_the_same_svg() {
    let snapshot = PlanSnapshot::seed();
    let plain = render(&snapshot);
    let debug = render_with_config(&snapshot, &RenderConfig::new().with_debug(true));
    assert_eq!(plain, debug);
}
