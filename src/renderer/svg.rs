//! SVG generation from a scene

use crate::edges::EdgeStyle;
use crate::layout::{BoundingBox, NodeKey, Point};
use crate::stylesheet::Stylesheet;

use super::path::ResolvedPath;
use super::scene::{Scene, LEGEND_ENTRY_WIDTH, LEGEND_SAMPLE_WIDTH};
use super::SvgConfig;

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Class suffix shared by edges, markers and legend samples of a style
fn style_class(style: EdgeStyle) -> &'static str {
    match style {
        EdgeStyle::Dashed => "advisory",
        EdgeStyle::Solid => "flow",
    }
}

fn edge_stroke(stylesheet: &Stylesheet, style: EdgeStyle) -> String {
    match style {
        EdgeStyle::Dashed => stylesheet.resolve_or_default("edge-advisory"),
        EdgeStyle::Solid => stylesheet.resolve_or_default("edge-flow"),
    }
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    defs: Vec<String>,
    styles: Vec<String>,
    elements: Vec<String>,
    connections: Vec<String>,
    overlays: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            defs: vec![],
            styles: vec![],
            elements: vec![],
            connections: vec![],
            overlays: vec![],
            indent: 1,
        }
    }

    /// Add CSS rules for the text classes
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let prefix = self.prefix();
        let mut css = format!(
            ".{p}title {{ font-size: 14px; font-weight: 700; }}\n    \
             .{p}subtitle {{ font-size: 11px; }}\n    \
             .{p}label {{ font-size: 11px; font-weight: 500; fill: {label}; }}\n    \
             .{p}tier {{ font-size: 13px; font-weight: 600; fill: {tier}; }}\n    \
             .{p}legend {{ font-size: 12px; fill: {legend}; }}",
            p = prefix,
            label = stylesheet.resolve_or_default("edge-label"),
            tier = stylesheet.resolve_or_default("tier-label"),
            legend = stylesheet.resolve_or_default("legend-text"),
        );
        if let Some(font) = stylesheet.resolve("font-family") {
            css.push_str(&format!("\n    text {{ font-family: {}; }}", font));
        }
        self.styles.push(css);
    }

    pub fn prefix(&self) -> String {
        self.config.class_prefix.clone()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    pub fn marker_id(&self, style: EdgeStyle) -> String {
        format!("{}arrow-{}", self.prefix(), style_class(style))
    }

    /// Add the arrowhead definition for one edge style, filled with that style's color
    pub fn add_arrow_marker(&mut self, style: EdgeStyle, fill: &str) {
        let (length, width) = self.config.arrow_size;
        // orient="auto" turns the right-pointing arrow along the path tangent
        self.defs.push(format!(
            r#"<marker id="{id}" viewBox="0 0 {length} {width}" refX="{ref_x}" refY="{ref_y}" markerWidth="{length}" markerHeight="{width}" orient="auto">
      <polygon points="0 0, {length} {ref_y}, 0 {width}" fill="{fill}"/>
    </marker>"#,
            id = self.marker_id(style),
            ref_x = length - 1.0,
            ref_y = width / 2.0,
        ));
    }

    /// Add a filled rectangle behind everything else
    pub fn add_background(&mut self, bounds: BoundingBox, fill: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<rect class="{}background" x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            self.indent_str(),
            prefix,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            fill
        ));
    }

    /// Add a rounded node rectangle
    pub fn add_node_rect(
        &mut self,
        bounds: BoundingBox,
        rx: f64,
        classes: &[String],
        fill: &str,
        stroke: &str,
        stroke_width: f64,
    ) {
        let prefix = self.prefix();
        let class_list = std::iter::once(format!("{}node", prefix))
            .chain(classes.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");

        self.elements.push(format!(
            r#"{}<rect class="{}" x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            self.indent_str(),
            class_list,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            rx,
            fill,
            stroke,
            stroke_width
        ));
    }

    /// Add a text element
    pub fn add_text(&mut self, text: &str, at: Point, anchor: TextAnchor, class: &str, fill: Option<&str>) {
        let prefix = self.prefix();
        let fill_attr = fill.map(|f| format!(r#" fill="{}""#, f)).unwrap_or_default();
        self.elements.push(format!(
            r#"{}<text class="{}{}" x="{}" y="{}" text-anchor="{}"{}>{}</text>"#,
            self.indent_str(),
            prefix,
            class,
            at.x,
            at.y,
            anchor.as_str(),
            fill_attr,
            escape_xml(text)
        ));
    }

    /// Add an edge label; drawn after every edge so paths never cover text
    pub fn add_edge_label(&mut self, text: &str, at: Point) {
        let prefix = self.prefix();
        self.overlays.push(format!(
            r#"{}<text class="{}label" x="{}" y="{}" text-anchor="middle">{}</text>"#,
            self.indent_str(),
            prefix,
            at.x,
            at.y,
            escape_xml(text)
        ));
    }

    /// Add a path for an edge
    pub fn add_edge_path(&mut self, path: &ResolvedPath, classes: &[String], stroke: &str, style: EdgeStyle) {
        let prefix = self.prefix();
        let class_list = std::iter::once(format!("{}edge", prefix))
            .chain(classes.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        let dash = match style {
            EdgeStyle::Dashed => format!(r#" stroke-dasharray="{}""#, self.config.dash_array()),
            EdgeStyle::Solid => String::new(),
        };

        self.connections.push(format!(
            r#"{}<path class="{}" d="{}" fill="none" stroke="{}" stroke-width="{}"{} marker-end="url(#{})"/>"#,
            self.indent_str(),
            class_list,
            path.to_svg_d(),
            stroke,
            self.config.edge_stroke_width,
            dash,
            self.marker_id(style)
        ));
    }

    /// Add a short line sample for the legend; solid samples carry an arrow
    pub fn add_legend_sample(&mut self, path: &ResolvedPath, stroke: &str, style: EdgeStyle) {
        let decoration = match style {
            EdgeStyle::Dashed => format!(r#" stroke-dasharray="{}""#, self.config.dash_array()),
            EdgeStyle::Solid => format!(r#" marker-end="url(#{})""#, self.marker_id(style)),
        };
        self.elements.push(format!(
            r#"{}<path d="{}" fill="none" stroke="{}" stroke-width="{}"{}/>"#,
            self.indent_str(),
            path.to_svg_d(),
            stroke,
            self.config.edge_stroke_width,
            decoration
        ));
    }

    /// Add a group element with optional ID and classes
    pub fn start_group(&mut self, id: Option<&str>, classes: &[String]) {
        let id_attr = id
            .map(|i| format!(r#" id="{}""#, escape_xml(i)))
            .unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };

        self.elements
            .push(format!("{}<g{}{}>", self.indent_str(), id_attr, class_attr));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: BoundingBox, surface: (f64, f64)) -> String {
        let padding = self.config.padding;
        let vb_x = viewbox.x - padding;
        let vb_y = viewbox.y - padding;
        let vb_w = viewbox.width + 2.0 * padding;
        let vb_h = viewbox.height + 2.0 * padding;

        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            surface.0 + 2.0 * padding,
            surface.1 + 2.0 * padding,
            vb_x,
            vb_y,
            vb_w,
            vb_h
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        if !self.defs.is_empty() {
            svg.push_str("  <defs>");
            svg.push_str(nl);
            for def in &self.defs {
                svg.push_str("    ");
                svg.push_str(def);
                svg.push_str(nl);
            }
            svg.push_str("  </defs>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        // Edges in resolver order, later ones on top
        for conn in &self.connections {
            svg.push_str(conn);
            svg.push_str(nl);
        }

        for overlay in &self.overlays {
            svg.push_str(overlay);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a scene to an SVG string (with default stylesheet)
pub fn render_svg(scene: &Scene, config: &SvgConfig) -> String {
    render_svg_with_stylesheet(scene, config, &Stylesheet::default())
}

/// Render a scene to an SVG string with a custom stylesheet
pub fn render_svg_with_stylesheet(scene: &Scene, config: &SvgConfig, stylesheet: &Stylesheet) -> String {
    let mut builder = SvgBuilder::new(config.clone());

    builder.add_stylesheet(stylesheet);
    for style in [EdgeStyle::Dashed, EdgeStyle::Solid] {
        builder.add_arrow_marker(style, &edge_stroke(stylesheet, style));
    }
    builder.add_background(scene.bounds, &stylesheet.resolve_or_default("background"));

    for label in &scene.tier_labels {
        builder.add_text(&label.text, label.position, TextAnchor::Start, "tier", None);
    }

    for node in &scene.nodes {
        let role = node.key.role();
        let colors = stylesheet.role_colors(role);
        let prefix = builder.prefix();
        let shape = match node.key {
            NodeKey::Supplier(_) => config.supplier_shape,
            _ => config.actor_shape,
        };

        builder.start_group(Some(&node.element_id()), &[format!("{}{}", prefix, role)]);
        builder.add_node_rect(
            node.bounds,
            shape.corner_radius,
            &[],
            &colors.fill,
            &colors.stroke,
            shape.stroke_width,
        );

        let center = node.bounds.center();
        let subtitle_fill = match node.key {
            NodeKey::Supplier(_) => stylesheet.resolve_or_default("supplier-subtext"),
            _ => colors.text.clone(),
        };
        builder.add_text(
            &node.title,
            Point::new(center.x, center.y - config.text_line_offset),
            TextAnchor::Middle,
            "title",
            Some(&colors.text),
        );
        builder.add_text(
            &node.subtitle,
            Point::new(center.x, center.y + config.text_line_offset),
            TextAnchor::Middle,
            "subtitle",
            Some(&subtitle_fill),
        );
        builder.end_group();
    }

    for edge in &scene.edges {
        let prefix = builder.prefix();
        builder.add_edge_path(
            &ResolvedPath::from(edge),
            &[format!("{}{}", prefix, style_class(edge.style))],
            &edge_stroke(stylesheet, edge.style),
            edge.style,
        );
        if let Some(label) = &edge.label {
            builder.add_edge_label(&label.text, label.position);
        }
    }

    if config.legend {
        render_legend(scene, stylesheet, &mut builder);
    }

    builder.build(scene.bounds, scene.surface)
}

fn render_legend(scene: &Scene, stylesheet: &Stylesheet, builder: &mut SvgBuilder) {
    let prefix = builder.prefix();
    builder.start_group(None, &[format!("{}legend", prefix)]);
    let mut x = scene.legend.origin.x;
    let y = scene.legend.origin.y + 10.0;
    for entry in &scene.legend.entries {
        let stroke = edge_stroke(stylesheet, entry.style);
        let sample = ResolvedPath::line(Point::new(x, y), Point::new(x + LEGEND_SAMPLE_WIDTH, y));
        builder.add_legend_sample(&sample, &stroke, entry.style);
        builder.add_text(
            &entry.text,
            Point::new(x + LEGEND_SAMPLE_WIDTH + 10.0, y + 4.0),
            TextAnchor::Start,
            "legend",
            None,
        );
        x += LEGEND_ENTRY_WIDTH;
    }
    builder.end_group();
}

/// Escape special XML characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
