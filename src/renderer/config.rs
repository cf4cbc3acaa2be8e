//! Drawing options for the flow diagram SVG

/// Outline of one kind of node box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeShape {
    pub corner_radius: f64,
    pub stroke_width: f64,
}

#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Space kept around the diagram extent, on every side
    pub padding: f64,

    /// Emit the `<?xml ...?>` declaration
    pub standalone: bool,

    /// One element per line, indented by group depth
    pub pretty_print: bool,

    /// Prepended to every class name and marker id; empty for none
    pub class_prefix: String,

    pub actor_shape: NodeShape,
    pub supplier_shape: NodeShape,

    pub edge_stroke_width: f64,

    /// Dash and gap length for advisory edges
    pub dash_pattern: (f64, f64),

    /// Vertical distance of the title and subtitle baselines from the node center
    pub text_line_offset: f64,

    /// Size of the arrowhead at the end of each edge (length, width)
    pub arrow_size: (f64, f64),

    /// Draw the line-style legend beneath the diagram
    pub legend: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            padding: 20.0,
            standalone: true,
            pretty_print: true,
            class_prefix: "bp-".to_string(),
            actor_shape: NodeShape {
                corner_radius: 12.0,
                stroke_width: 3.0,
            },
            supplier_shape: NodeShape {
                corner_radius: 8.0,
                stroke_width: 2.0,
            },
            edge_stroke_width: 2.0,
            dash_pattern: (8.0, 4.0),
            text_line_offset: 8.0,
            arrow_size: (10.0, 7.0),
            legend: true,
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    /// Same outline for actors and suppliers
    pub fn with_uniform_nodes(mut self, shape: NodeShape) -> Self {
        self.actor_shape = shape;
        self.supplier_shape = shape;
        self
    }

    pub fn with_dash_pattern(mut self, dash: f64, gap: f64) -> Self {
        self.dash_pattern = (dash, gap);
        self
    }

    /// `stroke-dasharray` value for advisory edges
    pub fn dash_array(&self) -> String {
        format!("{},{}", self.dash_pattern.0, self.dash_pattern.1)
    }
}
