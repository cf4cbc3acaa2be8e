//! Core types for the layout engine

use std::fmt;

use serde::{Serialize, Serializer};

use crate::model::ActorId;

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding box representing the spatial extent of an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this bounding box intersects another
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Horizontal layer of the pyramid, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Consulting = 0,
    Supply = 1,
    Production = 2,
    EndUser = 3,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Consulting, Tier::Supply, Tier::Production, Tier::EndUser];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Identifies a node of the flow diagram
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Consultant,
    Supplier(String),
    Assembler,
    Distributor,
    EndUser,
}

impl NodeKey {
    pub fn supplier(id: impl Into<String>) -> Self {
        NodeKey::Supplier(id.into())
    }

    pub fn tier(&self) -> Tier {
        match self {
            NodeKey::Consultant => Tier::Consulting,
            NodeKey::Supplier(_) => Tier::Supply,
            NodeKey::Assembler | NodeKey::Distributor => Tier::Production,
            NodeKey::EndUser => Tier::EndUser,
        }
    }

    /// Role name used for styling (stylesheet tokens, CSS classes)
    pub fn role(&self) -> &'static str {
        match self {
            NodeKey::Consultant => "consultant",
            NodeKey::Supplier(_) => "supplier",
            NodeKey::Assembler => "assembler",
            NodeKey::Distributor => "distributor",
            NodeKey::EndUser => "end-user",
        }
    }

    pub fn actor_id(&self) -> Option<ActorId> {
        match self {
            NodeKey::Consultant => Some(ActorId::Consultant),
            NodeKey::Assembler => Some(ActorId::Assembler),
            NodeKey::Distributor => Some(ActorId::Distributor),
            NodeKey::Supplier(_) | NodeKey::EndUser => None,
        }
    }
}

impl From<ActorId> for NodeKey {
    fn from(id: ActorId) -> Self {
        match id {
            ActorId::Consultant => NodeKey::Consultant,
            ActorId::Assembler => NodeKey::Assembler,
            ActorId::Distributor => NodeKey::Distributor,
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Supplier(id) => write!(f, "supplier:{}", id),
            other => f.write_str(other.role()),
        }
    }
}

impl Serialize for NodeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Top-left corners of every node for one supplier count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Positions {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub node_width: f64,
    pub node_height: f64,
    pub consultant: Point,
    /// Indexed by supplier display order
    pub suppliers: Vec<Point>,
    pub assembler: Point,
    pub distributor: Point,
    pub end_user: Point,
}

impl Positions {
    /// Top-left corner of a fixed node
    pub fn actor(&self, id: ActorId) -> Point {
        match id {
            ActorId::Consultant => self.consultant,
            ActorId::Assembler => self.assembler,
            ActorId::Distributor => self.distributor,
        }
    }

    pub fn node_bounds(&self, origin: Point) -> BoundingBox {
        BoundingBox::new(origin.x, origin.y, self.node_width, self.node_height)
    }

    /// Bounds of a node; `None` for a supplier with no position
    pub fn bounds_of(&self, key: &NodeKey, supplier_index: Option<usize>) -> Option<BoundingBox> {
        let origin = match key {
            NodeKey::Consultant => self.consultant,
            NodeKey::Assembler => self.assembler,
            NodeKey::Distributor => self.distributor,
            NodeKey::EndUser => self.end_user,
            NodeKey::Supplier(_) => *self.suppliers.get(supplier_index?)?,
        };
        Some(self.node_bounds(origin))
    }

    pub fn canvas(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.canvas_width, self.canvas_height)
    }

    /// Canvas plus every node, for sizing a scrollable surface
    pub fn extent(&self) -> BoundingBox {
        [self.consultant, self.assembler, self.distributor, self.end_user]
            .iter()
            .chain(&self.suppliers)
            .fold(self.canvas(), |acc, p| acc.union(&self.node_bounds(*p)))
    }
}
