//! Static table geometry: felt, cushions and the six pockets.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Table geometry in table-space pixels.
///
/// Pockets sit exactly on the felt corners and on the midpoints of the long
/// rails. Everything except `pocket_sensitivity` is fixed after init.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub felt_x: f32,
    pub felt_y: f32,
    pub felt_width: f32,
    pub felt_height: f32,
    pub cushion_width: f32,
    /// Base radius used for the cushion exclusion zones around pocket mouths.
    pub pocket_radius: f32,
    pub corner_pocket_radius: f32,
    pub middle_pocket_radius: f32,
    /// Angular tolerance (radians) for the corner pull zone.
    pub corner_pocket_angle: f32,
    /// Global multiplier on every pocket radius and angle. Runtime-tunable.
    pub pocket_sensitivity: f32,
    pub ball_radius: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            felt_x: 150.0,
            felt_y: 150.0,
            felt_width: 1100.0,
            felt_height: 600.0,
            cushion_width: 20.0,
            pocket_radius: 35.0,
            corner_pocket_radius: 28.0,
            middle_pocket_radius: 26.0,
            corner_pocket_angle: FRAC_PI_3,
            pocket_sensitivity: 1.0,
            ball_radius: 20.0,
        }
    }
}

impl TableConfig {
    /// The six pockets: top row left to right, then bottom row left to right.
    pub fn pockets(&self) -> [Pocket; 6] {
        let left = self.felt_x;
        let mid = self.felt_x + self.felt_width / 2.0;
        let right = self.felt_x + self.felt_width;
        let top = self.felt_y;
        let bottom = self.felt_y + self.felt_height;
        [
            Pocket::corner(Vec2::new(left, top), Corner::TopLeft),
            Pocket::middle(Vec2::new(mid, top), Rail::Top),
            Pocket::corner(Vec2::new(right, top), Corner::TopRight),
            Pocket::corner(Vec2::new(left, bottom), Corner::BottomLeft),
            Pocket::middle(Vec2::new(mid, bottom), Rail::Bottom),
            Pocket::corner(Vec2::new(right, bottom), Corner::BottomRight),
        ]
    }

    /// Region a ball centre may occupy without touching a cushion.
    pub fn playable_bounds(&self, ball_radius: f32) -> Bounds {
        let inset = self.cushion_width + ball_radius;
        Bounds {
            min: Vec2::new(self.felt_x + inset, self.felt_y + inset),
            max: Vec2::new(
                self.felt_x + self.felt_width - inset,
                self.felt_y + self.felt_height - inset,
            ),
        }
    }

    pub fn felt_center_y(&self) -> f32 {
        self.felt_y + self.felt_height / 2.0
    }

    /// Fixed cue-ball starting spot (head string, quarter of the way in).
    pub fn cue_spot(&self) -> Vec2 {
        Vec2::new(self.felt_x + self.felt_width * 0.25, self.felt_center_y())
    }

    /// Rack apex; also the origin of the clear-spot search.
    pub fn rack_spot(&self) -> Vec2 {
        Vec2::new(self.felt_x + self.felt_width * 0.75, self.felt_center_y())
    }

    pub fn contains_felt(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= self.felt_x + margin
            && pos.x <= self.felt_x + self.felt_width - margin
            && pos.y >= self.felt_y + margin
            && pos.y <= self.felt_y + self.felt_height - margin
    }
}

/// Axis-aligned bounds of the playable area for a ball centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn crosses_x(&self, pos: Vec2) -> bool {
        pos.x > self.max.x || pos.x < self.min.x
    }

    pub fn crosses_y(&self, pos: Vec2) -> bool {
        pos.y > self.max.y || pos.y < self.min.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Direction (pocket -> ball) of a shot entering along the pocket's diagonal.
    pub fn ideal_angle(self) -> f32 {
        match self {
            Corner::TopLeft => FRAC_PI_4,
            Corner::TopRight => 3.0 * FRAC_PI_4,
            Corner::BottomLeft => -FRAC_PI_4,
            Corner::BottomRight => -3.0 * FRAC_PI_4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rail {
    Top,
    Bottom,
}

impl Rail {
    /// Direction (pocket -> ball) perpendicular to the rail, into the felt.
    pub fn approach_angle(self) -> f32 {
        match self {
            Rail::Top => FRAC_PI_2,
            Rail::Bottom => -FRAC_PI_2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PocketKind {
    Corner(Corner),
    Middle(Rail),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pocket {
    pub position: Vec2,
    pub kind: PocketKind,
}

impl Pocket {
    pub fn corner(position: Vec2, corner: Corner) -> Self {
        Self {
            position,
            kind: PocketKind::Corner(corner),
        }
    }

    pub fn middle(position: Vec2, rail: Rail) -> Self {
        Self {
            position,
            kind: PocketKind::Middle(rail),
        }
    }

    pub fn base_radius(&self, table: &TableConfig) -> f32 {
        match self.kind {
            PocketKind::Corner(_) => table.corner_pocket_radius,
            PocketKind::Middle(_) => table.middle_pocket_radius,
        }
    }

    /// Capture radius after the global sensitivity scale.
    pub fn effective_radius(&self, table: &TableConfig) -> f32 {
        self.base_radius(table) * table.pocket_sensitivity
    }
}
