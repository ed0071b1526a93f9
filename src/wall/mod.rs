//! Picture frame wall plans.
//!
//! A [WallPlan] describes a wall and the frames hung on it, each placed either at a fixed
//! point or relative to a frame placed before it. [WallPlan::resolve] turns the plan into
//! concrete frame positions and the distances a person hanging them needs to measure.
//! All lengths are in centimetres, with the origin at the bottom-left corner of the wall.

mod render;

pub use render::*;

use crate::colour::{colours, Colour};
use crate::pagesize::Paper;
use crate::PDFError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

fn default_spacing() -> f32 {
    6.0
}

/// A wall and the frames on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WallPlan {
    #[serde(default)]
    pub title: Option<String>,
    pub width: f32,
    pub height: f32,
    /// Gap between a frame and the frame it is placed next to
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    pub frames: Vec<FrameSpec>,
    #[serde(default)]
    pub decorations: Vec<Decoration>,
    #[serde(default)]
    pub guides: Guides,
    #[serde(default)]
    pub page_size: Paper,
    /// Page orientation. When unset, landscape is used for walls wider than they are tall.
    #[serde(default)]
    pub landscape: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameSpec {
    pub id: String,
    /// Shown on the frame in the diagram, defaults to `id`
    #[serde(default)]
    pub label: Option<String>,
    pub width: f32,
    pub height: f32,
    /// Hang the frame turned a quarter, swapping width and height
    #[serde(default)]
    pub rotated: bool,
    pub anchor: Anchor,
}

impl FrameSpec {
    /// Width and height as hung
    pub fn placed_size(&self) -> (f32, f32) {
        if self.rotated {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// Where a frame's centre goes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anchor {
    /// A fixed point on the wall
    At { x: f32, y: f32 },
    /// Offset from the centre of the wall
    Centre {
        #[serde(default)]
        dx: f32,
        #[serde(default)]
        dy: f32,
    },
    LeftOf(Relative),
    RightOf(Relative),
    Above(Relative),
    Below(Relative),
}

/// Placement next to another frame, [WallPlan::spacing] away from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relative {
    pub of: String,
    #[serde(default)]
    pub align: Align,
    /// Extra shift along the edge, positive is up or right
    #[serde(default)]
    pub offset: f32,
}

/// How a frame lines up with its neighbour along the shared side. `Start` is the top edge
/// for frames placed left or right, and the left edge for frames placed above or below.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Centre,
    Start,
    End,
}

/// A coloured box drawn on the wall, like a plant or a piece of furniture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Decoration {
    pub label: String,
    /// Bottom-left corner
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_decoration_fill")]
    pub fill: Colour,
    #[serde(default = "default_decoration_text")]
    pub text_colour: Colour,
}

fn default_decoration_fill() -> Colour {
    colours::OLIVE_DRAB
}

fn default_decoration_text() -> Colour {
    colours::WHITE
}

/// Which reference lines and measurements are drawn
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Guides {
    pub diagonals: bool,
    pub centre_line: bool,
    /// Horizontal line through the middle of the wall
    pub midline: bool,
    pub top_measurements: bool,
    pub bottom_measurements: bool,
}

impl Default for Guides {
    fn default() -> Self {
        Guides {
            diagonals: true,
            centre_line: true,
            midline: false,
            top_measurements: true,
            bottom_measurements: false,
        }
    }
}

/// An axis-aligned box on the wall, stored by its centre
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameBox {
    pub cx: f32,
    pub cy: f32,
    pub width: f32,
    pub height: f32,
}

impl FrameBox {
    pub fn left(&self) -> f32 {
        self.cx - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.cx + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.cy + self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.cy - self.height / 2.0
    }

    /// Boxes that only share an edge don't overlap
    pub fn overlaps(&self, other: &FrameBox) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.bottom() < other.top()
            && other.bottom() < self.top()
    }

    pub fn inside(&self, width: f32, height: f32) -> bool {
        self.left() >= 0.0 && self.bottom() >= 0.0 && self.right() <= width && self.top() <= height
    }
}

/// A frame with its final position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedFrame {
    pub id: String,
    pub label: String,
    /// Size as listed in the plan, before any rotation
    pub nominal: (f32, f32),
    pub bounds: FrameBox,
}

/// Distances from the wall edges to a frame, measured along its vertical centre line
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub id: String,
    pub x: f32,
    pub from_top: f32,
    pub from_bottom: f32,
}

/// Something odd about a plan that doesn't stop it being drawn
#[derive(Debug, Clone, PartialEq, Display)]
pub enum WallWarning {
    #[display("frames '{_0}' and '{_1}' overlap")]
    Overlap(String, String),
    #[display("frame '{_0}' extends past the edge of the wall")]
    OutsideWall(String),
    #[display("the row is {_0:.1} cm wider than the wall")]
    RowTooWide(f32),
}

/// A resolved plan
#[derive(Debug, Clone, PartialEq)]
pub struct WallLayout {
    pub width: f32,
    pub height: f32,
    pub frames: Vec<PlacedFrame>,
    pub warnings: Vec<WallWarning>,
}

impl WallLayout {
    pub fn measurements(&self) -> Vec<Measurement> {
        self.frames
            .iter()
            .map(|frame| Measurement {
                id: frame.id.clone(),
                x: frame.bounds.cx,
                from_top: self.height - frame.bounds.top(),
                from_bottom: frame.bounds.bottom(),
            })
            .collect()
    }
}

impl WallPlan {
    /// Read a plan from JSON. A document with a `row` list instead of `frames` is read as a
    /// [RowPlan] and laid out with [WallPlan::centred_row].
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<WallPlan, PDFError> {
        let raw = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        if value.get("row").is_some() {
            let row: RowPlan = serde_json::from_value(value)?;
            Ok(row.into_plan()?.0)
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }

    pub fn landscape(&self) -> bool {
        self.landscape.unwrap_or(self.width > self.height)
    }

    fn validate(&self) -> Result<(), PDFError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(PDFError::invalid_plan("wall width and height must be positive"));
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(PDFError::invalid_plan("spacing can't be negative"));
        }
        if let Some(frame) = self
            .frames
            .iter()
            .find(|f| !positive(f.width) || !positive(f.height))
        {
            return Err(PDFError::invalid_plan(format!(
                "frame '{}' must have a positive size",
                frame.id
            )));
        }
        Ok(())
    }

    /// Place every frame in order. Relative anchors may only refer to frames listed
    /// earlier.
    pub fn resolve(&self) -> Result<WallLayout, PDFError> {
        self.validate()?;

        let mut placed: HashMap<&str, FrameBox> = HashMap::with_capacity(self.frames.len());
        let mut frames = Vec::with_capacity(self.frames.len());
        for spec in &self.frames {
            if placed.contains_key(spec.id.as_str()) {
                return Err(PDFError::DuplicateFrame(spec.id.clone()));
            }
            let bounds = self.place(spec, &placed)?;
            debug!(frame = %spec.id, x = bounds.cx, y = bounds.cy, "placed frame");
            placed.insert(spec.id.as_str(), bounds);
            frames.push(PlacedFrame {
                id: spec.id.clone(),
                label: spec.label().to_string(),
                nominal: (spec.width, spec.height),
                bounds,
            });
        }

        let mut warnings = Vec::new();
        for (i, a) in frames.iter().enumerate() {
            if !a.bounds.inside(self.width, self.height) {
                warnings.push(WallWarning::OutsideWall(a.id.clone()));
            }
            for b in &frames[i + 1..] {
                if a.bounds.overlaps(&b.bounds) {
                    warnings.push(WallWarning::Overlap(a.id.clone(), b.id.clone()));
                }
            }
        }
        for warning in &warnings {
            warn!("{warning}");
        }

        Ok(WallLayout {
            width: self.width,
            height: self.height,
            frames,
            warnings,
        })
    }

    fn place(&self, spec: &FrameSpec, placed: &HashMap<&str, FrameBox>) -> Result<FrameBox, PDFError> {
        let (width, height) = spec.placed_size();
        let at = |cx: f32, cy: f32| FrameBox {
            cx,
            cy,
            width,
            height,
        };
        let neighbour = |relative: &Relative| {
            placed
                .get(relative.of.as_str())
                .copied()
                .ok_or_else(|| PDFError::UnknownFrame {
                    frame: spec.id.clone(),
                    anchor: relative.of.clone(),
                })
        };
        // centre along the shared edge, for frames beside (vertical) or above/below
        // (horizontal) their neighbour
        let beside = |of: &FrameBox, relative: &Relative| {
            relative.offset
                + match relative.align {
                    Align::Centre => of.cy,
                    Align::Start => of.top() - height / 2.0,
                    Align::End => of.bottom() + height / 2.0,
                }
        };
        let stacked = |of: &FrameBox, relative: &Relative| {
            relative.offset
                + match relative.align {
                    Align::Centre => of.cx,
                    Align::Start => of.left() + width / 2.0,
                    Align::End => of.right() - width / 2.0,
                }
        };

        Ok(match &spec.anchor {
            Anchor::At { x, y } => at(*x, *y),
            Anchor::Centre { dx, dy } => at(self.width / 2.0 + dx, self.height / 2.0 + dy),
            Anchor::LeftOf(relative) => {
                let of = neighbour(relative)?;
                at(of.left() - self.spacing - width / 2.0, beside(&of, relative))
            }
            Anchor::RightOf(relative) => {
                let of = neighbour(relative)?;
                at(of.right() + self.spacing + width / 2.0, beside(&of, relative))
            }
            Anchor::Above(relative) => {
                let of = neighbour(relative)?;
                at(stacked(&of, relative), of.top() + self.spacing + height / 2.0)
            }
            Anchor::Below(relative) => {
                let of = neighbour(relative)?;
                at(stacked(&of, relative), of.bottom() - self.spacing - height / 2.0)
            }
        })
    }

    /// Lay frames out left to right in one row across the wall, each hung with its long
    /// side vertical. The smallest frame is centred on the wall's midline and the others
    /// share its bottom edge. The row is centred horizontally; the side margin is returned
    /// and is clamped to zero when the row is wider than the wall.
    pub fn centred_row(
        width: f32,
        height: f32,
        spacing: f32,
        frames: &[RowFrame],
    ) -> Result<(WallPlan, f32), PDFError> {
        if frames.is_empty() {
            return Err(PDFError::invalid_plan("a row needs at least one frame"));
        }

        let placed: Vec<(f32, f32)> = frames
            .iter()
            .map(|f| (f.width.min(f.height), f.width.max(f.height)))
            .collect();
        let total = placed.iter().map(|(w, _)| w).sum::<f32>() + spacing * (frames.len() - 1) as f32;
        let mut margin = (width - total) / 2.0;
        if margin < 0.0 {
            warn!("{}", WallWarning::RowTooWide(total - width));
            margin = 0.0;
        }

        let smallest = placed
            .iter()
            .map(|(w, h)| w * h)
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let bottom = height / 2.0 - placed[smallest].1 / 2.0;

        let mut x = margin;
        let specs = frames
            .iter()
            .zip(&placed)
            .map(|(frame, &(w, h))| {
                let spec = FrameSpec {
                    id: frame.id.clone(),
                    label: frame.label.clone(),
                    width: frame.width,
                    height: frame.height,
                    rotated: frame.width > frame.height,
                    anchor: Anchor::At {
                        x: x + w / 2.0,
                        y: bottom + h / 2.0,
                    },
                };
                x += w + spacing;
                spec
            })
            .collect();

        let plan = WallPlan {
            title: None,
            width,
            height,
            spacing,
            frames: specs,
            decorations: Vec::new(),
            guides: Guides {
                midline: true,
                bottom_measurements: true,
                ..Guides::default()
            },
            page_size: Paper::A4,
            landscape: None,
        };
        Ok((plan, margin))
    }
}

/// A frame in a [RowPlan]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowFrame {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub width: f32,
    pub height: f32,
}

/// The JSON form of [WallPlan::centred_row]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowPlan {
    #[serde(default)]
    pub title: Option<String>,
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    pub row: Vec<RowFrame>,
    #[serde(default)]
    pub decorations: Vec<Decoration>,
    #[serde(default)]
    pub page_size: Paper,
    #[serde(default)]
    pub landscape: Option<bool>,
}

impl RowPlan {
    pub fn into_plan(self) -> Result<(WallPlan, f32), PDFError> {
        let (mut plan, margin) = WallPlan::centred_row(self.width, self.height, self.spacing, &self.row)?;
        plan.title = self.title;
        plan.decorations = self.decorations;
        plan.page_size = self.page_size;
        plan.landscape = self.landscape;
        Ok((plan, margin))
    }
}
