//! Tool system for freehand strokes.

use crate::brush::{BrushSettings, SmudgeStroke};
use crate::raster::PixelBuffer;
use crate::recognize::{RecognitionConfig, ShapeDetection};
use crate::shapes::{Freehand, StrokeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Plain pen; the stroke is kept as drawn.
    #[default]
    Freehand,
    /// Pen whose stroke is replaced by a recognized primitive when possible.
    QuickShape,
    /// Smudge brush working directly on the raster.
    Smudge,
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// Pointer is down.
    Active {
        /// Current point of the interaction.
        current: Point,
    },
}

/// Default tolerance, in pixels, for simplifying kept freehand strokes.
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 0.5;

/// What a finished stroke produced.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeOutcome {
    /// Keep the stroke as drawn.
    Freehand(Freehand),
    /// Replace the stroke with a recognized primitive.
    Shape { shape: ShapeDetection, style: StrokeStyle },
    /// The raster was smudged in place; `dabs` counts the dabs actually painted.
    Smudged { dabs: usize },
}

/// Manages the current tool, the accumulated points and any live smudge stroke.
#[derive(Debug)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    /// Style applied to new pen strokes.
    pub current_style: StrokeStyle,
    /// Smudge brush parameters.
    pub brush: BrushSettings,
    /// Quick-shape thresholds.
    pub recognition: RecognitionConfig,
    /// Ramer-Douglas-Peucker tolerance applied to kept freehand strokes.
    /// Zero or less keeps every point.
    pub simplify_tolerance: f64,
    /// Accumulated points for the current stroke.
    points: Vec<Point>,
    /// Live smudge stroke, ended on drop.
    smudge: Option<SmudgeStroke>,
    /// Number of smudge dabs painted this stroke.
    dabs: usize,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::default(),
            current_style: StrokeStyle::default(),
            brush: BrushSettings::default(),
            recognition: RecognitionConfig::default(),
            simplify_tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
            points: Vec::new(),
            smudge: None,
            dabs: 0,
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, abandoning any stroke in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.cancel();
        self.current_tool = tool;
    }

    /// Pointer down.
    pub fn begin(&mut self, raster: &PixelBuffer, point: Point) {
        self.cancel();
        self.points.push(point);
        if self.current_tool == ToolKind::Smudge {
            self.smudge = Some(SmudgeStroke::begin(raster, point, self.brush));
        }
        self.state = ToolState::Active { current: point };
    }

    /// Pointer move.
    pub fn update(&mut self, raster: &mut PixelBuffer, point: Point) {
        let ToolState::Active { current } = &mut self.state else {
            return;
        };
        *current = point;
        self.points.push(point);
        if let Some(stroke) = self.smudge.as_mut() {
            if stroke.continue_to(raster, point) {
                self.dabs += 1;
            }
        }
    }

    /// Pointer up. Returns what the stroke produced, if anything.
    pub fn end(&mut self) -> Option<StrokeOutcome> {
        if !self.is_active() {
            return None;
        }
        let points = std::mem::take(&mut self.points);
        let outcome = match self.current_tool {
            ToolKind::Smudge => {
                if let Some(stroke) = self.smudge.take() {
                    stroke.finish();
                }
                Some(StrokeOutcome::Smudged { dabs: self.dabs })
            }
            ToolKind::QuickShape => {
                let freehand = Freehand::from_points(points).with_style(self.current_style.clone());
                let shape = freehand.recognize(&self.recognition);
                if shape.is_detected() {
                    Some(StrokeOutcome::Shape {
                        shape,
                        style: freehand.style,
                    })
                } else {
                    self.freehand_outcome(freehand)
                }
            }
            ToolKind::Freehand => {
                let freehand = Freehand::from_points(points).with_style(self.current_style.clone());
                self.freehand_outcome(freehand)
            }
        };
        self.cancel();
        outcome
    }

    /// Cancel the current interaction, ending any smudge stroke.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
        self.points.clear();
        self.smudge = None;
        self.dabs = 0;
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    /// Get the accumulated points of the current stroke.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Live smudge stroke, if the smudge tool is in use.
    pub fn smudge_stroke(&self) -> Option<&SmudgeStroke> {
        self.smudge.as_ref()
    }

    /// Keep a freehand stroke of at least two points, simplified.
    /// Recognition has already seen the raw points.
    fn freehand_outcome(&self, mut freehand: Freehand) -> Option<StrokeOutcome> {
        if freehand.len() < 2 {
            return None;
        }
        if self.simplify_tolerance > 0.0 {
            freehand.simplify(self.simplify_tolerance);
        }
        Some(StrokeOutcome::Freehand(freehand))
    }
}
