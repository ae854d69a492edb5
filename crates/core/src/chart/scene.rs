//! Backend-neutral drawing list.
//!
//! All coordinates are absolute surface pixels, y growing downward.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// sRGB color with alpha in [0,1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb` when opaque, `rgba(...)` otherwise.
    ///
    /// Alpha goes through integer math; float `format!` has panicked on
    /// some wasm toolchains.
    pub fn css(&self) -> String {
        if self.a >= 1.0 {
            return format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b);
        }
        let milli = (self.a.clamp(0.0, 1.0) * 1000.0).round() as u32;
        format!(
            "rgba({}, {}, {}, {}.{:03})",
            self.r,
            self.g,
            self.b,
            milli / 1000,
            milli % 1000
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub at: Point,
    pub anchor: TextAnchor,
    /// Clockwise degrees around `at`; -90 reads bottom-to-top.
    pub rotation_deg: f64,
    pub font_px: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    GridLine { from: Point, to: Point, stroke: Stroke },
    AxisLine { from: Point, to: Point, stroke: Stroke },
    Tick { from: Point, to: Point, stroke: Stroke },
    Label(Label),
    Trajectory {
        subject: usize,
        points: Vec<Point>,
        stroke: Stroke,
    },
    MeanLine { points: Vec<Point>, stroke: Stroke },
    /// Filled region between `upper` and `lower`, both ordered by trial.
    Band {
        upper: Vec<Point>,
        lower: Vec<Point>,
        fill: Rgba,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    GridLine,
    AxisLine,
    Tick,
    Label,
    Trajectory,
    MeanLine,
    Band,
}

impl ElementKind {
    /// Axes, gridlines and their text.
    pub fn is_frame(self) -> bool {
        matches!(
            self,
            ElementKind::GridLine | ElementKind::AxisLine | ElementKind::Tick | ElementKind::Label
        )
    }
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::GridLine { .. } => ElementKind::GridLine,
            Element::AxisLine { .. } => ElementKind::AxisLine,
            Element::Tick { .. } => ElementKind::Tick,
            Element::Label(_) => ElementKind::Label,
            Element::Trajectory { .. } => ElementKind::Trajectory,
            Element::MeanLine { .. } => ElementKind::MeanLine,
            Element::Band { .. } => ElementKind::Band,
        }
    }
}

/// One complete frame. Painters clear the surface and draw `elements` in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    width: f64,
    height: f64,
    background: Rgba,
    elements: Vec<Element>,
}

impl ChartScene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: Rgba::WHITE,
            elements: Vec::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn count(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind() == kind).count()
    }

    /// True when nothing but axes and gridlines was drawn.
    pub fn is_frame_only(&self) -> bool {
        self.elements.iter().all(|e| e.kind().is_frame())
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.elements.iter().filter_map(|e| match e {
            Element::Label(l) => Some(l),
            _ => None,
        })
    }
}
