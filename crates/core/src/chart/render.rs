use tracing::debug;

use super::scale::{tick_label, tick_step, LinearScale};
use super::scene::{ChartScene, Element, Label, Point, Rgba, Stroke, TextAnchor};
use crate::controls::ControlState;
use crate::simulator::TrialMatrix;
use crate::stats::trial_stats;

/// Fixed vertical domain; data outside it is drawn off-plot, never dropped.
pub const Y_DOMAIN: (f64, f64) = (30.0, 85.0);

pub const X_TITLE: &str = "Trial Number";
pub const Y_TITLE: &str = "Measured Output";

/// Ten-color qualitative palette (Category10).
pub const SERIES_COLORS: [Rgba; 10] = [
    Rgba::rgb(0x1f, 0x77, 0xb4), // blue
    Rgba::rgb(0xff, 0x7f, 0x0e), // orange
    Rgba::rgb(0x2c, 0xa0, 0x2c), // green
    Rgba::rgb(0xd6, 0x27, 0x28), // red
    Rgba::rgb(0x94, 0x67, 0xbd), // purple
    Rgba::rgb(0x8c, 0x56, 0x4b), // brown
    Rgba::rgb(0xe3, 0x77, 0xc2), // pink
    Rgba::rgb(0x7f, 0x7f, 0x7f), // gray
    Rgba::rgb(0xbc, 0xbd, 0x22), // olive
    Rgba::rgb(0x17, 0xbe, 0xcf), // cyan
];

const GRID_COLOR: Rgba = Rgba::rgb(0xe0, 0xe0, 0xe0);
const AXIS_COLOR: Rgba = Rgba::BLACK;
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const TICK_FONT_PX: f64 = 10.0;
const TITLE_FONT_PX: f64 = 12.0;
const PATH_WIDTH: f64 = 1.5;
const MEAN_WIDTH: f64 = 3.0;
const BAND_ALPHA: f64 = 0.1;

pub fn subject_color(subject: usize) -> Rgba {
    SERIES_COLORS[subject % SERIES_COLORS.len()]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Surface size and the margins around the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 400.0,
            margins: Margins {
                top: 20.0,
                right: 30.0,
                bottom: 50.0,
                left: 60.0,
            },
        }
    }
}

impl ChartLayout {
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margins.left - self.margins.right).max(1.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.margins.top - self.margins.bottom).max(1.0)
    }

    /// Trial axis: `[0.5, trial_count + 0.5]` across the plot width.
    pub fn x_scale(&self, trial_count: usize) -> LinearScale {
        let left = self.margins.left;
        LinearScale::new(
            (0.5, trial_count as f64 + 0.5),
            (left, left + self.inner_width()),
        )
    }

    pub fn y_scale(&self) -> LinearScale {
        let top = self.margins.top;
        LinearScale::new(Y_DOMAIN, (top + self.inner_height(), top))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_group_average: bool,
    pub show_individual_paths: bool,
}

/// Build a complete frame for `matrix` under the current controls.
///
/// The trial axis follows `controls.trial_count`; trajectories and the
/// group band come from the matrix itself.
pub fn render(matrix: &TrialMatrix, controls: &ControlState, layout: &ChartLayout) -> ChartScene {
    let display = controls.display();
    let trial_count = controls.trial_count.max(1);
    let x = layout.x_scale(trial_count);
    let y = layout.y_scale();

    let mut scene = ChartScene::new(layout.width, layout.height);
    let top = layout.margins.top;
    let bottom = top + layout.inner_height();
    let left = layout.margins.left;
    let right = left + layout.inner_width();

    for trial in 1..=trial_count {
        let px = x.map(trial as f64);
        scene.push(Element::GridLine {
            from: Point::new(px, top),
            to: Point::new(px, bottom),
            stroke: Stroke {
                color: GRID_COLOR,
                width: 1.0,
            },
        });
    }

    let axis = Stroke {
        color: AXIS_COLOR,
        width: 1.0,
    };

    // Bottom axis: integer ticks, one per trial.
    scene.push(Element::AxisLine {
        from: Point::new(left, bottom),
        to: Point::new(right, bottom),
        stroke: axis,
    });
    for t in x.ticks(trial_count) {
        let px = x.map(t);
        scene.push(Element::Tick {
            from: Point::new(px, bottom),
            to: Point::new(px, bottom + TICK_SIZE),
            stroke: axis,
        });
        scene.push(Element::Label(Label {
            text: tick_label(t.round(), 1.0),
            at: Point::new(px, bottom + TICK_SIZE + TICK_PADDING + TICK_FONT_PX * 0.5),
            anchor: TextAnchor::Middle,
            rotation_deg: 0.0,
            font_px: TICK_FONT_PX,
            color: AXIS_COLOR,
        }));
    }
    scene.push(Element::Label(Label {
        text: X_TITLE.to_string(),
        at: Point::new(left + layout.inner_width() * 0.5, bottom + 40.0),
        anchor: TextAnchor::Middle,
        rotation_deg: 0.0,
        font_px: TITLE_FONT_PX,
        color: AXIS_COLOR,
    }));

    // Left axis.
    scene.push(Element::AxisLine {
        from: Point::new(left, top),
        to: Point::new(left, bottom),
        stroke: axis,
    });
    let y_step = tick_step(Y_DOMAIN.0, Y_DOMAIN.1, 10);
    for t in y.ticks(10) {
        let py = y.map(t);
        scene.push(Element::Tick {
            from: Point::new(left - TICK_SIZE, py),
            to: Point::new(left, py),
            stroke: axis,
        });
        scene.push(Element::Label(Label {
            text: tick_label(t, y_step),
            at: Point::new(left - TICK_SIZE - TICK_PADDING, py),
            anchor: TextAnchor::End,
            rotation_deg: 0.0,
            font_px: TICK_FONT_PX,
            color: AXIS_COLOR,
        }));
    }
    scene.push(Element::Label(Label {
        text: Y_TITLE.to_string(),
        at: Point::new(TITLE_FONT_PX, top + layout.inner_height() * 0.5),
        anchor: TextAnchor::Middle,
        rotation_deg: -90.0,
        font_px: TITLE_FONT_PX,
        color: AXIS_COLOR,
    }));

    let to_points = |values: &mut dyn Iterator<Item = f64>| -> Vec<Point> {
        values
            .enumerate()
            .map(|(i, v)| Point::new(x.map((i + 1) as f64), y.map(v)))
            .collect()
    };

    if display.show_individual_paths {
        for (subject, row) in matrix.rows().iter().enumerate() {
            scene.push(Element::Trajectory {
                subject,
                points: to_points(&mut row.iter().copied()),
                stroke: Stroke {
                    color: subject_color(subject),
                    width: PATH_WIDTH,
                },
            });
        }
    }

    if display.show_group_average && matrix.subject_count() > 0 {
        let stats = trial_stats(matrix);
        scene.push(Element::MeanLine {
            points: to_points(&mut stats.iter().map(|s| s.mean)),
            stroke: Stroke {
                color: Rgba::BLACK,
                width: MEAN_WIDTH,
            },
        });
        scene.push(Element::Band {
            upper: to_points(&mut stats.iter().map(|s| s.upper())),
            lower: to_points(&mut stats.iter().map(|s| s.lower())),
            fill: Rgba::BLACK.with_alpha(BAND_ALPHA),
        });
    }

    debug!(
        elements = scene.len(),
        trials = trial_count,
        subjects = matrix.subject_count(),
        "rendered chart scene"
    );
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ElementKind;

    fn controls(trials: usize, group: bool, paths: bool) -> ControlState {
        ControlState {
            trial_count: trials,
            subject_count: 2,
            show_group_average: group,
            show_individual_paths: paths,
            ..ControlState::default()
        }
    }

    #[test]
    fn default_layout_matches_surface() {
        let l = ChartLayout::default();
        assert_eq!(l.inner_width(), 610.0);
        assert_eq!(l.inner_height(), 330.0);
        let y = l.y_scale();
        assert_eq!(y.map(30.0), 350.0);
        assert_eq!(y.map(85.0), 20.0);
        let x = l.x_scale(4);
        assert_eq!(x.map(0.5), 60.0);
        assert_eq!(x.map(4.5), 670.0);
    }

    #[test]
    fn palette_cycles_past_ten_subjects() {
        assert_eq!(subject_color(0), subject_color(10));
        assert_ne!(subject_color(0), subject_color(1));
    }

    #[test]
    fn gridline_per_trial() {
        let m = TrialMatrix::from_rows(vec![vec![50.0; 7]; 2]);
        let scene = render(&m, &controls(7, true, true), &ChartLayout::default());
        assert_eq!(scene.count(ElementKind::GridLine), 7);
        assert_eq!(scene.count(ElementKind::Trajectory), 2);
        assert_eq!(scene.count(ElementKind::MeanLine), 1);
        assert_eq!(scene.count(ElementKind::Band), 1);
    }

    #[test]
    fn axis_titles_and_ticks_present() {
        let m = TrialMatrix::from_rows(vec![vec![50.0; 3]; 2]);
        let scene = render(&m, &controls(3, false, false), &ChartLayout::default());
        let texts: Vec<&str> = scene.labels().map(|l| l.text.as_str()).collect();
        assert!(texts.contains(&X_TITLE));
        assert!(texts.contains(&Y_TITLE));
        for t in ["1", "2", "3", "30", "55", "85"] {
            assert!(texts.contains(&t), "missing tick {t}");
        }
        let y_title = scene.labels().find(|l| l.text == Y_TITLE).unwrap();
        assert_eq!(y_title.rotation_deg, -90.0);
    }

    #[test]
    fn band_spans_mean_plus_minus_sd() {
        let m = TrialMatrix::from_rows(vec![vec![40.0, 50.0], vec![60.0, 50.0]]);
        let layout = ChartLayout::default();
        let scene = render(&m, &controls(2, true, false), &layout);
        let y = layout.y_scale();
        let sd = 200f64.sqrt();
        let band = scene
            .elements()
            .iter()
            .find_map(|e| match e {
                Element::Band { upper, lower, .. } => Some((upper.clone(), lower.clone())),
                _ => None,
            })
            .unwrap();
        assert!((band.0[0].y - y.map(50.0 + sd)).abs() < 1e-9);
        assert!((band.1[0].y - y.map(50.0 - sd)).abs() < 1e-9);
        assert_eq!(band.0[1].y, band.1[1].y);
    }

    #[test]
    fn trajectories_use_subject_colors_in_order() {
        let m = TrialMatrix::from_rows(vec![vec![50.0, 51.0]; 12]);
        let c = ControlState {
            subject_count: 12,
            ..controls(2, false, true)
        };
        let scene = render(&m, &c, &ChartLayout::default());
        let colors: Vec<Rgba> = scene
            .elements()
            .iter()
            .filter_map(|e| match e {
                Element::Trajectory { stroke, subject, .. } => {
                    assert_eq!(stroke.width, 1.5);
                    Some((*subject, stroke.color))
                }
                _ => None,
            })
            .map(|(s, c)| {
                assert_eq!(c, subject_color(s));
                c
            })
            .collect();
        assert_eq!(colors.len(), 12);
        assert_eq!(colors[11], SERIES_COLORS[1]);
    }
}
