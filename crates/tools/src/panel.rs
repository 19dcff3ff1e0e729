use stargaze_common::Color;
use stargaze_galaxy::GalaxyParameters;

/// Errors from panel operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PanelError {
    #[error("no control named {0:?}")]
    UnknownControl(String),
    #[error("control {name:?} holds a {expected}, got a {found}")]
    KindMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// A value a control can hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Number(f32),
    Toggle(bool),
    Color(Color),
}

impl ControlValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Toggle(_) => "toggle",
            Self::Color(_) => "color",
        }
    }

    pub fn as_number(self) -> Option<f32> {
        match self {
            Self::Number(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_toggle(self) -> Option<bool> {
        match self {
            Self::Toggle(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(self) -> Option<Color> {
        match self {
            Self::Color(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for ControlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Toggle(v) => write!(f, "{v}"),
            Self::Color(c) => write!(f, "{c}"),
        }
    }
}

/// One named control with its live value and last committed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub name: String,
    /// `(min, max, step)` for number controls.
    range: Option<(f32, f32, f32)>,
    live: ControlValue,
    committed: ControlValue,
}

impl Control {
    pub fn value(&self) -> ControlValue {
        self.live
    }

    pub fn committed(&self) -> ControlValue {
        self.committed
    }

    pub fn range(&self) -> Option<(f32, f32, f32)> {
        self.range
    }

    fn accept(&self, value: ControlValue) -> Result<ControlValue, PanelError> {
        match (self.live, value) {
            (ControlValue::Number(_), ControlValue::Number(v)) => {
                let v = match self.range {
                    Some((min, max, step)) => snap(v, min, max, step),
                    None => v,
                };
                Ok(ControlValue::Number(v))
            }
            (ControlValue::Toggle(_), ControlValue::Toggle(_))
            | (ControlValue::Color(_), ControlValue::Color(_)) => Ok(value),
            (live, other) => Err(PanelError::KindMismatch {
                name: self.name.clone(),
                expected: live.kind(),
                found: other.kind(),
            }),
        }
    }
}

/// Snap to the step grid anchored at `min`, then clamp into `[min, max]`.
///
/// Never panics; a NaN bound is ignored.
fn snap(value: f32, min: f32, max: f32, step: f32) -> f32 {
    let snapped = if step > 0.0 {
        min + ((value - min) / step).round() * step
    } else {
        value
    };
    snapped.max(min).min(max)
}

/// A committed edit.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelChange {
    pub name: String,
    pub previous: ControlValue,
    pub value: ControlValue,
}

/// Ordered set of named controls.
///
/// `drag` moves a control's live value as a user scrubs it. `finish_change`
/// commits, and reports a change only when the committed value moved.
#[derive(Debug, Clone, Default)]
pub struct DebugPanel {
    controls: Vec<Control>,
}

impl DebugPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a number slider. The initial value is taken as-is; crossed
    /// bounds are swapped.
    pub fn number(mut self, name: &str, value: f32, min: f32, max: f32, step: f32) -> Self {
        let range = if min <= max {
            (min, max, step)
        } else {
            (max, min, step)
        };
        self.push(name, Some(range), ControlValue::Number(value));
        self
    }

    pub fn toggle(mut self, name: &str, value: bool) -> Self {
        self.push(name, None, ControlValue::Toggle(value));
        self
    }

    pub fn color(mut self, name: &str, value: Color) -> Self {
        self.push(name, None, ControlValue::Color(value));
        self
    }

    fn push(&mut self, name: &str, range: Option<(f32, f32, f32)>, value: ControlValue) {
        self.controls.retain(|c| c.name != name);
        self.controls.push(Control {
            name: name.to_string(),
            range,
            live: value,
            committed: value,
        });
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn get(&self, name: &str) -> Result<&Control, PanelError> {
        self.controls
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| PanelError::UnknownControl(name.to_string()))
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Control, PanelError> {
        self.controls
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| PanelError::UnknownControl(name.to_string()))
    }

    /// Move the live value without committing. Returns the value actually set.
    pub fn drag(&mut self, name: &str, value: ControlValue) -> Result<ControlValue, PanelError> {
        let control = self.get_mut(name)?;
        let accepted = control.accept(value)?;
        control.live = accepted;
        Ok(accepted)
    }

    /// Commit the live value of `name`.
    pub fn finish_change(&mut self, name: &str) -> Result<Option<PanelChange>, PanelError> {
        let control = self.get_mut(name)?;
        if control.live == control.committed {
            return Ok(None);
        }
        let change = PanelChange {
            name: control.name.clone(),
            previous: control.committed,
            value: control.live,
        };
        control.committed = control.live;
        tracing::debug!(
            control = %change.name,
            from = %change.previous,
            to = %change.value,
            "panel change committed"
        );
        Ok(Some(change))
    }

    /// Drag and commit in one step.
    pub fn set(
        &mut self,
        name: &str,
        value: ControlValue,
    ) -> Result<Option<PanelChange>, PanelError> {
        self.drag(name, value)?;
        self.finish_change(name)
    }
}

const COUNT: &str = "count";
const SIZE: &str = "size";
const RADIUS: &str = "radius";
const BRANCHES: &str = "branches";
const SPIN: &str = "spin";
const RANDOMNESS: &str = "randomness";
const RANDOMNESS_POWER: &str = "randomnessPower";
const INSIDE_COLOR: &str = "insideColor";
const OUTSIDE_COLOR: &str = "outsideColor";

/// Debug panel bound to galaxy parameters.
///
/// Only committed edits produce a new parameter set, so a caller regenerates
/// once per finished drag rather than once per intermediate value.
#[derive(Debug, Clone)]
pub struct GalaxyPanel {
    panel: DebugPanel,
    params: GalaxyParameters,
}

impl GalaxyPanel {
    pub fn new(params: GalaxyParameters) -> Self {
        let panel = DebugPanel::new()
            .number(COUNT, params.count as f32, 100.0, 10_000_000.0, 100.0)
            .number(SIZE, params.size, 0.001, 0.1, 0.001)
            .number(RADIUS, params.radius, 0.01, 20.0, 0.01)
            .number(BRANCHES, params.branches as f32, 2.0, 20.0, 1.0)
            .number(SPIN, params.spin, -5.0, 5.0, 0.001)
            .number(RANDOMNESS, params.randomness, 0.0, 2.0, 0.001)
            .number(RANDOMNESS_POWER, params.randomness_power, 1.0, 10.0, 0.001)
            .color(INSIDE_COLOR, params.inside_color)
            .color(OUTSIDE_COLOR, params.outside_color);
        Self { panel, params }
    }

    pub fn panel(&self) -> &DebugPanel {
        &self.panel
    }

    /// Parameters as of the last commit.
    pub fn parameters(&self) -> &GalaxyParameters {
        &self.params
    }

    pub fn drag(&mut self, name: &str, value: ControlValue) -> Result<ControlValue, PanelError> {
        self.panel.drag(name, value)
    }

    /// Commit `name`. Returns the full updated parameter set if it changed.
    pub fn commit(&mut self, name: &str) -> Result<Option<GalaxyParameters>, PanelError> {
        let Some(change) = self.panel.finish_change(name)? else {
            return Ok(None);
        };
        let p = &mut self.params;
        match (change.name.as_str(), change.value) {
            (COUNT, ControlValue::Number(v)) => p.count = v.round() as u32,
            (SIZE, ControlValue::Number(v)) => p.size = v,
            (RADIUS, ControlValue::Number(v)) => p.radius = v,
            (BRANCHES, ControlValue::Number(v)) => p.branches = v.round() as u32,
            (SPIN, ControlValue::Number(v)) => p.spin = v,
            (RANDOMNESS, ControlValue::Number(v)) => p.randomness = v,
            (RANDOMNESS_POWER, ControlValue::Number(v)) => p.randomness_power = v,
            (INSIDE_COLOR, ControlValue::Color(c)) => p.inside_color = c,
            (OUTSIDE_COLOR, ControlValue::Color(c)) => p.outside_color = c,
            (name, value) => {
                return Err(PanelError::KindMismatch {
                    name: name.to_string(),
                    expected: "galaxy parameter",
                    found: value.kind(),
                });
            }
        }
        Ok(Some(self.params.clone()))
    }

    /// Drag and commit in one step.
    pub fn set(
        &mut self,
        name: &str,
        value: ControlValue,
    ) -> Result<Option<GalaxyParameters>, PanelError> {
        self.drag(name, value)?;
        self.commit(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sandbox() -> DebugPanel {
        DebugPanel::new()
            .number("elevation", 0.0, -2.0, 2.0, 0.01)
            .toggle("visible", false)
            .toggle("wireframe", false)
            .color("color", Color::hex(0xff0000))
    }

    #[test]
    fn drag_clamps_and_snaps() {
        let mut panel = sandbox();
        assert_eq!(
            panel.drag("elevation", ControlValue::Number(5.0)).unwrap(),
            ControlValue::Number(2.0)
        );
        let v = panel
            .drag("elevation", ControlValue::Number(0.123))
            .unwrap()
            .as_number()
            .unwrap();
        assert!((v - 0.12).abs() < 1e-5);
    }

    #[test]
    fn crossed_bounds_do_not_panic() {
        let mut panel = DebugPanel::new()
            .number("swapped", 0.0, 2.0, -2.0, 0.5)
            .number("nan", 0.0, f32::NAN, 1.0, 0.1);
        assert_eq!(panel.get("swapped").unwrap().range(), Some((-2.0, 2.0, 0.5)));
        assert_eq!(
            panel.drag("swapped", ControlValue::Number(5.0)).unwrap(),
            ControlValue::Number(2.0)
        );
        let v = panel.drag("nan", ControlValue::Number(3.0)).unwrap();
        assert!(v.as_number().unwrap().is_finite());
    }

    #[test]
    fn drag_does_not_commit() {
        let mut panel = sandbox();
        panel.drag("elevation", ControlValue::Number(1.0)).unwrap();
        let control = panel.get("elevation").unwrap();
        assert_eq!(control.value(), ControlValue::Number(1.0));
        assert_eq!(control.committed(), ControlValue::Number(0.0));
    }

    #[test]
    fn finish_change_reports_only_real_changes() {
        let mut panel = sandbox();
        assert_eq!(panel.finish_change("visible").unwrap(), None);

        panel.drag("visible", ControlValue::Toggle(true)).unwrap();
        let change = panel.finish_change("visible").unwrap().unwrap();
        assert_eq!(change.previous, ControlValue::Toggle(false));
        assert_eq!(change.value, ControlValue::Toggle(true));
        assert_eq!(panel.finish_change("visible").unwrap(), None);

        // Dragging away and back before releasing is not a change.
        panel.drag("visible", ControlValue::Toggle(false)).unwrap();
        panel.drag("visible", ControlValue::Toggle(true)).unwrap();
        assert_eq!(panel.finish_change("visible").unwrap(), None);
    }

    #[test]
    fn unknown_control_and_kind_mismatch() {
        let mut panel = sandbox();
        assert_eq!(
            panel.drag("nope", ControlValue::Toggle(true)),
            Err(PanelError::UnknownControl("nope".into()))
        );
        assert!(matches!(
            panel.drag("visible", ControlValue::Number(1.0)),
            Err(PanelError::KindMismatch {
                expected: "toggle",
                found: "number",
                ..
            })
        ));
        assert!(panel.finish_change("nope").is_err());
    }

    #[test]
    fn controls_keep_insertion_order() {
        let names: Vec<_> = sandbox().controls().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, ["elevation", "visible", "wireframe", "color"]);
    }

    #[test]
    fn galaxy_panel_ranges() {
        let panel = GalaxyPanel::new(GalaxyParameters::default());
        let range = |name| panel.panel().get(name).unwrap().range().unwrap();
        assert_eq!(range("count"), (100.0, 10_000_000.0, 100.0));
        assert_eq!(range("branches"), (2.0, 20.0, 1.0));
        assert_eq!(range("radius"), (0.01, 20.0, 0.01));
        assert_eq!(panel.panel().controls().len(), 9);
    }

    #[test]
    fn galaxy_panel_commits_full_parameters() {
        let mut panel = GalaxyPanel::new(GalaxyParameters::default());
        panel.drag("branches", ControlValue::Number(4.4)).unwrap();
        panel.drag("branches", ControlValue::Number(6.2)).unwrap();
        assert_eq!(panel.parameters().branches, 3);

        let params = panel.commit("branches").unwrap().unwrap();
        assert_eq!(params.branches, 6);
        assert_eq!(params.count, 1000);
        assert_eq!(panel.commit("branches").unwrap(), None);
    }

    #[test]
    fn galaxy_panel_count_and_color() {
        let mut panel = GalaxyPanel::new(GalaxyParameters::default());
        let params = panel.set("count", ControlValue::Number(5_049.0)).unwrap().unwrap();
        assert_eq!(params.count, 5000);
        let params = panel
            .set("insideColor", ControlValue::Color(Color::WHITE))
            .unwrap()
            .unwrap();
        assert_eq!(params.inside_color, Color::WHITE);
        assert_eq!(params.count, 5000);
    }

    #[test]
    fn galaxy_panel_clamps_out_of_range_edits() {
        let mut panel = GalaxyPanel::new(GalaxyParameters::default());
        let params = panel.set("branches", ControlValue::Number(0.0)).unwrap().unwrap();
        assert_eq!(params.branches, 2);
        assert!(params.validate().is_ok());
    }
}
