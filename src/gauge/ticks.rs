use super::angles::AngleMap;
use super::{LabelKind, TickLabel};

/// Which samples of a ring get a text label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelRule {
    /// Values that are an exact multiple of the given step.
    MultipleOf(f64),
    /// Finite whole numbers only.
    Integral,
    Always,
}

impl LabelRule {
    pub fn admits(&self, value: f64) -> bool {
        match self {
            LabelRule::MultipleOf(step) => value.is_finite() && value % step == 0.0,
            LabelRule::Integral => is_whole(value),
            LabelRule::Always => true,
        }
    }
}

#[inline]
pub fn is_whole(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Whole numbers without a decimal point, everything else in shortest form.
pub fn format_value(value: f64) -> String {
    if is_whole(value) && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Places one ring's labels around the reversed angle sequence.
pub struct TickPlanner<'a> {
    angles: &'a AngleMap,
    radius: f64,
}

impl<'a> TickPlanner<'a> {
    pub fn new(angles: &'a AngleMap, radius: f64) -> Self {
        Self { angles, radius }
    }

    /// Label every value the rule admits. `values[i]` belongs to sample `i`.
    pub fn plan(
        &self,
        values: &[f64],
        rule: LabelRule,
        format: impl Fn(f64) -> String,
    ) -> Vec<TickLabel> {
        values
            .iter()
            .take(self.angles.forward().len())
            .enumerate()
            .filter(|&(_, &value)| rule.admits(value))
            .map(|(i, &value)| TickLabel {
                text: format(value),
                position: self.angles.label_point(i, self.radius),
                radius: self.radius,
                kind: LabelKind::Tick,
            })
            .collect()
    }
}
