//! Multiple pass depth control for deep cuts.
//!
//! A cut of total depth `D` with a per-pass step `P` is split into
//! `ceil(D / P)` passes. Pass `i` (zero-based) cuts to `-min((i + 1) * P, D)`
//! so the final pass lands exactly on `-D`.

use panelcam_core::Tool;

/// Rounding error tolerated in `D / P` before the pass count is rounded up,
/// in units of the ratio's own precision. `18.000000000000004 / 6` stays at
/// three passes while `6.000000005 / 6` needs two.
const PASS_COUNT_ULPS: f64 = 8.0;

/// One traversal of an operation's geometry at a fixed depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pass {
    /// Zero-based pass index
    pub index: usize,
    /// Total number of passes in the plan
    pub count: usize,
    /// Absolute Z of this pass (negative below the surface)
    pub z: f64,
}

impl Pass {
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.count
    }
}

/// Depth sequence for an operation
#[derive(Debug, Clone, PartialEq)]
pub struct PassPlan {
    depths: Vec<f64>,
}

impl PassPlan {
    /// A single pass straight to the total depth.
    pub fn single(total_depth: f64) -> Self {
        Self {
            depths: vec![-total_depth.abs()],
        }
    }

    /// Split `total_depth` into steps of at most `per_pass_depth`.
    ///
    /// A missing or non-positive step yields a single pass.
    pub fn new(total_depth: f64, per_pass_depth: Option<f64>) -> Self {
        let total = total_depth.abs();
        let step = match per_pass_depth {
            Some(step) if step.is_finite() && step > 0.0 => step,
            _ => return Self::single(total),
        };

        let ratio = total / step;
        let tolerance = ratio.max(1.0) * f64::EPSILON * PASS_COUNT_ULPS;
        let count = (ratio - tolerance).ceil().max(1.0) as usize;
        let depths = (0..count)
            .map(|i| {
                if i + 1 == count {
                    -total
                } else {
                    -((i + 1) as f64 * step).min(total)
                }
            })
            .collect();

        Self { depths }
    }

    /// Build the plan for an operation's multi-pass settings.
    ///
    /// When multi-pass is requested without a step, the tool's maximum
    /// depth is used as the step.
    pub fn for_operation(
        multi_pass: bool,
        total_depth: f64,
        per_pass_depth: Option<f64>,
        tool: &Tool,
    ) -> Self {
        if !multi_pass {
            return Self::single(total_depth);
        }
        match per_pass_depth.or(tool.max_depth) {
            Some(step) => Self::new(total_depth, Some(step)),
            None => {
                tracing::debug!(
                    "Multi-pass requested without a per-pass depth and tool '{}' has no maximum depth, cutting in one pass",
                    tool.id
                );
                Self::single(total_depth)
            }
        }
    }

    /// Calculates the number of passes.
    pub fn pass_count(&self) -> usize {
        self.depths.len()
    }

    /// All pass depths, shallowest first.
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Deepest single cut of the plan, in mm.
    pub fn max_step(&self) -> f64 {
        let mut previous = 0.0_f64;
        let mut max = 0.0_f64;
        for &z in &self.depths {
            max = max.max(previous - z);
            previous = z;
        }
        max
    }

    pub fn passes(&self) -> impl Iterator<Item = Pass> + '_ {
        let count = self.depths.len();
        self.depths
            .iter()
            .enumerate()
            .map(move |(index, &z)| Pass { index, count, z })
    }
}
