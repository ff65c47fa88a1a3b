//! Function Library
//!
//! The primitive functions a node can apply. Each reads its node through a
//! [`NodeInputs`] view and returns a scalar.
//!
//! Two fallback families exist:
//!
//! - Functions that read every input define their own value for the empty
//!   case (`0` for sums, `1` for products and predicates), except `any_eq`,
//!   `max` and `min` which have no sensible identity and return the node's
//!   default output.
//! - Functions that read fixed positions (`not`, `gate`) return the node's
//!   default output when those positions are not connected.

use super::catalog::FunctionId;
use super::reduce;
use crate::graph::NodeInputs;

impl FunctionId {
    /// Evaluate this function for the node behind `inputs`.
    ///
    /// This is the only way into the library; the graph calls it when a
    /// node's cache is invalid.
    pub(crate) fn apply(self, inputs: &mut NodeInputs<'_>) -> f64 {
        match self {
            FunctionId::Constant => inputs.default_output(),
            FunctionId::Sum => sum(inputs),
            FunctionId::And => and(inputs),
            FunctionId::AnyEq => any_eq(inputs),
            FunctionId::Not => not(inputs),
            FunctionId::Gate => gate(inputs),
            FunctionId::Sin => sin(inputs),
            FunctionId::Cos => cos(inputs),
            FunctionId::Product => product(inputs),
            FunctionId::Exp => exp(inputs),
            FunctionId::LessThan => less_than(inputs),
            FunctionId::GreaterThan => greater_than(inputs),
            FunctionId::Max => max(inputs),
            FunctionId::Min => min(inputs),
            FunctionId::NegSum => neg_sum(inputs),
            FunctionId::Square => square(inputs),
            FunctionId::PosClamp => pos_clamp(inputs),
            FunctionId::NegClamp => neg_clamp(inputs),
            FunctionId::Sqrt => sqrt(inputs),
        }
    }
}

fn bool_to_f64(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Sum of `map(x)` over every input.
fn sum_of<F>(inputs: &mut NodeInputs<'_>, map: F) -> f64
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    let values = inputs.values();
    reduce::sum_by(&values, inputs.parallel_threshold(), map)
}

/// Sum of all inputs.
fn sum(inputs: &mut NodeInputs<'_>) -> f64 {
    sum_of(inputs, |v| v)
}

/// 1 if no input equals 0, 0 otherwise. Vacuously 1 without inputs.
fn and(inputs: &mut NodeInputs<'_>) -> f64 {
    bool_to_f64(!inputs.values().iter().any(|&v| v == 0.0))
}

/// 1 if any input after the first equals the first, 0 otherwise.
fn any_eq(inputs: &mut NodeInputs<'_>) -> f64 {
    let values = inputs.values();
    match values.split_first() {
        None => inputs.default_output(),
        Some((first, rest)) => bool_to_f64(rest.iter().any(|v| v == first)),
    }
}

/// 1 if input 0 equals 0, 0 otherwise.
fn not(inputs: &mut NodeInputs<'_>) -> f64 {
    match inputs.values_at([0]) {
        Some([value]) => bool_to_f64(value == 0.0),
        None => inputs.default_output(),
    }
}

/// Input 0 when the condition at input 1 is non-zero, 0 otherwise.
fn gate(inputs: &mut NodeInputs<'_>) -> f64 {
    match inputs.values_at([0, 1]) {
        Some([value, condition]) => {
            if condition != 0.0 {
                value
            } else {
                0.0
            }
        }
        None => inputs.default_output(),
    }
}

fn sin(inputs: &mut NodeInputs<'_>) -> f64 {
    sum_of(inputs, f64::sin)
}

fn cos(inputs: &mut NodeInputs<'_>) -> f64 {
    sum_of(inputs, f64::cos)
}

/// Product of all inputs.
fn product(inputs: &mut NodeInputs<'_>) -> f64 {
    let values = inputs.values();
    reduce::product(&values, inputs.parallel_threshold())
}

fn exp(inputs: &mut NodeInputs<'_>) -> f64 {
    sum_of(inputs, f64::exp)
}

/// 1 if no input is smaller than the one before it.
fn less_than(inputs: &mut NodeInputs<'_>) -> f64 {
    let values = inputs.values();
    bool_to_f64(values.windows(2).all(|pair| !(pair[1] < pair[0])))
}

/// 1 if no input is greater than the one before it.
fn greater_than(inputs: &mut NodeInputs<'_>) -> f64 {
    let values = inputs.values();
    bool_to_f64(values.windows(2).all(|pair| !(pair[1] > pair[0])))
}

/// Largest input. The first of several equal maxima wins.
fn max(inputs: &mut NodeInputs<'_>) -> f64 {
    let values = inputs.values();
    match values.split_first() {
        None => inputs.default_output(),
        Some((&first, rest)) => rest
            .iter()
            .fold(first, |best, &v| if best < v { v } else { best }),
    }
}

/// Smallest input. The first of several equal minima wins.
fn min(inputs: &mut NodeInputs<'_>) -> f64 {
    let values = inputs.values();
    match values.split_first() {
        None => inputs.default_output(),
        Some((&first, rest)) => rest
            .iter()
            .fold(first, |best, &v| if v < best { v } else { best }),
    }
}

/// Negated sum of all inputs.
fn neg_sum(inputs: &mut NodeInputs<'_>) -> f64 {
    -sum(inputs)
}

fn square(inputs: &mut NodeInputs<'_>) -> f64 {
    sum_of(inputs, |v| v * v)
}

/// Sum of inputs clamped to `[0, inf)`.
fn pos_clamp(inputs: &mut NodeInputs<'_>) -> f64 {
    sum_of(inputs, |v| v.max(0.0))
}

/// Sum of inputs clamped to `(-inf, 0]`.
fn neg_clamp(inputs: &mut NodeInputs<'_>) -> f64 {
    sum_of(inputs, |v| v.min(0.0))
}

/// Sum of square roots of the positively clamped inputs.
fn sqrt(inputs: &mut NodeInputs<'_>) -> f64 {
    sum_of(inputs, |v| v.max(0.0).sqrt())
}
