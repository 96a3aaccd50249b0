//! The stage contract shared by every derivation step.

/// One stage of the derived-stat pipeline.
///
/// A layer reads a slice of the snapshot (`Base`) plus whatever earlier layers
/// produced (`Inputs`) and returns its own output. Layers never see each
/// other's internals, only the values handed down through `Inputs`, so each
/// can be tested against hand-built inputs.
///
/// The lifetime lets `Inputs` borrow from the caller, e.g. the rule tables or
/// a polymorph donor's skill map.
pub trait StatLayer<'a> {
    /// The snapshot slice this layer reads.
    type Base: ?Sized;

    /// Values produced by earlier layers and engine-wide settings.
    type Inputs;

    /// The output of this layer.
    type Final;

    /// Compute the final values. Must be pure.
    fn compute(base: &Self::Base, inputs: &Self::Inputs) -> Self::Final;
}
