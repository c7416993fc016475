//! Per-kind style variants and the table of currently selected styles.
//!
//! Every plottable kind owns one closed set of admissible styles, declared
//! with [`style_variant!`](crate::style_variant). A table declared with
//! [`style_table!`](crate::style_table) holds the active alternative for
//! each kind. Selecting a style updates every slot whose set contains the
//! style's type and leaves the others alone.

use std::any::Any;
use std::fmt;

use crate::canvas::Canvas;
use crate::process::Backend;

mod macros;

/// A style that knows how to serialize objects of type `T` for backend `B`.
pub trait ObjectStyle<B: Backend, T> {
    fn plot(&self, canvas: &mut Canvas<'_, B>, obj: &T) -> crate::Result<()>;
}

/// Tagged union of the styles admissible for one object kind.
pub trait StyleVariant: Clone + Default + fmt::Debug + 'static {
    /// Make `style` the active alternative if its type belongs to this set.
    fn select(&mut self, style: &dyn Any) -> bool;

    /// Name of the active alternative.
    fn active(&self) -> &'static str;
}

/// Dispatch to whichever alternative is active.
pub trait PlotWith<B: Backend, T>: StyleVariant {
    fn plot(&self, canvas: &mut Canvas<'_, B>, obj: &T) -> crate::Result<()>;
}

/// Registers the style variant of a plottable kind.
pub trait HasStyles {
    type Styles: StyleVariant;
}

/// One slot per plottable kind, in declaration order.
pub trait StyleTable: Clone + Default + fmt::Debug + 'static {
    /// Apply `style` to every slot that admits it. Returns how many did.
    fn update(&mut self, style: &dyn Any) -> usize;

    /// `(slot, active alternative)` for every slot.
    fn active(&self) -> Vec<(&'static str, &'static str)>;
}

/// Compile-time lookup of the slot holding variant `V`.
pub trait Slot<V: StyleVariant> {
    fn slot(&self) -> &V;
    fn slot_mut(&mut self) -> &mut V;
}

/// Style table for adapters that only ever receive canvas styles.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStyles;

impl StyleTable for NoStyles {
    fn update(&mut self, _style: &dyn Any) -> usize {
        0
    }

    fn active(&self) -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }
}
