//! Argument classification and left-to-right processing.
//!
//! Each argument type declares its role through [`Classify`]:
//!
//! | role          | effect                                               |
//! |---------------|------------------------------------------------------|
//! | [`CanvasOnly`] | applied directly to the canvas                      |
//! | [`ObjectOnly`] | stored in every style-table slot that admits it     |
//! | [`Dual`]       | both of the above                                   |
//! | [`Object`]     | serialized with the active style of its kind's slot |
//!
//! The role is resolved at compile time; the only runtime dispatch is the
//! match over which alternative of a slot is active.

use crate::canvas::Canvas;
use crate::process::Backend;
use crate::registry::{HasStyles, PlotWith, Slot, StyleTable};

mod tuple;

/// A directive that affects the whole canvas.
pub trait CanvasStyle<B: Backend> {
    fn apply(&self, canvas: &mut Canvas<'_, B>) -> crate::Result<()>;
}

/// Declares how an argument type is processed.
pub trait Classify {
    type Role;
}

/// Role marker: canvas style only.
pub enum CanvasOnly {}
/// Role marker: object style only.
pub enum ObjectOnly {}
/// Role marker: canvas style and object style.
pub enum Dual {}
/// Role marker: a plottable object.
pub enum Object {}

/// Canvas plus style table for one pass over an argument sequence.
pub struct Dispatcher<'a, B: Backend, S> {
    canvas: Canvas<'a, B>,
    styles: &'a mut S,
}

impl<'a, B: Backend, S: StyleTable> Dispatcher<'a, B, S> {
    pub(crate) fn new(canvas: Canvas<'a, B>, styles: &'a mut S) -> Self {
        Self { canvas, styles }
    }

    pub fn canvas(&mut self) -> &mut Canvas<'a, B> {
        &mut self.canvas
    }

    pub fn styles(&self) -> &S {
        &*self.styles
    }

    fn select<T: 'static>(&mut self, style: &T) {
        let hits = self.styles.update(style);
        tracing::trace!(style = std::any::type_name::<T>(), slots = hits, "style selected");
    }
}

/// Per-role processing of one argument of type `T`.
pub trait Handle<T, B: Backend, S> {
    fn handle(arg: &T, d: &mut Dispatcher<'_, B, S>) -> crate::Result<()>;
}

impl<T, B, S> Handle<T, B, S> for CanvasOnly
where
    T: CanvasStyle<B>,
    B: Backend,
    S: StyleTable,
{
    fn handle(arg: &T, d: &mut Dispatcher<'_, B, S>) -> crate::Result<()> {
        arg.apply(d.canvas())
    }
}

impl<T, B, S> Handle<T, B, S> for ObjectOnly
where
    T: 'static,
    B: Backend,
    S: StyleTable,
{
    fn handle(arg: &T, d: &mut Dispatcher<'_, B, S>) -> crate::Result<()> {
        d.select(arg);
        Ok(())
    }
}

impl<T, B, S> Handle<T, B, S> for Dual
where
    T: CanvasStyle<B> + 'static,
    B: Backend,
    S: StyleTable,
{
    fn handle(arg: &T, d: &mut Dispatcher<'_, B, S>) -> crate::Result<()> {
        arg.apply(d.canvas())?;
        d.select(arg);
        Ok(())
    }
}

impl<T, B, S> Handle<T, B, S> for Object
where
    T: HasStyles,
    T::Styles: PlotWith<B, T>,
    B: Backend,
    S: StyleTable + Slot<T::Styles>,
{
    fn handle(arg: &T, d: &mut Dispatcher<'_, B, S>) -> crate::Result<()> {
        let style: &T::Styles = d.styles.slot();
        tracing::trace!(
            object = std::any::type_name::<T>(),
            style = crate::registry::StyleVariant::active(style),
            "plotting object"
        );
        style.plot(&mut d.canvas, arg)?;
        d.canvas.object_drawn();
        Ok(())
    }
}

/// An argument sequence, processed strictly left to right.
///
/// Implemented for every classified type, tuples of up to twelve
/// sequences, slices, `Vec` and `Option`.
pub trait Args<B: Backend, S> {
    fn process_all(&self, d: &mut Dispatcher<'_, B, S>) -> crate::Result<()>;
}

impl<T, B, S> Args<B, S> for T
where
    T: Classify,
    T::Role: Handle<T, B, S>,
    B: Backend,
{
    fn process_all(&self, d: &mut Dispatcher<'_, B, S>) -> crate::Result<()> {
        <T::Role as Handle<T, B, S>>::handle(self, d)
    }
}

impl<T, B, S> Args<B, S> for [T]
where
    T: Args<B, S>,
    B: Backend,
{
    fn process_all(&self, d: &mut Dispatcher<'_, B, S>) -> crate::Result<()> {
        self.iter().try_for_each(|arg| arg.process_all(d))
    }
}

impl<T, B, S> Args<B, S> for &[T]
where
    T: Args<B, S>,
    B: Backend,
{
    fn process_all(&self, d: &mut Dispatcher<'_, B, S>) -> crate::Result<()> {
        self.iter().try_for_each(|arg| arg.process_all(d))
    }
}

impl<T, B, S> Args<B, S> for Vec<T>
where
    T: Args<B, S>,
    B: Backend,
{
    fn process_all(&self, d: &mut Dispatcher<'_, B, S>) -> crate::Result<()> {
        self.as_slice().process_all(d)
    }
}

impl<T, B, S> Args<B, S> for Option<T>
where
    T: Args<B, S>,
    B: Backend,
{
    fn process_all(&self, d: &mut Dispatcher<'_, B, S>) -> crate::Result<()> {
        match self {
            Some(arg) => arg.process_all(d),
            None => Ok(()),
        }
    }
}
