/// Declare the closed set of styles admissible for one plottable kind.
///
/// ```
/// use qplot::{style_variant, StyleVariant};
///
/// #[derive(Debug, Clone, Default)]
/// pub struct Line;
/// #[derive(Debug, Clone, Default)]
/// pub struct Bar;
/// pub struct Series;
///
/// style_variant! {
///     pub enum SeriesStyle for Series { Line, Bar }
/// }
///
/// let mut style = SeriesStyle::default();
/// assert_eq!(style.active(), "Line");
/// assert!(style.select(&Bar));
/// assert!(!style.select(&42u8));
/// assert_eq!(style.active(), "Bar");
/// ```
///
/// Generates the enum (one variant per style, named after the style type),
/// `Default` as the first alternative, the update hook, the exhaustive
/// object dispatch and `impl HasStyles for Series`. Every alternative must
/// be `Clone + Default + Debug + 'static`.
#[macro_export]
macro_rules! style_variant {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident for $kind:ty { $first:ident $(, $rest:ident)* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis enum $name {
            $first($first),
            $($rest($rest),)*
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::$first(<$first as ::std::default::Default>::default())
            }
        }

        impl $crate::registry::StyleVariant for $name {
            fn select(&mut self, style: &dyn ::std::any::Any) -> bool {
                if let Some(style) = style.downcast_ref::<$first>() {
                    *self = Self::$first(style.clone());
                    return true;
                }
                $(
                    if let Some(style) = style.downcast_ref::<$rest>() {
                        *self = Self::$rest(style.clone());
                        return true;
                    }
                )*
                false
            }

            fn active(&self) -> &'static str {
                match self {
                    Self::$first(_) => stringify!($first),
                    $(Self::$rest(_) => stringify!($rest),)*
                }
            }
        }

        impl<B: $crate::process::Backend> $crate::registry::PlotWith<B, $kind> for $name
        where
            $first: $crate::registry::ObjectStyle<B, $kind>,
            $($rest: $crate::registry::ObjectStyle<B, $kind>,)*
        {
            fn plot(
                &self,
                canvas: &mut $crate::canvas::Canvas<'_, B>,
                obj: &$kind,
            ) -> $crate::Result<()> {
                match self {
                    Self::$first(style) => {
                        $crate::registry::ObjectStyle::<B, $kind>::plot(style, canvas, obj)
                    }
                    $(Self::$rest(style) => {
                        $crate::registry::ObjectStyle::<B, $kind>::plot(style, canvas, obj)
                    })*
                }
            }
        }

        impl $crate::registry::HasStyles for $kind {
            type Styles = $name;
        }
    };
}

/// Declare a style table: one slot per plottable kind.
///
/// ```
/// use qplot::{style_table, style_variant, StyleTable};
///
/// #[derive(Debug, Clone, Default)]
/// pub struct Line;
/// #[derive(Debug, Clone, Default)]
/// pub struct Marker;
/// #[derive(Debug, Clone, Default)]
/// pub struct Scatter;
/// pub struct Series;
/// pub struct Point;
///
/// style_variant! { pub enum SeriesStyle for Series { Line, Scatter } }
/// style_variant! { pub enum PointStyle for Point { Marker, Scatter } }
/// style_table! {
///     pub struct Styles { series: SeriesStyle, point: PointStyle }
/// }
///
/// let mut styles = Styles::default();
/// assert_eq!(styles.update(&Scatter), 2);
/// assert_eq!(styles.active(), vec![("series", "Scatter"), ("point", "Scatter")]);
/// ```
///
/// Two slots with the same variant type do not compile, so every kind
/// resolves to exactly one slot.
#[macro_export]
macro_rules! style_table {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident { $($field:ident : $variant:ty),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        $vis struct $name {
            $(pub $field: $variant,)+
        }

        impl $crate::registry::StyleTable for $name {
            fn update(&mut self, style: &dyn ::std::any::Any) -> usize {
                let mut hits = 0;
                $(
                    if $crate::registry::StyleVariant::select(&mut self.$field, style) {
                        hits += 1;
                    }
                )+
                hits
            }

            fn active(&self) -> ::std::vec::Vec<(&'static str, &'static str)> {
                ::std::vec![
                    $((stringify!($field), $crate::registry::StyleVariant::active(&self.$field)),)+
                ]
            }
        }

        $(
            impl $crate::registry::Slot<$variant> for $name {
                fn slot(&self) -> &$variant {
                    &self.$field
                }

                fn slot_mut(&mut self) -> &mut $variant {
                    &mut self.$field
                }
            }
        )+
    };
}
