use super::{Args, Dispatcher};
use crate::process::Backend;

impl<B: Backend, S> Args<B, S> for () {
    fn process_all(&self, _d: &mut Dispatcher<'_, B, S>) -> crate::Result<()> {
        Ok(())
    }
}

macro_rules! impl_args_for_tuple {
    ($($name:ident),+) => {
        impl<B: Backend, S, $($name: Args<B, S>),+> Args<B, S> for ($($name,)+) {
            #[allow(non_snake_case)]
            fn process_all(&self, d: &mut Dispatcher<'_, B, S>) -> crate::Result<()> {
                let ($($name,)+) = self;
                $($name.process_all(d)?;)+
                Ok(())
            }
        }
    };
}

impl_args_for_tuple!(A);
impl_args_for_tuple!(A, C);
impl_args_for_tuple!(A, C, D);
impl_args_for_tuple!(A, C, D, E);
impl_args_for_tuple!(A, C, D, E, F);
impl_args_for_tuple!(A, C, D, E, F, G);
impl_args_for_tuple!(A, C, D, E, F, G, H);
impl_args_for_tuple!(A, C, D, E, F, G, H, I);
impl_args_for_tuple!(A, C, D, E, F, G, H, I, J);
impl_args_for_tuple!(A, C, D, E, F, G, H, I, J, K);
impl_args_for_tuple!(A, C, D, E, F, G, H, I, J, K, L);
impl_args_for_tuple!(A, C, D, E, F, G, H, I, J, K, L, M);
