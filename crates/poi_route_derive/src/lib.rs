mod new;
mod timer;

use proc_macro::TokenStream;

/// Logs the wall-clock time spent in the decorated function at debug level.
/// `#[timer("label")]` overrides the label, which defaults to the function name.
#[proc_macro_attribute]
pub fn timer(attr: TokenStream, item: TokenStream) -> TokenStream {
    timer::timer_inner(attr.into(), item.into()).into()
}

#[proc_macro_derive(New)]
pub fn derive_new(input: TokenStream) -> TokenStream {
    new::derive_new_inner(input.into()).into()
}
