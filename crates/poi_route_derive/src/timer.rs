use proc_macro2::TokenStream;
use quote::quote;
use syn::{ItemFn, LitStr};

pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand(attr, item).unwrap_or_else(|err| err.to_compile_error())
}

fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let label = if attr.is_empty() {
        None
    } else {
        Some(syn::parse2::<LitStr>(attr)?)
    };
    let mut func: ItemFn = syn::parse2(item)?;

    if func.sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            func.sig.fn_token,
            "`#[timer]` does not support async functions",
        ));
    }

    let label = label
        .map(|l| l.value())
        .unwrap_or_else(|| func.sig.ident.to_string());
    let stmts = &func.block.stmts;

    // The guard runs on every exit path, including `?` returns.
    let body = quote! {{
        struct __TimerGuard(&'static str, ::std::time::Instant);

        impl ::std::ops::Drop for __TimerGuard {
            fn drop(&mut self) {
                ::log::debug!(
                    "{}: elapsed_ms={:.3}",
                    self.0,
                    self.1.elapsed().as_secs_f64() * 1000.0
                );
            }
        }

        let __timer_guard = __TimerGuard(#label, ::std::time::Instant::now());
        #(#stmts)*
    }};
    func.block = Box::new(syn::parse2(body)?);

    Ok(quote!(#func))
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::ItemFn;

    use super::timer_inner;

    fn expand_fn(attr: proc_macro2::TokenStream) -> ItemFn {
        let out = timer_inner(
            attr,
            quote! {
                /// Adds one.
                pub fn bump(x: u32) -> u32 {
                    x + 1
                }
            },
        );
        syn::parse2(out).expect("expansion is a function")
    }

    #[test]
    fn empty_label_falls_back_to_function_name() {
        let func = expand_fn(quote!());
        let body = quote!(#func).to_string();

        assert!(body.contains("\"bump\""));
        assert!(body.contains("__TimerGuard"));
    }

    #[test]
    fn explicit_label_is_used() {
        let func = expand_fn(quote!("optimizer"));
        let body = quote!(#func).to_string();

        assert!(body.contains("\"optimizer\""));
        assert!(!body.contains("\"bump\""));
    }

    #[test]
    fn signature_and_docs_are_preserved() {
        let func = expand_fn(quote!());

        assert_eq!(func.sig.ident, "bump");
        assert_eq!(func.sig.inputs.len(), 1);
        assert!(func.attrs.iter().any(|a| a.path().is_ident("doc")));
        // Guard struct, Drop impl, guard binding, then the original tail expression.
        assert_eq!(func.block.stmts.len(), 4);
    }

    #[test]
    fn async_functions_are_rejected() {
        let out = timer_inner(quote!(), quote!(async fn fetch() {}));
        let text = out.to_string();

        assert!(text.contains("compile_error"));
        assert!(text.contains("does not support async functions"));
    }

    #[test]
    fn non_string_label_is_rejected() {
        let out = timer_inner(quote!(42), quote!(fn f() {}));
        assert!(out.to_string().contains("compile_error"));
    }
}
