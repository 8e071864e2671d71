//! Body rewriting.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Block, FnArg, ImplItem, ItemImpl, ReturnType, Signature};

use crate::args::{is_attribute, ServiceArgs, TransactionalArgs};

/// Rewrite `block` so that it runs inside the service's unit of work.
pub fn wrap_block(sig: &Signature, block: &Block, args: &TransactionalArgs) -> syn::Result<Block> {
    if sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(
            sig.fn_token,
            "transactional methods must be `async`",
        ));
    }

    match sig.inputs.first() {
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        _ => {
            return Err(syn::Error::new_spanned(
                &sig.ident,
                "transactional methods must take `&self`",
            ))
        }
    }

    let ret = match &sig.output {
        ReturnType::Type(_, ty) => ty,
        ReturnType::Default => {
            return Err(syn::Error::new_spanned(
                &sig.ident,
                "transactional methods must return a `Result`",
            ))
        }
    };

    let policy = policy_tokens(args);

    Ok(syn::parse_quote! {
        {
            ::dbx::HasUnitOfWork::unit_of_work(self)
                .run(#policy, async move {
                    let __dbx_ret: #ret = #block;
                    __dbx_ret
                })
                .await
        }
    })
}

fn policy_tokens(args: &TransactionalArgs) -> TokenStream {
    match &args.rollback_for {
        None => quote! { ::dbx::__private::RollbackPolicy::always() },
        Some(kinds) => quote! {
            ::dbx::__private::RollbackPolicy::only(&[#(::dbx::FailureKind::#kinds),*])
        },
    }
}

/// Apply the naming rule and the explicit method attributes to an impl block.
pub fn expand_service(args: &ServiceArgs, mut item: ItemImpl) -> syn::Result<TokenStream> {
    let mut errors: Option<syn::Error> = None;

    for impl_item in item.items.iter_mut() {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };

        let explicit = method
            .attrs
            .iter()
            .position(|attr| is_attribute(attr, "transactional"));
        let opted_out = method
            .attrs
            .iter()
            .position(|attr| is_attribute(attr, "non_transactional"));

        let outcome = match (explicit, opted_out) {
            (Some(_), Some(_)) => Err(syn::Error::new_spanned(
                &method.sig.ident,
                "a method cannot be both `transactional` and `non_transactional`",
            )),
            (Some(index), None) => {
                let attr = method.attrs.remove(index);
                TransactionalArgs::from_attribute(&attr)
                    .and_then(|parsed| wrap_block(&method.sig, &method.block, &parsed))
                    .map(Some)
            }
            (None, Some(index)) => {
                method.attrs.remove(index);
                Ok(None)
            }
            (None, None) => {
                let name = method.sig.ident.to_string();
                if args.matches(&name) {
                    wrap_block(&method.sig, &method.block, &TransactionalArgs::default())
                        .map(Some)
                        .map_err(|mut err| {
                            err.combine(syn::Error::new_spanned(
                                &method.sig.ident,
                                format!(
                                    "`{}` matches the transactional naming rule; \
                                     mark it `#[non_transactional]` to opt out",
                                    name
                                ),
                            ));
                            err
                        })
                } else {
                    Ok(None)
                }
            }
        };

        match outcome {
            Ok(Some(block)) => method.block = block,
            Ok(None) => {}
            Err(err) => match errors.as_mut() {
                Some(existing) => existing.combine(err),
                None => errors = Some(err),
            },
        }
    }

    if let Some(err) = errors {
        return Err(err);
    }

    Ok(quote! { #item })
}
