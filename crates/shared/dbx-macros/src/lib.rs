//! Attribute macros applying the `dbx` unit-of-work boundary.
//!
//! The generated code calls `::dbx::HasUnitOfWork::unit_of_work(self)`, so the
//! annotated type must implement `dbx::HasUnitOfWork`, and the method's error
//! type must implement `From<dbx::DbxError>` and `dbx::Failure`.

mod args;
mod expand;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn, ItemImpl};

use crate::args::{ServiceArgs, TransactionalArgs};

// ============================================================================
// #[transactional] attribute macro
// ============================================================================

/// Run an async `&self` method inside the service's unit of work.
///
/// ```ignore
/// #[transactional]
/// async fn register(&self, input: NewUser) -> AppResult<User> { ... }
///
/// #[transactional(rollback_for(Storage, DomainRule))]
/// async fn place_sale(&self, ...) -> AppResult<()> { ... }
/// ```
///
/// Without arguments every failure rolls back. With `rollback_for(...)` only
/// the listed `dbx::FailureKind`s roll back; other failures commit the work
/// done so far. The failure is returned unchanged in both cases.
///
/// Inside an `#[async_trait]` impl, put `#[transactional_service]` on the impl
/// block (above `#[async_trait]`) and it will pick this attribute up.
#[proc_macro_attribute]
pub fn transactional(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as TransactionalArgs);
    let mut func = parse_macro_input!(item as ItemFn);

    match expand::wrap_block(&func.sig, &func.block, &args) {
        Ok(block) => {
            func.block = Box::new(block);
            TokenStream::from(quote! { #func })
        }
        Err(err) => err.to_compile_error().into(),
    }
}

// ============================================================================
// #[transactional_service] attribute macro
// ============================================================================

/// Apply the unit-of-work boundary across an impl block.
///
/// Every async `&self` method whose name starts with `save`, `update` or
/// `delete` is wrapped with the default policy. Methods carrying an explicit
/// `#[transactional(...)]` use their own policy, and `#[non_transactional]`
/// opts a matching method out. The prefix list can be replaced:
///
/// ```ignore
/// #[transactional_service(prefixes("persist", "remove"))]
/// #[async_trait]
/// impl OrderService for OrderManager { ... }
/// ```
#[proc_macro_attribute]
pub fn transactional_service(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ServiceArgs);
    let item = parse_macro_input!(item as ItemImpl);

    match expand::expand_service(&args, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Exclude a method from `#[transactional_service]`'s naming rule.
#[proc_macro_attribute]
pub fn non_transactional(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "`non_transactional` takes no arguments",
        )
        .to_compile_error()
        .into();
    }
    item
}
