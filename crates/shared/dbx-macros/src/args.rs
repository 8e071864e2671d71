//! Attribute argument parsing.

use syn::{
    parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute, Ident, LitStr, Meta, Token,
};

/// Default method-name prefixes picked up by `#[transactional_service]`.
pub const DEFAULT_PREFIXES: &[&str] = &["save", "update", "delete"];

/// Arguments of `#[transactional]` / `#[transactional(rollback_for(A, B))]`.
#[derive(Default)]
pub struct TransactionalArgs {
    /// `None` rolls back on every failure
    pub rollback_for: Option<Vec<Ident>>,
}

impl Parse for TransactionalArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Ok(Self::default());
        }

        let key: Ident = input.parse()?;
        if key != "rollback_for" {
            return Err(syn::Error::new(
                key.span(),
                "expected `rollback_for(Kind, ...)`",
            ));
        }

        let content;
        parenthesized!(content in input);
        let kinds = Punctuated::<Ident, Token![,]>::parse_terminated(&content)?;

        if !input.is_empty() {
            return Err(input.error("unexpected tokens after `rollback_for(...)`"));
        }

        Ok(Self {
            rollback_for: Some(kinds.into_iter().collect()),
        })
    }
}

impl TransactionalArgs {
    /// Parse the arguments of a `#[transactional]` attribute found on a method.
    pub fn from_attribute(attr: &Attribute) -> syn::Result<Self> {
        match &attr.meta {
            Meta::Path(_) => Ok(Self::default()),
            Meta::List(_) => attr.parse_args_with(Self::parse),
            Meta::NameValue(nv) => Err(syn::Error::new_spanned(
                nv,
                "expected `#[transactional]` or `#[transactional(rollback_for(...))]`",
            )),
        }
    }
}

/// Arguments of `#[transactional_service]` / `#[transactional_service(prefixes("a", "b"))]`.
pub struct ServiceArgs {
    pub prefixes: Vec<String>,
}

impl Default for ServiceArgs {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Parse for ServiceArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Ok(Self::default());
        }

        let key: Ident = input.parse()?;
        if key != "prefixes" {
            return Err(syn::Error::new(key.span(), "expected `prefixes(\"...\", ...)`"));
        }

        let content;
        parenthesized!(content in input);
        let prefixes = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;

        Ok(Self {
            prefixes: prefixes.into_iter().map(|p| p.value()).collect(),
        })
    }
}

impl ServiceArgs {
    pub fn matches(&self, name: &str) -> bool {
        self.prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }
}

/// Whether `attr` is `#[name]` or `#[some::path::name(...)]`.
pub fn is_attribute(attr: &Attribute, name: &str) -> bool {
    attr.path()
        .segments
        .last()
        .map(|segment| segment.ident == name)
        .unwrap_or(false)
}
