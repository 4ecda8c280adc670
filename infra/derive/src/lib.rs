#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the Lectern workspace.
//!
//! * [`macro@lectern_error`] turns a plain enum into a context-aware error type.
//! * [`macro@main`] bootstraps the `lectern_runtime` interactive runtime.
//!
//! Consumers should depend on the re-exports (`lectern_runtime::main`) rather than
//! this crate directly where a re-export exists.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, parse_macro_input};

/// Attribute macro to bootstrap a tokio runtime for an `async fn main`.
///
/// # Arguments
///
/// * `interactive` (optional) - Single-threaded, cooperative runtime for command-line
///   front-ends. It is the only runtime flavour.
///
/// # Examples
///
/// ```rust,ignore
/// #[lectern_runtime::main(interactive)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro for defining crate-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context()`
///   to `Result<T, Name>` and to results of every wrapped source error.
/// * **Standard Conversions**: Implements `From<Source>` for variants carrying a source,
///   so `?` works on upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Context-aware variants carry `context: Option<Cow<'static, str>>`.
/// 3. Source-bearing variants name the field `source` (or mark it `#[source]`/`#[from]`)
///    and must also carry `context`.
/// 4. Tuple and unit variants are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[lectern_derive::lectern_error]
/// pub enum CatalogError {
///     #[error("Catalog parse error{}: {source}", format_context(.context))]
///     Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal catalog error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(raw: &str) -> Result<Catalog, CatalogError> {
///     serde_json::from_str(raw).context("Embedded catalog")
/// }
/// ```
#[proc_macro_attribute]
pub fn lectern_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
