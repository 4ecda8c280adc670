use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, ItemFn, ReturnType, Type};

/// Expands the `#[lectern_runtime::main]` attribute macro.
#[must_use]
pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    if input.sig.asyncness.is_none() {
        return Error::new_spanned(
            &input.sig.ident,
            "#[lectern_runtime::main] can only be used on async functions",
        )
        .to_compile_error();
    }

    if !returns_result(&input.sig.output) {
        return Error::new_spanned(
            &input.sig.output,
            "#[lectern_runtime::main] requires a Result return type",
        )
        .to_compile_error();
    }

    if let Err(err) = parse_profile(args) {
        return err;
    }

    let name = &input.sig.ident;
    let body = &input.block;
    let vis = &input.vis;
    let attrs = &input.attrs;
    let output = &input.sig.output;

    quote! {
        #(#attrs)*
        #vis fn #name() #output {
            let rt = ::lectern_runtime::build_runtime()?;
            rt.block_on(async #body)
        }
    }
}

fn parse_profile(args: TokenStream) -> Result<(), TokenStream> {
    if args.is_empty() {
        return Ok(());
    }

    let ident: syn::Ident = syn::parse2(args).map_err(|err| err.to_compile_error())?;
    if ident == "interactive" {
        Ok(())
    } else {
        Err(Error::new_spanned(ident, "Unknown runtime profile. Use: interactive").to_compile_error())
    }
}

fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = &**ty else {
        return false;
    };
    path.path.segments.last().is_some_and(|seg| seg.ident == "Result")
}
