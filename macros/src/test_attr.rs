// MinIO Rust Library for Amazon S3 Compatible Cloud Storage
// Copyright 2025 MinIO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use darling::FromMeta;
use darling_core::Error;
use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, format_ident, quote, quote_spanned};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{FnArg, ItemFn, ReturnType};

#[derive(Debug, FromMeta)]
pub(crate) struct MacroArgs {
    bucket_name: Option<String>,
    full_only: darling::util::Flag,
    no_bucket: darling::util::Flag,
    no_cleanup: darling::util::Flag,
}

fn compile_error(message: &str, span: Span) -> proc_macro::TokenStream {
    proc_macro::TokenStream::from(Error::custom(message).with_span(&span).write_errors())
}

impl MacroArgs {
    /// Parameters the test function must declare, as (type name, position description).
    fn expected_params(&self) -> &'static [(&'static str, &'static str)] {
        if self.no_bucket.is_present() {
            &[("TestContext", "(ctx: TestContext)")]
        } else {
            &[
                ("TestContext", "(ctx: TestContext, bucket_name: String)"),
                ("String", "(ctx: TestContext, bucket_name: String)"),
            ]
        }
    }

    pub(crate) fn validate(&self, func: &ItemFn) -> Result<(), proc_macro::TokenStream> {
        if func.sig.asyncness.is_none() {
            return Err(compile_error(
                "mint tests must be async functions",
                func.sig.fn_token.span(),
            ));
        }
        if self.no_bucket.is_present() && self.bucket_name.is_some() {
            return Err(compile_error(
                "`no_bucket` and `bucket_name` are mutually exclusive",
                func.sig.span(),
            ));
        }

        let expected = self.expected_params();
        if func.sig.inputs.len() != expected.len() {
            let message = format!(
                "mint test function must take exactly {}",
                expected[0].1
            );
            return Err(compile_error(&message, func.sig.inputs.span()));
        }
        for (input, (type_name, signature)) in func.sig.inputs.iter().zip(expected) {
            let FnArg::Typed(pat_type) = input else {
                return Err(compile_error("mint tests cannot take `self`", input.span()));
            };
            if !pat_type.ty.to_token_stream().to_string().contains(type_name) {
                let message = format!("expected parameter of type {type_name} in {signature}");
                return Err(compile_error(&message, pat_type.span()));
            }
        }
        Ok(())
    }
}

/// Splits the annotated function into a `#[tokio::test]` wrapper without
/// parameters and an inner function holding the original body.
pub(crate) fn expand_test_macro(
    args: MacroArgs,
    mut func: ItemFn,
) -> Result<TokenStream, proc_macro::TokenStream> {
    let inner_name = format_ident!("{}_test_impl", func.sig.ident);
    let params = std::mem::take(&mut func.sig.inputs);
    func.sig.output = ReturnType::Default;
    func.sig.inputs = Punctuated::default();

    let body_span = func.block.span();
    let inner_body = &func.block;
    let inner = quote_spanned!(func.sig.span()=>
        async fn #inner_name(#params) #inner_body
    );

    let setup = quote!(
        let ctx = ::mint_common::test_context::TestContext::new_from_env();
    );
    let skip = if args.full_only.is_present() {
        quote!(
            if !ctx.config.is_full_mode() {
                ::log::info!("skipping {}: needs MINT_MODE=full", stringify!(#inner_name));
                return;
            }
        )
    } else {
        TokenStream::new()
    };
    let run = if args.no_bucket.is_present() {
        quote!(#inner_name(ctx).await;)
    } else {
        run_in_bucket(&args, &inner_name)
    };

    let sig = &func.sig;
    Ok(quote_spanned!(body_span=>
        #[::tokio::test]
        #sig {
            #setup
            #skip
            #run
        }
        #inner
    ))
}

/// Creates the bucket, runs the test with panics caught, removes the bucket
/// unless `no_cleanup` is set, then re-raises a caught panic.
fn run_in_bucket(args: &MacroArgs, inner_name: &syn::Ident) -> TokenStream {
    let bucket_name = match &args.bucket_name {
        Some(name) => quote!(::std::string::String::from(#name)),
        None => quote!(::mint_common::utils::rand_bucket_name()),
    };
    let cleanup = if args.no_cleanup.is_present() {
        TokenStream::new()
    } else {
        quote!(::mint_common::cleanup_guard::cleanup(store, &bucket_name).await;)
    };
    quote!(
        use ::futures_util::FutureExt;
        use ::mint_common::minio_mint::mint::storage::ObjectStorage;

        let store = ctx.store.clone();
        let bucket_name: ::std::string::String = #bucket_name;
        if let Err(e) = store.make_bucket(&bucket_name).await {
            panic!("unable to create bucket {bucket_name}: {e}");
        }
        let result = ::std::panic::AssertUnwindSafe(#inner_name(ctx, bucket_name.clone()))
            .catch_unwind()
            .await;
        #cleanup
        if let Err(panic) = result {
            ::std::panic::resume_unwind(panic);
        }
    )
}
