mod test_attr;

use darling::ast::NestedMeta;
use darling::{Error, FromMeta};
use syn::ItemFn;
extern crate proc_macro;

/// A proc macro attribute for writing mint tests.
///
/// This macro extends the `#[tokio::test]` attribute to set up and tear down
/// the test environment: it builds a `TestContext` backed by an in-memory
/// store, creates a bucket for the test if needed and removes it afterwards,
/// also when the test panics.
///
/// By default, it requires the test function to have two parameters:
///
/// - `ctx: TestContext` - The test context giving access to the store, fixtures and config.
/// - `bucket_name: String` - The name of the bucket to be used in the test.
///
/// ```ignore
/// use mint_common::test_context::TestContext;
/// #[mint_macros::test]
/// async fn my_test(ctx: TestContext, bucket_name: String) {
///    // Your test code here
/// }
/// ```
///
/// If the `no_bucket` argument is provided, the test function must have only one parameter:
///
/// ```ignore
/// use mint_common::test_context::TestContext;
/// #[mint_macros::test(no_bucket)]
/// async fn my_test(ctx: TestContext) {
///    // Your test code here
/// }
///```
/// The macro also supports additional arguments:
///
/// - `bucket_name`: Specifies the name of the bucket to be used in the test. If not provided, a random bucket name is drawn when the test starts.
/// - `no_cleanup`: Leaves the bucket in place after the test.
/// - `full_only`: The test only runs with `MINT_MODE=full`.
/// ```ignore
/// use mint_common::test_context::TestContext;
/// #[mint_macros::test(full_only)]
/// async fn my_test(ctx: TestContext, bucket_name: String) {
///    // this test is skipped in core mode
/// }
/// ```
#[proc_macro_attribute]
pub fn test(
    args: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    // Parse the function
    let input_fn = match syn::parse::<ItemFn>(input.clone()) {
        Ok(input_fn) => input_fn,
        Err(err) => return err.to_compile_error().into(),
    };

    // Parse the macro arguments
    let attr_args = match NestedMeta::parse_meta_list(args.into()) {
        Ok(v) => v,
        Err(e) => return Error::from(e).write_errors().into(),
    };

    let args = match test_attr::MacroArgs::from_list(&attr_args) {
        Ok(v) => v,
        Err(e) => return e.write_errors().into(),
    };

    // Validate the function arguments
    if let Err(err) = args.validate(&input_fn) {
        return err;
    }

    // Expand the macro
    match test_attr::expand_test_macro(args, input_fn) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.into(),
    }
}
