use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Expr, ExprLit, ExprPath, ItemFn, Lit, Meta, MetaNameValue, Token};

/// Declare a cooperative task
///
/// The function is registered automatically and picked up by
/// `SchedulerBuilder::register_all()`. It must take the task context and
/// return nothing; it runs to completion every time it is dispatched.
///
/// # Examples
///
/// ```rust,ignore
/// use cosched::{task, TaskContext};
///
/// #[task(period = "500ms")]
/// fn blink(_ctx: &mut TaskContext<'_>) {
///     toggle_led();
/// }
///
/// #[task(delay = "${app.report.delay:2s}", period = 10, time_unit = TimeUnit::Seconds)]
/// fn report(ctx: &mut TaskContext<'_>) {
///     if nothing_to_report() {
///         ctx.block_self().ok();
///     }
/// }
/// ```
///
/// # Parameters
///
/// - `delay`: Ticks (or duration) before the first run; `"blocked"` starts the task suspended
/// - `period`: Re-arm interval after each run; `0` means one-shot
/// - `time_unit`: Unit for bare numbers (ticks, milliseconds, seconds, minutes, hours, days)
/// - `enabled`: Enable/disable task (boolean or config placeholder)
/// - `name`: Name used in logs and `Scheduler::find`; defaults to the function name
#[proc_macro_attribute]
pub fn task(args: TokenStream, input: TokenStream) -> TokenStream {
    let attr_args = syn::parse_macro_input!(args with Punctuated::<Meta, Token![,]>::parse_terminated);
    let input_fn = syn::parse_macro_input!(input as ItemFn);

    match expand_task(&attr_args, input_fn) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_task(
    attr_args: &Punctuated<Meta, Token![,]>,
    input_fn: ItemFn,
) -> syn::Result<proc_macro2::TokenStream> {
    if let Some(asyncness) = &input_fn.sig.asyncness {
        return Err(syn::Error::new(
            asyncness.span(),
            "task functions run to completion and cannot be async",
        ));
    }
    if input_fn.sig.inputs.len() != 1 {
        return Err(syn::Error::new(
            input_fn.sig.inputs.span(),
            "task functions take exactly one argument: `&mut TaskContext<'_>`",
        ));
    }

    let fn_name = &input_fn.sig.ident;
    let args = TaskArgs::parse(attr_args, &fn_name.to_string())?;
    let TaskArgs {
        name,
        delay,
        period,
        enabled,
        time_unit,
    } = args;

    // Generate unique registration function name
    let register_fn_name = syn::Ident::new(&format!("__declare_task_{}", fn_name), fn_name.span());

    Ok(quote! {
        #input_fn

        // Auto-registration using linkme
        #[::cosched::cosched_runtime::linkme::distributed_slice(::cosched::cosched_runtime::DECLARED_TASKS)]
        #[linkme(crate = ::cosched::cosched_runtime::linkme)]
        fn #register_fn_name() -> ::cosched::cosched_runtime::TaskDecl {
            ::cosched::cosched_runtime::TaskDecl {
                name: #name,
                delay: #delay,
                period: #period,
                enabled: #enabled,
                time_unit: #time_unit,
                handler: #fn_name,
            }
        }
    })
}

struct TaskArgs {
    name: String,
    delay: String,
    period: String,
    enabled: String,
    time_unit: String,
}

impl TaskArgs {
    fn parse(attr_args: &Punctuated<Meta, Token![,]>, fn_name: &str) -> syn::Result<Self> {
        let mut args = TaskArgs {
            name: fn_name.to_string(),
            delay: "0".to_string(),
            period: "0".to_string(),
            enabled: "true".to_string(),
            time_unit: "ticks".to_string(),
        };

        for arg in attr_args {
            let Meta::NameValue(MetaNameValue { path, value, .. }) = arg else {
                return Err(syn::Error::new(arg.span(), "expected `key = value`"));
            };
            let key = path.get_ident().map(|i| i.to_string()).unwrap_or_default();

            match key.as_str() {
                "name" => args.name = string_lit(value, "name must be a string")?,
                "delay" => args.delay = duration_lit(value, "delay must be int or string")?,
                "period" => args.period = duration_lit(value, "period must be int or string")?,
                "enabled" => {
                    args.enabled = match value {
                        Expr::Lit(ExprLit { lit: Lit::Bool(b), .. }) => b.value.to_string(),
                        Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => s.value(),
                        _ => return Err(syn::Error::new(value.span(), "enabled must be bool or string")),
                    }
                }
                "time_unit" => {
                    args.time_unit = match value {
                        Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => s.value(),
                        // Support TimeUnit::Seconds, TimeUnit::Ticks, etc.
                        Expr::Path(ExprPath { path, .. }) => match path.segments.last() {
                            Some(segment) => segment.ident.to_string().to_lowercase(),
                            None => return Err(syn::Error::new(path.span(), "invalid time_unit path")),
                        },
                        _ => {
                            return Err(syn::Error::new(
                                value.span(),
                                "time_unit must be a string or TimeUnit::* constant (e.g., TimeUnit::Seconds)",
                            ))
                        }
                    }
                }
                _ => {
                    return Err(syn::Error::new(
                        path.span(),
                        format!("unknown task argument `{}`", key),
                    ))
                }
            }
        }

        Ok(args)
    }
}

fn string_lit(value: &Expr, message: &str) -> syn::Result<String> {
    match value {
        Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Ok(s.value()),
        _ => Err(syn::Error::new(value.span(), message)),
    }
}

fn duration_lit(value: &Expr, message: &str) -> syn::Result<String> {
    match value {
        Expr::Lit(ExprLit { lit: Lit::Int(i), .. }) => Ok(i.base10_digits().to_string()),
        Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Ok(s.value()),
        _ => Err(syn::Error::new(value.span(), message)),
    }
}
