use crate::task::TaskDecl;

/// Global distributed slice collecting tasks declared with `#[task]`
#[linkme::distributed_slice]
pub static DECLARED_TASKS: [fn() -> TaskDecl] = [..];
