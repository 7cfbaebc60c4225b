pub mod args;
pub mod invocation;
pub mod platform;
#[cfg(feature = "testing")]
pub mod testing;

pub use args::{Arguments, CommandArgs, OptionValue, Param, ParamKind};
pub use invocation::{Invocation, Source};
pub use platform::{Platform, RoleSummary};

pub type Error = anyhow::Error;
