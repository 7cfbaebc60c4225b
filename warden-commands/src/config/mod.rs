pub mod listmodroles;
pub mod removemodrole;
pub mod setlogchannel;
pub mod setmodrole;
pub mod settings;
pub mod togglemodule;

use warden_utils::embed::Reply;

pub(crate) fn module_disabled(module: &str) -> Reply {
    Reply::text(format!(
        "The {module} system is disabled on this server. An admin can enable it with `!togglemodule {module}`."
    ))
    .ephemeral()
}

pub(crate) fn on_off(enabled: bool) -> &'static str {
    if enabled { "Enabled" } else { "Disabled" }
}
