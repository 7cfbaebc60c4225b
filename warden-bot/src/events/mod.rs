pub mod audit_mirror;
pub mod auto_roles;
pub mod commands;
pub mod leveling;
pub mod reaction_roles;
