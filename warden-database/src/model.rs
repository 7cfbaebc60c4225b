pub mod economy;
pub mod leveling;
pub mod moderation;
pub mod roles;
pub mod settings;
