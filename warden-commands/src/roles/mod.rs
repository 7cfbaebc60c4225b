pub mod autorole;
pub mod giverole;
pub mod reactionrole;
pub mod removerole;
pub mod roleinfo;
