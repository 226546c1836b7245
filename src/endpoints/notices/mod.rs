pub mod query;
pub use query::query;

pub mod create;
pub use create::create;

pub mod get;
pub use get::get_one;

pub mod update;
pub use update::update;

pub mod delete;
pub use delete::delete;

pub mod seen;
pub use seen::check_new;
pub use seen::mark_seen;
