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

pub mod with_receipt;
pub use with_receipt::create_with_receipt;

pub mod import;
pub use import::import;

pub mod calendar;
pub use calendar::calendar;
