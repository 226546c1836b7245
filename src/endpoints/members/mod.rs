pub mod query;
pub use query::query;

pub mod create;
pub use create::create;

pub mod update;
pub use update::update;

pub mod delete;
pub use delete::delete;

pub mod check_payment;
pub use check_payment::check_payment;
