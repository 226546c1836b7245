pub mod transactions;
pub use transactions::all_transactions;

pub mod review_status;
pub use review_status::update_review_status;

pub mod clubs;
pub use clubs::clubs;

pub mod dashboard;
pub use dashboard::dashboard_summary;

pub mod statistics;
pub use statistics::my_club_statistics;
pub use statistics::statistics_by_club;

pub mod monthly;
pub use monthly::monthly_summary;
pub use monthly::my_club_monthly_summary;

pub mod receipts;
pub use receipts::all_receipts;

pub mod comments;
pub use comments::create_comment;
pub use comments::delete_comment;
pub use comments::query_comments;
pub use comments::update_comment;

pub mod summary;
pub use summary::comments_summary;
