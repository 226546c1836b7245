use anyhow::{Context, Result};
use sqlx::PgPool;

mod users;
pub use users::*;

mod sessions;
pub use sessions::*;

mod transactions;
pub use transactions::*;

mod members;
pub use members::*;

mod receipts;
pub use receipts::*;

mod evidence_files;
pub use evidence_files::*;

mod notices;
pub use notices::*;

mod audit_comments;
pub use audit_comments::*;

type Pool = PgPool;

pub(crate) struct Postgres {
    pub users: Users,
    pub sessions: Sessions,
    pub transactions: Transactions,
    pub members: Members,
    pub receipts: Receipts,
    pub evidence_files: EvidenceFiles,
    pub notices: Notices,
    pub audit_comments: AuditComments,
}

impl Postgres {
    pub async fn new(url: &str) -> Result<Self> {
        let pool = PgPool::connect(url)
            .await
            .context("error connecting to postgres")?;

        sqlx::migrate!()
            .run(&pool)
            .await
            .context("error running migrations")?;

        return Ok(Self {
            users: Users::new(pool.clone()),
            sessions: Sessions::new(pool.clone()),
            transactions: Transactions::new(pool.clone()),
            members: Members::new(pool.clone()),
            receipts: Receipts::new(pool.clone()),
            evidence_files: EvidenceFiles::new(pool.clone()),
            notices: Notices::new(pool.clone()),
            audit_comments: AuditComments::new(pool),
        });
    }
}
