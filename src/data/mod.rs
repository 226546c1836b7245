use anyhow::{Context, Result};
use postgres::Postgres;

use crate::config::Config;

mod postgres;
pub use postgres::*;

mod id;
pub use id::create_id;

#[derive(Clone)]
pub struct Data {
    pub users: postgres::Users,
    pub sessions: postgres::Sessions,
    pub transactions: postgres::Transactions,
    pub members: postgres::Members,
    pub receipts: postgres::Receipts,
    pub evidence_files: postgres::EvidenceFiles,
    pub notices: postgres::Notices,
    pub audit_comments: postgres::AuditComments,
}

impl Data {
    pub async fn new(config: &Config) -> Result<Self> {
        let postgres = Postgres::new(&config.database_url)
            .await
            .context("error creating postgres")?;

        return Ok(Self {
            users: postgres.users,
            sessions: postgres.sessions,
            transactions: postgres.transactions,
            members: postgres.members,
            receipts: postgres.receipts,
            evidence_files: postgres.evidence_files,
            notices: postgres.notices,
            audit_comments: postgres.audit_comments,
        });
    }
}
