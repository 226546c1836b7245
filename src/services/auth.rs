use hmac::{Hmac, Mac};
use sha2::Sha256;

#[cfg(debug_assertions)]
use anyhow::Context;

#[cfg(debug_assertions)]
use crate::{
    data::{Data, Session, User, create_id},
    error::ApiError,
};

pub struct Token {
    pub user_id: String,
    pub session_id: String,
}

static ID_SPLITTER: &str = ".";
static SIGNATURE_SPLITTER: &str = ":";

type HmacSha256 = Hmac<Sha256>;

fn create_signature(secret: &str, data_to_sign: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("error creating hmac");

    mac.update(data_to_sign.as_bytes());

    let result = mac.finalize();
    let result = result.into_bytes();

    return hex::encode(result);
}

pub fn create_token(secret: &str, user_id: &str, session_id: &str) -> String {
    let data = format!("{user_id}{ID_SPLITTER}{session_id}");

    let signature = create_signature(secret, &data);

    return format!("{data}{SIGNATURE_SPLITTER}{signature}");
}

pub fn verify_token(secret: &str, token: &str) -> Result<Token, anyhow::Error> {
    let parts: Vec<&str> = token.split(SIGNATURE_SPLITTER).collect();

    if parts.len() != 2 {
        return Err(anyhow::anyhow!(
            "could not split token into data and signature"
        ));
    }

    let data = parts[0];
    let signature = parts[1];

    let expected_signature = create_signature(secret, data);

    if signature != expected_signature {
        return Err(anyhow::anyhow!("invalid signature"));
    }

    let parts: Vec<&str> = data.split(ID_SPLITTER).collect();

    if parts.len() != 2 {
        return Err(anyhow::anyhow!(
            "could not split token data into user_id and session_id"
        ));
    }

    let user_id = parts[0];
    let session_id = parts[1];

    return Ok(Token {
        user_id: user_id.to_string(),
        session_id: session_id.to_string(),
    });
}

/// Local development only. Session issuance is otherwise external to this
/// service; the middleware just verifies tokens it is handed.
#[cfg(debug_assertions)]
pub async fn dev_login(
    data: &Data,
    secret: &str,
    username: &str,
    club_name: Option<String>,
    is_auditor: bool,
) -> Result<String, ApiError> {
    use chrono::Utc;

    let session_id = create_id();

    let existing_user_id = data
        .users
        .get_id_by_username(username)
        .await
        .context("error getting user by username")?;

    let user_id = match existing_user_id {
        Some(user_id) => {
            data.sessions
                .insert(&user_id, &session_id)
                .await
                .context("error inserting session")?;

            user_id
        }
        None => {
            let user = User {
                id: create_id(),
                username: username.to_owned(),
                club_name,
                is_auditor,
                last_seen_notice: None,
                created_at: Utc::now(),
                updated_at: None,
            };

            let session = Session {
                id: session_id.to_owned(),
                user_id: user.id.to_owned(),
                created_at: Utc::now(),
                updated_at: None,
            };

            data.users
                .insert_with_session(&user, &session)
                .await
                .context("error inserting user and session")?;

            user.id
        }
    };

    return Ok(create_token(secret, &user_id, &session_id));
}

#[cfg(test)]
mod test {
    use super::{create_token, verify_token};

    #[test]
    fn token_roundtrip() {
        let token = create_token("secret", "user_1", "session_1");

        let verified = verify_token("secret", &token).unwrap();
        assert_eq!(verified.user_id, "user_1");
        assert_eq!(verified.session_id, "session_1");
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = create_token("secret", "user_1", "session_1");
        let tampered = token.replace("user_1", "user_2");

        assert!(verify_token("secret", &tampered).is_err());
        assert!(verify_token("other secret", &token).is_err());
        assert!(verify_token("secret", "not a token").is_err());
    }
}
