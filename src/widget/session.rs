use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::UserConfig;

pub const TICKET_PREFIX: &str = "TKT-";
const TICKET_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub name: String,
    pub handle: String,
}

impl From<&UserConfig> for UserIdentity {
    fn from(config: &UserConfig) -> Self {
        Self {
            name: config.name.clone(),
            handle: config.handle.clone(),
        }
    }
}

/// Who is chatting and under which ticket. Fixed for the lifetime of a widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user: UserIdentity,
    ticket_id: String,
}

impl Session {
    pub fn new(user: UserIdentity) -> Self {
        Self::with_rng(user, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(user: UserIdentity, rng: &mut R) -> Self {
        let suffix: String = rng
            .sample_iter(&Alphanumeric)
            .take(TICKET_LEN)
            .map(|b| (b as char).to_ascii_uppercase())
            .collect();

        Self {
            user,
            ticket_id: format!("{}{}", TICKET_PREFIX, suffix),
        }
    }

    pub fn user(&self) -> &UserIdentity {
        &self.user
    }

    pub fn ticket_id(&self) -> &str {
        &self.ticket_id
    }

    pub fn welcome_banner(&self) -> WelcomeBanner {
        WelcomeBanner {
            title: format!("Welcome, {}!", self.user.name),
            subtitle: "How can we help you today? Ask about orders, returns, products, billing or technical issues.".to_string(),
            ticket_id: self.ticket_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeBanner {
    pub title: String,
    pub subtitle: String,
    pub ticket_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn user() -> UserIdentity {
        UserIdentity { name: "Jordan Lee".into(), handle: "@jlee".into() }
    }

    #[test]
    fn test_ticket_id_shape() {
        let session = Session::new(user());
        let ticket = session.ticket_id();
        assert!(ticket.starts_with(TICKET_PREFIX));
        let suffix = &ticket[TICKET_PREFIX.len()..];
        assert_eq!(suffix.len(), TICKET_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_seeded_tickets_are_reproducible() {
        let a = Session::with_rng(user(), &mut StdRng::seed_from_u64(7));
        let b = Session::with_rng(user(), &mut StdRng::seed_from_u64(7));
        assert_eq!(a.ticket_id(), b.ticket_id());
    }

    #[test]
    fn test_banner_shows_ticket() {
        let session = Session::new(user());
        let banner = session.welcome_banner();
        assert_eq!(banner.title, "Welcome, Jordan Lee!");
        assert_eq!(banner.ticket_id, session.ticket_id());
    }
}
