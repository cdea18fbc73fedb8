//! HTTP server configuration object.

use std::net::SocketAddr;

use foodshare::outbound::persistence::DbPool;
use foodshare::settings::MailDelivery;
use zeroize::Zeroizing;

/// Resolved dependencies and bind address for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) token_secret: Zeroizing<Vec<u8>>,
    pub(crate) mail: MailDelivery,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        db_pool: DbPool,
        token_secret: &[u8],
        mail: MailDelivery,
    ) -> Self {
        Self {
            bind_addr,
            db_pool,
            token_secret: Zeroizing::new(token_secret.to_vec()),
            mail,
        }
    }
}
