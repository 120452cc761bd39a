use solex_client::{Ephemeral, IdentityProvider, KeypairFile};

use crate::args::CommonArgs;

pub mod account_logger;
pub mod user_registry;

pub(crate) fn identity(common: &CommonArgs) -> Box<dyn IdentityProvider> {
    match &common.keypair {
        Some(path) => Box::new(KeypairFile::new(path)),
        None => Box::new(Ephemeral),
    }
}
