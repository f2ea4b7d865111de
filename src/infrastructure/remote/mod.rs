//! Remote host adapters

mod ssh;

pub use ssh::{SshIdentity, SshRemote, SSH_PORT};
