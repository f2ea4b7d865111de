//! SSH remote adapter
//!
//! Every operation dials its own connection, authenticates with the loaded
//! private key and disconnects when done. Commands run through an exec
//! channel and uploads go through the SFTP subsystem.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use russh::client::{self, Handle};
use russh::{ChannelMsg, Disconnect};
use russh_keys::key::{KeyPair, PublicKey};
use russh_sftp::client::SftpSession;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::application::ports::{RemoteError, RemoteShell};
use crate::domain::deploy::{remote_path, HostKeyPolicy};

/// Port every host is dialed on
pub const SSH_PORT: u16 = 22;

const COPY_CHUNK: usize = 64 * 1024;

/// User name and private key used to authenticate on every host
pub struct SshIdentity {
    user: String,
    key: Arc<KeyPair>,
}

impl SshIdentity {
    /// Read and decode an unencrypted private key
    pub async fn load(user: impl Into<String>, key_path: &Path) -> Result<Self, RemoteError> {
        let pem = tokio::fs::read_to_string(key_path)
            .await
            .map_err(|e| RemoteError::KeyRead {
                path: key_path.display().to_string(),
                message: e.to_string(),
            })?;

        let key = russh_keys::decode_secret_key(&pem, None).map_err(|e| RemoteError::KeyParse {
            path: key_path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            user: user.into(),
            key: Arc::new(key),
        })
    }
}

struct ClientHandler {
    host: String,
    policy: HostKeyPolicy,
}

#[async_trait]
impl client::Handler for ClientHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        match self.policy {
            HostKeyPolicy::AcceptAny => Ok(true),
            HostKeyPolicy::KnownHosts => {
                let known =
                    russh_keys::check_known_hosts(&self.host, SSH_PORT, server_public_key)?;
                if !known {
                    warn!(host = %self.host, "host key not in known_hosts");
                }
                Ok(known)
            }
        }
    }
}

/// Runs commands and uploads files over SSH
pub struct SshRemote {
    identity: SshIdentity,
    policy: HostKeyPolicy,
    config: Arc<client::Config>,
    show_progress: bool,
}

impl SshRemote {
    pub fn new(identity: SshIdentity, policy: HostKeyPolicy) -> Self {
        Self {
            identity,
            policy,
            config: Arc::new(client::Config::default()),
            show_progress: false,
        }
    }

    /// Draw a progress bar while uploading
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    async fn connect(&self, host: &str) -> Result<Handle<ClientHandler>, RemoteError> {
        debug!(host, port = SSH_PORT, user = %self.identity.user, policy = %self.policy, "dial");

        let handler = ClientHandler {
            host: host.to_string(),
            policy: self.policy,
        };
        let mut session = client::connect(self.config.clone(), (host, SSH_PORT), handler)
            .await
            .map_err(|e| RemoteError::Connect {
                host: host.to_string(),
                message: e.to_string(),
            })?;

        let authenticated = session
            .authenticate_publickey(self.identity.user.clone(), self.identity.key.clone())
            .await
            .map_err(|e| session_error(host, e))?;
        if !authenticated {
            return Err(RemoteError::AuthRejected {
                host: host.to_string(),
                user: self.identity.user.clone(),
            });
        }

        Ok(session)
    }

    async fn exec(
        &self,
        session: &Handle<ClientHandler>,
        host: &str,
        command: &str,
    ) -> Result<(), RemoteError> {
        let mut channel = session
            .channel_open_session()
            .await
            .map_err(|e| session_error(host, e))?;
        channel
            .exec(true, command)
            .await
            .map_err(|e| session_error(host, e))?;

        let mut stderr = Vec::new();
        let mut exit_status = None;
        while let Some(msg) = channel.wait().await {
            match msg {
                ChannelMsg::Data { ref data } => {
                    debug!(host, output = %String::from_utf8_lossy(&data[..]).trim_end(), "remote stdout");
                }
                ChannelMsg::ExtendedData { ref data, ext: 1 } => {
                    stderr.extend_from_slice(&data[..]);
                }
                ChannelMsg::ExitStatus { exit_status: code } => {
                    exit_status = Some(code);
                }
                _ => {}
            }
        }

        match exit_status {
            Some(0) => Ok(()),
            Some(status) => Err(RemoteError::CommandFailed {
                host: host.to_string(),
                command: command.to_string(),
                status,
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            }),
            None => Err(RemoteError::Session {
                host: host.to_string(),
                message: format!("no exit status for {:?}", command),
            }),
        }
    }

    async fn transfer(
        &self,
        session: &Handle<ClientHandler>,
        host: &str,
        local_file: &Path,
        remote_dir: &str,
    ) -> Result<u64, RemoteError> {
        let mut local = File::open(local_file)
            .await
            .map_err(|e| local_error(local_file, e))?;
        let size = local
            .metadata()
            .await
            .map_err(|e| local_error(local_file, e))?
            .len();

        let target = remote_path(remote_dir, local_file);
        let transfer_error = |message: String| RemoteError::Transfer {
            host: host.to_string(),
            path: target.clone(),
            message,
        };

        let channel = session
            .channel_open_session()
            .await
            .map_err(|e| session_error(host, e))?;
        channel
            .request_subsystem(true, "sftp")
            .await
            .map_err(|e| session_error(host, e))?;
        let sftp = SftpSession::new(channel.into_stream())
            .await
            .map_err(|e| transfer_error(e.to_string()))?;

        let mut remote = sftp
            .create(target.clone())
            .await
            .map_err(|e| transfer_error(e.to_string()))?;

        let progress = self.progress_bar(size, host);
        let mut buf = vec![0u8; COPY_CHUNK];
        let mut copied = 0u64;
        loop {
            let n = local
                .read(&mut buf)
                .await
                .map_err(|e| local_error(local_file, e))?;
            if n == 0 {
                break;
            }
            remote
                .write_all(&buf[..n])
                .await
                .map_err(|e| transfer_error(e.to_string()))?;
            copied += n as u64;
            progress.set_position(copied);
        }
        remote
            .shutdown()
            .await
            .map_err(|e| transfer_error(e.to_string()))?;
        progress.finish_and_clear();

        if let Err(e) = sftp.close().await {
            warn!(host, error = %e, "failed to close sftp session");
        }

        Ok(copied)
    }

    fn progress_bar(&self, size: u64, host: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(size);
        pb.set_style(
            ProgressStyle::with_template(
                "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
        );
        pb.set_message(host.to_string());
        pb.enable_steady_tick(Duration::from_millis(200));
        pb
    }

    async fn disconnect(session: Handle<ClientHandler>, host: &str) {
        if let Err(e) = session
            .disconnect(Disconnect::ByApplication, "", "en")
            .await
        {
            warn!(host, error = %e, "failed to close ssh connection");
        }
    }
}

#[async_trait]
impl RemoteShell for SshRemote {
    async fn run(&self, host: &str, command: &str) -> Result<(), RemoteError> {
        info!(host, command, "run remote command");

        let session = self.connect(host).await?;
        let result = self.exec(&session, host, command).await;
        Self::disconnect(session, host).await;
        result
    }

    async fn upload(
        &self,
        host: &str,
        local_file: &Path,
        remote_dir: &str,
    ) -> Result<(), RemoteError> {
        info!(host, file = %local_file.display(), dir = remote_dir, "upload");

        let session = self.connect(host).await?;
        let result = self.transfer(&session, host, local_file, remote_dir).await;
        Self::disconnect(session, host).await;

        let copied = result?;
        info!(host, bytes = copied, "file copied");
        Ok(())
    }
}

fn session_error(host: &str, e: russh::Error) -> RemoteError {
    RemoteError::Session {
        host: host.to_string(),
        message: e.to_string(),
    }
}

fn local_error(path: &Path, e: std::io::Error) -> RemoteError {
    RemoteError::LocalFile {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
