pub mod config;
pub mod credentials;
pub mod keys;
pub mod request;
pub mod whoami;

pub use config::{ConfigCommands, config_command};
pub use credentials::CredentialArgs;
pub use keys::{KeysCommands, keys_command};
pub use request::{RequestCommands, request_command};
pub use whoami::{WhoamiCommands, whoami_command};
