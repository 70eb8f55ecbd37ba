use std::ffi::OsString;

use thiserror::Error;

use crate::constants::defaults;

#[derive(Error, Debug)]
pub enum HostnameLookupError {
    #[error(transparent)]
    Os(#[from] nix::Error),
    #[error("hostname {0:?} is not valid UTF-8")]
    NotUnicode(OsString),
}

pub fn lookup_hostname() -> Result<String, HostnameLookupError> {
    nix::unistd::gethostname()?
        .into_string()
        .map_err(HostnameLookupError::NotUnicode)
}

/// Safely return the hostname, falling back to a placeholder if it can't be determined.
pub fn get_hostname() -> String {
    match lookup_hostname() {
        Ok(hostname) => hostname,
        Err(e) => {
            log::error!("Could not get hostname: {e}");
            defaults::HOST_UNDETERMINED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_hostname() {
        let hostname = get_hostname();
        assert!(!hostname.is_empty());
        if let Ok(looked_up) = lookup_hostname() {
            assert_eq!(hostname, looked_up);
        }
    }
}
