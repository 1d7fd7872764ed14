//! Signing roles and their keys

use super::LocalSigner;
use alloy::primitives::Address;
use eyre::{eyre, Context, Result};
use std::fmt;

/// Account role that signs a given operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Contract administrator
    Admin,
    /// Market user (approvals and orders)
    User,
    /// Compute provider (registration and nodes)
    Provider,
}

impl Role {
    /// Environment variable holding the role's private key
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN_PRIVATE_KEY",
            Self::User => "USER_PRIVATE_KEY",
            Self::Provider => "PROVIDER_PRIVATE_KEY",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Provider => "provider",
        })
    }
}

/// Keys for the three roles. Only the role an operation needs must be present.
#[derive(Debug, Clone, Default)]
pub struct RoleKeys {
    admin: Option<LocalSigner>,
    user: Option<LocalSigner>,
    provider: Option<LocalSigner>,
}

impl RoleKeys {
    /// Parse whichever role keys are given
    pub fn from_hex(
        admin: Option<&str>,
        user: Option<&str>,
        provider: Option<&str>,
    ) -> Result<Self> {
        let parse = |role: Role, key: Option<&str>| -> Result<Option<LocalSigner>> {
            key.map(|key| {
                LocalSigner::from_private_key(key).with_context(|| format!("Invalid {} key", role))
            })
            .transpose()
        };

        Ok(Self {
            admin: parse(Role::Admin, admin)?,
            user: parse(Role::User, user)?,
            provider: parse(Role::Provider, provider)?,
        })
    }

    /// Signer for `role`; fails when no key was configured
    pub fn signer(&self, role: Role) -> Result<&LocalSigner> {
        let signer = match role {
            Role::Admin => &self.admin,
            Role::User => &self.user,
            Role::Provider => &self.provider,
        };
        signer.as_ref().ok_or_else(|| {
            eyre!(
                "No {} key configured (set {} or --{}-key)",
                role,
                role.env_var(),
                role
            )
        })
    }

    /// Address of the `role` account
    pub fn address(&self, role: Role) -> Result<Address> {
        self.signer(role).map(LocalSigner::address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::local::tests::{ADMIN_KEY, PROVIDER_KEY, USER_KEY};

    #[test]
    fn test_roles_map_to_their_keys() {
        let keys = RoleKeys::from_hex(Some(ADMIN_KEY), Some(USER_KEY), Some(PROVIDER_KEY)).unwrap();

        let addresses = [Role::Admin, Role::User, Role::Provider]
            .map(|role| keys.address(role).unwrap());
        assert_ne!(addresses[0], addresses[1]);
        assert_ne!(addresses[1], addresses[2]);
        assert_eq!(
            addresses[1],
            LocalSigner::from_private_key(USER_KEY).unwrap().address()
        );
    }

    #[test]
    fn test_missing_role_key() {
        let keys = RoleKeys::from_hex(None, Some(USER_KEY), None).unwrap();
        assert!(keys.signer(Role::User).is_ok());

        let err = keys.signer(Role::Provider).unwrap_err();
        assert!(err.to_string().contains("PROVIDER_PRIVATE_KEY"));
    }

    #[test]
    fn test_bad_key_names_role() {
        let err = RoleKeys::from_hex(None, None, Some("0xdead")).unwrap_err();
        assert!(err.to_string().contains("Invalid provider key"));
    }
}
