use std::fmt::{Debug, Formatter};

use rgwsign_core::utils::Redact;
use rgwsign_core::{Env, Error, Result};

use crate::canonical::SubResourceMatch;
use crate::constants::*;

/// Config carries all the configuration for signing RGW requests.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RGW_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RGW_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// `sub_resource_match` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RGW_SIGN_SUB_RESOURCE_MATCH`], `name` or `value`
    /// - default to [`SubResourceMatch::Name`]
    pub sub_resource_match: Option<SubResourceMatch>,
    /// `strict` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RGW_SIGN_STRICT`], `true` or `false`
    /// - default to `false`
    pub strict: Option<bool>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("sub_resource_match", &self.sub_resource_match)
            .field("strict", &self.strict)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, env: &dyn Env) -> Result<Self> {
        if let Some(v) = env.var(RGW_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = env.var(RGW_SECRET_ACCESS_KEY) {
            self.secret_access_key.get_or_insert(v);
        }
        if self.sub_resource_match.is_none() {
            if let Some(v) = env.var(RGW_SIGN_SUB_RESOURCE_MATCH) {
                self.sub_resource_match = Some(v.parse()?);
            }
        }
        if self.strict.is_none() {
            if let Some(v) = env.var(RGW_SIGN_STRICT) {
                let strict = v.trim().parse::<bool>().map_err(|e| {
                    Error::config_invalid(format!("{RGW_SIGN_STRICT} must be `true` or `false`"))
                        .with_source(e)
                })?;
                self.strict = Some(strict);
            }
        }

        Ok(self)
    }
}
