//! Codec settings loaded through `figment`.
//!
//! Settings live under a `codec` table. [`CodecSettings::load`] layers the
//! defaults, then `presence.toml` in the working directory when it exists,
//! then `PRESENCE_CODEC__*` environment variables:
//!
//! ```toml
//! [codec]
//! naming = "snake-case-lower"
//! include_defaults = true
//! ```
//!
//! `PRESENCE_CODEC__NAMING=camel-case` overrides the file.

use std::{path::Path, sync::Arc};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{
    NamingPolicy,
    dict::{DefaultValueHandling, DictOptions},
    json::{DefaultIgnoreCondition, JsonOptions},
};

/// Table holding the codec settings.
pub const SECTION: &str = "codec";
/// Settings file looked up in the working directory.
pub const FILE_NAME: &str = "presence.toml";
/// Prefix of environment overrides; nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "PRESENCE_";

/// Failure to load codec settings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// A provider failed or the `codec` table has the wrong shape.
    #[error("failed to load codec settings: {0}")]
    Load(#[source] Box<figment::Error>),
}

impl From<figment::Error> for SettingsError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// Naming and default-value behaviour shared by both tree backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecSettings {
    /// Case convention for written field names.
    pub naming: Option<NamingPolicy>,
    /// Write default-valued fields for successes.
    pub include_defaults: bool,
}

impl CodecSettings {
    /// Figment layering defaults, [`FILE_NAME`], and the environment.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_from(FILE_NAME)
    }

    /// As [`CodecSettings::figment`], reading the file at `path` instead.
    #[must_use]
    pub fn figment_from(path: impl AsRef<Path>) -> Figment {
        Figment::new()
            .merge(Serialized::default(SECTION, Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load settings from the default layers.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a layer cannot be read or holds
    /// values of the wrong type.
    pub fn load() -> Result<Self, SettingsError> {
        Self::from_figment(&Self::figment())
    }

    /// Extract the `codec` table; a figment without one yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when the table has the wrong shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use figment::{Figment, providers::{Format, Toml}};
    /// use presence::{codec::NamingPolicy, settings::CodecSettings};
    ///
    /// let figment = Figment::from(Toml::string("[codec]\nnaming = \"camel-case\""));
    /// let settings = CodecSettings::from_figment(&figment)?;
    /// assert_eq!(settings.naming, Some(NamingPolicy::CamelCase));
    /// assert!(!settings.include_defaults);
    /// # Ok::<_, presence::settings::SettingsError>(())
    /// ```
    pub fn from_figment(figment: &Figment) -> Result<Self, SettingsError> {
        if !figment.contains(SECTION) {
            return Ok(Self::default());
        }
        Ok(figment.extract_inner(SECTION)?)
    }

    /// Options for the `serde_json` backend.
    #[must_use]
    pub const fn json_options(&self) -> JsonOptions {
        JsonOptions {
            naming: self.naming,
            ignore: if self.include_defaults {
                DefaultIgnoreCondition::Never
            } else {
                DefaultIgnoreCondition::WhenWritingDefault
            },
        }
    }

    /// Options for the figment backend.
    #[must_use]
    pub fn dict_options(&self) -> DictOptions {
        let defaults = if self.include_defaults {
            DefaultValueHandling::Include
        } else {
            DefaultValueHandling::Ignore
        };
        let options = DictOptions::default().with_default_handling(defaults);
        match self.naming {
            Some(policy) => options.with_hook(Arc::new(move |name: &str| policy.convert(name))),
            None => options,
        }
    }
}
