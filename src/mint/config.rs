// MinIO Rust Library for Amazon S3 Compatible Cloud Storage
// Copyright 2025 MinIO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Harness configuration read from the environment

use crate::mint::error::{Error, Result};
use crate::mint::fixture::FixtureSource;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use typed_builder::TypedBuilder;

const DEFAULT_SERVER_ENDPOINT: &str = "localhost:9000";
const DEFAULT_ACCESS_KEY: &str = "minioadmin";
const DEFAULT_SECRET_KEY: &str = "minioadmin";
const DEFAULT_SERVER_REGION: &str = "us-east-1";

/// Which scenarios to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MintMode {
    /// Skip slow scenarios that need the large data files.
    #[default]
    Core,
    Full,
}

impl FromStr for MintMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "core" => Ok(MintMode::Core),
            "full" => Ok(MintMode::Full),
            _ => Err(Error::InvalidConfig(format!(
                "MINT_MODE must be 'core' or 'full', got '{s}'"
            ))),
        }
    }
}

impl fmt::Display for MintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MintMode::Core => f.write_str("core"),
            MintMode::Full => f.write_str("full"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct MintConfig {
    #[builder(default = DEFAULT_SERVER_ENDPOINT.to_string(), setter(into))]
    pub endpoint: String,
    #[builder(default = DEFAULT_ACCESS_KEY.to_string(), setter(into))]
    pub access_key: String,
    #[builder(default = DEFAULT_SECRET_KEY.to_string(), setter(into))]
    pub secret_key: String,
    #[builder(default = DEFAULT_SERVER_REGION.to_string(), setter(into))]
    pub region: String,
    #[builder(default)]
    pub secure: bool,
    #[builder(default)]
    pub enable_kms: bool,
    /// Directory holding externally provided data files.
    #[builder(default, setter(strip_option))]
    pub data_dir: Option<PathBuf>,
    #[builder(default)]
    pub mode: MintMode,
    /// Keep running scenarios after a failure.
    #[builder(default)]
    pub run_on_fail: bool,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MintConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| -> bool {
            lookup(key)
                .map(|v| v.trim().parse::<bool>().unwrap_or(v.trim() == "1"))
                .unwrap_or(false)
        };

        let endpoint = lookup("SERVER_ENDPOINT").unwrap_or(DEFAULT_SERVER_ENDPOINT.to_string());
        log::debug!("SERVER_ENDPOINT={endpoint}");
        let access_key = lookup("ACCESS_KEY").unwrap_or(DEFAULT_ACCESS_KEY.to_string());
        log::debug!("ACCESS_KEY={access_key}");
        let secret_key = lookup("SECRET_KEY").unwrap_or(DEFAULT_SECRET_KEY.to_string());
        log::debug!("SECRET_KEY=*****");
        let region = lookup("SERVER_REGION").unwrap_or(DEFAULT_SERVER_REGION.to_string());
        log::debug!("SERVER_REGION={region}");
        let secure = flag("ENABLE_HTTPS");
        log::debug!("ENABLE_HTTPS={secure}");
        let enable_kms = flag("ENABLE_KMS");
        log::debug!("ENABLE_KMS={enable_kms}");
        let data_dir = lookup("MINT_DATA_DIR")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        log::debug!("MINT_DATA_DIR={data_dir:?}");
        let mode: MintMode = lookup("MINT_MODE").unwrap_or_default().parse()?;
        log::debug!("MINT_MODE={mode}");
        let run_on_fail = flag("RUN_ON_FAIL");
        log::debug!("RUN_ON_FAIL={run_on_fail}");

        Ok(Self {
            endpoint,
            access_key,
            secret_key,
            region,
            secure,
            enable_kms,
            data_dir,
            mode,
            run_on_fail,
        })
    }

    pub fn fixture_source(&self) -> FixtureSource {
        FixtureSource::from_data_dir(self.data_dir.as_deref())
    }

    pub fn is_full_mode(&self) -> bool {
        self.mode == MintMode::Full
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = MintConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, MintConfig::default());
        assert_eq!(config.fixture_source(), FixtureSource::Generated);
        assert!(!config.is_full_mode());
    }

    #[test]
    fn reads_all_settings() {
        let config = MintConfig::from_lookup(lookup(&[
            ("SERVER_ENDPOINT", "play.min.io"),
            ("ACCESS_KEY", "ak"),
            ("SECRET_KEY", "sk"),
            ("ENABLE_HTTPS", "1"),
            ("ENABLE_KMS", "true"),
            ("MINT_DATA_DIR", "/mint/data"),
            ("MINT_MODE", "full"),
            ("RUN_ON_FAIL", "false"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "play.min.io");
        assert!(config.secure);
        assert!(config.enable_kms);
        assert!(config.is_full_mode());
        assert!(!config.run_on_fail);
        assert_eq!(
            config.fixture_source(),
            FixtureSource::External(PathBuf::from("/mint/data"))
        );
    }

    #[test]
    fn bad_flag_falls_back_to_false() {
        let config = MintConfig::from_lookup(lookup(&[("RUN_ON_FAIL", "maybe")])).unwrap();
        assert!(!config.run_on_fail);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(matches!(
            MintConfig::from_lookup(lookup(&[("MINT_MODE", "quick")])),
            Err(Error::InvalidConfig(_))
        ));
    }
}
