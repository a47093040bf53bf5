// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::sync::Arc;

use log::debug;
use rgwsign_core::{Env, OsEnv, ProvideCredential, Result};

use crate::{constants::*, Credential};

/// EnvCredentialProvider loads RGW credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `RGW_ACCESS_KEY_ID`: The RGW access key ID
/// - `RGW_SECRET_ACCESS_KEY`: The RGW secret access key
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    env: Arc<dyn Env>,
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider reading the process environment.
    pub fn new() -> Self {
        Self::with_env(OsEnv)
    }

    /// Create a new EnvCredentialProvider reading the given env.
    pub fn with_env(env: impl Env) -> Self {
        Self { env: Arc::new(env) }
    }
}

impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    fn provide_credential(&self) -> Result<Option<Self::Credential>> {
        let access_key_id = self.env.var(RGW_ACCESS_KEY_ID);
        let secret_access_key = self.env.var(RGW_SECRET_ACCESS_KEY);

        match (access_key_id, secret_access_key) {
            (Some(ak), Some(sk)) => Ok(Some(Credential {
                access_key_id: ak,
                secret_access_key: sk,
            })),
            _ => {
                debug!("{RGW_ACCESS_KEY_ID} or {RGW_SECRET_ACCESS_KEY} is not set");
                Ok(None)
            }
        }
    }
}
