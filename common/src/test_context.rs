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

use crate::cleanup_guard::CleanupGuard;
use crate::memory_store::MemoryStore;
use crate::utils::rand_bucket_name;
use minio_mint::mint::config::MintConfig;
use minio_mint::mint::fixture::FixtureGenerator;
use minio_mint::mint::scenarios::ScenarioContext;
use minio_mint::mint::storage::ObjectStorage;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct TestContext {
    pub store: Arc<dyn ObjectStorage>,
    pub fixtures: Arc<FixtureGenerator>,
    pub config: MintConfig,
}

impl TestContext {
    /// Reads [`MintConfig`] from the environment and backs it with a fresh
    /// in-memory store.
    ///
    /// The in-memory store has no transport, so customer keys are always
    /// accepted and `secure` is forced on.
    pub fn new_from_env() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut config = MintConfig::from_env().unwrap();
        config.secure = true;
        Self::with_config(config)
    }

    pub fn with_config(config: MintConfig) -> Self {
        let store = MemoryStore::new().with_kms(config.enable_kms);
        let fixtures = Arc::new(FixtureGenerator::new(config.fixture_source()));
        Self {
            store: Arc::new(store),
            fixtures,
            config,
        }
    }

    /// Creates a temporary bucket with a guard that removes it.
    ///
    /// # Example
    /// ```ignore
    /// let (bucket_name, guard) = ctx.create_bucket_helper().await;
    /// // ...
    /// guard.cleanup().await;
    /// ```
    pub async fn create_bucket_helper(&self) -> (String, CleanupGuard) {
        let bucket_name = rand_bucket_name();
        self.store.make_bucket(&bucket_name).await.unwrap();
        let guard = CleanupGuard::new(self.store.clone(), &bucket_name);
        (bucket_name, guard)
    }

    /// Context for running a single scenario in `bucket`.
    pub fn scenario_context(&self, bucket: &str) -> ScenarioContext {
        ScenarioContext {
            store: self.store.clone(),
            fixtures: self.fixtures.clone(),
            config: self.config.clone(),
            bucket: bucket.to_string(),
        }
    }
}
