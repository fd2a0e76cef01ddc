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

//! Runs scenarios one after another and reports every result.

use crate::mint::config::MintConfig;
use crate::mint::error::{Error, StorageError};
use crate::mint::fixture::FixtureGenerator;
use crate::mint::names::rand_bucket_name;
use crate::mint::reporter::{LogEntry, Status, TestReporter};
use crate::mint::scenarios::{Outcome, Scenario, ScenarioArgs, ScenarioContext};
use crate::mint::storage::ObjectStorage;
use std::sync::Arc;
use std::time::Instant;

/// Value of the `name` field of every reported entry.
pub const REPORT_NAME: &str = "minio-mint";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub not_applicable: usize,
    /// Full-only scenarios left out in core mode.
    pub skipped: usize,
    /// Scenarios not run because an earlier one failed.
    pub aborted: usize,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

pub struct Runner {
    config: MintConfig,
    store: Arc<dyn ObjectStorage>,
    fixtures: Arc<FixtureGenerator>,
    reporter: Arc<dyn TestReporter>,
}

impl Runner {
    pub fn new(
        config: MintConfig,
        store: Arc<dyn ObjectStorage>,
        reporter: Arc<dyn TestReporter>,
    ) -> Self {
        let fixtures = Arc::new(FixtureGenerator::new(config.fixture_source()));
        Self::with_fixtures(config, store, fixtures, reporter)
    }

    /// Uses an existing generator, so checksums recorded by earlier runs are reused.
    pub fn with_fixtures(
        config: MintConfig,
        store: Arc<dyn ObjectStorage>,
        fixtures: Arc<FixtureGenerator>,
        reporter: Arc<dyn TestReporter>,
    ) -> Self {
        Self {
            config,
            store,
            fixtures,
            reporter,
        }
    }

    pub async fn run(&self, scenarios: &[Scenario]) -> RunSummary {
        let mut summary = RunSummary::default();
        for (i, scenario) in scenarios.iter().enumerate() {
            if scenario.full_only && !self.config.is_full_mode() {
                log::debug!("skipping {} in {} mode", scenario.function, self.config.mode);
                summary.skipped += 1;
                continue;
            }

            let entry = self.run_one(scenario).await;
            self.reporter.report(&entry);
            match entry.status {
                Status::Pass => summary.passed += 1,
                Status::NotApplicable => summary.not_applicable += 1,
                Status::Fail => {
                    summary.failed += 1;
                    if !self.config.run_on_fail {
                        summary.aborted = scenarios[i + 1..]
                            .iter()
                            .filter(|s| !s.full_only || self.config.is_full_mode())
                            .count();
                        log::warn!(
                            "{} failed, not running {} remaining scenarios",
                            scenario.function,
                            summary.aborted
                        );
                        break;
                    }
                }
            }
        }
        log::info!(
            "{} passed, {} failed, {} not applicable",
            summary.passed,
            summary.failed,
            summary.not_applicable
        );
        summary
    }

    /// Runs `scenario` in a bucket of its own and removes the bucket afterwards.
    pub async fn run_one(&self, scenario: &Scenario) -> LogEntry {
        let bucket = rand_bucket_name();
        let mut args = ScenarioArgs::new();
        let start = Instant::now();

        if let Err(e) = self.store.make_bucket(&bucket).await {
            args.insert("bucketName".into(), bucket.into());
            return LogEntry::new(REPORT_NAME, scenario.function, args, start.elapsed())
                .failed("unable to create bucket", Some(e.to_string()));
        }

        let ctx = ScenarioContext {
            store: self.store.clone(),
            fixtures: self.fixtures.clone(),
            config: self.config.clone(),
            bucket,
        };
        log::info!("running {} in bucket {}", scenario.function, ctx.bucket);
        let result = (scenario.run)(&ctx, &mut args).await;
        let entry = LogEntry::new(REPORT_NAME, scenario.function, args, start.elapsed());

        if let Err(e) = self.store.delete_and_purge_bucket(&ctx.bucket).await {
            log::warn!("unable to remove bucket {}: {e}", ctx.bucket);
        }

        match result {
            Ok(Outcome::Pass) => entry,
            Ok(Outcome::NotApplicable(reason)) => entry.not_applicable(reason),
            Err(Error::Storage(StorageError::NotImplemented(what))) => {
                entry.not_applicable(format!("not implemented: {what}"))
            }
            Err(e) => {
                let detail = std::error::Error::source(&e)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("{e:?}"));
                entry.failed(e.to_string(), Some(detail))
            }
        }
    }
}
