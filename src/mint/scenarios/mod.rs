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

//! Functional scenarios run against the server under test.
//!
//! Every scenario gets a fresh, empty bucket and records the arguments it
//! used so a failure can be reproduced by hand.

mod checksums;
mod encryption;
mod objects;

pub use checksums::{
    large_fixture_multipart, multipart_composite_checksums, multipart_full_object_checksum,
    part_checksum_reads, streaming_upload,
};
pub use encryption::{sse_c_compose_key_rotation, sse_c_copy_key_rotation};
pub use objects::{kms_put_get, put_get_fixture, range_reads};

use crate::mint::config::MintConfig;
use crate::mint::error::Result;
use crate::mint::fixture::FixtureGenerator;
use crate::mint::fixture::registry::MIB;
use crate::mint::storage::ObjectStorage;
use futures_util::future::BoxFuture;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Smallest part size accepted by S3 for all but the last part.
pub const MIN_PART_SIZE: usize = 5 * MIB as usize;

/// Arguments recorded by a scenario for the report.
pub type ScenarioArgs = Map<String, Value>;

pub type ScenarioFuture<'a> = BoxFuture<'a, Result<Outcome>>;

/// Successful scenario result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    /// The scenario does not apply to the server or configuration under test.
    NotApplicable(String),
}

/// Everything a scenario may use.
#[derive(Clone, Debug)]
pub struct ScenarioContext {
    pub store: Arc<dyn ObjectStorage>,
    pub fixtures: Arc<FixtureGenerator>,
    pub config: MintConfig,
    /// Empty bucket owned by this scenario.
    pub bucket: String,
}

#[derive(Clone, Copy)]
pub struct Scenario {
    pub function: &'static str,
    /// Only run with `MINT_MODE=full`.
    pub full_only: bool,
    pub run: for<'a> fn(&'a ScenarioContext, &'a mut ScenarioArgs) -> ScenarioFuture<'a>,
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("function", &self.function)
            .field("full_only", &self.full_only)
            .finish()
    }
}

/// Every scenario in run order.
pub fn all() -> Vec<Scenario> {
    vec![
        Scenario {
            function: "put_get_fixture",
            full_only: false,
            run: put_get_fixture,
        },
        Scenario {
            function: "range_reads",
            full_only: false,
            run: range_reads,
        },
        Scenario {
            function: "multipart_composite_checksums",
            full_only: false,
            run: multipart_composite_checksums,
        },
        Scenario {
            function: "multipart_full_object_checksum",
            full_only: false,
            run: multipart_full_object_checksum,
        },
        Scenario {
            function: "streaming_upload",
            full_only: false,
            run: streaming_upload,
        },
        Scenario {
            function: "part_checksum_reads",
            full_only: false,
            run: part_checksum_reads,
        },
        Scenario {
            function: "sse_c_copy_key_rotation",
            full_only: false,
            run: sse_c_copy_key_rotation,
        },
        Scenario {
            function: "sse_c_compose_key_rotation",
            full_only: false,
            run: sse_c_compose_key_rotation,
        },
        Scenario {
            function: "kms_put_get",
            full_only: false,
            run: kms_put_get,
        },
        Scenario {
            function: "large_fixture_multipart",
            full_only: true,
            run: large_fixture_multipart,
        },
    ]
}

fn record(args: &mut ScenarioArgs, key: &str, value: impl Into<Value>) {
    args.insert(key.to_string(), value.into());
}
