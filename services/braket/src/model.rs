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

use crate::constants::{BELL_STATE_SOURCE, DEFAULT_MAX_RESULTS, DEFAULT_SHOTS};
use serde::Serialize;
use serde_json::{json, Value};

/// A `{name, values}` filter object used by the POST based listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    /// Field the filter applies to.
    pub name: String,
    /// Accepted values for that field.
    pub values: Vec<String>,
}

impl Filter {
    /// Build a filter matching a single value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }
}

/// Body of `POST /quantum-tasks` used for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasks {
    max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_arn: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    filters: Vec<Filter>,
}

impl Default for ListTasks {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            device_arn: None,
            filters: Vec::new(),
        }
    }
}

impl ListTasks {
    /// Create a listing with default page size and no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Only list tasks submitted to this device.
    pub fn with_device_arn(mut self, device_arn: impl Into<String>) -> Self {
        self.device_arn = Some(device_arn.into());
        self
    }

    /// Only list tasks in this status, e.g. `COMPLETED`.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.filters.push(Filter::new("status", status));
        self
    }
}

/// Body of `POST /devices`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListDevices {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    filters: Vec<Filter>,
}

impl ListDevices {
    /// Create a listing without filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only list devices of this type, e.g. `QPU` or `SIMULATOR`.
    pub fn with_device_type(mut self, device_type: impl Into<String>) -> Self {
        self.filters.push(Filter::new("deviceType", device_type));
        self
    }

    /// Only list devices of this provider.
    pub fn with_provider_name(mut self, provider: impl Into<String>) -> Self {
        self.filters.push(Filter::new("providerName", provider));
        self
    }

    /// Only list devices in this status, e.g. `ONLINE`.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.filters.push(Filter::new("deviceStatus", status));
        self
    }
}

/// Query of `GET /jobs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListJobs {
    max_results: u32,
    state: Option<String>,
}

impl Default for ListJobs {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            state: None,
        }
    }
}

impl ListJobs {
    /// Create a listing with default page size and no state filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Only list jobs in this state, e.g. `RUNNING`.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Query pairs in the order they are sent.
    pub fn query(&self) -> Vec<(String, String)> {
        let mut query = vec![("maxResults".to_string(), self.max_results.to_string())];
        if let Some(state) = &self.state {
            query.push(("filters".to_string(), format!("state:{state}")));
        }
        query
    }
}

/// Body of `POST /quantum-tasks` used for creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    device_arn: String,
    shots: u64,
    output_s3_bucket: String,
    output_s3_key_prefix: String,
    action: Value,
}

impl CreateTask {
    /// Create a task running the Bell-state program with the default shot count.
    pub fn new(
        device_arn: impl Into<String>,
        output_s3_bucket: impl Into<String>,
        output_s3_key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            device_arn: device_arn.into(),
            shots: DEFAULT_SHOTS,
            output_s3_bucket: output_s3_bucket.into(),
            output_s3_key_prefix: output_s3_key_prefix.into(),
            action: bell_state_action(),
        }
    }

    /// Set the number of shots.
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Replace the default program with a caller supplied action document.
    pub fn with_action(mut self, action: Value) -> Self {
        self.action = action;
        self
    }
}

/// The OpenQASM 3 program action preparing and measuring a Bell pair.
pub fn bell_state_action() -> Value {
    json!({
        "braketSchemaHeader": {
            "name": "braket.ir.openqasm.program",
            "version": "1"
        },
        "source": BELL_STATE_SOURCE
    })
}

/// Body of `POST /jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJob {
    /// Where the job script lives and how it is started.
    pub algorithm_specification: AlgorithmSpecification,
    /// Compute resources of the job container.
    pub instance_config: InstanceConfig,
    /// Unique job name.
    pub job_name: String,
    /// Where results are written.
    pub output_data_config: OutputDataConfig,
    /// IAM role assumed by the job.
    pub role_arn: String,
    /// Where checkpoints are written, if anywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint_config: Option<CheckpointConfig>,
}

impl CreateJob {
    /// Create a job with the default instance configuration and no checkpoints.
    pub fn new(
        job_name: impl Into<String>,
        role_arn: impl Into<String>,
        script_mode_config: ScriptModeConfig,
        output_s3_path: impl Into<String>,
    ) -> Self {
        Self {
            algorithm_specification: AlgorithmSpecification { script_mode_config },
            instance_config: InstanceConfig::default(),
            job_name: job_name.into(),
            output_data_config: OutputDataConfig {
                s3_path: output_s3_path.into(),
            },
            role_arn: role_arn.into(),
            checkpoint_config: None,
        }
    }

    /// Override the instance configuration.
    pub fn with_instance_config(mut self, instance_config: InstanceConfig) -> Self {
        self.instance_config = instance_config;
        self
    }

    /// Write checkpoints to the given S3 uri.
    pub fn with_checkpoint_s3_uri(mut self, s3_uri: impl Into<String>) -> Self {
        self.checkpoint_config = Some(CheckpointConfig {
            s3_uri: s3_uri.into(),
        });
        self
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmSpecification {
    pub script_mode_config: ScriptModeConfig,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptModeConfig {
    pub entry_point: String,
    pub s3_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_type: Option<String>,
}

impl ScriptModeConfig {
    /// Run `entry_point` from the script stored at `s3_uri`.
    pub fn new(entry_point: impl Into<String>, s3_uri: impl Into<String>) -> Self {
        Self {
            entry_point: entry_point.into(),
            s3_uri: s3_uri.into(),
            compression_type: None,
        }
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceConfig {
    pub instance_type: String,
    pub instance_count: u32,
    pub volume_size_in_gb: u32,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            instance_type: "ml.m5.large".to_string(),
            instance_count: 1,
            volume_size_in_gb: 30,
        }
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDataConfig {
    pub s3_path: String,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointConfig {
    pub s3_uri: String,
}
