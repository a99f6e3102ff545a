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

//! `braket tasks` implementation.

use anyhow::{Context as _, Result};
use braketctl_braket::{BraketClient, CreateTask, ListTasks, DEFAULT_MAX_RESULTS, DEFAULT_SHOTS};
use braketctl_core::{config_keys, Context, Error};
use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use super::common::{field_str, items, print_fields, print_table, styled_status, Output};

const DEFAULT_KEY_PREFIX: &str = "tasks";

#[derive(Subcommand, Debug)]
pub enum TasksAction {
    /// List quantum tasks
    List {
        /// Only tasks submitted to this device ARN
        #[arg(long)]
        device: Option<String>,

        /// Only tasks in this status (CREATED, QUEUED, RUNNING, COMPLETED, FAILED, CANCELLED)
        #[arg(long)]
        status: Option<String>,

        /// Page size
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u32,
    },

    /// Show one quantum task
    Get {
        /// Task ARN
        arn: String,
    },

    /// Submit a quantum task
    Create(CreateArgs),

    /// Cancel a quantum task
    Cancel {
        /// Task ARN
        arn: String,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Device ARN to run on
    #[arg(long)]
    pub device: String,

    /// Number of shots
    #[arg(long, default_value_t = DEFAULT_SHOTS)]
    pub shots: u64,

    /// Result bucket, defaults to the `outputS3Bucket` setting
    #[arg(long)]
    pub s3_bucket: Option<String>,

    /// Result key prefix, defaults to the `outputS3KeyPrefix` setting
    #[arg(long)]
    pub s3_prefix: Option<String>,

    /// Action document as JSON, defaults to a Bell-state OpenQASM 3 program
    #[arg(long)]
    pub action: Option<String>,
}

/// Execute the tasks command.
pub async fn execute(ctx: Context, output: Output, action: TasksAction) -> Result<()> {
    let client = BraketClient::new(ctx.clone());

    match action {
        TasksAction::List {
            device,
            status,
            max_results,
        } => {
            let mut req = ListTasks::new().with_max_results(max_results);
            if let Some(device) = device {
                req = req.with_device_arn(device);
            }
            if let Some(status) = status {
                req = req.with_status(status);
            }

            let resp = output
                .spin("Listing quantum tasks...", client.list_tasks(&req))
                .await?;
            output.render(&resp, print_task_list)
        }
        TasksAction::Get { arn } => {
            let resp = output
                .spin("Fetching quantum task...", client.get_task(&arn))
                .await?;
            output.render(&resp, print_task)
        }
        TasksAction::Create(args) => {
            let req = build_create_request(&ctx, args)?;
            let resp = output
                .spin("Creating quantum task...", client.create_task(&req))
                .await?;
            output.render(&resp, |v| {
                println!(
                    "{} Created task {}",
                    style("✓").green(),
                    style(field_str(v, "quantumTaskArn")).bold()
                );
            })
        }
        TasksAction::Cancel { arn } => {
            let resp = output
                .spin("Cancelling quantum task...", client.cancel_task(&arn))
                .await?;
            output.render(&resp, |v| {
                let state = field_str(v, "cancellationStatus");
                println!("{} Cancel requested for {arn} ({state})", style("✓").green());
            })
        }
    }
}

fn build_create_request(ctx: &Context, args: CreateArgs) -> Result<CreateTask> {
    let bucket = match args.s3_bucket {
        Some(bucket) => Some(bucket),
        None => ctx.config_get(config_keys::OUTPUT_S3_BUCKET)?,
    }
    .ok_or_else(|| {
        Error::config_invalid(
            "No output bucket. Pass --s3-bucket or run `braket config set outputS3Bucket <BUCKET>`",
        )
    })?;
    let prefix = match args.s3_prefix {
        Some(prefix) => prefix,
        None => ctx
            .config_get(config_keys::OUTPUT_S3_KEY_PREFIX)?
            .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
    };

    let mut req = CreateTask::new(args.device, bucket, prefix).with_shots(args.shots);
    if let Some(action) = args.action {
        let action: Value =
            serde_json::from_str(&action).context("--action must be a JSON document")?;
        req = req.with_action(action);
    }
    Ok(req)
}

fn print_task_list(resp: &Value) {
    let rows: Vec<Vec<String>> = items(resp, "quantumTasks")
        .iter()
        .map(|t| {
            vec![
                field_str(t, "quantumTaskArn"),
                styled_status(&field_str(t, "status")),
                field_str(t, "deviceArn"),
                field_str(t, "shots"),
                field_str(t, "createdAt"),
            ]
        })
        .collect();
    print_table(&["ARN", "STATUS", "DEVICE", "SHOTS", "CREATED"], &rows);
}

fn print_task(resp: &Value) {
    print_fields(
        resp,
        &[
            ("ARN", "quantumTaskArn"),
            ("Status", "status"),
            ("Device", "deviceArn"),
            ("Shots", "shots"),
            ("Output", "outputS3Directory"),
            ("Created", "createdAt"),
            ("Ended", "endedAt"),
            ("Failure", "failureReason"),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use braketctl_core::{ErrorKind, MemoryConfigStore};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn args() -> CreateArgs {
        CreateArgs {
            device: "arn:dev".to_string(),
            shots: 100,
            s3_bucket: None,
            s3_prefix: None,
            action: None,
        }
    }

    #[test]
    fn test_bucket_falls_back_to_config() {
        let ctx = Context::new().with_config_store(MemoryConfigStore::from_values([
            (config_keys::OUTPUT_S3_BUCKET, "cfg-bucket"),
            (config_keys::OUTPUT_S3_KEY_PREFIX, "cfg-prefix"),
        ]));
        let body = serde_json::to_value(build_create_request(&ctx, args()).unwrap()).unwrap();
        assert_eq!(body["outputS3Bucket"], json!("cfg-bucket"));
        assert_eq!(body["outputS3KeyPrefix"], json!("cfg-prefix"));
    }

    #[test]
    fn test_flags_override_config() {
        let ctx = Context::new().with_config_store(MemoryConfigStore::from_values([(
            config_keys::OUTPUT_S3_BUCKET,
            "cfg-bucket",
        )]));
        let mut args = args();
        args.s3_bucket = Some("flag-bucket".to_string());
        args.action = Some(r#"{"source":"OPENQASM 3;"}"#.to_string());

        let body = serde_json::to_value(build_create_request(&ctx, args).unwrap()).unwrap();
        assert_eq!(body["outputS3Bucket"], json!("flag-bucket"));
        assert_eq!(body["outputS3KeyPrefix"], json!("tasks"));
        assert_eq!(body["action"], json!({"source": "OPENQASM 3;"}));
    }

    #[test]
    fn test_missing_bucket_is_reported() {
        let ctx = Context::new().with_config_store(MemoryConfigStore::default());
        let err = build_create_request(&ctx, args()).unwrap_err();
        assert_eq!(
            err.downcast::<Error>().unwrap().kind(),
            ErrorKind::ConfigInvalid
        );
    }

    #[test]
    fn test_invalid_action_is_rejected() {
        let ctx = Context::new().with_config_store(MemoryConfigStore::from_values([(
            config_keys::OUTPUT_S3_BUCKET,
            "b",
        )]));
        let mut args = args();
        args.action = Some("not json".to_string());
        assert!(build_create_request(&ctx, args).is_err());
    }
}
