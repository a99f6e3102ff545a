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

//! `braket circuits` implementation, backed by the hybrid jobs API.

use anyhow::Result;
use braketctl_braket::{
    BraketClient, CreateJob, InstanceConfig, ListJobs, ScriptModeConfig, DEFAULT_MAX_RESULTS,
};
use braketctl_core::Context;
use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use super::common::{field_str, items, print_fields, print_table, styled_status, Output};

#[derive(Subcommand, Debug)]
pub enum CircuitsAction {
    /// List jobs
    List {
        /// Only jobs in this state (QUEUED, RUNNING, COMPLETED, FAILED, CANCELLED)
        #[arg(long)]
        state: Option<String>,

        /// Page size
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u32,
    },

    /// Show one job
    Get {
        /// Job name
        name: String,
    },

    /// Create a job
    Create(CreateArgs),

    /// Cancel a job
    Cancel {
        /// Job name
        name: String,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Unique job name
    #[arg(long)]
    pub name: String,

    /// IAM role the job assumes
    #[arg(long)]
    pub role_arn: String,

    /// S3 uri of the job script
    #[arg(long)]
    pub script_s3_uri: String,

    /// Entry point inside the script, e.g. `main:run`
    #[arg(long)]
    pub entry_point: String,

    /// S3 path for job output
    #[arg(long)]
    pub output_s3_path: String,

    #[arg(long, default_value = "ml.m5.large")]
    pub instance_type: String,

    #[arg(long, default_value_t = 1)]
    pub instance_count: u32,

    /// Volume size in GB
    #[arg(long, default_value_t = 30)]
    pub volume_size: u32,

    /// S3 uri for checkpoints
    #[arg(long)]
    pub checkpoint_s3_uri: Option<String>,
}

impl From<CreateArgs> for CreateJob {
    fn from(args: CreateArgs) -> Self {
        let job = CreateJob::new(
            args.name,
            args.role_arn,
            ScriptModeConfig::new(args.entry_point, args.script_s3_uri),
            args.output_s3_path,
        )
        .with_instance_config(InstanceConfig {
            instance_type: args.instance_type,
            instance_count: args.instance_count,
            volume_size_in_gb: args.volume_size,
        });

        match args.checkpoint_s3_uri {
            Some(uri) => job.with_checkpoint_s3_uri(uri),
            None => job,
        }
    }
}

/// Execute the circuits command.
pub async fn execute(ctx: Context, output: Output, action: CircuitsAction) -> Result<()> {
    let client = BraketClient::new(ctx);

    match action {
        CircuitsAction::List { state, max_results } => {
            let mut req = ListJobs::new().with_max_results(max_results);
            if let Some(state) = state {
                req = req.with_state(state);
            }
            let resp = output
                .spin("Listing jobs...", client.list_jobs(&req))
                .await?;
            output.render(&resp, print_job_list)
        }
        CircuitsAction::Get { name } => {
            let resp = output
                .spin("Fetching job...", client.get_job(&name))
                .await?;
            output.render(&resp, |v| {
                print_fields(
                    v,
                    &[
                        ("Name", "jobName"),
                        ("ARN", "jobArn"),
                        ("Status", "status"),
                        ("Role", "roleArn"),
                        ("Created", "createdAt"),
                        ("Started", "startedAt"),
                        ("Ended", "endedAt"),
                        ("Failure", "failureReason"),
                    ],
                );
            })
        }
        CircuitsAction::Create(args) => {
            let req = CreateJob::from(args);
            let resp = output
                .spin("Creating job...", client.create_job(&req))
                .await?;
            output.render(&resp, |v| {
                println!(
                    "{} Created job {}",
                    style("✓").green(),
                    style(field_str(v, "jobArn")).bold()
                );
            })
        }
        CircuitsAction::Cancel { name } => {
            let resp = output
                .spin("Cancelling job...", client.cancel_job(&name))
                .await?;
            output.render(&resp, |v| {
                let state = field_str(v, "cancellationStatus");
                println!("{} Cancel requested for {name} ({state})", style("✓").green());
            })
        }
    }
}

fn print_job_list(resp: &Value) {
    let rows: Vec<Vec<String>> = items(resp, "jobs")
        .iter()
        .map(|j| {
            vec![
                field_str(j, "jobName"),
                styled_status(&field_str(j, "status")),
                field_str(j, "device"),
                field_str(j, "createdAt"),
            ]
        })
        .collect();
    print_table(&["NAME", "STATUS", "DEVICE", "CREATED"], &rows);
}
