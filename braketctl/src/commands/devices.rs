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

//! `braket devices` implementation.

use anyhow::Result;
use braketctl_braket::{BraketClient, ListDevices};
use braketctl_core::Context;
use clap::Subcommand;
use serde_json::Value;

use super::common::{field_str, items, print_fields, print_table, styled_status, Output};

#[derive(Subcommand, Debug)]
pub enum DevicesAction {
    /// List devices
    List {
        /// Only devices of this type (QPU, SIMULATOR)
        #[arg(long = "type")]
        device_type: Option<String>,

        /// Only devices of this provider
        #[arg(long)]
        provider: Option<String>,

        /// Only devices in this status (ONLINE, OFFLINE, RETIRED)
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one device
    Get {
        /// Device ARN
        arn: String,
    },
}

/// Execute the devices command.
pub async fn execute(ctx: Context, output: Output, action: DevicesAction) -> Result<()> {
    let client = BraketClient::new(ctx);

    match action {
        DevicesAction::List {
            device_type,
            provider,
            status,
        } => {
            let req = build_list_request(device_type, provider, status);
            let resp = output
                .spin("Listing devices...", client.list_devices(&req))
                .await?;
            output.render(&resp, print_device_list)
        }
        DevicesAction::Get { arn } => {
            let resp = output
                .spin("Fetching device...", client.get_device(&arn))
                .await?;
            output.render(&resp, |v| {
                print_fields(
                    v,
                    &[
                        ("Name", "deviceName"),
                        ("ARN", "deviceArn"),
                        ("Provider", "providerName"),
                        ("Type", "deviceType"),
                        ("Status", "deviceStatus"),
                    ],
                );
            })
        }
    }
}

fn build_list_request(
    device_type: Option<String>,
    provider: Option<String>,
    status: Option<String>,
) -> ListDevices {
    let mut req = ListDevices::new();
    if let Some(device_type) = device_type {
        req = req.with_device_type(device_type);
    }
    if let Some(provider) = provider {
        req = req.with_provider_name(provider);
    }
    if let Some(status) = status {
        req = req.with_status(status);
    }
    req
}

fn print_device_list(resp: &Value) {
    let rows: Vec<Vec<String>> = items(resp, "devices")
        .iter()
        .map(|d| {
            vec![
                field_str(d, "deviceName"),
                field_str(d, "providerName"),
                field_str(d, "deviceType"),
                styled_status(&field_str(d, "deviceStatus")),
                field_str(d, "deviceArn"),
            ]
        })
        .collect();
    print_table(&["NAME", "PROVIDER", "TYPE", "STATUS", "ARN"], &rows);
}
