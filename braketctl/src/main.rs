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

//! `braket`: call the Amazon Braket API from the command line.
//!
//! Every call is signed with AWS SigV4 using the credentials stored by
//! `braket config set`, or the usual `AWS_*` environment variables.

use clap::{Parser, Subcommand};
use console::style;

mod commands;

use commands::{circuits, config, devices, tasks};

/// Amazon Braket command-line client
#[derive(Parser, Debug)]
#[command(name = "braket")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read and write persisted settings
    Config {
        #[command(subcommand)]
        action: config::ConfigAction,
    },

    /// Manage quantum tasks
    Tasks {
        #[command(subcommand)]
        action: tasks::TasksAction,
    },

    /// Browse quantum devices
    Devices {
        #[command(subcommand)]
        action: devices::DevicesAction,
    },

    /// Manage hybrid circuit jobs
    Circuits {
        #[command(subcommand)]
        action: circuits::CircuitsAction,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging, RUST_LOG still wins.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_target(false)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = commands::common::build_context()?;
    let output = commands::common::Output::new(cli.json);

    match cli.command {
        Commands::Config { action } => config::execute(&ctx, action),
        Commands::Tasks { action } => tasks::execute(ctx, output, action).await,
        Commands::Devices { action } => devices::execute(ctx, output, action).await,
        Commands::Circuits { action } => circuits::execute(ctx, output, action).await,
    }
}
