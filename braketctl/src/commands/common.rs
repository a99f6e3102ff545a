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

//! Shared helpers for CLI commands.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use braketctl_config_file::FileConfigStore;
use braketctl_core::time::{format_display, parse_rfc3339};
use braketctl_core::{Context, OsEnv};
use braketctl_http_send_reqwest::ReqwestHttpSend;
use console::{measure_text_width, pad_str, style, Alignment};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

/// Build the context used by every command: reqwest transport, process
/// environment and the TOML config file.
pub fn build_context() -> Result<Context> {
    let store = FileConfigStore::from_default_location(&OsEnv)?;
    log::debug!("using config file {}", store.path().display());

    Ok(Context::new()
        .with_http_send(ReqwestHttpSend::new(reqwest::Client::new()))
        .with_env(OsEnv)
        .with_config_store(store))
}

/// How command results are rendered.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Await `fut` behind a spinner on stderr. No spinner in JSON mode.
    pub async fn spin<T, F>(&self, message: &str, fut: F) -> braketctl_core::Result<T>
    where
        F: Future<Output = braketctl_core::Result<T>>,
    {
        let spinner = if self.json {
            ProgressBar::hidden()
        } else {
            let spinner = ProgressBar::new_spinner();
            if let Ok(s) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
                spinner.set_style(s);
            }
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        };
        spinner.set_message(message.to_string());

        let result = fut.await;
        spinner.finish_and_clear();
        result
    }

    /// Print `value` as pretty JSON in JSON mode, otherwise call `human`.
    pub fn render(&self, value: &Value, human: impl FnOnce(&Value)) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }
}

/// Print rows as fixed-width columns under a bold header.
///
/// Cells may carry ANSI styling; widths are measured on the visible text.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("{}", style("No results.").dim());
        return;
    }

    let widths = column_widths(headers, rows);
    let header = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{h:<w$}"))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", style(header.trim_end()).bold());

    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad_str(cell, *w, Alignment::Left, None).into_owned())
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line.trim_end());
    }
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| measure_text_width(cell))
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or_default()
        })
        .collect()
}

/// Print `key: value` lines for the given fields of an object.
pub fn print_fields(value: &Value, fields: &[(&str, &str)]) {
    for (label, field) in fields {
        let text = field_str(value, field);
        if text != "-" {
            println!("{:<14} {}", style(format!("{label}:")).bold(), text);
        }
    }
}

/// Display text of a top-level field; `-` when absent.
pub fn field_str(value: &Value, field: &str) -> String {
    match value.get(field) {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) if field.ends_with("At") => display_time(s),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Items of a top-level array field, or none.
pub fn items<'a>(value: &'a Value, field: &str) -> &'a [Value] {
    value
        .get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Colour a lifecycle status.
pub fn styled_status(status: &str) -> String {
    match status {
        "COMPLETED" | "ONLINE" => style(status).green().to_string(),
        "FAILED" | "OFFLINE" | "RETIRED" => style(status).red().to_string(),
        "CANCELLED" | "CANCELLING" | "STOPPED" | "STOPPING" => style(status).yellow().to_string(),
        _ => style(status).cyan().to_string(),
    }
}

fn display_time(s: &str) -> String {
    match parse_rfc3339(s) {
        Ok(t) => format_display(t).to_string(),
        Err(_) => s.to_string(),
    }
}
