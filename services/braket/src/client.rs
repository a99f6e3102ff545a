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

use crate::constants::{
    DEFAULT_REGION, DEVICES_PATH, JOBS_PATH, PATH_SEGMENT_ENCODE_SET, QUANTUM_TASKS_PATH,
};
use crate::error::{classify_response, credentials_not_configured};
use crate::model::{CreateJob, CreateTask, ListDevices, ListJobs, ListTasks};
use braketctl_aws_v4::{
    Credential, DefaultCredentialProvider, RequestSigner, AWS_DEFAULT_REGION, AWS_REGION,
    BRAKET_SERVICE,
};
use braketctl_core::config_keys::REGION;
use braketctl_core::time::DateTime;
use braketctl_core::{Context, Error, ProvideCredential, Result, SigningCredential};
use bytes::Bytes;
use http::Method;
use log::debug;
use percent_encoding::utf8_percent_encode;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Client for the Amazon Braket REST API.
///
/// Every call re-reads region and credentials from the context, so a config
/// change made between two calls is picked up by the second one.
#[derive(Clone)]
pub struct BraketClient {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = Credential>>,
    time: Option<DateTime>,
}

impl Debug for BraketClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BraketClient")
            .field("provider", &self.provider)
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

impl BraketClient {
    /// Create a client that loads credentials from the config store, then the
    /// environment.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            provider: Arc::new(DefaultCredentialProvider::new()),
            time: None,
        }
    }

    /// Replace the credential provider.
    pub fn with_credential_provider(
        mut self,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        self.provider = Arc::new(provider);
        self
    }

    /// Sign every request as if it were sent at `time`.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Region used for the next call.
    ///
    /// Config key `region` wins over `AWS_REGION`, which wins over
    /// `AWS_DEFAULT_REGION`. Falls back to `us-east-1`.
    pub fn region(&self) -> Result<String> {
        Ok(self
            .ctx
            .config_get(REGION)?
            .or_else(|| non_empty(self.ctx.env_var(AWS_REGION)))
            .or_else(|| non_empty(self.ctx.env_var(AWS_DEFAULT_REGION)))
            .unwrap_or_else(|| DEFAULT_REGION.to_string()))
    }

    /// List quantum tasks.
    pub async fn list_tasks(&self, req: &ListTasks) -> Result<Value> {
        self.send(Method::POST, QUANTUM_TASKS_PATH, Some(req), &[])
            .await
    }

    /// Describe one quantum task.
    pub async fn get_task(&self, task_arn: &str) -> Result<Value> {
        let path = format!("{QUANTUM_TASKS_PATH}/{}", encode_segment(task_arn));
        self.send(Method::GET, &path, None::<&()>, &[]).await
    }

    /// Submit a quantum task.
    pub async fn create_task(&self, req: &CreateTask) -> Result<Value> {
        self.send(Method::POST, QUANTUM_TASKS_PATH, Some(req), &[])
            .await
    }

    /// Cancel a quantum task.
    pub async fn cancel_task(&self, task_arn: &str) -> Result<Value> {
        let path = format!("{QUANTUM_TASKS_PATH}/{}/cancel", encode_segment(task_arn));
        self.send(Method::PUT, &path, None::<&()>, &[]).await
    }

    /// List devices.
    pub async fn list_devices(&self, req: &ListDevices) -> Result<Value> {
        self.send(Method::POST, DEVICES_PATH, Some(req), &[]).await
    }

    /// Describe one device.
    pub async fn get_device(&self, device_arn: &str) -> Result<Value> {
        let path = format!("{DEVICES_PATH}/{}", encode_segment(device_arn));
        self.send(Method::GET, &path, None::<&()>, &[]).await
    }

    /// Create a hybrid job.
    pub async fn create_job(&self, req: &CreateJob) -> Result<Value> {
        self.send(Method::POST, JOBS_PATH, Some(req), &[]).await
    }

    /// Describe one hybrid job.
    pub async fn get_job(&self, job_name: &str) -> Result<Value> {
        let path = format!("{JOBS_PATH}/{}", encode_segment(job_name));
        self.send(Method::GET, &path, None::<&()>, &[]).await
    }

    /// List hybrid jobs.
    ///
    /// Filters travel in the query string, which is not part of the signature.
    pub async fn list_jobs(&self, req: &ListJobs) -> Result<Value> {
        self.send(Method::GET, JOBS_PATH, None::<&()>, &req.query())
            .await
    }

    /// Cancel a hybrid job.
    pub async fn cancel_job(&self, job_name: &str) -> Result<Value> {
        let path = format!("{JOBS_PATH}/{}/cancel", encode_segment(job_name));
        self.send(Method::PUT, &path, None::<&()>, &[]).await
    }

    async fn send<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
        query: &[(String, String)],
    ) -> Result<Value>
    where
        T: Serialize + ?Sized,
    {
        let cred = self
            .provider
            .provide_credential(&self.ctx)
            .await?
            .filter(|cred| cred.is_valid())
            .ok_or_else(credentials_not_configured)?;

        let mut signer = RequestSigner::new(BRAKET_SERVICE, &self.region()?);
        if let Some(time) = self.time {
            signer = signer.with_time(time);
        }
        let signed = signer.sign(&method, path, body, &cred)?;

        let mut url = signed.url;
        if !query.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }

        debug!("sending {method} {url}");

        let mut req = http::Request::builder()
            .method(signed.method)
            .uri(&url)
            .body(Bytes::from(signed.body))?;
        *req.headers_mut() = signed.headers;

        let resp = self.ctx.http_send(req).await?;
        let status = resp.status();
        debug!("received {status} for {method} {path}");

        if !status.is_success() {
            return Err(classify_response(status, resp.body()));
        }

        let body = resp.into_body();
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| {
            Error::unexpected(format!("failed to parse response of {method} {path}")).with_source(e)
        })
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, &PATH_SEGMENT_ENCODE_SET).to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
