// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking HTTP connector for a Control Hub style job-runner API.
//!
//! Authenticates once with a user/password pair, then replays the session
//! token on every request. No retries: a failed call is reported as-is.

mod wire;

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use reap_core::{Job, JobId};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::connector::{ConnectorError, ControlPlane};
use wire::{HistoryEntryJson, JobJson, LoginRequest};

/// Header carrying the session token, both from login and on later calls
pub const AUTH_TOKEN_HEADER: &str = "X-SS-User-Auth-Token";

/// CSRF guard header the API requires on every call
const REQUESTED_BY_HEADER: &str = "X-Requested-By";
const REQUESTED_BY: &str = "reap";

const LOGIN_PATH: &str = "/security/public-rest/v1/authentication/login";
const JOBS_PATH: &str = "/jobrunner/rest/v1/jobs";
const JOB_PATH: &str = "/jobrunner/rest/v1/job";
const EXPORT_PATH: &str = "/jobrunner/rest/v1/jobs/exportJobs";

/// Jobs fetched per listing request
pub const PAGE_SIZE: usize = 50;

/// Connection settings for [`ControlHubClient`]
#[derive(Clone)]
pub struct ControlHubSettings {
    pub base_url: String,
    pub user: String,
    pub password: String,
    pub timeout: Duration,
}

impl fmt::Debug for ControlHubSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlHubSettings")
            .field("base_url", &self.base_url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Authenticated session against the control plane
pub struct ControlHubClient {
    http: Client,
    base_url: String,
}

impl ControlHubClient {
    /// Log in and build a session client.
    pub fn connect(settings: &ControlHubSettings) -> Result<Self, ConnectorError> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        let login = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| transport("login", e))?;

        debug!(url = %base_url, user = %settings.user, "logging in");
        let response = login
            .post(format!("{base_url}{LOGIN_PATH}"))
            .header(REQUESTED_BY_HEADER, REQUESTED_BY)
            .json(&LoginRequest { user_name: &settings.user, password: &settings.password })
            .send()
            .map_err(|e| transport("login", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ConnectorError::Auth(format!("HTTP {}: {}", status.as_u16(), body)));
        }
        let token = response
            .headers()
            .get(AUTH_TOKEN_HEADER)
            .cloned()
            .ok_or_else(|| ConnectorError::Auth(format!("no {AUTH_TOKEN_HEADER} in response")))?;

        Self::with_token(&base_url, token, settings.timeout)
    }

    fn with_token(
        base_url: &str,
        mut token: HeaderValue,
        timeout: Duration,
    ) -> Result<Self, ConnectorError> {
        token.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_TOKEN_HEADER, token);
        headers.insert(REQUESTED_BY_HEADER, HeaderValue::from_static(REQUESTED_BY));

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| transport("session setup", e))?;
        Ok(Self { http, base_url: base_url.to_string() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn job_url(&self, id: &JobId, suffix: &str) -> String {
        format!("{}{}/{}{}", self.base_url, JOB_PATH, urlencoding::encode(id), suffix)
    }

    fn list_page(&self, offset: usize) -> Result<Vec<JobJson>, ConnectorError> {
        let operation = "list jobs";
        let response = send(
            operation,
            self.http
                .get(self.url(JOBS_PATH))
                .query(&[("offset", offset.to_string()), ("len", PAGE_SIZE.to_string())]),
        )?;
        response.json().map_err(|e| decode(operation, e))
    }

    fn history(&self, id: &JobId) -> Result<Vec<HistoryEntryJson>, ConnectorError> {
        let operation = "job history";
        let response = send(operation, self.http.get(self.job_url(id, "/history")))?;
        response.json().map_err(|e| decode(operation, e))
    }
}

impl ControlPlane for ControlHubClient {
    fn list_jobs(&self) -> Result<Vec<Job>, ConnectorError> {
        let mut listed = Vec::new();
        let mut seen = HashSet::new();
        let mut offset = 0;
        loop {
            let page = self.list_page(offset)?;
            let short_page = page.len() < PAGE_SIZE;
            offset += page.len();

            let before = listed.len();
            listed.extend(page.into_iter().filter(|entry| seen.insert(entry.id.clone())));
            // A server that ignores paging keeps answering with the same ids
            if short_page || listed.len() == before {
                break;
            }
        }
        debug!(count = listed.len(), "listed jobs");

        let mut jobs = Vec::with_capacity(listed.len());
        for entry in listed {
            let id = JobId::new(entry.id.as_str());
            let history = self.history(&id)?;
            jobs.push(entry.into_job(history));
        }
        Ok(jobs)
    }

    fn export_jobs(&self, ids: &[JobId]) -> Result<Vec<u8>, ConnectorError> {
        let operation = "export jobs";
        debug!(count = ids.len(), "exporting jobs");
        let response = send(operation, self.http.post(self.url(EXPORT_PATH)).json(ids))?;
        let bytes = response.bytes().map_err(|e| transport(operation, e))?;
        Ok(bytes.to_vec())
    }

    fn delete_job(&self, id: &JobId) -> Result<(), ConnectorError> {
        debug!(job = %id, "deleting job");
        send("delete job", self.http.delete(self.job_url(id, "")))?;
        Ok(())
    }
}

/// Send a request and turn non-2xx answers into [`ConnectorError::Status`].
fn send(operation: &'static str, request: RequestBuilder) -> Result<Response, ConnectorError> {
    let response = request.send().map_err(|e| transport(operation, e))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ConnectorError::Status { operation, status: status.as_u16(), body })
}

fn transport(operation: &'static str, e: reqwest::Error) -> ConnectorError {
    ConnectorError::Transport { operation, message: e.to_string() }
}

fn decode(operation: &'static str, e: reqwest::Error) -> ConnectorError {
    ConnectorError::Decode { operation, message: e.to_string() }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
