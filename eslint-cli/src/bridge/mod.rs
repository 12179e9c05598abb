//! Node.js bridge to a project-local ESLint.
//!
//! A long-lived `node` child process loads the ESLint package and answers
//! newline-delimited JSON requests on its stdin/stdout. Requests are
//! serialised: one request is in flight at a time.

use std::{
    io::{BufRead, BufReader, Write},
    path::Path,
    process::{Child, ChildStdin, ChildStdout, Stdio},
    sync::Mutex,
};

use anyhow::{Context, anyhow, bail};
use rule_inspect::{LintConfig, LintEngine, RuleMeta, Source, Verification, Violation};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::{locate::find_local_eslint_package, utils::Command};

const SCRIPT: &str = include_str!("bridge.js");

/// Environment variable carrying the ESLint package directory.
pub const ESLINT_PATH_ENV: &str = "ESLINT_CLI_ESLINT_PATH";

#[derive(Debug, Deserialize)]
struct Response {
    id: Option<u64>,
    ok: bool,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Verified {
    messages: Vec<Violation>,
    handle: Option<u64>,
}

struct Channel {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    next_id: u64,
}

impl Channel {
    fn call(&mut self, op: &str, params: Value) -> anyhow::Result<Value> {
        self.next_id += 1;
        let id = self.next_id;

        let mut request = match params {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => bail!("bridge parameters must be an object, got {other}"),
        };
        request.insert("id".into(), id.into());
        request.insert("op".into(), op.into());

        let mut line = serde_json::to_string(&request)?;
        line.push('\n');
        self.stdin
            .write_all(line.as_bytes())
            .and_then(|_| self.stdin.flush())
            .context("failed to write to the ESLint bridge")?;

        loop {
            let mut line = String::new();
            let read = self
                .stdout
                .read_line(&mut line)
                .context("failed to read from the ESLint bridge")?;
            if read == 0 {
                bail!("the ESLint bridge exited while handling '{op}'");
            }

            let response: Response = match serde_json::from_str(line.trim()) {
                Ok(response) => response,
                Err(_) => {
                    debug!("BRIDGE ignored output: {}", line.trim_end());
                    continue;
                }
            };
            if response.id != Some(id) {
                debug!("BRIDGE ignored stale response {:?}", response.id);
                continue;
            }
            if !response.ok {
                let error = response.error.unwrap_or_else(|| "unknown error".into());
                bail!("ESLint bridge '{op}' failed: {error}");
            }
            return Ok(response.result);
        }
    }
}

/// Connection to a `node` process hosting ESLint.
pub struct NodeBridge {
    channel: Mutex<Channel>,
}

impl NodeBridge {
    /// Starts a bridge for the ESLint package at `eslint_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `node` cannot be started.
    pub fn spawn(eslint_dir: &Path, cwd: &Path) -> anyhow::Result<Self> {
        let mut cmd = Command::new("node", cwd);
        cmd.arg("-e")
            .arg(SCRIPT)
            .env(ESLINT_PATH_ENV, eslint_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        debug!("BRIDGE start for '{}'", eslint_dir.display());
        let mut child = cmd.spawn().context("failed to start `node`")?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("bridge stdin is not piped"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("bridge stdout is not piped"))?;

        Ok(Self {
            channel: Mutex::new(Channel {
                child,
                stdin,
                stdout: BufReader::new(stdout),
                next_id: 0,
            }),
        })
    }

    /// Starts a bridge for the project-local ESLint of `cwd`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no local ESLint or `node` cannot be started.
    pub fn locate(cwd: &Path) -> anyhow::Result<Self> {
        let eslint_dir = find_local_eslint_package(cwd)
            .ok_or_else(|| anyhow!("Cannot find local ESLint in '{}'", cwd.display()))?;
        Self::spawn(&eslint_dir, cwd)
    }

    fn request<T: DeserializeOwned>(&self, op: &str, params: Value) -> anyhow::Result<T> {
        let mut channel = self
            .channel
            .lock()
            .map_err(|_| anyhow!("the ESLint bridge is poisoned"))?;
        let result = channel.call(op, params)?;
        serde_json::from_value(result).with_context(|| format!("unexpected '{op}' result"))
    }

    /// Auto-fixes `text` with `config`. Returns `None` if nothing changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the bridge fails.
    pub fn fix(&self, text: &str, config: &LintConfig) -> anyhow::Result<Option<String>> {
        self.request("fix", json!({"text": text, "config": config}))
    }
}

impl LintEngine for NodeBridge {
    type Parsed = u64;

    fn rules(&self) -> anyhow::Result<Vec<RuleMeta>> {
        self.request("rules", Value::Null)
    }

    fn effective_config(&self, base: &LintConfig) -> anyhow::Result<LintConfig> {
        self.request("config", json!({"config": base}))
    }

    fn verify(
        &self,
        source: Source<'_, u64>,
        config: &LintConfig,
        path: &Path,
    ) -> anyhow::Result<Verification<u64>> {
        let mut params = json!({
            "config": config,
            "filename": path.to_string_lossy(),
        });
        match source.parsed {
            Some(handle) => params["handle"] = json!(handle),
            None => params["text"] = json!(source.text),
        }

        let verified: Verified = self.request("verify", params)?;
        Ok(Verification {
            violations: verified.messages,
            parsed: verified.handle,
        })
    }

    fn release(&self, parsed: u64) {
        if let Err(e) = self.request::<Value>("release", json!({"handle": parsed})) {
            debug!("BRIDGE release {parsed} failed: {e:#}");
        }
    }
}

impl Drop for NodeBridge {
    fn drop(&mut self) {
        let channel = match self.channel.get_mut() {
            Ok(channel) => channel,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = channel.child.kill() {
            debug!("BRIDGE kill: {e}");
        }
        let _ = channel.child.wait();
    }
}
