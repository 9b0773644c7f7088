//! Scripted [`CommandRunner`] for tests.
//!
//! Responses are matched against an invocation by token window: a pattern
//! such as `"example.com A"` matches when those tokens appear contiguously in
//! `program args...`. Registration order decides between several matches.
//!
//! ```ignore
//! let runner = MockRunner::new();
//! runner.respond("example.com A", CommandOutput::ok("93.184.216.34\n"));
//! runner.respond_timeout("slow.test A");
//! ```

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{CommandError, CommandOutput, CommandRunner, Invocation};

#[derive(Debug, Clone)]
enum Scripted {
    Output(CommandOutput),
    Timeout,
}

#[derive(Debug, Default)]
pub struct MockRunner {
    responses: Mutex<Vec<(Vec<String>, Scripted)>>,
    default: Option<CommandOutput>,
    calls: Mutex<Vec<(String, Duration)>>,
}

impl MockRunner {
    /// Unmatched invocations fail with an empty stderr.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unmatched invocations return `default`.
    pub fn with_default(default: CommandOutput) -> Self {
        Self {
            default: Some(default),
            ..Self::default()
        }
    }

    pub fn respond(&self, pattern: &str, output: CommandOutput) {
        self.push(pattern, Scripted::Output(output));
    }

    pub fn respond_timeout(&self, pattern: &str) {
        self.push(pattern, Scripted::Timeout);
    }

    /// Every invocation seen so far, rendered as a command line, with its timeout.
    pub fn calls(&self) -> Vec<(String, Duration)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    /// Number of recorded invocations matching `pattern`.
    pub fn count_matching(&self, pattern: &str) -> usize {
        let pattern = tokens(pattern);
        self.calls()
            .iter()
            .filter(|(line, _)| window_matches(&tokens(line), &pattern))
            .count()
    }

    fn push(&self, pattern: &str, scripted: Scripted) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push((tokens(pattern), scripted));
        }
    }

    fn lookup(&self, line: &[String]) -> Option<Scripted> {
        let responses = self.responses.lock().ok()?;
        responses
            .iter()
            .find(|(pattern, _)| window_matches(line, pattern))
            .map(|(_, scripted)| scripted.clone())
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError> {
        let line: String = invocation.to_string();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((line.clone(), timeout));
        }

        match self.lookup(&tokens(&line)) {
            Some(Scripted::Output(output)) => Ok(output),
            Some(Scripted::Timeout) => Err(CommandError::Timeout(timeout)),
            None => Ok(self
                .default
                .clone()
                .unwrap_or_else(|| CommandOutput::failed(""))),
        }
    }
}

fn tokens(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

fn window_matches(line: &[String], pattern: &[String]) -> bool {
    if pattern.is_empty() {
        return true;
    }
    line.windows(pattern.len()).any(|window| window == pattern)
}
