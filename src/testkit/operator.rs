//! Scripted operator decisions and an in-memory report.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::MarketConfig;
use crate::error::{Error, Result};
use crate::port::outbound::approval::MarketApproval;
use crate::port::outbound::report::UpdateReport;

/// Answers approval requests from a queue; declines once it runs dry.
#[derive(Default)]
pub struct ScriptedApproval {
    answers: Mutex<VecDeque<bool>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedApproval {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Symbols the approver was asked about, in order.
    pub fn asked(&self) -> Vec<String> {
        match self.asked.lock() {
            Ok(asked) => asked.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl MarketApproval for ScriptedApproval {
    async fn approve(&self, current: &MarketConfig, _proposed: &MarketConfig) -> Result<bool> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(current.symbol().to_string());
        }
        let answer = self
            .answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front());
        Ok(answer.unwrap_or(false))
    }
}

/// Keeps the last written report in memory.
#[derive(Default)]
pub struct MemoryReport {
    written: Mutex<Option<Vec<String>>>,
    fail: bool,
}

impl MemoryReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A report whose writes always fail.
    pub fn failing() -> Self {
        Self {
            written: Mutex::new(None),
            fail: true,
        }
    }

    pub fn written(&self) -> Option<Vec<String>> {
        self.written.lock().ok().and_then(|written| written.clone())
    }
}

impl UpdateReport for MemoryReport {
    fn write(&self, names: &[String]) -> Result<()> {
        if self.fail {
            return Err(Error::Io(std::io::Error::other("disk full")));
        }
        if let Ok(mut written) = self.written.lock() {
            *written = Some(names.to_vec());
        }
        Ok(())
    }
}
