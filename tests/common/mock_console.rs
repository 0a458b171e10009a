//! Scripted console for testing

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use ticket_pr::error::{Error, Result};
use ticket_pr::workflow::{Console, Phase};

/// A status line written by the workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Info(String),
    Warn(String),
    Error(String),
}

/// Console that answers prompts from a script and records output
#[derive(Default)]
pub struct MockConsole {
    answers: Mutex<VecDeque<String>>,
    selections: Mutex<VecDeque<usize>>,
    prompts: Mutex<Vec<String>>,
    phases: Mutex<Vec<Phase>>,
    messages: Mutex<Vec<Message>>,
}

impl MockConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers for `input`, consumed in order
    pub fn with_answers(self, answers: &[&str]) -> Self {
        *self.answers.lock().unwrap() = answers.iter().map(ToString::to_string).collect();
        self
    }

    /// Indexes for `select`, consumed in order (default 0)
    pub fn with_selections(self, indexes: &[usize]) -> Self {
        *self.selections.lock().unwrap() = indexes.iter().copied().collect();
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn phases(&self) -> Vec<Phase> {
        self.phases.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                Message::Warn(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                Message::Error(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                Message::Info(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

impl Console for MockConsole {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("no scripted answer for '{prompt}'")))?;
        match default {
            Some(d) if answer.is_empty() => Ok(d.to_string()),
            _ => Ok(answer),
        }
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let index = self.selections.lock().unwrap().pop_front().unwrap_or(0);
        items
            .get(index)
            .cloned()
            .ok_or_else(|| Error::Prompt(format!("no item at index {index}")))
    }

    fn phase(&self, phase: Phase) {
        self.phases.lock().unwrap().push(phase);
    }

    fn info(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(Message::Info(message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(Message::Warn(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(Message::Error(message.to_string()));
    }
}
