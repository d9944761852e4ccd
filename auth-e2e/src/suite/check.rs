// src/suite/check.rs

//! ステージ内のアサーション
//!
//! 失敗は `SuiteError::ExpectationFailed` として返し、シナリオ名とレスポンス本文を含めます。

use regex::Regex;
use reqwest::StatusCode;
use std::fmt::Debug;

use crate::error::{SuiteError, SuiteResult};
use crate::types::ApiReply;

fn failed(scenario: &str, detail: String) -> SuiteError {
    SuiteError::ExpectationFailed(format!("{}: {}", scenario, detail))
}

pub fn expect_status(reply: &ApiReply, expected: StatusCode, scenario: &str) -> SuiteResult<()> {
    if reply.status == expected {
        return Ok(());
    }
    Err(failed(
        scenario,
        format!(
            "expected status {}, got {} (body: {})",
            expected, reply.status, reply.text
        ),
    ))
}

pub fn expect_status_in(
    reply: &ApiReply,
    expected: &[StatusCode],
    scenario: &str,
) -> SuiteResult<()> {
    if expected.contains(&reply.status) {
        return Ok(());
    }
    Err(failed(
        scenario,
        format!(
            "expected one of {:?}, got {} (body: {})",
            expected.iter().map(StatusCode::as_u16).collect::<Vec<_>>(),
            reply.status,
            reply.text
        ),
    ))
}

pub fn expect_not_status(
    reply: &ApiReply,
    unexpected: StatusCode,
    scenario: &str,
) -> SuiteResult<()> {
    if reply.status != unexpected {
        return Ok(());
    }
    Err(failed(
        scenario,
        format!("did not expect status {} (body: {})", unexpected, reply.text),
    ))
}

pub fn expect_message(reply: &ApiReply, expected: &str, scenario: &str) -> SuiteResult<()> {
    if reply.message() == Some(expected) {
        return Ok(());
    }
    Err(failed(
        scenario,
        format!("expected message {:?}, got {:?}", expected, reply.message()),
    ))
}

pub fn expect_message_matches(
    reply: &ApiReply,
    pattern: &Regex,
    scenario: &str,
) -> SuiteResult<()> {
    if reply.message().is_some_and(|message| pattern.is_match(message)) {
        return Ok(());
    }
    Err(failed(
        scenario,
        format!(
            "expected message matching /{}/, got {:?}",
            pattern.as_str(),
            reply.message()
        ),
    ))
}

/// `details[0].message` の完全一致
pub fn expect_detail(reply: &ApiReply, expected: &str, scenario: &str) -> SuiteResult<()> {
    if reply.first_detail() == Some(expected) {
        return Ok(());
    }
    Err(failed(
        scenario,
        format!(
            "expected detail {:?}, got {:?} (body: {})",
            expected,
            reply.first_detail(),
            reply.text
        ),
    ))
}

pub fn expect_eq<T: PartialEq + Debug>(
    actual: T,
    expected: T,
    what: &str,
    scenario: &str,
) -> SuiteResult<()> {
    if actual == expected {
        return Ok(());
    }
    Err(failed(
        scenario,
        format!("{} mismatch: expected {:?}, got {:?}", what, expected, actual),
    ))
}

pub fn ensure(condition: bool, scenario: &str, detail: impl Into<String>) -> SuiteResult<()> {
    if condition {
        Ok(())
    } else {
        Err(failed(scenario, detail.into()))
    }
}
