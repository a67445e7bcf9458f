//! # Info Command
//!
//! Aggregates independent local status probes into one multi-line reply.
//! A failing probe contributes its error text; it never aborts the others.

use crate::application::registry::{Command, CommandContext};
use crate::domain::types::Reply;
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;

/// Label and probe utility for each status line.
const PROBES: [(&str, &str); 4] = [
    ("Battery", "battery"),
    ("Volume", "volume"),
    ("Wifi", "wifi"),
    ("Unread", "mail_check"),
];

pub struct Info;

#[async_trait]
impl Command for Info {
    async fn run(&self, ctx: &CommandContext, _args: &[String], _caller: &str) -> Reply {
        let mut lines = Vec::with_capacity(PROBES.len());
        for (label, probe) in PROBES {
            let value = match ctx.procs.run_sync(probe, &[]).await {
                Ok(out) => strip_tags(out.lines().next().unwrap_or("")),
                Err(e) => e.to_string(),
            };
            lines.push(format!("{label}: {value}"));
        }
        vec![lines.join("\n")]
    }
}

/// Probes emit status-bar markup; only the bare text is worth relaying.
fn strip_tags(line: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());
    tag.replace_all(line, "").into_owned()
}
