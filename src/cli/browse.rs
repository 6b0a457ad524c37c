use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::Utc;
use rand::Rng;

use crate::cli::render::{NO_MATCHES_MESSAGE, render_header, render_selection};
use crate::sampler::Strategy;
use crate::session::Session;

const HELP: &str = "Commands: [n]ext (or Enter), [r] toggle retweets, [p] toggle replies, \
                    [s <strategy>] change strategy, [h]elp, [q]uit";

/// User actions read from one input line
#[derive(Debug, PartialEq)]
pub enum Action {
    Next,
    ToggleRetweets,
    ToggleReplies,
    SetStrategy(Strategy),
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_action(line: &str) -> Action {
    let line = line.trim();
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match command {
        "" | "n" | "next" => Action::Next,
        "r" | "retweets" => Action::ToggleRetweets,
        "p" | "replies" => Action::ToggleReplies,
        "s" | "strategy" => match argument.parse::<Strategy>() {
            Ok(strategy) => Action::SetStrategy(strategy),
            Err(e) => Action::Invalid(e.to_string()),
        },
        "h" | "help" | "?" => Action::Help,
        "q" | "quit" | "exit" => Action::Quit,
        other => Action::Invalid(format!("unknown command {:?}", other)),
    }
}

/// Line-driven browse loop. Ends on `q` or end of input.
pub fn run_browse<R, I, W>(session: &mut Session<R>, input: I, out: &mut W) -> Result<()>
where
    R: Rng,
    I: BufRead,
    W: Write,
{
    writeln!(out, "{}", HELP)?;
    write_card(session, out)?;

    for line in input.lines() {
        match parse_action(&line?) {
            Action::Next => {
                session.next();
            }
            Action::ToggleRetweets => {
                session.toggle_retweets();
                writeln!(out, "Hide retweets: {}", on_off(session.filter().hide_retweets))?;
            }
            Action::ToggleReplies => {
                session.toggle_replies();
                writeln!(out, "Hide replies: {}", on_off(session.filter().hide_replies))?;
            }
            Action::SetStrategy(strategy) => {
                session.set_strategy(strategy);
            }
            Action::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Action::Quit => break,
            Action::Invalid(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        }
        write_card(session, out)?;
    }

    out.flush()?;
    Ok(())
}

fn write_card<R: Rng, W: Write>(session: &Session<R>, out: &mut W) -> Result<()> {
    writeln!(out)?;
    match session.current() {
        Some(selection) => {
            writeln!(out, "{}", render_header(session.view().len(), session.strategy()))?;
            writeln!(out)?;
            writeln!(out, "{}", render_selection(selection, &Utc::now()))?;
        }
        None => writeln!(out, "{}", NO_MATCHES_MESSAGE)?,
    }
    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
