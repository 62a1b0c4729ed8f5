//! Interactive session over stdin: one line, one reducer action, one full
//! recomputation.

use anyhow::Result;
use std::io::{BufRead, Write};
use valuecase_core::{Action, format_currency, format_months, format_percent0};
use valuecase_finance::{EMPTY_SELECTION_PROMPT, Session, ValueCase};

use crate::render::render_dashboard;

const HELP: &str = "\
Commands:
  industry <name>        Telecom, Banking, Healthcare, Retail
  size <name>            Mid-Market, Enterprise, Global
  horizon <months>       12, 24, 36
  toggle <feature-id>    add or remove a capability
  adoption <pct>         AI adoption rate, 0-100
  data-quality <pct>     data quality, 0-100
  change-mgmt <pct>      change management readiness, 0-100
  show                   print the full dashboard
  export                 print the executive summary
  reset                  back to the default selection
  help
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Apply(Action),
    Show,
    Export,
    Help,
    Quit,
    Empty,
}

pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (line, ""),
    };

    let command = match cmd.to_lowercase().as_str() {
        "" => SessionCommand::Empty,
        "industry" => SessionCommand::Apply(Action::SetIndustry(
            require(cmd, arg, "name")?.parse().map_err(|e| format!("{e}"))?,
        )),
        "size" => SessionCommand::Apply(Action::SetSize(
            require(cmd, arg, "name")?.parse().map_err(|e| format!("{e}"))?,
        )),
        "horizon" => SessionCommand::Apply(Action::SetHorizon(
            require(cmd, arg, "months")?.parse().map_err(|e| format!("{e}"))?,
        )),
        "toggle" => {
            let id = require(cmd, arg, "feature-id")?;
            SessionCommand::Apply(Action::ToggleFeature(id.to_string()))
        }
        "adoption" => SessionCommand::Apply(Action::SetAdoption(parse_pct(cmd, arg)?)),
        "data-quality" | "data_quality" => {
            SessionCommand::Apply(Action::SetDataQuality(parse_pct(cmd, arg)?))
        }
        "change-mgmt" | "change_mgmt" => {
            SessionCommand::Apply(Action::SetChangeMgmt(parse_pct(cmd, arg)?))
        }
        "reset" => SessionCommand::Apply(Action::Reset),
        "show" => SessionCommand::Show,
        "export" => SessionCommand::Export,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(command)
}

fn require<'a>(cmd: &str, arg: &'a str, what: &str) -> Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!("usage: {cmd} <{what}>"))
    } else {
        Ok(arg)
    }
}

fn parse_pct(cmd: &str, arg: &str) -> Result<f64, String> {
    require(cmd, arg, "pct")?
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|_| format!("not a number: {arg}"))
}

/// One-line status after each change.
pub fn status_line(case: &ValueCase) -> String {
    match &case.financial {
        Some(fi) => format!(
            "{} feature(s) | investment {} | annual value {} | net ROI {} | payback {}",
            case.active_features.len(),
            format_currency(fi.total_cost),
            format_currency(fi.total_annual_benefit()),
            format_percent0(fi.net_roi),
            format_months(fi.payback_period)
        ),
        None => EMPTY_SELECTION_PROMPT.to_string(),
    }
}

pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Value case session. Type `help` for commands.")?;
    writeln!(out, "{}", status_line(session.value_case()))?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(SessionCommand::Apply(action)) => match session.dispatch(action) {
                Ok(case) => writeln!(out, "{}", status_line(case))?,
                Err(e) => {
                    tracing::warn!(error = %e, "action rejected");
                    writeln!(out, "error: {e}")?;
                }
            },
            Ok(SessionCommand::Show) => write!(out, "{}", render_dashboard(session.value_case()))?,
            Ok(SessionCommand::Export) => {
                write!(out, "{}", session.export(chrono::Utc::now()).render_markdown())?
            }
            Ok(SessionCommand::Help) => writeln!(out, "{HELP}")?,
            Ok(SessionCommand::Quit) => break,
            Ok(SessionCommand::Empty) => {}
            Err(msg) => writeln!(out, "{msg}")?,
        }
        out.flush()?;
    }
    Ok(())
}
