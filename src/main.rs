mod args;
mod error;
mod prompt;
mod replacer;
mod scanner;
mod validate;

use anyhow::{anyhow, Context, Result};
use args::{Args, Invocation, USAGE};
use clap::{error::ErrorKind, Parser};
use error::FsrError;
use log::{error, info, LevelFilter};
use prompt::Console;
use regex::Regex;
use replacer::Replacer;
use scanner::Target;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use validate::Verdict;

const DIRECTORY_LABEL: &str = "搜索目录";
const PATTERN_LABEL: &str = "搜索文件正则表达式";
const REPLACEMENT_LABEL: &str = "替换后的文件";
const CONFIRM_LABEL: &str = "是否确认要替换（Y-是[默认]，N-否）";

/// Main entry point of the application
///
/// Every outcome, errors included, is reported as text on stdout and the
/// process always exits with status 0.
fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return;
        }
        Err(e) => {
            eprintln!("{}", e);
            print!("{}", USAGE);
            return;
        }
    };
    setup_logging(args.verbose);

    let mut console = Console::stdio();
    if let Err(e) = run(&args, &mut console) {
        error!("{:?}", e);
        let _ = writeln!(io::stdout(), "{:#}", e);
    }
}

/// Configures logging verbosity.
///
/// Levels: none (warn), `-v` (info), `-vv` (debug), `-vvv` (trace).
fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

/// Resolve the three values, preview the matches, confirm, replace
///
/// Returns early without touching any file when the operator cancels at a
/// prompt or declines the confirmation.
fn run<R: BufRead, W: Write>(args: &Args, console: &mut Console<R, W>) -> Result<()> {
    let request = match args.invocation() {
        Invocation::Help => {
            write!(console.out(), "{}", USAGE)?;
            return Ok(());
        }
        Invocation::Run(request) => request,
    };

    let given = checked(console, request.directory, DIRECTORY_LABEL, validate::directory)?;
    let Some(directory) = resolve(console, given, DIRECTORY_LABEL, validate::directory)? else {
        return Ok(());
    };
    writeln!(console.out(), "搜索目录为：{}", directory)?;

    let given = checked(console, request.pattern, PATTERN_LABEL, validate::pattern)?;
    let Some(pattern) = resolve(console, given, PATTERN_LABEL, validate::pattern)? else {
        return Ok(());
    };
    let pattern =
        Regex::new(&pattern).with_context(|| format!("Invalid pattern: {}", pattern))?;

    // Known before the preview only when given on the command line
    let replacement = checked(
        console,
        request.replacement,
        REPLACEMENT_LABEL,
        validate::replacement,
    )?;

    writeln!(console.out(), "需要被替换的文件如下：")?;
    let exclude = replacement.as_ref().map(PathBuf::from);
    let preview = Target::new(&directory, pattern.clone(), exclude);
    let out = console.out();
    let outcome = preview.for_each_match(|path, _| {
        writeln!(out, "{}", path.display())?;
        Ok(())
    });
    report(console, "preview", outcome)?;

    let Some(replacement) = resolve(console, replacement, REPLACEMENT_LABEL, validate::replacement)?
    else {
        return Ok(());
    };
    let replacer = Replacer::new(&replacement)
        .ok_or_else(|| anyhow!("{} 没有文件名", replacement))?;
    writeln!(console.out(), "替换后的文件为：{}", replacer.source().display())?;

    match console.prompt_for(CONFIRM_LABEL, validate::confirmation)? {
        Some(answer) if validate::confirmed(&answer) => {}
        _ => {
            info!("replacement declined, nothing changed");
            return Ok(());
        }
    }

    writeln!(console.out(), "开始替换")?;
    let target = Target::new(&directory, pattern, Some(PathBuf::from(&replacement)));
    let out = console.out();
    let outcome = target.for_each_match(|path, _| {
        replacer.replace(path, out)?;
        Ok(())
    });
    report(console, "replacement", outcome)?;

    writeln!(console.out(), "替换完成！")?;
    Ok(())
}

/// Keep a command line value only if `validate` accepts it
///
/// A rejected value is reported the same way a rejected answer is, and the
/// caller then prompts for it.
fn checked<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    given: Option<String>,
    label: &str,
    validate: fn(&str) -> Verdict,
) -> Result<Option<String>> {
    let Some(value) = given else {
        return Ok(None);
    };

    match validate(&value) {
        Ok(()) => Ok(Some(value)),
        Err(reason) => {
            info!("discarding {} from the command line: {:?}", label, value);
            writeln!(console.out(), "{} 输入错误：{}，请重新输入！", label, reason)?;
            Ok(None)
        }
    }
}

/// Use the command line value when there is one, otherwise prompt for it
///
/// # Arguments
/// * `given` - Value that survived `checked`, if any
/// * `label` - Prompt label, also used in the error line
/// * `validate` - Check applied to every prompted answer
///
/// # Returns
/// * `Result<Option<String>>` - `None` when the operator cancelled
fn resolve<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    given: Option<String>,
    label: &str,
    validate: fn(&str) -> Verdict,
) -> Result<Option<String>> {
    match given {
        Some(value) => Ok(Some(value)),
        None => console.prompt_for(label, validate),
    }
}

/// Print the error that ended a pass; only a broken stdout is fatal
fn report<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    pass: &str,
    outcome: error::Result<usize>,
) -> Result<()> {
    match outcome {
        Ok(count) => {
            info!("{} pass: {} file(s)", pass, count);
            Ok(())
        }
        Err(FsrError::Output(e)) => Err(e).context("Failed to write to stdout"),
        Err(e) => {
            error!("{} pass stopped: {}", pass, e);
            writeln!(console.out(), "{}", e)?;
            Ok(())
        }
    }
}
