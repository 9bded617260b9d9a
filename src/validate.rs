use regex::Regex;
use std::fs;

/// Outcome of a validator: `Err` carries the reason shown to the operator
pub type Verdict = Result<(), &'static str>;

/// Check that `input` names an existing directory
pub fn directory(input: &str) -> Verdict {
    let metadata = fs::metadata(input).map_err(|_| "不存在或无法读取")?;

    if !metadata.is_dir() {
        return Err("不是有效的目录");
    }

    Ok(())
}

/// Check that `input` compiles as a regular expression
pub fn pattern(input: &str) -> Verdict {
    Regex::new(input).map(|_| ()).map_err(|_| "不是有效的正则表达式")
}

/// Check that `input` names something that can be copied over the matches
pub fn replacement(input: &str) -> Verdict {
    let metadata = fs::metadata(input).map_err(|_| "不存在或无法读取")?;

    if metadata.is_dir() {
        return Err("不能替换目录");
    }

    Ok(())
}

/// Accept an empty answer (the default) or Y/N in either case
pub fn confirmation(input: &str) -> Verdict {
    match input {
        "" | "Y" | "y" | "N" | "n" => Ok(()),
        _ => Err("请输入 Y 或 N"),
    }
}

/// Whether a validated confirmation answer means "go ahead"
pub fn confirmed(answer: &str) -> bool {
    matches!(answer, "" | "Y" | "y")
}
